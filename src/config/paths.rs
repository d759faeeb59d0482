//! Configuration directory resolution

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Get the configuration directory path
///
/// `KUBEGRAPH_CONFIG_DIR`, then `$XDG_CONFIG_HOME/kubegraph`, then the
/// platform config directory.
pub fn config_dir() -> PathBuf {
    resolve_config_dir(
        std::env::var_os("KUBEGRAPH_CONFIG_DIR").map(PathBuf::from),
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
    )
}

fn resolve_config_dir(explicit: Option<PathBuf>, xdg_config_home: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| xdg_config_home.map(|home| home.join("kubegraph")))
        .or_else(|| ProjectDirs::from("", "", "kubegraph").map(|dirs| dirs.config_dir().to_path_buf()))
        .unwrap_or_else(|| PathBuf::from(".config").join("kubegraph"))
}

/// Get the root configuration file path
pub fn root_config_path() -> PathBuf {
    config_dir().join("config.yaml")
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
