//! Image output through an external Graphviz binary

use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::{OutputFormat, RenderError};

/// Pipe DOT text through `<dot_binary> -T<format>` and return its stdout
pub async fn render_image(
    dot: &str,
    format: OutputFormat,
    dot_binary: &str,
) -> Result<Vec<u8>, RenderError> {
    let spawn_error = |source| RenderError::Spawn {
        binary: dot_binary.to_string(),
        source,
    };

    tracing::debug!("Running {} -T{}", dot_binary, format);
    let mut child = Command::new(dot_binary)
        .arg(format!("-T{}", format))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(spawn_error)?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(dot.as_bytes()).await.map_err(spawn_error)?;
        // Dropping stdin closes the pipe so the layout tool can finish
    }

    let output = child.wait_with_output().await.map_err(spawn_error)?;
    if !output.status.success() {
        return Err(RenderError::ImageFailed {
            binary: dot_binary.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(output.stdout)
}
