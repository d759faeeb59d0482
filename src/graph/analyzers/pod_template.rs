//! References made from a pod spec: volumes, service account, image pull
//! secrets, and container env / envFrom.

use serde_json::Value;

use crate::graph::dependency_graph::DependencyGraph;
use crate::graph::models::{Edge, Reason};
use crate::models::{FieldAccess, Resource, node_id};

use super::present;

const CONTAINER_LISTS: [&str; 3] = ["containers", "initContainers", "ephemeralContainers"];

/// Collects the edges for one resource's pod spec
struct PodSpecScan<'a> {
    resource: &'a Resource,
    parent: String,
    graph: &'a mut DependencyGraph,
}

impl PodSpecScan<'_> {
    fn emit(&mut self, kind: &str, name: &str, reason: Reason) {
        self.graph
            .add_edge(self.parent.as_str(), Edge::new(node_id(kind, name), reason));
    }

    /// Emit for a non-empty string at `path` under `value`
    fn emit_at(&mut self, value: &Value, path: &[&str], kind: &str, reason: Reason) {
        if let Some(name) = present(self.resource, value.non_empty_str_field(path)) {
            self.emit(kind, name, reason);
        }
    }

    /// Entries of an array field, skipping it entirely if misshapen
    fn entries<'v>(&self, value: &'v Value, path: &[&str]) -> &'v [Value] {
        present(self.resource, value.array_field(path))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn volumes(&mut self, spec: &Value) {
        for volume in self.entries(spec, &["volumes"]) {
            self.emit_at(volume, &["secret", "secretName"], "Secret", Reason::SecretRef);
            self.emit_at(volume, &["configMap", "name"], "ConfigMap", Reason::ConfigMapRef);
            self.emit_at(
                volume,
                &["persistentVolumeClaim", "claimName"],
                "PersistentVolumeClaim",
                Reason::PvcRef,
            );
            for source in self.entries(volume, &["projected", "sources"]) {
                self.emit_at(source, &["secret", "name"], "Secret", Reason::SecretRef);
                self.emit_at(source, &["configMap", "name"], "ConfigMap", Reason::ConfigMapRef);
            }
        }
    }

    fn container(&mut self, container: &Value) {
        for env in self.entries(container, &["env"]) {
            self.emit_at(
                env,
                &["valueFrom", "secretKeyRef", "name"],
                "Secret",
                Reason::SecretRef,
            );
            self.emit_at(
                env,
                &["valueFrom", "configMapKeyRef", "name"],
                "ConfigMap",
                Reason::ConfigMapRef,
            );
        }
        for env_from in self.entries(container, &["envFrom"]) {
            self.emit_at(env_from, &["secretRef", "name"], "Secret", Reason::SecretRef);
            self.emit_at(
                env_from,
                &["configMapRef", "name"],
                "ConfigMap",
                Reason::ConfigMapRef,
            );
        }
    }

    fn scan(&mut self, spec: &Value) {
        self.volumes(spec);
        self.emit_at(
            spec,
            &["serviceAccountName"],
            "ServiceAccount",
            Reason::ServiceAccountName,
        );
        for pull_secret in self.entries(spec, &["imagePullSecrets"]) {
            self.emit_at(pull_secret, &["name"], "Secret", Reason::SecretRef);
        }
        for list in CONTAINER_LISTS {
            for container in self.entries(spec, &[list]) {
                self.container(container);
            }
        }
    }
}

pub(super) fn analyze(resource: &Resource, graph: &mut DependencyGraph) {
    let Some(path) = resource.known_kind().and_then(|kind| kind.pod_spec_path()) else {
        return;
    };
    let Some(spec) = present(resource, resource.field(path)) else {
        return;
    };

    PodSpecScan {
        resource,
        parent: resource.id(),
        graph,
    }
    .scan(spec);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(doc: Value) -> DependencyGraph {
        let resource = Resource::from_value(doc).unwrap();
        let mut graph = DependencyGraph::new();
        analyze(&resource, &mut graph);
        graph
    }

    #[test]
    fn test_full_pod_spec() {
        let graph = run(json!({
            "kind": "Deployment",
            "metadata": {"name": "web"},
            "spec": {"template": {"spec": {
                "serviceAccountName": "web-sa",
                "imagePullSecrets": [{"name": "registry"}],
                "volumes": [
                    {"name": "certs", "secret": {"secretName": "web-tls"}},
                    {"name": "conf", "configMap": {"name": "web-config"}},
                    {"name": "data", "persistentVolumeClaim": {"claimName": "web-data"}},
                    {"name": "bundle", "projected": {"sources": [
                        {"secret": {"name": "bundle-secret"}},
                        {"configMap": {"name": "bundle-config"}},
                        {"serviceAccountToken": {"path": "token"}}
                    ]}}
                ],
                "initContainers": [{"name": "migrate", "envFrom": [{"secretRef": {"name": "db"}}]}],
                "containers": [{
                    "name": "app",
                    "env": [
                        {"name": "PLAIN", "value": "x"},
                        {"name": "PASS", "valueFrom": {"secretKeyRef": {"name": "db", "key": "password"}}},
                        {"name": "MODE", "valueFrom": {"configMapKeyRef": {"name": "flags", "key": "mode"}}}
                    ],
                    "envFrom": [{"configMapRef": {"name": "web-env"}}]
                }],
                "ephemeralContainers": [{
                    "name": "debugger",
                    "env": [{"name": "LEVEL", "valueFrom": {"configMapKeyRef": {"name": "debug-flags", "key": "level"}}}],
                    "envFrom": [{"secretRef": {"name": "debug-token"}}]
                }]
            }}}
        }));

        assert_eq!(
            graph.edges("Deployment/web"),
            &[
                Edge::new("Secret/web-tls", Reason::SecretRef),
                Edge::new("ConfigMap/web-config", Reason::ConfigMapRef),
                Edge::new("PersistentVolumeClaim/web-data", Reason::PvcRef),
                Edge::new("Secret/bundle-secret", Reason::SecretRef),
                Edge::new("ConfigMap/bundle-config", Reason::ConfigMapRef),
                Edge::new("ServiceAccount/web-sa", Reason::ServiceAccountName),
                Edge::new("Secret/registry", Reason::SecretRef),
                Edge::new("Secret/db", Reason::SecretRef),
                Edge::new("ConfigMap/flags", Reason::ConfigMapRef),
                Edge::new("ConfigMap/web-env", Reason::ConfigMapRef),
                Edge::new("Secret/db", Reason::SecretRef),
                Edge::new("ConfigMap/debug-flags", Reason::ConfigMapRef),
                Edge::new("Secret/debug-token", Reason::SecretRef),
            ]
        );
    }

    #[test]
    fn test_pod_and_cronjob_paths() {
        let pod = run(json!({
            "kind": "Pod",
            "metadata": {"name": "p"},
            "spec": {"serviceAccountName": "runner"}
        }));
        assert_eq!(
            pod.edges("Pod/p"),
            &[Edge::new("ServiceAccount/runner", Reason::ServiceAccountName)]
        );

        let cron = run(json!({
            "kind": "CronJob",
            "metadata": {"name": "nightly"},
            "spec": {"jobTemplate": {"spec": {"template": {"spec": {
                "containers": [{"envFrom": [{"secretRef": {"name": "backup-creds"}}]}]
            }}}}}
        }));
        assert_eq!(
            cron.edges("CronJob/nightly"),
            &[Edge::new("Secret/backup-creds", Reason::SecretRef)]
        );
    }

    #[test]
    fn test_kinds_without_pod_template_are_skipped() {
        let graph = run(json!({
            "kind": "Service",
            "metadata": {"name": "web"},
            "spec": {"serviceAccountName": "not-a-pod"}
        }));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_malformed_fields_skip_only_that_reference() {
        let graph = run(json!({
            "kind": "Pod",
            "metadata": {"name": "p"},
            "spec": {
                "volumes": {"not": "a list"},
                "serviceAccountName": "sa",
                "containers": [
                    {"env": [{"valueFrom": "bogus"}, {"valueFrom": {"secretKeyRef": {"name": "ok"}}}]}
                ]
            }
        }));
        assert_eq!(
            graph.edges("Pod/p"),
            &[
                Edge::new("ServiceAccount/sa", Reason::ServiceAccountName),
                Edge::new("Secret/ok", Reason::SecretRef)
            ]
        );
    }
}
