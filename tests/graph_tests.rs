//! Graph assembly tests
//!
//! End-to-end scenarios from resources to adjacency lists, plus the seeding,
//! dedup and partial-output guarantees.

use kubegraph::graph::{DependencyGraph, Edge, Reason, build_dependency_graph};
use kubegraph::models::Resource;
use serde_json::{Value, json};

fn resources(docs: Vec<Value>) -> Vec<Resource> {
    docs.into_iter()
        .map(|doc| Resource::from_value(doc).unwrap())
        .collect()
}

fn deployment(name: &str, labels: Value) -> Value {
    json!({
        "apiVersion": "apps/v1",
        "kind": "Deployment",
        "metadata": {"name": name, "labels": labels},
        "spec": {"template": {"spec": {"containers": [{"name": "app", "image": "nginx"}]}}}
    })
}

fn assert_no_duplicates(graph: &DependencyGraph) {
    for (parent, edges) in graph.parents() {
        for (i, edge) in edges.iter().enumerate() {
            assert!(
                !edges[..i].contains(edge),
                "duplicate edge {:?} under {}",
                edge,
                parent
            );
        }
    }
}

#[test]
fn test_service_selects_deployment() {
    let input = resources(vec![
        deployment("web", json!({"app": "web"})),
        json!({
            "apiVersion": "v1",
            "kind": "Service",
            "metadata": {"name": "web-svc"},
            "spec": {"selector": {"app": "web"}}
        }),
    ]);

    let graph = build_dependency_graph(&input);

    assert_eq!(
        graph.edges("Service/web-svc"),
        &[Edge::new("Deployment/web", Reason::Selector)]
    );
}

#[test]
fn test_ingress_backend_and_tls() {
    let input = resources(vec![json!({
        "apiVersion": "networking.k8s.io/v1",
        "kind": "Ingress",
        "metadata": {"name": "my-ing"},
        "spec": {
            "tls": [{"hosts": ["example.com"], "secretName": "tls-secret"}],
            "rules": [{"host": "example.com", "http": {"paths": [{
                "path": "/",
                "pathType": "Prefix",
                "backend": {"service": {"name": "my-service", "port": {"number": 80}}}
            }]}}]
        }
    })]);

    let graph = build_dependency_graph(&input);

    let edges = graph.edges("Ingress/my-ing");
    assert_eq!(edges.len(), 2);
    assert!(edges.contains(&Edge::new("Service/my-service", Reason::IngressBackend)));
    assert!(edges.contains(&Edge::new("Secret/tls-secret", Reason::TlsSecret)));
}

#[test]
fn test_network_policy_match_expressions() {
    let input = resources(vec![
        deployment("a", json!({"env": "prod"})),
        deployment("b", json!({"env": "prod"})),
        deployment("c", json!({"env": "staging"})),
        json!({
            "apiVersion": "networking.k8s.io/v1",
            "kind": "NetworkPolicy",
            "metadata": {"name": "prod-only"},
            "spec": {"podSelector": {"matchExpressions": [
                {"key": "env", "operator": "In", "values": ["prod"]}
            ]}}
        }),
    ]);

    let graph = build_dependency_graph(&input);

    assert_eq!(
        graph.edges("NetworkPolicy/prod-only"),
        &[
            Edge::new("Deployment/a", Reason::PodSelector),
            Edge::new("Deployment/b", Reason::PodSelector)
        ]
    );
}

#[test]
fn test_unevaluable_selectors_select_nothing() {
    let input = resources(vec![
        deployment("prod", json!({"env": "prod"})),
        deployment("staging", json!({"env": "staging"})),
        json!({
            "kind": "NetworkPolicy",
            "metadata": {"name": "lowercase-op"},
            "spec": {"podSelector": {"matchExpressions": [
                {"key": "env", "operator": "in", "values": ["prod"]}
            ]}}
        }),
        json!({
            "kind": "PodDisruptionBudget",
            "metadata": {"name": "numeric-values"},
            "spec": {"selector": {"matchExpressions": [
                {"key": "env", "operator": "In", "values": [1]}
            ]}}
        }),
        json!({
            "kind": "PodDisruptionBudget",
            "metadata": {"name": "incomplete"},
            "spec": {"selector": {
                "matchLabels": {"env": "prod"},
                "matchExpressions": [{"operator": "Exists"}]
            }}
        }),
    ]);

    let graph = build_dependency_graph(&input);

    assert!(graph.edges("NetworkPolicy/lowercase-op").is_empty());
    assert!(graph.edges("PodDisruptionBudget/numeric-values").is_empty());
    assert_eq!(
        graph.edges("PodDisruptionBudget/incomplete"),
        &[Edge::new("Deployment/prod", Reason::PdbSelector)]
    );
}

#[test]
fn test_same_secret_through_two_volumes() {
    let input = resources(vec![json!({
        "apiVersion": "apps/v1",
        "kind": "Deployment",
        "metadata": {"name": "web"},
        "spec": {"template": {"spec": {
            "volumes": [
                {"name": "a", "secret": {"secretName": "shared"}},
                {"name": "b", "secret": {"secretName": "shared"}}
            ],
            "containers": [{"name": "app"}]
        }}}
    })]);

    let graph = build_dependency_graph(&input);

    assert_eq!(
        graph.edges("Deployment/web"),
        &[Edge::new("Secret/shared", Reason::SecretRef)]
    );
}

#[test]
fn test_every_resource_is_a_key() {
    let input = resources(vec![
        deployment("web", json!({"app": "web"})),
        json!({"kind": "ConfigMap", "metadata": {"name": "unused"}}),
        json!({"kind": "ClusterRole", "metadata": {"name": "reader"}}),
        json!({"kind": "Widget", "metadata": {"name": "custom"}}),
    ]);

    let graph = build_dependency_graph(&input);

    for resource in &input {
        assert!(graph.has_key(&resource.id()), "{} missing", resource.id());
    }
    assert!(graph.edges("ConfigMap/unused").is_empty());
}

#[test]
fn test_referenced_only_nodes_are_edge_targets() {
    let input = resources(vec![json!({
        "kind": "Pod",
        "metadata": {"name": "runner"},
        "spec": {"serviceAccountName": "builder", "containers": []}
    })]);

    let graph = build_dependency_graph(&input);

    assert!(!graph.has_key("ServiceAccount/builder"));
    assert!(graph.contains_node("ServiceAccount/builder"));
    assert!(graph.nodes().contains("ServiceAccount/builder"));
}

#[test]
fn test_realistic_application() {
    let input = resources(vec![
        json!({
            "kind": "Deployment",
            "metadata": {"name": "api", "labels": {"app": "api"}},
            "spec": {"template": {
                "metadata": {"labels": {"app": "api"}},
                "spec": {
                    "serviceAccountName": "api",
                    "containers": [{
                        "name": "api",
                        "envFrom": [{"configMapRef": {"name": "api-config"}}],
                        "env": [{"name": "DB_PASSWORD", "valueFrom": {"secretKeyRef": {"name": "db", "key": "password"}}}]
                    }],
                    "volumes": [{"name": "db", "secret": {"secretName": "db"}}]
                }
            }}
        }),
        json!({
            "kind": "ReplicaSet",
            "metadata": {
                "name": "api-5d8f",
                "labels": {"app": "api"},
                "ownerReferences": [{"kind": "Deployment", "name": "api"}]
            }
        }),
        json!({"kind": "Service", "metadata": {"name": "api"}, "spec": {"selector": {"app": "api"}}}),
        json!({
            "kind": "HorizontalPodAutoscaler",
            "metadata": {"name": "api"},
            "spec": {"scaleTargetRef": {"kind": "Deployment", "name": "api"}}
        }),
        json!({
            "kind": "PodDisruptionBudget",
            "metadata": {"name": "api"},
            "spec": {"selector": {"matchLabels": {"app": "api"}}}
        }),
        json!({"kind": "ServiceAccount", "metadata": {"name": "api", "labels": {"app": "api"}}}),
        json!({"kind": "ConfigMap", "metadata": {"name": "api-config"}}),
        json!({"kind": "Secret", "metadata": {"name": "db"}}),
    ]);

    let graph = build_dependency_graph(&input);
    assert_no_duplicates(&graph);

    assert_eq!(
        graph.edges("Deployment/api"),
        &[
            Edge::new("ReplicaSet/api-5d8f", Reason::OwnerRef),
            Edge::new("Secret/db", Reason::SecretRef),
            Edge::new("ServiceAccount/api", Reason::ServiceAccountName),
            Edge::new("ConfigMap/api-config", Reason::ConfigMapRef),
        ]
    );
    assert_eq!(
        graph.edges("Service/api"),
        &[
            Edge::new("Deployment/api", Reason::Selector),
            Edge::new("ReplicaSet/api-5d8f", Reason::Selector)
        ]
    );
    assert_eq!(
        graph.edges("PodDisruptionBudget/api"),
        &[
            Edge::new("Deployment/api", Reason::PdbSelector),
            Edge::new("ReplicaSet/api-5d8f", Reason::PdbSelector)
        ]
    );
    assert_eq!(
        graph.edges("HorizontalPodAutoscaler/api"),
        &[Edge::new("Deployment/api", Reason::ScaleTargetRef)]
    );

    let stats = graph.stats();
    assert_eq!(stats.nodes, 8);
    assert_eq!(stats.edges, 9);
    assert_eq!(stats.by_reason.get(&Reason::Selector), Some(&2));
}

#[test]
fn test_malformed_input_still_builds() {
    let input = resources(vec![
        json!({
            "kind": "Service",
            "metadata": {"name": "broken"},
            "spec": {"selector": ["app", "web"]}
        }),
        json!({
            "kind": "Deployment",
            "metadata": {"name": "web", "labels": {"app": "web"}},
            "spec": {"template": "not-a-template"}
        }),
        json!({
            "kind": "Ingress",
            "metadata": {"name": "half"},
            "spec": {"rules": "oops", "tls": [{"secretName": "cert"}]}
        }),
    ]);

    let graph = build_dependency_graph(&input);

    assert!(graph.edges("Service/broken").is_empty());
    assert!(graph.edges("Deployment/web").is_empty());
    assert_eq!(
        graph.edges("Ingress/half"),
        &[Edge::new("Secret/cert", Reason::TlsSecret)]
    );
}

#[test]
fn test_focus_on_built_graph() {
    let input = resources(vec![
        deployment("web", json!({"app": "web"})),
        json!({"kind": "Service", "metadata": {"name": "web"}, "spec": {"selector": {"app": "web"}}}),
        deployment("batch", json!({"app": "batch"})),
        json!({"kind": "Service", "metadata": {"name": "batch"}, "spec": {"selector": {"app": "batch"}}}),
    ]);

    let graph = build_dependency_graph(&input);
    let focused = graph.focus("Deployment/web").unwrap();

    let nodes: Vec<&str> = focused.nodes().into_iter().collect();
    assert_eq!(nodes, vec!["Deployment/web", "Service/web"]);
    assert!(graph.focus("Deployment/missing").is_none());
}

#[test]
fn test_namespaces_collapse_into_one_identity() {
    let input = resources(vec![
        json!({"kind": "ConfigMap", "metadata": {"name": "settings", "namespace": "a"}}),
        json!({"kind": "ConfigMap", "metadata": {"name": "settings", "namespace": "b"}}),
    ]);

    let graph = build_dependency_graph(&input);
    assert_eq!(graph.nodes().len(), 1);
}
