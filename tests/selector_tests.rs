//! Label index and selector semantics tests

use std::collections::BTreeMap;

use kubegraph::graph::{LabelIndex, LabelSelector, Operator, Requirement, matches_expressions};
use kubegraph::models::Resource;
use serde_json::json;

fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn labelled(kind: &str, name: &str, pairs: &[(&str, &str)]) -> Resource {
    Resource::from_value(json!({
        "kind": kind,
        "metadata": {"name": name, "labels": labels(pairs)}
    }))
    .unwrap()
}

fn ids(resources: Vec<&Resource>) -> Vec<String> {
    resources.into_iter().map(Resource::id).collect()
}

fn collection() -> Vec<Resource> {
    vec![
        labelled("Pod", "p", &[("k", "v")]),
        labelled("Deployment", "d", &[("k", "v"), ("tier", "web")]),
        labelled("DaemonSet", "ds", &[("k", "v")]),
        labelled("StatefulSet", "ss", &[("k", "other")]),
        labelled("Job", "j", &[("k", "v")]),
        labelled("CronJob", "cj", &[("k", "v")]),
        labelled("ReplicaSet", "rs", &[("k", "v")]),
        labelled("ServiceAccount", "sa", &[("k", "v")]),
        labelled("Secret", "s", &[("k", "v")]),
        labelled("Service", "svc", &[("k", "v")]),
    ]
}

#[test]
fn test_empty_match_returns_nothing() {
    let resources = collection();
    let index = LabelIndex::build(&resources);
    assert!(index.match_labels(&BTreeMap::new()).is_empty());
}

#[test]
fn test_match_covers_pod_carrying_kinds_only() {
    let resources = collection();
    let index = LabelIndex::build(&resources);
    assert_eq!(
        ids(index.match_labels(&labels(&[("k", "v")]))),
        vec![
            "Pod/p",
            "Deployment/d",
            "DaemonSet/ds",
            "Job/j",
            "CronJob/cj",
            "ReplicaSet/rs"
        ]
    );
}

#[test]
fn test_match_requires_superset() {
    let resources = collection();
    let index = LabelIndex::build(&resources);
    assert_eq!(
        ids(index.match_labels(&labels(&[("k", "v"), ("tier", "web")]))),
        vec!["Deployment/d"]
    );
    assert!(index.match_labels(&labels(&[("k", "missing")])).is_empty());
}

#[test]
fn test_in_and_not_in() {
    let staging = labels(&[("env", "staging")]);
    let prod = labels(&[("env", "prod")]);
    let unlabelled = labels(&[]);

    let in_prod = [Requirement::new("env", Operator::In, &["prod"])];
    assert!(!matches_expressions(&staging, &in_prod));
    assert!(matches_expressions(&prod, &in_prod));
    assert!(!matches_expressions(&unlabelled, &in_prod));

    let not_in_prod = [Requirement::new("env", Operator::NotIn, &["prod"])];
    assert!(matches_expressions(&staging, &not_in_prod));
    assert!(!matches_expressions(&prod, &not_in_prod));
    assert!(matches_expressions(&unlabelled, &not_in_prod));
}

#[test]
fn test_expressions_are_anded() {
    let expressions = [
        Requirement::new("tier", Operator::Exists, &[]),
        Requirement::new("canary", Operator::DoesNotExist, &[]),
    ];
    assert!(matches_expressions(&labels(&[("tier", "web")]), &expressions));
    assert!(!matches_expressions(
        &labels(&[("tier", "web"), ("canary", "true")]),
        &expressions
    ));
    assert!(!matches_expressions(&labels(&[]), &expressions));
}

#[test]
fn test_match_selector_from_document() {
    let resources = collection();
    let index = LabelIndex::build(&resources);

    let selector = LabelSelector::from_value(&json!({
        "matchExpressions": [
            {"key": "k", "operator": "In", "values": ["v", "other"]},
            {"key": "tier", "operator": "DoesNotExist"},
            {"operator": "Exists"}
        ]
    }))
    .unwrap();

    assert_eq!(selector.match_expressions.len(), 2);
    assert_eq!(
        ids(index.match_selector(&selector)),
        vec![
            "Pod/p",
            "DaemonSet/ds",
            "StatefulSet/ss",
            "Job/j",
            "CronJob/cj",
            "ReplicaSet/rs"
        ]
    );
}

#[test]
fn test_empty_structured_selector_selects_every_indexed_resource() {
    let resources = collection();
    let index = LabelIndex::build(&resources);
    let selector = LabelSelector::from_value(&json!({})).unwrap();
    assert_eq!(index.match_selector(&selector).len(), 7);
}
