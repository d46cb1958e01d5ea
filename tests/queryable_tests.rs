//! Integration tests for the queryable core.
//!
//! These exercise the engine's contract end to end against an in-memory
//! transport: pure and idempotent path rendering, immutability across
//! derivations, lazy request building, and the local error taxonomy firing
//! before any network traffic.

mod common;

use std::sync::Arc;

use common::ScriptedTransport;
use graph_todo::{
    HttpMethod, InvalidPathError, Queryable, RequestPath, SelectorStyle, Transport, TransportError,
};
use serde_json::json;

fn root(transport: &Arc<ScriptedTransport>) -> Queryable {
    Queryable::root(Arc::clone(transport) as Arc<dyn Transport>)
}

// ============================================================================
// Path rendering
// ============================================================================

#[test]
fn rendering_is_pure_and_idempotent() {
    let path = RequestPath::new()
        .with_segment("me")
        .unwrap()
        .with_segment("todo")
        .unwrap()
        .with_segment("lists")
        .unwrap()
        .with_id("L1")
        .unwrap()
        .with_query("token", "abc");

    let first = path.to_request_path();
    let second = path.to_request_path();
    assert_eq!(first, second);
    assert_eq!(first, "me/todo/lists/L1?token=abc");
}

#[test]
fn parent_path_is_unchanged_by_child_derivation() {
    let transport = ScriptedTransport::new();
    let lists = root(&transport)
        .derive_child("me")
        .unwrap()
        .derive_child("todo")
        .unwrap()
        .derive_child("lists")
        .unwrap();

    let before = lists.path().to_request_path();
    let _delta = lists.derive_child("delta").unwrap();
    let _one = lists.select("L1").unwrap();
    let _decorated = lists.with_query("token", "t");
    let after = lists.path().to_request_path();

    assert_eq!(before, after);
}

#[test]
fn selector_styles_render_their_conventions() {
    let transport = ScriptedTransport::new();

    let slash = root(&transport)
        .derive_child("tasks")
        .unwrap()
        .select("42")
        .unwrap();
    assert_eq!(slash.path().to_request_path(), "tasks/42");

    let parens = Queryable::root_with_style(
        Arc::clone(&transport) as Arc<dyn Transport>,
        SelectorStyle::Parenthesized,
    )
    .derive_child("tasks")
    .unwrap()
    .select("42")
    .unwrap();
    assert_eq!(parens.path().to_request_path(), "tasks('42')");
}

#[test]
fn double_selection_fails_at_construction_time() {
    let transport = ScriptedTransport::new();
    let one = root(&transport)
        .derive_child("lists")
        .unwrap()
        .select("L1")
        .unwrap();

    let result = one.select("L2");
    assert!(matches!(
        result,
        Err(InvalidPathError::AlreadySelected { .. })
    ));
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn malformed_segments_fail_at_construction_time() {
    let transport = ScriptedTransport::new();
    let node = root(&transport);

    assert!(matches!(
        node.derive_child(""),
        Err(InvalidPathError::EmptySegment)
    ));
    assert!(matches!(
        node.derive_child("a/b"),
        Err(InvalidPathError::IllegalSegment { .. })
    ));
    assert_eq!(transport.request_count(), 0);
}

// ============================================================================
// Lazy request building
// ============================================================================

#[tokio::test]
async fn navigation_issues_no_requests_until_invoked() {
    let transport = ScriptedTransport::new();
    let tasks = root(&transport)
        .derive_child("me")
        .unwrap()
        .derive_child("todo")
        .unwrap()
        .derive_child("lists")
        .unwrap()
        .select("L1")
        .unwrap()
        .derive_child("tasks")
        .unwrap();

    assert_eq!(transport.request_count(), 0);

    tasks.get().await.unwrap();
    assert_eq!(transport.request_count(), 1);

    let request = &transport.requests()[0];
    assert_eq!(request.method, HttpMethod::Get);
    assert_eq!(request.path, "me/todo/lists/L1/tasks");
    assert!(request.body.is_none());
}

#[tokio::test]
async fn each_invocation_derives_a_fresh_request() {
    let transport = ScriptedTransport::new();
    let node = root(&transport).derive_child("lists").unwrap();

    node.get().await.unwrap();
    node.invoke(HttpMethod::Post, Some(json!({"displayName": "x"})), None)
        .await
        .unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].path, requests[1].path);
    assert_eq!(requests[0].method, HttpMethod::Get);
    assert_eq!(requests[1].method, HttpMethod::Post);
}

#[tokio::test]
async fn query_decorations_reach_the_wire_path() {
    let transport = ScriptedTransport::new();
    let node = root(&transport)
        .derive_child("lists")
        .unwrap()
        .derive_child("delta")
        .unwrap()
        .with_query("token", "abc");

    node.get().await.unwrap();

    assert_eq!(transport.requests()[0].path, "lists/delta?token=abc");
}

#[tokio::test]
async fn post_without_body_is_rejected_before_submission() {
    let transport = ScriptedTransport::new();
    let node = root(&transport).derive_child("lists").unwrap();

    let result = node.invoke(HttpMethod::Post, None, None).await;
    assert!(matches!(result, Err(TransportError::InvalidRequest(_))));
    assert_eq!(transport.request_count(), 0);
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test]
async fn identical_nodes_invoke_concurrently_and_independently() {
    let transport = ScriptedTransport::new();
    let node = root(&transport).derive_child("lists").unwrap();

    let first = node.clone();
    let second = node.clone();
    let (a, b) = tokio::join!(first.get(), second.get());
    a.unwrap();
    b.unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].path, "lists");
    assert_eq!(requests[1].path, "lists");
}
