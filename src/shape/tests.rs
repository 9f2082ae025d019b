//! Tests for shape module

use super::*;
use crate::error::Error;
use crate::testing::{request, response, MessageSpec, Op, Revision, DRAFT_ACTIONS, SEND_ACTIONS};
use serde_json::json;

const THREAD: &str = "thread-a:r263523620390330024";
const MESSAGE: &str = "msg-a:r8190137112111191537";

fn draft() -> MessageSpec {
    MessageSpec::new(MESSAGE, "<div dir=\"ltr\">a</div>", DRAFT_ACTIONS)
}

// ============================================================================
// Walk Tests
// ============================================================================

#[test]
fn test_walk_found() {
    let value = json!([0, [1, ["x"]]]);
    assert_eq!(walk(&value, &[1, 1, 0]), Lookup::Found(&json!("x")));
    assert_eq!(walk(&value, &[]), Lookup::Found(&value));
}

#[test]
fn test_walk_missing() {
    let value = json!([0, [1, null]]);
    assert_eq!(walk(&value, &[5]), Lookup::Missing);
    assert_eq!(walk(&value, &[1, 1]), Lookup::Missing);
    assert_eq!(walk(&value, &[1, 1, 3]), Lookup::Missing);
}

#[test]
fn test_walk_malformed() {
    let value = json!([0, [1, "text"]]);
    assert_eq!(
        walk(&value, &[0, 2]),
        Lookup::Malformed {
            depth: 1,
            found: "number"
        }
    );
    assert_eq!(
        walk(&json!({"a": 1}), &[0]),
        Lookup::Malformed {
            depth: 0,
            found: "object"
        }
    );
}

#[test]
fn test_to_pointer() {
    assert_eq!(to_pointer(&[]), "");
    assert_eq!(to_pointer(&[1, 0, 13]), "/1/0/13");

    let value = json!([0, [1, [2, 3]]]);
    assert_eq!(value.pointer(&to_pointer(&[1, 1, 1])), Some(&json!(3)));
}

#[test]
fn test_scope_reads() {
    let value = json!(["id", null, 7, ["^a", "^b"], ["^a", 1]]);
    let scope = Scope::new(&value, vec![1, 0], "test");

    assert_eq!(scope.required_str(&[0], "id").unwrap(), "id");
    assert_eq!(scope.optional_str(&[1], "subject").unwrap(), None);
    assert_eq!(
        scope.required_str_list(&[3], "actions").unwrap(),
        vec!["^a".to_string(), "^b".to_string()]
    );

    let err = scope.required_str(&[1], "subject").unwrap_err();
    assert!(matches!(err, Error::MissingField { ref field, .. } if field == "subject"));

    let err = scope.required_str(&[2], "body").unwrap_err();
    assert!(matches!(err, Error::MalformedPayload { ref path, .. } if path == "/1/0/2"));

    let err = scope.required_str(&[0, 1], "body").unwrap_err();
    assert!(matches!(err, Error::MalformedPayload { ref path, .. } if path == "/1/0/0"));

    let err = scope.required_str_list(&[4], "actions").unwrap_err();
    assert!(matches!(err, Error::MalformedPayload { ref path, .. } if path == "/1/0/4/1"));
}

// ============================================================================
// Shape Matching Tests
// ============================================================================

#[test]
fn test_match_each_revision_and_slot() {
    let registry = Registry::builtin();

    for (revision, shape) in [
        (Revision::V2022_09_09, &REQUEST_2022_09_09),
        (Revision::V2024_03_12, &REQUEST_2024_03_12),
    ] {
        for (op, slot) in [
            (Op::Create, SlotKind::Create),
            (Op::Update, SlotKind::Update),
            (Op::Send, SlotKind::Send),
        ] {
            let raw = request(revision, THREAD, op, &draft());
            let found = registry.match_request(&raw).unwrap();
            assert!(std::ptr::eq(found.shape, shape), "{revision:?} {op:?}");
            assert_eq!(found.slot, slot);
            assert_eq!(found.thread.path, vec![1, 0, 0]);
        }
    }
}

#[test]
fn test_match_shape_reports_version() {
    let registry = Registry::builtin();

    let raw = request(Revision::V2022_09_09, THREAD, Op::Create, &draft());
    let shape = registry.match_shape(&raw).unwrap();
    assert_eq!(shape, Shape::Request(&REQUEST_2022_09_09));
    assert_eq!(shape.version(), "2022-09-09");
    assert_eq!(shape.to_string(), "request 2022-09-09");
    assert!(shape.has_body());

    let raw = response(Revision::V2024_03_12, THREAD, MESSAGE, DRAFT_ACTIONS);
    let shape = registry.match_shape(&raw).unwrap();
    assert_eq!(shape, Shape::Response(&RESPONSE_2024_03_12));
    assert_eq!(shape.kind(), ShapeKind::Response);
    assert!(!shape.has_body());
}

#[test]
fn test_requests_and_responses_do_not_cross_match() {
    let registry = Registry::builtin();

    for revision in [Revision::V2022_09_09, Revision::V2024_03_12] {
        let req = request(revision, THREAD, Op::Send, &draft());
        assert!(registry.match_response(&req).is_none());

        let resp = response(revision, THREAD, MESSAGE, SEND_ACTIONS);
        assert!(registry.match_request(&resp).is_none());
    }
}

#[test]
fn test_unknown_action_tokens_still_match() {
    let msg = MessageSpec::new(MESSAGE, "x", &["^all", "^brand_new_token", "^r"]);
    let raw = request(Revision::V2022_09_09, THREAD, Op::Update, &msg);

    assert!(Registry::builtin().match_request(&raw).is_some());
}

#[test]
fn test_unprefixed_action_string_still_matches() {
    let msg = MessageSpec::new(MESSAGE, "x", &["^all", "^pfg", "sched"]);
    let raw = request(Revision::V2022_09_09, THREAD, Op::Send, &msg);

    let found = Registry::builtin().match_request(&raw).unwrap();
    assert!(std::ptr::eq(found.shape, &REQUEST_2022_09_09));
    assert_eq!(found.slot, SlotKind::Send);
}

#[test]
fn test_action_list_without_any_token_does_not_match() {
    for actions in [&["inbox", "sched"][..], &[][..]] {
        let msg = MessageSpec::new(MESSAGE, "x", actions);
        let raw = request(Revision::V2022_09_09, THREAD, Op::Update, &msg);

        assert!(Registry::builtin().match_request(&raw).is_none(), "{actions:?}");
    }
}

#[test]
fn test_action_list_with_non_string_does_not_match() {
    let mut raw = request(Revision::V2022_09_09, THREAD, Op::Update, &draft());
    *raw.pointer_mut("/1/0/0/1/1/0/10/1").unwrap() = json!(3);

    assert!(Registry::builtin().match_request(&raw).is_none());
}

#[test]
fn test_unrecognized_payloads() {
    let registry = Registry::builtin();

    for raw in [
        json!(null),
        json!("thread-a:r1"),
        json!(42),
        json!({"threadId": THREAD}),
        json!([]),
        json!([[], [[["thread-a:r1", []]]]]),
        json!([1, 2, 3, [4, [5, [6]]]]),
    ] {
        assert!(
            matches!(registry.match_shape(&raw), Err(Error::UnrecognizedFormat)),
            "{raw}"
        );
    }
}

// ============================================================================
// Registry Tests
// ============================================================================

#[test]
fn test_builtin_shapes_newest_first() {
    let versions: Vec<_> = REQUEST_SHAPES.iter().map(|s| s.version).collect();
    let mut sorted = versions.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(versions, sorted);

    let versions: Vec<_> = RESPONSE_SHAPES.iter().map(|s| s.version).collect();
    let mut sorted = versions.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(versions, sorted);
}

#[test]
fn test_builtin_versions() {
    assert_eq!(builtin_versions(), vec!["2024-03-12", "2022-09-09"]);
}

#[test]
fn test_registry_without_versions() {
    let registry = Registry::without_versions(&["2024-03-12"]);
    assert_eq!(registry.request_shapes().len(), 1);
    assert!(registry.contains(Shape::Request(&REQUEST_2022_09_09)));
    assert!(!registry.contains(Shape::Request(&REQUEST_2024_03_12)));
    assert!(!registry.contains(Shape::Response(&RESPONSE_2024_03_12)));

    let raw = request(Revision::V2024_03_12, THREAD, Op::Create, &draft());
    assert!(matches!(
        registry.match_shape(&raw),
        Err(Error::UnrecognizedFormat)
    ));

    let raw = request(Revision::V2022_09_09, THREAD, Op::Create, &draft());
    assert!(registry.match_shape(&raw).is_ok());
}
