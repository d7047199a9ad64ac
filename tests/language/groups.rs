//! Integration tests for group grantables
//!
//! Groups are executed against the in-memory backend.

use std::sync::Arc;

use grantable_foundation::ErrorKind;
use grantable_language::{
    Capabilities, Economy, Grant, Grantable, GrantableRegistry, Group, MAX_GROUP_DEPTH, Recipient,
    parse,
};
use grantable_runtime::MemoryBackend;

fn group(descriptor: &str) -> Group {
    Group::parse(descriptor, &GrantableRegistry::default()).unwrap()
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn group_keeps_element_order() {
    let g = group("(perm:a.b, $5)");
    assert_eq!(g.len(), 2);
    assert!(matches!(g.elements()[0], Grantable::Permission(_)));
    assert!(matches!(g.elements()[1], Grantable::Currency(_)));
}

#[test]
fn nested_groups_parse() {
    let parsed = parse("$1, ($2, (#a, diamond))").unwrap();
    let outer = parsed[1].as_group().unwrap();
    let inner = outer.elements()[1].as_group().unwrap();
    assert_eq!(inner.to_string(), "(#a, diamond)");
}

#[test]
fn empty_group_is_allowed() {
    assert!(group("()").is_empty());
}

#[test]
fn failing_member_fails_the_group() {
    let err = parse("($1, $x)").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidValue { .. }));
    let ctx = err.context.unwrap();
    assert_eq!(ctx.token.as_deref(), Some("$x"));
    assert_eq!(ctx.stack, vec!["group ($1, $x)"]);
}

fn nested(depth: usize) -> String {
    format!("{}$1{}", "(".repeat(depth), ")".repeat(depth))
}

#[test]
fn nesting_up_to_the_limit_parses() {
    let parsed = parse(&nested(MAX_GROUP_DEPTH)).unwrap();
    let mut current = &parsed[0];
    for _ in 1..MAX_GROUP_DEPTH {
        current = &current.as_group().unwrap().elements()[0];
    }
    let innermost = current.as_group().unwrap();
    assert!(matches!(innermost.elements()[0], Grantable::Currency(_)));
}

#[test]
fn deep_nesting_is_rejected() {
    for depth in [MAX_GROUP_DEPTH + 1, 5_000] {
        let input = nested(depth);
        let err = parse(&input).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::MalformedGroup { .. }));
        assert!(Group::parse(&input, &GrantableRegistry::default()).is_err());
    }
}

#[test]
fn long_flat_group_parses() {
    let members = vec!["$1"; 10_000].join(", ");
    let g = group(&format!("({members})"));
    assert_eq!(g.len(), 10_000);
}

// =============================================================================
// Execution
// =============================================================================

#[test]
fn has_requires_every_member() {
    let backend = Arc::new(MemoryBackend::new());
    let caps = backend.capabilities();
    let alice = Recipient::new("alice");
    let g = group("(perm:a.b, $5)");

    assert!(!g.has(&caps, &alice));
    assert!(parse("#a.b").unwrap()[0].grant(&caps, &alice));
    assert!(!g.has(&caps, &alice));
    assert!(parse("$5").unwrap()[0].grant(&caps, &alice));
    assert!(g.has(&caps, &alice));
}

#[test]
fn grant_and_take_touch_every_member() {
    let backend = Arc::new(MemoryBackend::new());
    let caps = backend.capabilities();
    let alice = Recipient::new("alice");
    let g = group("($5, #a.b, diamond:2)");

    assert!(g.grant(&caps, &alice));
    assert_eq!(backend.permission_nodes(&alice), ["a.b"]);
    assert_eq!(backend.stacks(&alice)[0].amount, 2);

    // Money is short, but the other members are still taken.
    assert!(backend.withdraw(&alice, 5.0));
    assert!(!g.take(&caps, &alice));
    assert!(backend.permission_nodes(&alice).is_empty());
    assert!(backend.stacks(&alice).is_empty());
}

#[test]
fn missing_capabilities_fail() {
    let caps = Capabilities::new();
    let alice = Recipient::new("alice");
    assert!(!group("($1)").grant(&caps, &alice));
    assert!(group("()").grant(&caps, &alice));
}
