//! Integration tests for kind registration and dispatch

use std::fmt;
use std::sync::Arc;

use grantable_foundation::{Catalog, Error, ErrorKind, RegistrationError, SymbolClass};
use grantable_language::{
    Capabilities, Grant, Grantable, GrantableParser, GrantableRegistry, PatternSpec, Recipient,
    parse_with,
};

/// A kit reference resolved by name.
#[derive(Debug)]
struct Kit(String);

impl Grant for Kit {
    fn grant(&self, _: &Capabilities, _: &Recipient) -> bool {
        true
    }
    fn take(&self, _: &Capabilities, _: &Recipient) -> bool {
        false
    }
    fn has(&self, _: &Capabilities, _: &Recipient) -> bool {
        false
    }
}

impl fmt::Display for Kit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kit:{}", self.0)
    }
}

fn parse_kit(body: &str, _: &Catalog) -> grantable_foundation::Result<Grantable> {
    if body.is_empty() {
        return Err(Error::empty_input("kit name"));
    }
    Ok(Grantable::Custom(Arc::new(Kit(body.to_lowercase()))))
}

fn kit_registry() -> GrantableRegistry {
    let registry = GrantableRegistry::default();
    let spec = PatternSpec::new().with_symbol('&').with_prefix("k(it)");
    assert!(registry.register("kit", spec, parse_kit).unwrap());
    registry
}

// =============================================================================
// Registration
// =============================================================================

#[test]
fn reserved_symbols_are_rejected() {
    let registry = GrantableRegistry::default();
    let err = registry
        .register("quoted", PatternSpec::new().with_symbol('\''), parse_kit)
        .unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::Registration(RegistrationError::ReservedSymbol {
            class: SymbolClass::Quote,
            ..
        })
    ));
    for symbol in ['a', '(', '/', ',', ':'] {
        assert!(
            registry
                .register("bad", PatternSpec::new().with_symbol(symbol), parse_kit)
                .is_err(),
            "{symbol:?}"
        );
    }
}

#[test]
fn unbalanced_prefix_is_rejected() {
    let registry = GrantableRegistry::default();
    let err = registry
        .register("broken", PatternSpec::new().with_prefix("x(y"), parse_kit)
        .unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::Registration(RegistrationError::UnbalancedPrefix { open: true, .. })
    ));
    assert!(!registry.contains("broken"));
}

#[test]
fn pattern_needs_symbol_or_prefix() {
    let registry = GrantableRegistry::default();
    let err = registry.register("bare", PatternSpec::new(), parse_kit).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::Registration(RegistrationError::MissingPattern { .. })
    ));
}

// =============================================================================
// Dispatch
// =============================================================================

#[test]
fn custom_kind_dispatches_inside_descriptors() {
    let registry = kit_registry();
    let parsed = parse_with(&registry, "&Starter, kit:vip, ($5, k:daily)").unwrap();
    let rendered: Vec<String> = parsed.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, ["kit:starter", "kit:vip", "($5, kit:daily)"]);
}

#[test]
fn custom_kind_error_propagates() {
    let registry = kit_registry();
    let err = parse_with(&registry, "$1, &").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::EmptyInput { .. }));
}

#[test]
fn registries_are_independent() {
    let registry = kit_registry();
    assert!(registry.dispatch("&starter").is_ok());
    assert!(GrantableRegistry::default().dispatch("&starter").is_err());
}

#[test]
fn registration_is_visible_to_later_dispatch_only() {
    let registry = GrantableRegistry::default();
    assert!(registry.dispatch("kit:vip").is_err());
    registry
        .register("kit", PatternSpec::new().with_prefix("kit"), parse_kit)
        .unwrap();
    assert!(registry.dispatch("kit:vip").is_ok());
}

#[test]
fn registry_is_shared_across_threads() {
    let registry = Arc::new(kit_registry());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || registry.dispatch(&format!("&kit{i}")).is_ok())
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

// =============================================================================
// Parser
// =============================================================================

#[test]
fn parser_pulls_typed_values() {
    let registry = kit_registry();
    let mut parser =
        GrantableParser::with_registry(&registry, "diamond:2, $5, #a, @speed, &x").unwrap();
    assert_eq!(parser.remaining(), 5);
    assert_eq!(parser.next_item().unwrap().amount(), 2);
    assert!((parser.next_currency().unwrap().value() - 5.0).abs() < f64::EPSILON);
    assert_eq!(parser.next_permission().unwrap().node(), "a");
    assert_eq!(parser.next_effect().unwrap().amplifier(), 0);
    assert_eq!(parser.next_as("kit").unwrap().to_string(), "kit:x");
    assert!(!parser.has_next());
    assert!(matches!(
        parser.next_grantable().unwrap_err().kind,
        ErrorKind::EmptyInput { .. }
    ));
}

#[test]
fn parser_rejects_wrong_kind() {
    let mut parser = GrantableParser::new("#not.money").unwrap();
    assert!(parser.next_currency().is_err());
}
