//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use grantable_foundation::{Error, ErrorKind, RegistrationError, SymbolClass};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_malformed_group() {
    let err = Error::malformed_group("unmatched close parenthesis", 3, "a, ), b");
    assert!(matches!(err.kind, ErrorKind::MalformedGroup { position: 3, .. }));
    let msg = format!("{err}");
    assert!(msg.contains("unmatched close parenthesis"));
    assert!(msg.contains('3'));
}

#[test]
fn error_unknown_kind() {
    let err = Error::unknown_kind("unobtainium", "no such material");
    assert!(matches!(err.kind, ErrorKind::UnknownKind { .. }));
    let msg = format!("{err}");
    assert!(msg.contains("unobtainium"));
    assert!(msg.contains("no such material"));
}

#[test]
fn error_invalid_value() {
    let err = Error::invalid_value("amount", "0", "must be at least 1");
    assert!(matches!(err.kind, ErrorKind::InvalidValue { field: "amount", .. }));
    assert_eq!(format!("{err}"), "invalid amount '0': must be at least 1");
}

#[test]
fn error_empty_input() {
    let err = Error::empty_input("permission");
    assert_eq!(format!("{err}"), "empty permission");
}

#[test]
fn error_from_registration() {
    let err: Error = RegistrationError::EmptyName.into();
    assert!(err.is_registration());
    assert!(format!("{err}").contains("empty"));
    assert!(!Error::empty_input("x").is_registration());
}

// =============================================================================
// Registration Error Display
// =============================================================================

#[test]
fn registration_unbalanced_prefix_display() {
    let open = RegistrationError::UnbalancedPrefix {
        prefix: "x(y".to_string(),
        position: 1,
        open: true,
    };
    assert_eq!(open.to_string(), "unmatched open parenthesis in prefix 'x(y' at 1");

    let close = RegistrationError::UnbalancedPrefix {
        prefix: "xy)".to_string(),
        position: 2,
        open: false,
    };
    assert!(close.to_string().starts_with("unmatched close"));
}

#[test]
fn registration_reserved_symbol_display() {
    let err = RegistrationError::ReservedSymbol {
        symbol: '\'',
        class: SymbolClass::Quote,
    };
    assert!(err.to_string().contains("quotes"));
}

#[test]
fn symbol_classes_cover_grammar_characters() {
    assert_eq!(SymbolClass::of('a'), Some(SymbolClass::Alphanumeric));
    assert_eq!(SymbolClass::of('9'), Some(SymbolClass::Alphanumeric));
    assert_eq!(SymbolClass::of('`'), Some(SymbolClass::Quote));
    assert_eq!(SymbolClass::of('{'), Some(SymbolClass::Bracket));
    assert_eq!(SymbolClass::of('|'), Some(SymbolClass::Slash));
    assert_eq!(SymbolClass::of(','), Some(SymbolClass::Delimiter));
    assert_eq!(SymbolClass::of(' '), Some(SymbolClass::Delimiter));
    assert_eq!(SymbolClass::of('$'), None);
    assert_eq!(SymbolClass::of('~'), None);
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn context_records_token_then_frames() {
    let err = Error::invalid_value("currency", "x", "not a decimal number")
        .in_token("$x")
        .in_token("($1, $x)");
    let ctx = err.context.unwrap();
    assert_eq!(ctx.token.as_deref(), Some("$x"));
    assert_eq!(ctx.stack, vec!["group ($1, $x)"]);
    assert_eq!(ctx.to_string(), "in '$x'\n  in group ($1, $x)");
}
