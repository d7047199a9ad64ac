//! Integration tests for the currency, permission, effect, and item grammars

use grantable_foundation::{Catalog, EffectDuration, ErrorKind, TICKS_PER_SECOND};
use grantable_language::{
    Currency, Effect, Grantable, Item, Permission, parse, parse_amplifier, parse_duration,
};

// =============================================================================
// Currency
// =============================================================================

#[test]
#[allow(clippy::approx_constant)]
fn currency_forms() {
    assert_eq!(Currency::parse("$3.14").unwrap().value(), 3.14);
    assert_eq!(Currency::parse("eco:5").unwrap().value(), 5.0);
    assert_eq!(Currency::parse("economy: 7").unwrap().value(), 7.0);
}

#[test]
fn currency_rejects_garbage() {
    let err = Currency::parse("$abc").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidValue { field: "currency", .. }));
    assert!(matches!(
        Currency::parse("$").unwrap_err().kind,
        ErrorKind::EmptyInput { .. }
    ));
    assert!(Currency::parse("$inf").is_err());
}

#[test]
fn currency_dispatches_from_descriptor() {
    let parsed = parse("$5, eco:2.5").unwrap();
    assert_eq!(parsed, vec![
        Grantable::Currency(Currency::new(5.0)),
        Grantable::Currency(Currency::new(2.5)),
    ]);
}

// =============================================================================
// Permission
// =============================================================================

#[test]
fn permission_forms() {
    for input in ["#kit.vip", "p:kit.vip", "perm:kit.vip", "permission:kit.vip"] {
        assert_eq!(Permission::parse(input).unwrap().node(), "kit.vip", "{input}");
    }
}

#[test]
fn permission_keeps_node_verbatim() {
    assert_eq!(Permission::parse("#Kit.*").unwrap().node(), "Kit.*");
    assert_eq!(Permission::parse("#kit.vip").unwrap().to_string(), "#kit.vip");
}

// =============================================================================
// Effect
// =============================================================================

#[test]
fn amplifier_accepts_roman_and_digits() {
    assert_eq!(parse_amplifier("III").unwrap(), 2);
    assert_eq!(parse_amplifier("iii").unwrap(), 2);
    assert_eq!(parse_amplifier("3").unwrap(), 2);
}

#[test]
fn duration_compound_and_zero() {
    assert_eq!(
        parse_duration("2m30s").unwrap(),
        EffectDuration::Ticks(150 * TICKS_PER_SECOND)
    );
    assert_eq!(parse_duration("2m30s").unwrap().ticks(), Some(3000));
    assert!(parse_duration("0").is_err());
}

#[test]
fn effect_resolves_by_name_or_id() {
    let catalog = Catalog::standard();
    let by_name = Effect::parse("@night_vision II 10m", &catalog).unwrap();
    let by_id = Effect::parse("effect:16 2 600", &catalog).unwrap();
    assert_eq!(by_name, by_id);
    assert_eq!(by_name.to_string(), "@night_vision 2 10m");
}

// =============================================================================
// Item
// =============================================================================

#[test]
fn item_is_the_fallback_kind() {
    let parsed = parse("diamond:3, wool:red:16, diamond_sword fire_aspect:2").unwrap();
    let items: Vec<&Item> = parsed.iter().filter_map(Grantable::as_item).collect();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].amount(), 3);
    assert_eq!(items[1].amount(), 16);
    assert_eq!(items[2].enchantments().len(), 1);
}

#[test]
fn item_stack_round_trips() {
    let catalog = Catalog::standard();
    let item = Item::parse("wool:blue:5", &catalog).unwrap();
    let stack = item.to_stack();
    assert_eq!(stack.material.id, 35);
    assert_eq!(stack.amount, 5);
    assert_eq!(Item::from_stack(&stack).unwrap(), item);
}

#[test]
fn unknown_item_is_unknown_kind() {
    let err = parse("$1, unobtainium").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownKind { .. }));
}

// =============================================================================
// Canonical Form
// =============================================================================

#[test]
fn canonical_descriptors_reparse() {
    let input = "$5, #a.b, @speed III 90, diamond_sword:2 16:5, wool:red:4, ($1, #c)";
    let first = parse(input).unwrap();
    let rendered: Vec<String> = first.iter().map(ToString::to_string).collect();
    let second = parse(&rendered.join(", ")).unwrap();
    assert_eq!(first, second);
}
