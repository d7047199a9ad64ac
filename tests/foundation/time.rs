//! Integration tests for effect durations

use grantable_foundation::{EffectDuration, ErrorKind, TICKS_PER_SECOND};

#[test]
fn seconds_convert_to_ticks() {
    assert_eq!(
        EffectDuration::from_seconds(150).unwrap(),
        EffectDuration::Ticks(150 * TICKS_PER_SECOND)
    );
    assert_eq!(EffectDuration::from_seconds(1).unwrap().ticks(), Some(20));
}

#[test]
fn zero_seconds_is_infinite() {
    let duration = EffectDuration::from_seconds(0).unwrap();
    assert!(duration.is_infinite());
    assert_eq!(duration.ticks(), None);
    assert_eq!(duration, EffectDuration::default());
}

#[test]
fn overflow_is_rejected() {
    let err = EffectDuration::from_seconds(u32::MAX).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidValue { field: "duration", .. }));
}

#[test]
fn display_is_compound() {
    let display = |secs| EffectDuration::from_seconds(secs).unwrap().to_string();
    assert_eq!(display(30), "30s");
    assert_eq!(display(150), "2m30s");
    assert_eq!(display(3600), "1h");
    assert_eq!(display(3723), "1h2m3s");
    assert_eq!(display(0), "infinite");
}
