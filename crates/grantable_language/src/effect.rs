//! Status effect grammar.
//!
//! ```text
//! effect     ::= ('@' | 'eff:' | 'effect:') type (' ' amplifier)? (' ' duration)?
//! type       ::= EFFECT_ID | EFFECT_NAME
//! amplifier  ::= 'I' | 'II' | 'III' | 'IV' | 'V' | NUMBER      (1-indexed)
//! duration   ::= NUMBER                                        (seconds)
//!              | (NUMBER ('t' | 's' | 'm' | 'h'))+               (t = one tick)
//! ```
//!
//! With two parts, the second is an amplifier if it is one or two digits or a
//! roman numeral, and a duration otherwise.

use std::fmt;
use std::sync::LazyLock;

use grantable_foundation::{Catalog, EffectDuration, EffectType, Error, Result, TICKS_PER_SECOND};

use crate::capability::{Capabilities, Recipient};
use crate::grantable::Grant;
use crate::pattern::{CompiledPattern, PatternSpec};

/// Registration metadata for the effect kind.
///
/// `#` is left to permissions, which are dispatched first.
#[must_use]
pub fn pattern_spec() -> PatternSpec {
    PatternSpec::new().with_symbol('@').with_prefix("eff(ect)")
}

pub(crate) static PATTERN: LazyLock<CompiledPattern> = LazyLock::new(|| {
    pattern_spec()
        .compile("effect")
        .expect("effect pattern is valid")
});

/// Largest 1-indexed amplifier accepted in a descriptor.
pub const MAX_AMPLIFIER_INPUT: u8 = 99;

const ROMAN: [&str; 5] = ["I", "II", "III", "IV", "V"];

/// A timed status effect.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Effect {
    kind: EffectType,
    amplifier: u8,
    duration: EffectDuration,
}

impl Effect {
    /// Creates an effect. `amplifier` is 0-indexed.
    #[must_use]
    pub fn new(kind: EffectType, amplifier: u8, duration: EffectDuration) -> Self {
        Self {
            kind,
            amplifier,
            duration,
        }
    }

    /// The effect type.
    #[must_use]
    pub fn kind(&self) -> &EffectType {
        &self.kind
    }

    /// The 0-indexed amplifier level.
    #[must_use]
    pub fn amplifier(&self) -> u8 {
        self.amplifier
    }

    /// The duration.
    #[must_use]
    pub fn duration(&self) -> EffectDuration {
        self.duration
    }

    /// Parses an effect token, with or without its prefix.
    ///
    /// # Errors
    ///
    /// See [`Effect::parse_body`].
    pub fn parse(token: &str, catalog: &Catalog) -> Result<Self> {
        Self::parse_body(PATTERN.trim(token.trim()), catalog)
    }

    /// Parses an effect body (prefix already stripped).
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` for an empty body, and `InvalidValue` for an
    /// unknown effect type, a bad amplifier or duration, or more than three
    /// parts.
    pub fn parse_body(body: &str, catalog: &Catalog) -> Result<Self> {
        let parts: Vec<&str> = body.split_whitespace().collect();
        let (name, amplifier, duration) = match parts.as_slice() {
            [] => return Err(Error::empty_input("effect")),
            [name] => (name, 0, EffectDuration::Infinite),
            [name, second] if looks_like_amplifier(second) => {
                (name, parse_amplifier(second)?, EffectDuration::Infinite)
            }
            [name, second] => (name, 0, parse_duration(second)?),
            [name, amplifier, duration] => {
                (name, parse_amplifier(amplifier)?, parse_duration(duration)?)
            }
            _ => {
                return Err(Error::invalid_value(
                    "effect",
                    body,
                    "expected '<type> [amplifier] [duration]'",
                ));
            }
        };
        let kind = resolve_type(name, catalog)?;
        Ok(Self::new(kind, amplifier, duration))
    }
}

fn resolve_type(key: &str, catalog: &Catalog) -> Result<EffectType> {
    let found = if is_numeric(key) {
        key.parse().ok().and_then(|id| catalog.effect_by_id(id))
    } else {
        catalog.effect_by_name(key)
    };
    found
        .cloned()
        .ok_or_else(|| Error::invalid_value("effect type", key, "no such effect"))
}

/// Returns true for one or two digits or a roman numeral I through V.
fn looks_like_amplifier(part: &str) -> bool {
    (is_numeric(part) && part.len() <= 2) || roman_level(part).is_some()
}

fn roman_level(part: &str) -> Option<u8> {
    ROMAN
        .iter()
        .position(|numeral| numeral.eq_ignore_ascii_case(part))
        .and_then(|i| u8::try_from(i).ok())
}

/// Parses a 1-indexed amplifier into a 0-indexed level.
///
/// `I`..`V` map to 0..4; a number `n` maps to `max(0, n - 1)`.
///
/// # Errors
///
/// Returns `InvalidValue` for anything else, or a number above
/// [`MAX_AMPLIFIER_INPUT`].
pub fn parse_amplifier(part: &str) -> Result<u8> {
    if let Some(level) = roman_level(part) {
        return Ok(level);
    }
    if !is_numeric(part) {
        return Err(Error::invalid_value(
            "amplifier",
            part,
            "expected a number or a roman numeral I-V",
        ));
    }
    match part.parse::<u8>() {
        Ok(n) if n <= MAX_AMPLIFIER_INPUT => Ok(n.saturating_sub(1)),
        _ => Err(Error::invalid_value(
            "amplifier",
            part,
            format!("must be at most {MAX_AMPLIFIER_INPUT}"),
        )),
    }
}

/// Parses a duration into ticks.
///
/// A bare number is whole seconds; otherwise the text is a sequence of
/// `<number><unit>` pairs with unit `t` (ticks), `s`, `m`, or `h`, summed.
///
/// # Errors
///
/// Returns `InvalidValue` for malformed text, a zero total, or overflow.
pub fn parse_duration(part: &str) -> Result<EffectDuration> {
    let invalid = |reason: &str| Error::invalid_value("duration", part, reason);

    if is_numeric(part) {
        let seconds = part
            .parse::<u32>()
            .map_err(|_| invalid("duration is too long"))?;
        if seconds == 0 {
            return Err(invalid("duration must be positive"));
        }
        return EffectDuration::from_seconds(seconds);
    }

    let mut ticks = 0u32;
    let mut rest = part;
    while !rest.is_empty() {
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return Err(invalid("expected <number><t|s|m|h> pairs"));
        }
        let value: u32 = rest[..digits]
            .parse()
            .map_err(|_| invalid("duration is too long"))?;
        let scale = match rest[digits..].chars().next() {
            Some('t' | 'T') => 1,
            Some('s' | 'S') => TICKS_PER_SECOND,
            Some('m' | 'M') => 60 * TICKS_PER_SECOND,
            Some('h' | 'H') => 3600 * TICKS_PER_SECOND,
            _ => return Err(invalid("expected a unit of t, s, m, or h")),
        };
        ticks = value
            .checked_mul(scale)
            .and_then(|n| ticks.checked_add(n))
            .ok_or_else(|| invalid("duration is too long"))?;
        rest = &rest[digits + 1..];
    }

    if ticks == 0 {
        return Err(invalid("duration must be positive"));
    }
    Ok(EffectDuration::Ticks(ticks))
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

impl Grant for Effect {
    fn grant(&self, caps: &Capabilities, recipient: &Recipient) -> bool {
        caps.effects()
            .is_some_and(|host| host.apply(recipient, self))
    }

    fn take(&self, caps: &Capabilities, recipient: &Recipient) -> bool {
        caps.effects()
            .is_some_and(|host| host.remove(recipient, &self.kind))
    }

    fn has(&self, caps: &Capabilities, recipient: &Recipient) -> bool {
        caps.effects()
            .is_some_and(|host| host.is_active(recipient, &self.kind))
    }
}

/// Canonical form: `@<type>[ <level>][ <duration>]`, level 1-indexed.
impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.kind)?;
        if self.amplifier > 0 {
            write!(f, " {}", u16::from(self.amplifier) + 1)?;
        }
        if !self.duration.is_infinite() {
            write!(f, " {}", self.duration)?;
        }
        Ok(())
    }
}
