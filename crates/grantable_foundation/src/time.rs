//! Game time: ticks and effect durations.

use std::fmt;

use crate::error::{Error, Result};

/// Server ticks per wall-clock second.
pub const TICKS_PER_SECOND: u32 = 20;

/// How long a status effect lasts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum EffectDuration {
    /// A fixed number of ticks (always positive).
    Ticks(u32),
    /// Lasts until removed.
    #[default]
    Infinite,
}

impl EffectDuration {
    /// Converts whole seconds to a tick duration.
    ///
    /// Zero seconds is the "unlimited" sentinel and maps to [`Self::Infinite`].
    ///
    /// # Errors
    ///
    /// Returns an `InvalidValue` error if the tick count overflows.
    pub fn from_seconds(seconds: u32) -> Result<Self> {
        if seconds == 0 {
            return Ok(Self::Infinite);
        }
        seconds
            .checked_mul(TICKS_PER_SECOND)
            .map(Self::Ticks)
            .ok_or_else(|| {
                Error::invalid_value("duration", seconds.to_string(), "duration is too long")
            })
    }

    /// Returns the tick count, or `None` for an infinite duration.
    #[must_use]
    pub fn ticks(self) -> Option<u32> {
        match self {
            Self::Ticks(ticks) => Some(ticks),
            Self::Infinite => None,
        }
    }

    /// Returns true for an infinite duration.
    #[must_use]
    pub fn is_infinite(self) -> bool {
        matches!(self, Self::Infinite)
    }
}

/// Formats as a compound duration string (`1h2m30s`), or `infinite`.
///
/// Ticks short of a whole second are written with a `t` unit (`1s5t`).
impl fmt::Display for EffectDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self::Ticks(ticks) = *self else {
            return f.write_str("infinite");
        };
        let total = ticks / TICKS_PER_SECOND;
        let (hours, minutes, seconds) = (total / 3600, total / 60 % 60, total % 60);
        let leftover = ticks % TICKS_PER_SECOND;
        if hours > 0 {
            write!(f, "{hours}h")?;
        }
        if minutes > 0 {
            write!(f, "{minutes}m")?;
        }
        if seconds > 0 || ticks == 0 {
            write!(f, "{seconds}s")?;
        }
        if leftover > 0 {
            write!(f, "{leftover}t")?;
        }
        Ok(())
    }
}
