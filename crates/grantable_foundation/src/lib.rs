//! Core types for the grantable descriptor language.
//!
//! This crate provides:
//! - [`Error`] - Rich error types with context
//! - [`Catalog`] - Key tables for materials, effects, enchantments, and colors
//! - [`EffectDuration`] - Tick-based effect durations

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod catalog;
pub mod error;
pub mod time;

pub use catalog::{Catalog, DyeColor, EffectType, Enchantment, Material};
pub use error::{Error, ErrorContext, ErrorKind, RegistrationError, Result, SymbolClass};
pub use time::{EffectDuration, TICKS_PER_SECOND};
