//! Tokenizer, kind registry, dispatcher, and value grammars for grantable
//! descriptors.
//!
//! This crate provides:
//! - [`Tokenizer`] - Splitting a descriptor into top-level tokens
//! - [`GrantableRegistry`] - Kind registration and token dispatch
//! - [`GrantableParser`] - Pulling grantables out of a descriptor
//! - [`Currency`], [`Permission`], [`Effect`], [`Item`], [`Group`] - Value grammars
//! - [`Capabilities`] - Recipient-side handles grantables execute against

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod capability;
pub mod currency;
pub mod effect;
pub mod grantable;
pub mod group;
pub mod item;
pub mod parser;
pub mod pattern;
pub mod permission;
pub mod registry;
pub mod tokenizer;

pub use capability::{Capabilities, EffectHost, Economy, Inventory, PermissionBackend, Recipient};
pub use currency::Currency;
pub use effect::{Effect, parse_amplifier, parse_duration};
pub use grantable::{Grant, Grantable};
pub use group::Group;
pub use item::{Item, ItemStack};
pub use parser::{GrantableParser, parse, parse_with};
pub use pattern::{CompiledPattern, PatternSpec};
pub use permission::Permission;
pub use registry::{GrantableRegistry, KindInfo, ParseFn, global};
pub use tokenizer::{MAX_GROUP_DEPTH, Token, Tokenizer};
