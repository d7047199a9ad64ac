//! Grantable - Reward descriptor language
//!
//! This crate re-exports all layers of the grantable system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: grantable_runtime     Loading, reward bookkeeping, backends, REPL
//! Layer 1: grantable_language    Tokenizer, registry, dispatcher, grammars
//! Layer 0: grantable_foundation  Core types (Error, Catalog, EffectDuration)
//! ```

pub use grantable_foundation as foundation;
pub use grantable_language as language;
pub use grantable_runtime as runtime;
