//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Error, Catalog, and EffectDuration.

mod catalog;
mod errors;
mod time;
