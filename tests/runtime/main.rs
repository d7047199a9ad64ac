//! Integration tests for Layer 2: Runtime
//!
//! Tests for descriptor loading, reward bookkeeping, sessions, and the REPL.

mod loader;
mod repl;
mod rewards;
