//! Integration tests for Layer 1: Language
//!
//! Tests for the tokenizer, kind registry, value grammars, and groups.

mod grammars;
mod groups;
mod registry;
mod tokenizer;
