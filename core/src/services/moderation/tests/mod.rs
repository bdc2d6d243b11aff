//! Tests for the moderation engine

#[cfg(test)]
mod engine_tests;
