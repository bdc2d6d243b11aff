//! Tests for the store service
