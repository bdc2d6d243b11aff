//! Tests for the contractor service
