//! Tests for the admin service

#[cfg(test)]
mod service_tests;
