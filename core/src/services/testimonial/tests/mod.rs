//! Tests for the testimonial service

#[cfg(test)]
mod service_tests;
