//! Testimonials shown on the marketing site

mod service;

#[cfg(test)]
mod tests;

pub use service::{NewTestimonial, TestimonialChanges, TestimonialService};
