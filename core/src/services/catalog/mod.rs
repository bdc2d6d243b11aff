//! Job type and product type catalog

mod service;

#[cfg(test)]
mod tests;

pub use service::CatalogService;
