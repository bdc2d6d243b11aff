//! Contractor review: two registration steps, each with its own
//! approve/reject cycle, plus block, unblock and reopen.

mod service;

#[cfg(test)]
mod tests;

pub use service::ContractorService;
