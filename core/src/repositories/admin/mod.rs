pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
mod memory;

#[cfg(test)]
mod tests;

pub use memory::InMemoryAdminRepository;
pub use r#trait::AdminRepository;
