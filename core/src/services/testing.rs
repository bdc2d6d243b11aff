//! Test doubles shared across service tests

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::DomainResult;
use crate::services::auth::PasswordHasher;

/// Reversible "hash" so tests don't pay for bcrypt
pub(crate) struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, password: &str) -> DomainResult<String> {
        Ok(format!("plain:{}", password))
    }

    fn verify(&self, password: &str, hash: &str) -> DomainResult<bool> {
        Ok(hash == format!("plain:{}", password))
    }
}

/// `PlainHasher` that counts verifications
#[derive(Default)]
pub(crate) struct CountingHasher {
    verifies: AtomicUsize,
}

impl CountingHasher {
    pub fn verifies(&self) -> usize {
        self.verifies.load(Ordering::SeqCst)
    }
}

impl PasswordHasher for CountingHasher {
    fn hash(&self, password: &str) -> DomainResult<String> {
        PlainHasher.hash(password)
    }

    fn verify(&self, password: &str, hash: &str) -> DomainResult<bool> {
        self.verifies.fetch_add(1, Ordering::SeqCst);
        PlainHasher.verify(password, hash)
    }
}
