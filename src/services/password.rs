use bcrypt::{hash, verify};
use std::sync::Arc;
use crate::errors::AppResult;

/// Salted one-way password hashing with bcrypt.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
    // Checked when the username is unknown, so a failed login costs the
    // same whether or not the user exists.
    dummy_hash: Arc<str>,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> AppResult<Self> {
        let dummy_hash = hash(b"dummy-password", cost)?;
        Ok(Self { cost, dummy_hash: dummy_hash.into() })
    }

    pub fn hash(&self, password: &str) -> AppResult<String> {
        Ok(hash(password.as_bytes(), self.cost)?)
    }

    pub fn verify(&self, password: &str, password_hash: &str) -> AppResult<bool> {
        Ok(verify(password.as_bytes(), password_hash)?)
    }

    /// Burn roughly one verification worth of work. Result is discarded.
    pub fn verify_dummy(&self, password: &str) {
        let _ = verify(password.as_bytes(), &self.dummy_hash);
    }
}
