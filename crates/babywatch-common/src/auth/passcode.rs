//! Group passcode hashing and verification
//!
//! The event is private: when a passcode hash is configured, signing in
//! requires the shared passcode. Uses Argon2id and stores PHC strings.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::AppError;

/// Hash a passcode using Argon2id
///
/// # Errors
/// Returns an error if hashing fails
pub fn hash_passcode(passcode: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(passcode.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Passcode hashing failed: {e}")))
}

/// Verify a passcode against a PHC hash
///
/// # Errors
/// Returns an error if the hash is not a valid PHC string
pub fn verify_passcode(passcode: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Config(format!("Invalid passcode hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(passcode.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Sign-in gate for the event
///
/// Open when no hash is configured.
#[derive(Debug, Clone, Default)]
pub struct PasscodeGate {
    hash: Option<String>,
}

impl PasscodeGate {
    #[must_use]
    pub fn new(hash: Option<String>) -> Self {
        Self { hash }
    }

    /// Gate that lets everyone in
    #[must_use]
    pub fn open() -> Self {
        Self { hash: None }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.hash.is_none()
    }

    /// Check a sign-in attempt
    ///
    /// # Errors
    /// Returns `AppError::InvalidCredentials` if a passcode is required and
    /// missing or wrong
    pub fn check(&self, passcode: Option<&str>) -> Result<(), AppError> {
        let Some(hash) = self.hash.as_deref() else {
            return Ok(());
        };

        match passcode {
            Some(passcode) if verify_passcode(passcode, hash)? => Ok(()),
            _ => Err(AppError::InvalidCredentials),
        }
    }
}
