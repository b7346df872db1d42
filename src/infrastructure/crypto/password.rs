//! Password hashing utilities
//!
//! Digests are the upper-case hex SHA-256 of the password bytes, optionally
//! followed by a salt. This matches the digests already stored for existing
//! accounts; it is a fast unsalted hash and therefore weak against offline
//! guessing.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::RngCore;
use sha2::{Digest, Sha256};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),
}

/// Hash a password
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    if password.trim().is_empty() {
        return Err(PasswordError::InvalidInput("password cannot be empty"));
    }
    Ok(digest(password.as_bytes()))
}

/// Hash a password concatenated with `salt`
pub fn hash_password_with_salt(password: &str, salt: &str) -> Result<String, PasswordError> {
    if password.trim().is_empty() {
        return Err(PasswordError::InvalidInput("password cannot be empty"));
    }
    if salt.trim().is_empty() {
        return Err(PasswordError::InvalidInput("salt cannot be empty"));
    }
    Ok(digest(format!("{password}{salt}").as_bytes()))
}

/// Verify a password against a stored digest. Never fails; empty input is a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    if password.is_empty() || hash.is_empty() {
        return false;
    }
    match hash_password(password) {
        Ok(computed) => computed.eq_ignore_ascii_case(hash),
        Err(_) => false,
    }
}

/// Verify a salted digest
pub fn verify_password_with_salt(password: &str, salt: &str, hash: &str) -> bool {
    if password.is_empty() || hash.is_empty() {
        return false;
    }
    match hash_password_with_salt(password, salt) {
        Ok(computed) => computed.eq_ignore_ascii_case(hash),
        Err(_) => false,
    }
}

/// `len` random bytes, base64 encoded
pub fn generate_salt(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut bytes);
    STANDARD.encode(bytes)
}

fn digest(bytes: &[u8]) -> String {
    hex::encode_upper(Sha256::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_digest() {
        assert_eq!(
            hash_password("password").unwrap(),
            "5E884898DA28047151D0E56F8DC6292773603D0D6AABBDD62A11EF721D1542D8"
        );
    }

    #[test]
    fn verify_accepts_matching_password_in_any_case() {
        let hash = hash_password("Secret123").unwrap();
        assert!(verify_password("Secret123", &hash));
        assert!(verify_password("Secret123", &hash.to_lowercase()));
        assert!(!verify_password("Secret124", &hash));
    }

    #[test]
    fn blank_input_is_rejected() {
        assert!(hash_password("   ").is_err());
        assert!(!verify_password("", "ABC"));
        assert!(!verify_password("abc", ""));
        assert!(hash_password_with_salt("abc", "").is_err());
    }

    #[test]
    fn salted_digest_differs_from_plain() {
        let salt = generate_salt(16);
        assert_eq!(STANDARD.decode(&salt).unwrap().len(), 16);

        let salted = hash_password_with_salt("Secret123", &salt).unwrap();
        assert_ne!(salted, hash_password("Secret123").unwrap());
        assert!(verify_password_with_salt("Secret123", &salt, &salted));
        assert!(!verify_password("Secret123", &salted));
    }
}
