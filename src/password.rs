//! Password hashing and verification, Argon2id with a random per-password
//! salt. Hashes are stored as PHC-format strings; plaintext is never
//! persisted anywhere.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::OpalError;

pub fn hash_password(password: &str) -> Result<String, OpalError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| OpalError::PasswordHash(e.to_string()))?;
    Ok(hash.to_string())
}

/// `Ok(false)` on mismatch; `Err` only when the stored hash is malformed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, OpalError> {
    let parsed = PasswordHash::new(hash).map_err(|e| OpalError::PasswordHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_phc_and_never_plaintext() {
        let hash = hash_password("123").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert_ne!(hash, "123");
        assert!(verify_password("123", &hash).unwrap());
        assert!(!verify_password("1234", &hash).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("123", "not-a-phc-string").is_err());
    }
}
