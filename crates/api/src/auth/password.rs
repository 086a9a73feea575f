//! Argon2id password hashing, verification, and strength validation.
//!
//! All password hashes use the Argon2id variant with a cryptographically
//! random salt generated via [`OsRng`]. The PHC string format is used for
//! storage so that algorithm parameters and salt are embedded in the hash.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Hash a plaintext password using Argon2id with a random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted Argon2id hash.
///
/// Returns `Ok(true)` if the password matches, `Ok(false)` if it does not.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Validate that a password meets the platform's strength requirements:
/// minimum length plus at least one uppercase letter, one lowercase letter,
/// one digit, and one special character.
pub fn validate_password_strength(password: &str) -> Result<(), String> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        ));
    }

    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| "!@#$%^&*".contains(c));

    if !has_upper || !has_lower || !has_digit || !has_special {
        return Err(
            "Password must contain at least one uppercase letter, one lowercase letter, \
             one number, and one special character"
                .to_string(),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_password("Sup3rSecret!").unwrap();
        assert!(verify_password("Sup3rSecret!", &hash).unwrap());
        assert!(!verify_password("WrongPassword1!", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("Sup3rSecret!").unwrap();
        let b = hash_password("Sup3rSecret!").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn strength_rules() {
        assert!(validate_password_strength("Sup3rSecret!").is_ok());
        // Too short.
        assert!(validate_password_strength("S3cr!t").is_err());
        // Missing uppercase.
        assert!(validate_password_strength("sup3rsecret!").is_err());
        // Missing digit.
        assert!(validate_password_strength("SuperSecret!").is_err());
        // Missing special character.
        assert!(validate_password_strength("Sup3rSecret").is_err());
    }
}
