//! Credential hashing. Stored values are argon2id PHC strings.

use argon2::{
    password_hash::{self, SaltString},
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
};
use rand::rngs::OsRng;

use crate::errors::AppError;

pub const MIN_PASSWORD_LEN: usize = 8;

fn hasher() -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default())
}

pub fn hash_password(plain: &str) -> Result<String, AppError> {
    if plain.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let salt = SaltString::generate(&mut OsRng);
    hasher()
        .hash_password(plain.as_bytes(), &salt)
        .map(|phc| phc.to_string())
        .map_err(|e| AppError::Internal(format!("hashing password: {e}")))
}

/// `Ok(false)` means the password is wrong. A stored value that cannot be
/// checked at all is an internal error.
pub fn verify_password(plain: &str, stored: &str) -> Result<bool, AppError> {
    let phc = PasswordHash::new(stored)
        .map_err(|e| AppError::Internal(format!("stored credential is not a PHC string: {e}")))?;

    match hasher().verify_password(plain.as_bytes(), &phc) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::Internal(format!("verifying password: {e}"))),
    }
}
