use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, Salt,
        SaltString,
    },
};

use crate::domain::error::DomainError;

/// Hashes a password with the configured import salt. The same salt and
/// password always produce the same hash, which keeps repeated imports of
/// one fixture user idempotent.
pub fn hash_password(raw_password: &str, salt: &str) -> Result<String, DomainError> {
    let encoded = SaltString::encode_b64(salt.as_bytes())
        .map_err(|err| DomainError::Unexpected(format!("invalid salt: {err}")))?;
    // encode_b64 accepts salts argon2 itself refuses; re-checking through
    // Salt keeps a too-short CLI argument an error instead of a panic.
    let salt = Salt::from_b64(encoded.as_str()).map_err(|_| DomainError::Validation {
        field: "salt",
        message: "must be at least 3 chars",
    })?;
    let password_hash = argon2()?
        .hash_password(raw_password.as_bytes(), salt)
        .map_err(|err| DomainError::Unexpected(err.to_string()))?;
    Ok(password_hash.to_string())
}

pub fn verify_password(raw_password: &str, password_hash: &str) -> Result<(), DomainError> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|err| DomainError::Unexpected(err.to_string()))?;
    argon2()?
        .verify_password(raw_password.as_bytes(), &parsed_hash)
        .map_err(|err| match err {
            PasswordHashError::Password => DomainError::InvalidCredentials,
            _ => DomainError::Unexpected(err.to_string()),
        })?;

    Ok(())
}

fn argon2() -> Result<Argon2<'static>, DomainError> {
    let params = Params::new(19 * 1024, 2, 1, None)
        .map_err(|err| DomainError::Unexpected(err.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}
