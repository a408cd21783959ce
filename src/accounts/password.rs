use anyhow::anyhow;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

/// Hash a plaintext password into a PHC-format argon2 string.
pub fn hash(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    match Argon2::default().hash_password(plain.as_bytes(), &salt) {
        Ok(hashed) => Ok(hashed.to_string()),
        Err(e) => {
            error!(error = %e, "password hashing failed");
            Err(anyhow!("password hashing failed"))
        }
    }
}

/// Check a plaintext password against a stored hash. A malformed stored
/// hash is an error, not a failed check.
pub fn verify(plain: &str, stored: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(stored).map_err(|e| {
        error!(error = %e, "stored password hash is malformed");
        anyhow!("stored password hash is malformed")
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}
