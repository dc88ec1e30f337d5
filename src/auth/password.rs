use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash of the literal password "sonidox-dummy"; verified when a login names
/// an unknown user so both failure paths do comparable work.
const DUMMY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$obQZ3NvRl1cC077emvZ22A$L2sk4z6snbIOrLAqsMc2r7wkeSXyFf8/6pHgWvd8TAs";

#[derive(Debug)]
pub struct HashError;

impl std::fmt::Display for HashError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("password hashing failed")
    }
}

impl std::error::Error for HashError {}

/// Salted Argon2id hash for storage in the `users` table
pub fn hash_password(password: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|_| HashError)
}

/// Constant-time verification of a submitted password against a stored hash
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(password_hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default().verify_password(password.as_bytes(), &parsed_hash).is_ok()
}

/// Burn a verification when no user row exists, then fail
pub fn verify_dummy(password: &str) -> bool {
    let _ = verify_password(password, DUMMY_HASH);
    false
}
