//! Password hashing and verification using Argon2id.

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

use crate::error::AuthError;

fn peppered<'a>(password: &'a str, pepper: Option<&str>, buf: &'a mut String) -> &'a [u8] {
    match pepper {
        Some(p) => {
            buf.push_str(p);
            buf.push_str(password);
            buf.as_bytes()
        }
        None => password.as_bytes(),
    }
}

/// Hash a plaintext password to an Argon2id PHC-format string.
///
/// If `pepper` is provided it is prepended to the password before hashing
/// and must be supplied again at verification time.
pub fn hash_password(password: &str, pepper: Option<&str>) -> Result<String, AuthError> {
    let mut buf = String::new();
    let input = peppered(password, pepper, &mut buf);

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    argon2
        .hash_password(input, &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::Crypto(format!("hash error: {e}")))
}

/// Verify a plaintext password against an Argon2id PHC-format hash.
///
/// Returns `Ok(true)` on match, `Ok(false)` on mismatch, or
/// `Err(AuthError::Crypto)` if the stored hash is malformed.
pub fn verify_password(
    password: &str,
    hash: &str,
    pepper: Option<&str>,
) -> Result<bool, AuthError> {
    let mut buf = String::new();
    let input = peppered(password, pepper, &mut buf);

    let parsed_hash = argon2::PasswordHash::new(hash)
        .map_err(|e| AuthError::Crypto(format!("invalid hash format: {e}")))?;

    let argon2 = Argon2::default();
    match argon2.verify_password(input, &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Crypto(format!("verify error: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_password_matches() {
        let hash = hash_password("hunter2", None).unwrap();
        assert!(verify_password("hunter2", &hash, None).unwrap());
    }

    #[test]
    fn wrong_password_does_not_match() {
        let hash = hash_password("hunter2", None).unwrap();
        assert!(!verify_password("wrong", &hash, None).unwrap());
    }

    #[test]
    fn pepper_is_applied() {
        let hash = hash_password("hunter2", Some("pepper!")).unwrap();
        assert!(verify_password("hunter2", &hash, Some("pepper!")).unwrap());
        // Without pepper should fail.
        assert!(!verify_password("hunter2", &hash, None).unwrap());
    }

    #[test]
    fn malformed_hash_returns_error() {
        let result = verify_password("pw", "not-a-hash", None);
        assert!(result.is_err());
    }
}
