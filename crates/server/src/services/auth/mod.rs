//! Credential handling.
//!
//! Passwords are stored as `base64(hash).base64(salt)` where the hash is a
//! raw Argon2id derivation over the password and a fresh 16-byte random salt.
//! Verification re-derives with the stored salt and compares in constant
//! time. A stored value that does not parse fails verification rather than
//! erroring, so a corrupt row cannot be logged into.

mod error;

pub use error::AuthError;

use std::sync::Arc;

use argon2::Argon2;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use rand::RngCore as _;

use fashionzone_core::{NewUser, User, Username};

use crate::store::Storage;

const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;

pub struct AuthService {
    store: Arc<dyn Storage>,
}

impl AuthService {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self { store }
    }

    /// Register a new account. The username must be free.
    ///
    /// # Errors
    ///
    /// [`AuthError::UsernameTaken`] when the username exists, plus storage
    /// and hashing failures.
    pub async fn register(&self, username: Username, password: &str) -> Result<User, AuthError> {
        if self.store.user_by_username(&username).await?.is_some() {
            return Err(AuthError::UsernameTaken);
        }
        let password = hash_password(password)?;
        let user = self.store.create_user(NewUser { username, password }).await?;
        Ok(user)
    }

    /// Look up the user and verify the password.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidCredentials`] for both unknown usernames and
    /// wrong passwords.
    pub async fn login(&self, username: &Username, password: &str) -> Result<User, AuthError> {
        let user = self
            .store
            .user_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;
        if verify_password(password, &user.password)? {
            Ok(user)
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

/// Derive a fresh `hash.salt` credential string.
///
/// # Errors
///
/// Returns an error if the Argon2 derivation fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);

    let mut hash = [0u8; HASH_LEN];
    Argon2::default().hash_password_into(password.as_bytes(), &salt, &mut hash)?;

    Ok(format!(
        "{}.{}",
        BASE64.encode(hash),
        BASE64.encode(salt)
    ))
}

/// Check a password against a stored `hash.salt` string.
///
/// A malformed stored value yields `Ok(false)`.
///
/// # Errors
///
/// Returns an error if the Argon2 derivation fails.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, AuthError> {
    let Some((hash_b64, salt_b64)) = stored.split_once('.') else {
        return Ok(false);
    };
    let (Ok(expected), Ok(salt)) = (BASE64.decode(hash_b64), BASE64.decode(salt_b64)) else {
        return Ok(false);
    };
    if expected.len() != HASH_LEN || salt.is_empty() {
        return Ok(false);
    }

    let mut derived = [0u8; HASH_LEN];
    Argon2::default().hash_password_into(password.as_bytes(), &salt, &mut derived)?;

    Ok(constant_time_eq(&derived, &expected))
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::store::MemoryStorage;

    use super::*;

    #[test]
    fn test_hash_then_verify_roundtrip() {
        let stored = hash_password("hunter2").unwrap();
        assert!(stored.contains('.'));
        assert!(verify_password("hunter2", &stored).unwrap());
        assert!(!verify_password("hunter3", &stored).unwrap());
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let a = hash_password("hunter2").unwrap();
        let b = hash_password("hunter2").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_stored_value_fails_closed() {
        assert!(!verify_password("hunter2", "no-delimiter").unwrap());
        assert!(!verify_password("hunter2", "not!base64.alsonot!").unwrap());
        assert!(!verify_password("hunter2", ".").unwrap());
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let service = AuthService::new(Arc::new(MemoryStorage::new()));
        let username = Username::parse("demo").unwrap();

        let user = service.register(username.clone(), "hunter2").await.unwrap();
        assert_eq!(user.username, username);

        let logged_in = service.login(&username, "hunter2").await.unwrap();
        assert_eq!(logged_in.id, user.id);
    }

    #[tokio::test]
    async fn test_register_rejects_taken_username() {
        let service = AuthService::new(Arc::new(MemoryStorage::new()));
        let username = Username::parse("demo").unwrap();

        service.register(username.clone(), "hunter2").await.unwrap();
        let err = service.register(username, "other").await.unwrap_err();
        assert!(matches!(err, AuthError::UsernameTaken));
    }

    #[tokio::test]
    async fn test_login_wrong_password_and_unknown_user() {
        let service = AuthService::new(Arc::new(MemoryStorage::new()));
        let username = Username::parse("demo").unwrap();
        service.register(username.clone(), "hunter2").await.unwrap();

        let err = service.login(&username, "wrong").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));

        let ghost = Username::parse("ghost").unwrap();
        let err = service.login(&ghost, "hunter2").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }
}
