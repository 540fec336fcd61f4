//! User entity.

use serde::{Deserialize, Serialize};

use crate::types::{UserId, Username};

use super::ValidationError;

/// A registered user.
///
/// The `password` field holds the salted hash, never plaintext. It is
/// excluded from serialized responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct User {
    pub id: UserId,
    pub username: Username,
    /// Salted password hash in `hash.salt` form.
    #[serde(skip_serializing, default)]
    pub password: String,
}

/// Insert shape for a new user.
///
/// At this layer the `password` is whatever the caller hands over - the auth
/// service hashes before insert, so storage only ever sees the hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: Username,
    pub password: String,
}

impl NewUser {
    /// Validate the insert shape.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyPassword`] if the password is empty.
    /// Username constraints are enforced by [`Username`]'s own parsing.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.password.is_empty() {
            return Err(ValidationError::EmptyPassword);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_not_serialized() {
        let user = User {
            id: UserId::new(1),
            username: Username::parse("alice").expect("valid"),
            password: "deadbeef.cafe".to_owned(),
        };
        let json = serde_json::to_string(&user).expect("serialize");
        assert!(!json.contains("deadbeef"));
        assert!(json.contains("alice"));
    }

    #[test]
    fn test_empty_password_rejected() {
        let new_user = NewUser {
            username: Username::parse("alice").expect("valid"),
            password: String::new(),
        };
        assert_eq!(new_user.validate(), Err(ValidationError::EmptyPassword));
    }
}
