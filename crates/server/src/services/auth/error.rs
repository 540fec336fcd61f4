use crate::store::StorageError;

#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    /// Unknown username or wrong password. Deliberately indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username already exists")]
    UsernameTaken,

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("password hashing failed: {0}")]
    Hash(argon2::Error),
}

impl From<argon2::Error> for AuthError {
    fn from(err: argon2::Error) -> Self {
        Self::Hash(err)
    }
}
