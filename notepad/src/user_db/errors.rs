use std::io::Error as IoError;
use thiserror::Error;
use tokio::task::JoinError;
use crate::hasher::HasherError;
use crate::username_string::UsernameString;

#[derive(Debug, Error)]
pub enum UserDbError {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error("user db parsing error: {0}")]
    Parsing(#[from] toml::de::Error),

    #[error("user db serialization error: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("user \"{0}\" is listed more than once")]
    DuplicateUser(UsernameString),

    #[error(transparent)]
    Hasher(#[from] HasherError),

    #[error("password hashing task failed: {0}")]
    HashingTask(#[from] JoinError),
}

/// Why a registration was refused. Everything except `Db` is the user's
/// fault and gets shown to them.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("username is already taken")]
    UsernameTaken,

    #[error("password must be at least {min_length} characters long")]
    PasswordTooShort {
        min_length: usize,
    },

    #[error(transparent)]
    Db(#[from] UserDbError),
}

impl From<HasherError> for RegistrationError {
    fn from(value: HasherError) -> Self {
        RegistrationError::Db(value.into())
    }
}
