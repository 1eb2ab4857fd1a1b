
use std::error::Error;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHashString, SaltString};
use argon2::{Algorithm, Argon2, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use thiserror::Error;
use crate::config::hasher_config::ProductionHasherConfigData;

pub trait Hasher: Send + Sync {
    fn generate_hash(&self, password: &str) -> Result<PasswordHashString, HasherError>;
    fn check_hash(
        &self,
        hash: PasswordHash<'_>,
        password: &str,
    ) -> Result<bool, HasherError>;
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProductionHasherConfig {
    pub argon2_params: argon2::Params,
}

impl ProductionHasherConfig {
    pub fn new(argon2_params: argon2::Params) -> Self {
        ProductionHasherConfig {
            argon2_params,
        }
    }
}

impl TryFrom<&ProductionHasherConfigData> for ProductionHasherConfig {
    type Error = HasherError;
    fn try_from(value: &ProductionHasherConfigData) -> Result<Self, Self::Error> {
        argon2::Params::try_from(value)
            .map(ProductionHasherConfig::new)
            .map_err(|e| HasherError::Initialization(Box::new(e)))
    }
}

pub struct ProductionHasher {
    argon2: Argon2<'static>,
}

impl ProductionHasher {
    pub fn new(config: ProductionHasherConfig) -> Self {
        ProductionHasher {
            argon2: Argon2::new(
                Algorithm::Argon2id,
                Version::V0x13,
                config.argon2_params,
            ),
        }
    }
}

impl Hasher for ProductionHasher {
    fn generate_hash(&self, password: &str) -> Result<PasswordHashString, HasherError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2.hash_password(password.as_bytes(), &salt)
            .map(|v| v.serialize())
            .map_err(|e| HasherError::Hash(Box::new(e)))
    }

    fn check_hash(&self, hash: PasswordHash<'_>, password: &str) -> Result<bool, HasherError> {
        self.argon2
            .verify_password(password.as_bytes(), &hash)
            .map(|_| true)
            .or_else(|e|
                if let argon2::password_hash::Error::Password = e {
                    Ok(false)
                } else {
                    Err(e)
                }
            )
            .map_err(|e| HasherError::Hash(Box::new(e)))
    }
}

#[derive(Debug, Error)]
pub enum HasherError {
    #[error("failed to initialize password hasher: {0}")]
    Initialization(Box<dyn Error + Send + Sync>),

    #[error("failed to hash password: {0}")]
    Hash(Box<dyn Error + Send + Sync>),
}
