use std::collections::HashMap;
use std::sync::Arc;
use argon2::password_hash::PasswordHashString;
use async_trait::async_trait;
use log::{debug, info};
use tokio::sync::RwLock;
use tokio::task::spawn_blocking;

use crate::config::app_config::AppConfig;
use crate::hasher::{Hasher, ProductionHasher};
use crate::user_db::errors::{RegistrationError, UserDbError};
use crate::user_db::internal::data::UsersData;
use crate::user_db::internal::io_trait::{ProductionUserDbIo, UserDbIo};
use crate::user_db::internal::user::User;
use crate::username_string::UsernameString;

mod data;
mod io_trait;
#[cfg(test)] mod tests;
mod user;

#[async_trait]
pub trait UserDb: Send + Sync {
    async fn does_user_exist(
        &self,
        username: &UsernameString,
    ) -> Result<bool, UserDbError>;

    /// `false` both for unknown users and for wrong passwords.
    async fn check_user_credentials(
        &self,
        username: &UsernameString,
        password: &str,
    ) -> Result<bool, UserDbError>;

    async fn register_user(
        &self,
        username: &UsernameString,
        password: &str,
        confirmation: &str,
    ) -> Result<(), RegistrationError>;
}

// checked against when the user is unknown, so that unknown users take as
// long to reject as wrong passwords
const DUMMY_PASSWORD: &str = "notepad-dummy-password";

#[allow(private_bounds)]
pub struct UserDbImpl<H: Hasher + 'static, Io: UserDbIo> {
    hasher: Arc<H>,
    io: Io,
    min_password_length: usize,
    dummy_hash: PasswordHashString,
    users: RwLock<HashMap<UsernameString, User>>,
}

/// Runs `f` on the blocking pool, argon2 is too slow for the async workers.
async fn with_hasher<H, T, F>(hasher: &Arc<H>, f: F) -> Result<T, UserDbError>
where
    H: Hasher + 'static,
    T: Send + 'static,
    F: FnOnce(&H) -> T + Send + 'static,
{
    let hasher = hasher.clone();
    Ok(spawn_blocking(move || f(&hasher)).await?)
}

#[allow(private_bounds)]
impl<H: Hasher + 'static, Io: UserDbIo> UserDbImpl<H, Io> {
    async fn new_internal(
        hasher: H,
        io: Io,
        min_password_length: usize,
    ) -> Result<Self, UserDbError> {
        let hasher = Arc::new(hasher);
        let dummy_hash = with_hasher(
            &hasher,
            |hasher| hasher.generate_hash(DUMMY_PASSWORD),
        ).await??;
        let users = match io.read_users().await? {
            Some(data) => toml::from_str::<UsersData>(&data)?.users,
            None => {
                info!("no users file yet, starting with an empty user db");
                Vec::new()
            },
        };
        let mut users_map = HashMap::with_capacity(users.len());
        for user in users {
            if users_map.contains_key(&user.username) {
                return Err(UserDbError::DuplicateUser(user.username));
            }
            users_map.insert(user.username.clone(), user);
        }
        debug!("loaded {} users", users_map.len());
        Ok(
            UserDbImpl {
                hasher,
                io,
                min_password_length,
                dummy_hash,
                users: RwLock::new(users_map),
            }
        )
    }

    async fn persist(
        &self,
        users: &HashMap<UsernameString, User>,
    ) -> Result<(), UserDbError> {
        let mut data = UsersData {
            users: users.values().cloned().collect(),
        };
        data.users.sort_by(|a, b| a.username.cmp(&b.username));
        self.io.write_users(toml::to_string(&data)?).await?;
        Ok(())
    }
}

#[async_trait]
impl<H: Hasher + 'static, Io: UserDbIo> UserDb for UserDbImpl<H, Io> {
    async fn does_user_exist(
        &self,
        username: &UsernameString,
    ) -> Result<bool, UserDbError> {
        Ok(self.users.read().await.contains_key(username))
    }

    async fn check_user_credentials(
        &self,
        username: &UsernameString,
        password: &str,
    ) -> Result<bool, UserDbError> {
        let user = self.users.read().await
            .get(username)
            .cloned();
        let (hash, is_known) = match user {
            Some(user) => (user.hash, true),
            None => {
                debug!("no user \"{username}\"");
                (self.dummy_hash.clone(), false)
            },
        };
        let password = password.to_owned();
        let is_match = with_hasher(
            &self.hasher,
            move |hasher| hasher.check_hash(hash.password_hash(), &password),
        ).await??;
        Ok(is_known && is_match)
    }

    async fn register_user(
        &self,
        username: &UsernameString,
        password: &str,
        confirmation: &str,
    ) -> Result<(), RegistrationError> {
        if password != confirmation {
            return Err(RegistrationError::PasswordMismatch);
        }
        if self.users.read().await.contains_key(username) {
            return Err(RegistrationError::UsernameTaken);
        }
        if password.chars().count() < self.min_password_length {
            return Err(
                RegistrationError::PasswordTooShort {
                    min_length: self.min_password_length,
                }
            );
        }
        let password = password.to_owned();
        let hash = with_hasher(
            &self.hasher,
            move |hasher| hasher.generate_hash(&password),
        ).await??;

        // somebody could have taken the name while the hash was computed
        let mut users = self.users.write().await;
        if users.contains_key(username) {
            return Err(RegistrationError::UsernameTaken);
        }
        users.insert(
            username.clone(),
            User {
                username: username.clone(),
                hash,
            },
        );
        if let Err(e) = self.persist(&users).await {
            users.remove(username);
            return Err(e.into());
        }
        info!("registered user \"{username}\"");
        Ok(())
    }
}

pub type ProductionUserDb = UserDbImpl<ProductionHasher, ProductionUserDbIo>;

impl ProductionUserDb {
    pub async fn new(
        app_config: &AppConfig,
        hasher: ProductionHasher,
    ) -> Result<ProductionUserDb, UserDbError> {
        debug!("loading user db from \"{}\"", app_config.user_db.display());
        Self::new_internal(
            hasher,
            ProductionUserDbIo::new(&app_config.user_db),
            app_config.min_password_length,
        ).await
    }
}
