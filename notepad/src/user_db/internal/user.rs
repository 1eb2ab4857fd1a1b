use argon2::password_hash::PasswordHashString;
use serde::{Deserialize, Serialize};
use crate::username_string::UsernameString;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub(super) struct User {
    pub username: UsernameString,

    #[serde(with = "crate::serde::password_hash_string")]
    pub hash: PasswordHashString,
}
