use serde::{Deserialize, Serialize};
use crate::user_db::internal::user::User;

/// The users file: a sequence of `[[user]]` tables.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub(super) struct UsersData {
    #[serde(rename = "user", default)]
    pub users: Vec<User>,
}
