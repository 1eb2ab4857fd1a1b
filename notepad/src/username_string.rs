use std::fmt::{self, Display, Formatter};
use std::ops::Deref;
use std::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde::de::Error;
use serde::de::Unexpected::Str;
use thiserror::Error;
use crate::lib_constants::MAX_USERNAME_LEN;

/// A validated username: 1 to `MAX_USERNAME_LEN` characters, each
/// alphanumeric or one of `@.+-_`. Usernames end up in file names, so
/// nothing else gets through.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct UsernameString(String);

#[derive(Debug, Eq, Error, PartialEq)]
pub enum UsernameParseError {
    #[error("username must not be empty")]
    Empty,

    #[error("username must be at most {MAX_USERNAME_LEN} characters long")]
    TooLong,

    #[error("username may only contain letters, digits and @.+-_")]
    InvalidCharacter(char),
}

impl FromStr for UsernameString {
    type Err = UsernameParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(UsernameParseError::Empty);
        }
        if s.chars().count() > MAX_USERNAME_LEN {
            return Err(UsernameParseError::TooLong);
        }
        if let Some(c) = s.chars().find(|c| !is_username_char(*c)) {
            return Err(UsernameParseError::InvalidCharacter(c));
        }
        Ok(UsernameString(s.to_string()))
    }
}

fn is_username_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_')
}

impl Deref for UsernameString {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0[..]
    }
}

impl Display for UsernameString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for UsernameString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for UsernameString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Visitor;
        impl serde::de::Visitor<'_> for Visitor {
            type Value = UsernameString;

            fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
                formatter.write_str("string containing a valid username")
            }

            fn visit_str<E>(self, v: &str) -> Result<UsernameString, E>
            where
                E: Error
            {
                UsernameString::from_str(v)
                    .map_err(|_| Error::invalid_value(Str(v), &self))
            }
        }

        deserializer.deserialize_str(Visitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_regular_usernames() {
        for name in ["alice", "bob.smith", "carol+notes", "dave-99", "e_f", "me@example.com", "пользователь"] {
            let username = UsernameString::from_str(name)
                .unwrap_or_else(|e| panic!("{name} rejected: {e}"));
            assert_eq!(&*username, name);
        }
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(UsernameString::from_str(""), Err(UsernameParseError::Empty));
    }

    #[test]
    fn rejects_path_separators() {
        assert_eq!(
            UsernameString::from_str("../etc"),
            Err(UsernameParseError::InvalidCharacter('/')),
        );
        assert_eq!(
            UsernameString::from_str("a b"),
            Err(UsernameParseError::InvalidCharacter(' ')),
        );
    }

    #[test]
    fn rejects_too_long() {
        assert!(UsernameString::from_str(&"a".repeat(MAX_USERNAME_LEN)).is_ok());
        assert_eq!(
            UsernameString::from_str(&"a".repeat(MAX_USERNAME_LEN + 1)),
            Err(UsernameParseError::TooLong),
        );
    }

    #[test]
    fn deserialization_validates() {
        let username: UsernameString = serde_json::from_str("\"alice\"").unwrap();
        assert_eq!(&*username, "alice");
        assert!(serde_json::from_str::<UsernameString>("\"a/b\"").is_err());
    }
}
