use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::config::hasher_config::ProductionHasherConfigData;
use crate::lib_constants::{
    DEFAULT_DATA_DIR, DEFAULT_LOGIN_REDIRECT, DEFAULT_LOGOUT_REDIRECT,
    DEFAULT_MAX_COLLECTION_LEN, DEFAULT_MAX_NOTE_LEN, DEFAULT_MAX_NOTE_NAME_LEN,
    DEFAULT_MIN_PASSWORD_LEN, DEFAULT_USER_DB, DEFAULT_WHATSAPP_BASE_URL,
    DEFAULT_WHATSAPP_NUMBER, NOTE_FORM_OVERHEAD,
};

/// Application settings, extracted from the same figment as Rocket's own
/// configuration.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_directory: PathBuf,
    pub user_db: PathBuf,

    /// The number the contact form sends its WhatsApp messages to,
    /// country code first, without `+`.
    pub whatsapp_number: String,
    pub whatsapp_base_url: String,

    pub login_redirect: String,
    pub logout_redirect: String,

    /// Empty means any host is accepted.
    pub allowed_hosts: Vec<String>,

    pub min_password_length: usize,
    pub max_note_size: u64,
    pub max_note_name_size: u64,
    pub max_collection_size: u64,

    pub hasher_config: ProductionHasherConfigData,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_directory: DEFAULT_DATA_DIR.into(),
            user_db: DEFAULT_USER_DB.into(),
            whatsapp_number: DEFAULT_WHATSAPP_NUMBER.into(),
            whatsapp_base_url: DEFAULT_WHATSAPP_BASE_URL.into(),
            login_redirect: DEFAULT_LOGIN_REDIRECT.into(),
            logout_redirect: DEFAULT_LOGOUT_REDIRECT.into(),
            allowed_hosts: Vec::new(),
            min_password_length: DEFAULT_MIN_PASSWORD_LEN,
            max_note_size: DEFAULT_MAX_NOTE_LEN,
            max_note_name_size: DEFAULT_MAX_NOTE_NAME_LEN,
            max_collection_size: DEFAULT_MAX_COLLECTION_LEN,
            hasher_config: ProductionHasherConfigData::default(),
        }
    }
}

#[derive(Debug, Eq, Error, PartialEq)]
pub enum LimitsError {
    #[error(
        "a maximal note needs a form limit of {required} bytes, \
            the configured one is {configured} bytes"
    )]
    FormLimitTooSmall {
        required: u64,
        configured: u64,
    },

    #[error(
        "max_collection_size ({collection}) can't hold a single maximal note \
            ({note} bytes)"
    )]
    CollectionLimitTooSmall {
        collection: u64,
        note: u64,
    },
}

impl AppConfig {
    /// The form limit a note with a maximal title and content needs when
    /// every byte of it is percent-encoded.
    pub fn required_form_limit(&self) -> u64 {
        self.max_note_size
            .saturating_add(self.max_note_name_size)
            .saturating_mul(3)
            .saturating_add(NOTE_FORM_OVERHEAD)
    }

    /// Checks that a note the storage accepts can get through the form
    /// and fits into a collection.
    pub fn check_limits(&self, form_limit: u64) -> Result<(), LimitsError> {
        let required = self.required_form_limit();
        if form_limit < required {
            return Err(
                LimitsError::FormLimitTooSmall {
                    required,
                    configured: form_limit,
                }
            );
        }
        let note = self.max_note_size.saturating_add(self.max_note_name_size);
        if self.max_collection_size < note {
            return Err(
                LimitsError::CollectionLimitTooSmall {
                    collection: self.max_collection_size,
                    note,
                }
            );
        }
        Ok(())
    }
}
