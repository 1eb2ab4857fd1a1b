pub const DEFAULT_CONFIG_FILE: &str = "/etc/notepad/notepad.toml";
pub const APP_CONFIG_ENV_PREFIX: &str = "NOTEPAD_";

pub const DEFAULT_DATA_DIR: &str = "/var/notepad";
pub const DEFAULT_USER_DB: &str = "/var/notepad/users.toml";

// relative to the data directory
pub const NOTES_DIRECTORY_PATH: &str = "user_notes";
pub const NOTES_FILE_SUFFIX: &str = "_notes.json";
pub const TMP_FILENAME_INFIX: &str = ".tmp.";

pub const DEFAULT_NOTE_TITLE: &str = "Untitled";

pub const DEFAULT_MAX_NOTE_LEN: u64 = 128 * 1024;
pub const DEFAULT_MAX_NOTE_NAME_LEN: u64 = 256;
pub const DEFAULT_MAX_COLLECTION_LEN: u64 = 16 * 1024 * 1024;

// room for the field names and separators of the note form
pub const NOTE_FORM_OVERHEAD: u64 = 64;

pub const MAX_USERNAME_LEN: usize = 150;
pub const DEFAULT_MIN_PASSWORD_LEN: usize = 8;

pub const DEFAULT_WHATSAPP_NUMBER: &str = "6289501909756";
pub const DEFAULT_WHATSAPP_BASE_URL: &str = "https://wa.me";
pub const DEFAULT_LOGIN_REDIRECT: &str = "/dashboard/";
pub const DEFAULT_LOGOUT_REDIRECT: &str = "/";

// the defaults are taken from the argon2 crate itself
pub const DEFAULT_ARGON2_M_COST: u32 = 19 * 1024;
pub const DEFAULT_ARGON2_T_COST: u32 = 2;
pub const DEFAULT_ARGON2_P_COST: u32 = 1;
pub const DEFAULT_ARGON2_OUTPUT_LEN: Option<usize> = Some(32);
