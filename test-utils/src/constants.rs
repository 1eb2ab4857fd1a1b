// relative to the root of a mock hierarchy
pub const CONFIG_FILE_PATH: &str = "etc/notepad/notepad.toml";
pub const DATA_DIR_PATH: &str = "var/notepad";
pub const USER_DB_PATH: &str = "var/notepad/users.toml";
