use assert_fs::prelude::*;
use assert_fs::TempDir;
use crate::constants::{CONFIG_FILE_PATH, DATA_DIR_PATH, USER_DB_PATH};

/// A temporary root with a config file pointing into it and an empty data
/// directory, with `extra` inserted as top-level TOML keys. No users exist
/// yet.
pub fn setup_basic_config_impl(extra: &str) -> TempDir {
    let root = TempDir::new().unwrap();
    let data_dir = root.child(DATA_DIR_PATH);
    data_dir.create_dir_all().unwrap();

    // top-level keys have to come before any table
    let config = format!(
        r#"data_directory = "{}"
user_db = "{}"
log_level = "off"
{extra}

[hasher_config]
argon2_m_cost = 64
argon2_t_cost = 1
argon2_p_cost = 1
"#,
        data_dir.to_str().unwrap(),
        root.child(USER_DB_PATH).to_str().unwrap(),
    );
    root.child(CONFIG_FILE_PATH).write_str(&config).unwrap();

    root
}
