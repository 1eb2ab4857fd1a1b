mod constants;
mod mock_hierarchy;

pub use constants::CONFIG_FILE_PATH;
pub use mock_hierarchy::setup_basic_config_impl;
