use std::path::Path;
use rocket::Config;
use rocket::data::{Limits, ToByteUnit};
use rocket::figment::Figment;
use rocket::figment::providers::{Env, Format, Serialized, Toml};
use serde::Serialize;
use crate::config::app_config::AppConfig;
use crate::lib_constants::APP_CONFIG_ENV_PREFIX;

pub trait FigmentExt {
    fn setup_app_config(
        self,
        config_file: impl AsRef<Path>,
    ) -> Figment;
}

impl FigmentExt for Figment {
    fn setup_app_config(self, config_file: impl AsRef<Path>) -> Figment {
        self.merge(Serialized::defaults(AppConfig::default()))
            .merge(Serialized::defaults(DefaultLimits::new()))
            .merge(Toml::file_exact(config_file))
            .merge(Env::prefixed(APP_CONFIG_ENV_PREFIX).global())
    }
}

// a maximal note, url-encoded, has to fit into a form
#[derive(Serialize)]
struct DefaultLimits {
    limits: Limits,
}

impl DefaultLimits {
    fn new() -> Self {
        DefaultLimits {
            limits: Limits::default().limit("form", 512.kibibytes()),
        }
    }
}
