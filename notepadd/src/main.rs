mod app_constants;
mod app_setup;
mod cli;
mod pages;
mod routes;
#[cfg(test)] mod tests;

use crate::cli::CliConfig;
use app_setup::{build_rocket, make_figment};
use clap::{crate_name, Parser};
use log::info;
use notepad::error_exit;
use notepad::logging::init_daemon_logging;

fn main() {
    let cli_config = CliConfig::parse();
    init_daemon_logging(cli_config.syslog.into());

    info!("{} starting up", crate_name!());

    if !cli_config.config_file.exists() {
        error_exit!(
            "configuration file at {} does not exist",
            cli_config.config_file.display()
        )
    }
    let rocket = build_rocket(make_figment(&cli_config.config_file))
        .unwrap_or_else(|e| error_exit!("invalid configuration: {e}"));

    let result = rocket::execute(rocket.launch());
    if let Err(e) = result {
        error_exit!("failed to launch rocket: {}", e);
    }
}
