use std::ffi::OsStr;
use std::path::PathBuf;
use syslog::{BasicLogger, Facility};

pub fn init_tool_logging() {
    init_logging_env()
}

pub fn init_daemon_logging(use_syslog: UseSyslog) {
    if use_syslog.into() {
        init_logging_syslog()
    } else {
        init_tool_logging();
    }
}
gen_boolean_enum!(pub UseSyslog);

fn init_logging_syslog() {
    let logger = match syslog::unix(
        syslog::Formatter3164 {
            facility: Facility::LOG_USER,
            hostname: None,
            process: process_name(),
            pid: std::process::id(),
        }
    ) {
        Ok(logger) => logger,
        Err(e) => logging_init_failed(e),
    };
    if let Err(e) = log::set_boxed_logger(Box::new(BasicLogger::new(logger))) {
        logging_init_failed(e);
    }
    log::set_max_level(log::STATIC_MAX_LEVEL);
}

// there is no logger to report to yet
fn logging_init_failed(e: impl std::fmt::Display) -> ! {
    eprintln!("syslog initialization failed: {e}");
    std::process::exit(1)
}

fn process_name() -> String {
    std::env::args()
        .next()
        .and_then(|name|
            PathBuf::from(name)
                .file_name()
                .map(|n| OsStr::to_string_lossy(n).into_owned())
        )
        .unwrap_or_default()
}

fn init_logging_env() {
    env_logger::builder()
        .filter_level(
            if cfg!(debug_assertions) {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Info
            }
        )
        .parse_default_env()
        .init()
}
