#[macro_use]
extern crate boolean_enums;

pub mod config;
pub mod contact;
pub mod data;
pub mod hasher;
pub mod lib_constants;
pub mod logging;
pub mod rng;
pub mod serde;
pub mod storage;
pub mod user_db;
pub mod username_string;
pub mod util;
mod macros;

#[doc(hidden)]
pub use log as __log;
