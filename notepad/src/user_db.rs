pub mod errors;
mod internal;

pub use internal::{ProductionUserDb, UserDb, UserDbImpl};
