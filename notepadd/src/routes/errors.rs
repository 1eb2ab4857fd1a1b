use log::error;
use notepad::storage::errors::StorageError;
use notepad::user_db::errors::UserDbError;
use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::Request;
use thiserror::Error;

/// A failure the user can do nothing about: logged, then answered with a
/// plain 500.
#[derive(Debug, Error)]
pub enum WebError {
    #[error("note storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("user db error: {0}")]
    UserDb(#[from] UserDbError),
}

impl<'r> Responder<'r, 'static> for WebError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        error!("{} {} failed: {self}", request.method(), request.uri());
        Err(Status::InternalServerError)
    }
}
