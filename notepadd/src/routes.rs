mod account;
pub mod authentication_guard;
mod errors;
pub mod host_guard;
mod notes;
mod site;

use rocket::response::content::RawHtml;
use rocket::response::{Flash, Redirect};
use rocket::{catch, catchers, Build, Request, Responder, Rocket};
use crate::pages;

pub use errors::WebError;

/// What a page handler answers with.
#[derive(Responder)]
pub enum PageResponse {
    Page(RawHtml<String>),
    Redirect(Redirect),
    Flash(Flash<Redirect>),
}

impl From<RawHtml<String>> for PageResponse {
    fn from(value: RawHtml<String>) -> Self {
        PageResponse::Page(value)
    }
}

impl From<Redirect> for PageResponse {
    fn from(value: Redirect) -> Self {
        PageResponse::Redirect(value)
    }
}

impl From<Flash<Redirect>> for PageResponse {
    fn from(value: Flash<Redirect>) -> Self {
        PageResponse::Flash(value)
    }
}

pub trait NotepadRocketBuildExt {
    fn install_notepad_routes(self) -> Self;
}

impl NotepadRocketBuildExt for Rocket<Build> {
    fn install_notepad_routes(self) -> Self {
        self
            .mount("/", account::account_routes())
            .mount("/", notes::notes_routes())
            .mount("/", site::site_routes())
            .register(
                "/",
                catchers![
                    bad_request,
                    not_found,
                    internal_error,
                ]
            )
    }
}

#[catch(400)]
fn bad_request() -> RawHtml<String> {
    pages::error_page("Bad request", "The request could not be understood.")
}

#[catch(404)]
fn not_found(request: &Request<'_>) -> RawHtml<String> {
    pages::error_page(
        "Not found",
        &format!("Nothing lives at {}.", request.uri().path()),
    )
}

#[catch(500)]
fn internal_error() -> RawHtml<String> {
    pages::error_page("Server error", "Something went wrong, please try again later.")
}
