use log::warn;
use notepad::data::{NewNote, NoteId, NoteUpdate};
use notepad::storage::errors::StorageError;
use notepad::storage::NoteStorage;
use rocket::form::Form;
use rocket::request::FlashMessage;
use rocket::response::{Flash, Redirect};
use rocket::{get, post, routes, FromForm, Route, State};
use crate::app_constants::{note_path, CREATE_PATH, DASHBOARD_PATH, LOGIN_PATH};
use crate::pages;
use crate::routes::authentication_guard::CurrentUser;
use crate::routes::{PageResponse, WebError};

/// Absent fields are left as they are.
#[derive(FromForm)]
struct NoteForm {
    title: Option<String>,
    content: Option<String>,
}

const NOTE_NOT_FOUND_MESSAGE: &str = "Note not found!";
const NOTE_TOO_BIG_MESSAGE: &str = "The note is too long.";

#[get("/dashboard/")]
async fn dashboard(
    user: CurrentUser,
    flash: Option<FlashMessage<'_>>,
    storage: &State<NoteStorage>,
) -> Result<PageResponse, WebError> {
    let notes = storage.list_notes(&user).await?;
    Ok(pages::dashboard(&user, flash.as_ref(), &notes).into())
}

#[get("/create/")]
fn create_page(
    user: CurrentUser,
    flash: Option<FlashMessage<'_>>,
) -> PageResponse {
    pages::create_note(&user, flash.as_ref()).into()
}

#[post("/create/", data = "<form>")]
async fn create(
    user: CurrentUser,
    form: Form<NoteForm>,
    storage: &State<NoteStorage>,
) -> Result<PageResponse, WebError> {
    let form = form.into_inner();
    let result = storage
        .create_note(
            &user,
            NewNote {
                title: form.title,
                content: form.content,
            },
        )
        .await;
    match result {
        Ok(note) => Ok(
            Flash::success(Redirect::to(note_path(note.id)), "Note created!").into()
        ),
        Err(StorageError::NoteTooBig) => {
            warn!("user \"{}\" tried to create an oversized note", *user);
            Ok(Flash::error(Redirect::to(CREATE_PATH), NOTE_TOO_BIG_MESSAGE).into())
        },
        Err(e) => Err(e.into()),
    }
}

#[get("/note/<id>/")]
async fn note_detail(
    user: CurrentUser,
    id: u64,
    flash: Option<FlashMessage<'_>>,
    storage: &State<NoteStorage>,
) -> Result<PageResponse, WebError> {
    match storage.read_note(&user, NoteId::from(id)).await {
        Ok(note) => Ok(pages::note_detail(&user, flash.as_ref(), &note).into()),
        Err(StorageError::NoteNotFound) => Ok(note_not_found()),
        Err(e) => Err(e.into()),
    }
}

#[post("/note/<id>/", data = "<form>")]
async fn update(
    user: CurrentUser,
    id: u64,
    form: Form<NoteForm>,
    storage: &State<NoteStorage>,
) -> Result<PageResponse, WebError> {
    let id = NoteId::from(id);
    let form = form.into_inner();
    let result = storage
        .update_note(
            &user,
            id,
            NoteUpdate {
                title: form.title,
                content: form.content,
            },
        )
        .await;
    match result {
        Ok(note) => Ok(
            Flash::success(Redirect::to(note_path(note.id)), "Note updated!").into()
        ),
        Err(StorageError::NoteNotFound) => Ok(note_not_found()),
        Err(StorageError::NoteTooBig) => {
            warn!("user \"{}\" tried to grow note {id} too much", *user);
            Ok(Flash::error(Redirect::to(note_path(id)), NOTE_TOO_BIG_MESSAGE).into())
        },
        Err(e) => Err(e.into()),
    }
}

#[post("/note/<id>/delete/")]
async fn delete(
    user: CurrentUser,
    id: u64,
    storage: &State<NoteStorage>,
) -> Result<Flash<Redirect>, WebError> {
    storage.delete_note(&user, NoteId::from(id)).await?;
    Ok(Flash::success(Redirect::to(DASHBOARD_PATH), "Note deleted!"))
}

fn note_not_found() -> PageResponse {
    Flash::error(Redirect::to(DASHBOARD_PATH), NOTE_NOT_FOUND_MESSAGE).into()
}

#[get("/dashboard/", rank = 2)]
fn dashboard_unauthenticated() -> Redirect {
    Redirect::to(LOGIN_PATH)
}

#[get("/create/", rank = 2)]
fn create_page_unauthenticated() -> Redirect {
    Redirect::to(LOGIN_PATH)
}

#[post("/create/", rank = 2)]
fn create_unauthenticated() -> Redirect {
    Redirect::to(LOGIN_PATH)
}

#[get("/note/<_id>/", rank = 2)]
fn note_detail_unauthenticated(_id: u64) -> Redirect {
    Redirect::to(LOGIN_PATH)
}

#[post("/note/<_id>/", rank = 2)]
fn update_unauthenticated(_id: u64) -> Redirect {
    Redirect::to(LOGIN_PATH)
}

#[post("/note/<_id>/delete/", rank = 2)]
fn delete_unauthenticated(_id: u64) -> Redirect {
    Redirect::to(LOGIN_PATH)
}

pub fn notes_routes() -> Vec<Route> {
    routes![
        dashboard,
        create_page,
        create,
        note_detail,
        update,
        delete,
        dashboard_unauthenticated,
        create_page_unauthenticated,
        create_unauthenticated,
        note_detail_unauthenticated,
        update_unauthenticated,
        delete_unauthenticated,
    ]
}
