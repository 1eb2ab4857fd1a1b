use notepad::data::NoteId;

pub const SESSION_COOKIE: &str = "notepad_session";

pub const LANDING_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login/";
pub const REGISTER_PATH: &str = "/register/";
pub const LOGOUT_PATH: &str = "/logout/";
pub const DASHBOARD_PATH: &str = "/dashboard/";
pub const CREATE_PATH: &str = "/create/";
pub const ABOUT_PATH: &str = "/about/";
pub const GALLERY_PATH: &str = "/gallery/";
pub const CONTACT_PATH: &str = "/contact/whatsapp/";

pub fn note_path(id: NoteId) -> String {
    format!("/note/{id}/")
}

pub fn note_delete_path(id: NoteId) -> String {
    format!("/note/{id}/delete/")
}
