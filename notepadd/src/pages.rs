//! Minimal HTML pages. Everything that comes from a user goes through
//! `escape()`.

use std::borrow::Cow;
use std::fmt::Write;
use notepad::data::Note;
use notepad::serde::timestamp;
use rocket::http::RawStr;
use rocket::request::FlashMessage;
use rocket::response::content::RawHtml;
use time::OffsetDateTime;
use crate::app_constants::{
    note_delete_path, note_path, ABOUT_PATH, CONTACT_PATH, CREATE_PATH,
    DASHBOARD_PATH, GALLERY_PATH, LANDING_PATH, LOGIN_PATH, LOGOUT_PATH,
    REGISTER_PATH,
};

pub fn escape(value: &str) -> Cow<'_, str> {
    RawStr::new(value).html_escape()
}

fn layout(
    title: &str,
    user: Option<&str>,
    flash: Option<&FlashMessage<'_>>,
    body: &str,
) -> RawHtml<String> {
    let nav = match user {
        Some(user) => format!(
            r#"<a href="{DASHBOARD_PATH}">My notes</a>
<a href="{CREATE_PATH}">New note</a>
<a href="{ABOUT_PATH}">About</a>
<a href="{GALLERY_PATH}">Gallery</a>
<span class="user">{}</span>
<form method="post" action="{LOGOUT_PATH}"><button type="submit">Log out</button></form>"#,
            escape(user),
        ),
        None => format!(
            r#"<a href="{LANDING_PATH}">Home</a>
<a href="{ABOUT_PATH}">About</a>
<a href="{GALLERY_PATH}">Gallery</a>
<a href="{LOGIN_PATH}">Log in</a>
<a href="{REGISTER_PATH}">Register</a>"#,
        ),
    };
    let flash = flash
        .map(|flash| format!(
            r#"<p class="message {}">{}</p>"#,
            escape(flash.kind()),
            escape(flash.message()),
        ))
        .unwrap_or_default();
    RawHtml(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{} - MyNotepad</title>
</head>
<body>
<nav>
{nav}
</nav>
{flash}
<main>
{body}
</main>
</body>
</html>
"#,
        escape(title),
    ))
}

pub fn error_page(title: &str, message: &str) -> RawHtml<String> {
    layout(
        title,
        None,
        None,
        &format!("<h1>{}</h1>\n<p>{}</p>", escape(title), escape(message)),
    )
}

pub fn landing(flash: Option<&FlashMessage<'_>>) -> RawHtml<String> {
    layout(
        "Welcome",
        None,
        flash,
        &format!(
            r#"<h1>MyNotepad</h1>
<p>Keep your notes in one place and reach them from any browser.</p>
<p><a href="{REGISTER_PATH}">Create an account</a> or <a href="{LOGIN_PATH}">log in</a>.</p>
<h2>Contact us</h2>
{}"#,
            contact_form(),
        ),
    )
}

fn contact_form() -> String {
    format!(
        r#"<form method="post" action="{CONTACT_PATH}">
<label>Name <input name="name" required></label>
<label>Email <input name="email" type="email" required></label>
<label>Message <textarea name="message" required></textarea></label>
<button type="submit">Send via WhatsApp</button>
</form>"#,
    )
}

pub fn login(
    flash: Option<&FlashMessage<'_>>,
    error: Option<&str>,
    username: &str,
) -> RawHtml<String> {
    layout(
        "Log in",
        None,
        flash,
        &format!(
            r#"<h1>Log in</h1>
{}<form method="post" action="{LOGIN_PATH}">
<label>Username <input name="username" value="{}" required></label>
<label>Password <input name="password" type="password" required></label>
<button type="submit">Log in</button>
</form>
<p>No account yet? <a href="{REGISTER_PATH}">Register</a></p>"#,
            form_error(error),
            escape(username),
        ),
    )
}

pub fn register(
    flash: Option<&FlashMessage<'_>>,
    error: Option<&str>,
    username: &str,
) -> RawHtml<String> {
    layout(
        "Register",
        None,
        flash,
        &format!(
            r#"<h1>Register</h1>
{}<form method="post" action="{REGISTER_PATH}">
<label>Username <input name="username" value="{}" required></label>
<label>Password <input name="password" type="password" required></label>
<label>Confirm password <input name="password2" type="password" required></label>
<button type="submit">Register</button>
</form>
<p>Already registered? <a href="{LOGIN_PATH}">Log in</a></p>"#,
            form_error(error),
            escape(username),
        ),
    )
}

fn form_error(error: Option<&str>) -> String {
    error
        .map(|e| format!("<p class=\"message error\">{}</p>\n", escape(e)))
        .unwrap_or_default()
}

pub fn dashboard(
    user: &str,
    flash: Option<&FlashMessage<'_>>,
    notes: &[Note],
) -> RawHtml<String> {
    let mut body = format!(
        "<h1>My notes</h1>\n<p><a href=\"{CREATE_PATH}\">New note</a></p>\n",
    );
    if notes.is_empty() {
        body.push_str("<p>No notes yet.</p>\n");
    } else {
        body.push_str("<ul class=\"notes\">\n");
        for note in notes {
            // writing to a String can't fail
            let _ = writeln!(
                body,
                r#"<li><a href="{}">{}</a> <small>{}</small></li>"#,
                note_path(note.id),
                escape(&note.title),
                format_time(note.updated_at.unwrap_or(note.created_at)),
            );
        }
        body.push_str("</ul>\n");
    }
    layout("My notes", Some(user), flash, &body)
}

pub fn create_note(
    user: &str,
    flash: Option<&FlashMessage<'_>>,
) -> RawHtml<String> {
    layout(
        "New note",
        Some(user),
        flash,
        &format!(
            r#"<h1>New note</h1>
<form method="post" action="{CREATE_PATH}">
<label>Title <input name="title"></label>
<label>Content <textarea name="content"></textarea></label>
<button type="submit">Save</button>
</form>"#,
        ),
    )
}

pub fn note_detail(
    user: &str,
    flash: Option<&FlashMessage<'_>>,
    note: &Note,
) -> RawHtml<String> {
    layout(
        &note.title,
        Some(user),
        flash,
        &format!(
            r#"<h1>{title}</h1>
<p><small>Created {created}, updated {updated}</small></p>
<form method="post" action="{path}">
<label>Title <input name="title" value="{title}"></label>
<label>Content <textarea name="content">{content}</textarea></label>
<button type="submit">Save</button>
</form>
<form method="post" action="{delete_path}">
<button type="submit">Delete</button>
</form>"#,
            title = escape(&note.title),
            content = escape(&note.content),
            created = format_time(note.created_at),
            updated = note.updated_at.map(format_time).unwrap_or_else(|| "never".into()),
            path = note_path(note.id),
            delete_path = note_delete_path(note.id),
        ),
    )
}

pub fn about(user: Option<&str>) -> RawHtml<String> {
    layout(
        "About",
        user,
        None,
        r#"<h1>About MyNotepad</h1>
<p>MyNotepad is a small note-taking site. Every account gets its own private
notebook: write notes, edit them later and delete the ones you no longer
need. The most recently edited notes are always at the top.</p>
<p>Questions and suggestions are welcome through the contact form on the
home page.</p>"#,
    )
}

pub fn gallery(user: Option<&str>) -> RawHtml<String> {
    layout(
        "Gallery",
        user,
        None,
        r#"<h1>Gallery</h1>
<figure><figcaption><strong>Writing</strong>: a fresh note for a new idea.</figcaption></figure>
<figure><figcaption><strong>Editing</strong>: notes can be reworked any time.</figcaption></figure>
<figure><figcaption><strong>Organizing</strong>: the newest work comes first.</figcaption></figure>"#,
    )
}

fn format_time(time: OffsetDateTime) -> String {
    timestamp::format(time)
        .unwrap_or_else(|_| time.unix_timestamp().to_string())
}
