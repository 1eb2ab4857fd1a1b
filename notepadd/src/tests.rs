use assert_fs::prelude::*;
use assert_fs::TempDir;
use rocket::http::{ContentType, Status};
use rocket::local::blocking::{Client, LocalResponse};
use test_utils::{setup_basic_config_impl, CONFIG_FILE_PATH};
use crate::app_setup::{build_rocket, make_figment};


pub struct TestApp {
    pub client: Client,
    pub dir: TempDir,
}

pub fn launch() -> TestApp {
    launch_with("")
}

pub fn launch_with(extra_config: &str) -> TestApp {
    let dir = setup_basic_config_impl(extra_config);
    let rocket = build_rocket(make_figment(dir.child(CONFIG_FILE_PATH).path()))
        .expect("invalid test configuration");
    let client = Client::tracked(rocket).expect("rocket failed to ignite");
    TestApp {
        client,
        dir,
    }
}

pub fn post_form<'c>(client: &'c Client, uri: &'c str, body: &str) -> LocalResponse<'c> {
    client.post(uri)
        .header(ContentType::Form)
        .body(body)
        .dispatch()
}

pub fn location<'a>(response: &'a LocalResponse<'_>) -> Option<&'a str> {
    response.headers().get_one("Location")
}

pub fn assert_redirect(response: &LocalResponse<'_>, to: &str) {
    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(location(response), Some(to));
}

pub fn register(client: &Client, username: &str, password: &str) {
    let response = post_form(
        client,
        "/register/",
        &format!("username={username}&password={password}&password2={password}"),
    );
    assert_redirect(&response, "/login/");
}

pub fn log_in(client: &Client, username: &str, password: &str) {
    let response = post_form(
        client,
        "/login/",
        &format!("username={username}&password={password}"),
    );
    assert_redirect(&response, "/dashboard/");
}

pub fn register_and_log_in(client: &Client, username: &str) {
    register(client, username, "password123");
    log_in(client, username, "password123");
}

pub fn get_page(client: &Client, uri: &str) -> String {
    let response = client.get(uri).dispatch();
    assert_eq!(response.status(), Status::Ok, "GET {uri}");
    response.into_string().unwrap()
}

#[test]
fn launches_with_basic_config() {
    let app = launch();
    app.dir.child("var/notepad/user_notes").assert(predicates::path::is_dir());
}

#[test]
fn fails_to_ignite_with_bad_hasher_config() {
    let dir = setup_basic_config_impl("");
    let config = dir.child(CONFIG_FILE_PATH);
    let contents = std::fs::read_to_string(config.path()).unwrap()
        .replace("argon2_m_cost = 64", "argon2_m_cost = 1");
    config.write_str(&contents).unwrap();
    let rocket = build_rocket(make_figment(config.path())).unwrap();
    assert!(Client::tracked(rocket).is_err());
}

#[test]
fn fails_to_ignite_when_notes_outgrow_the_form_limit() {
    let dir = setup_basic_config_impl("max_note_size = 1048576");
    let rocket = build_rocket(make_figment(dir.child(CONFIG_FILE_PATH).path())).unwrap();
    assert!(Client::tracked(rocket).is_err());

    let dir = setup_basic_config_impl(
        "max_note_size = 1048576\n[limits]\nform = \"4 MiB\"",
    );
    let rocket = build_rocket(make_figment(dir.child(CONFIG_FILE_PATH).path())).unwrap();
    assert!(Client::tracked(rocket).is_ok());
}

#[test]
fn rejects_malformed_config() {
    let dir = setup_basic_config_impl("max_note_size = \"lots\"");
    assert!(build_rocket(make_figment(dir.child(CONFIG_FILE_PATH).path())).is_err());
}

#[test]
fn unknown_page_is_404() {
    let app = launch();
    let response = app.client.get("/nowhere/").dispatch();
    assert_eq!(response.status(), Status::NotFound);
    assert!(response.into_string().unwrap().contains("Not found"));
}
