use log::{info, warn};
use notepad::config::app_config::AppConfig;
use notepad::user_db::errors::RegistrationError;
use notepad::user_db::UserDb;
use notepad::username_string::UsernameString;
use rocket::form::Form;
use rocket::http::{Cookie, CookieJar};
use rocket::request::FlashMessage;
use rocket::response::{Flash, Redirect};
use rocket::{get, post, routes, FromForm, Route, State};
use crate::app_constants::{DASHBOARD_PATH, LOGIN_PATH, SESSION_COOKIE};
use crate::pages;
use crate::routes::authentication_guard::CurrentUser;
use crate::routes::host_guard::AllowedHost;
use crate::routes::{PageResponse, WebError};

#[derive(FromForm)]
struct LoginForm {
    username: String,
    password: String,
}

#[derive(FromForm)]
struct RegistrationForm {
    username: String,
    password: String,

    #[field(name = "password2")]
    confirmation: String,
}

#[get("/login/")]
fn login_page(
    _host: AllowedHost,
    user: Option<CurrentUser>,
    flash: Option<FlashMessage<'_>>,
) -> PageResponse {
    if user.is_some() {
        return Redirect::to(DASHBOARD_PATH).into();
    }
    pages::login(flash.as_ref(), None, "").into()
}

#[post("/login/", data = "<form>")]
async fn login(
    _host: AllowedHost,
    form: Form<LoginForm>,
    cookies: &CookieJar<'_>,
    user_db: &State<Box<dyn UserDb>>,
    config: &State<AppConfig>,
) -> Result<PageResponse, WebError> {
    let username = match form.username.parse::<UsernameString>() {
        Ok(username) => username,
        Err(_) => return Ok(login_failed(&form.username)),
    };
    if !user_db.check_user_credentials(&username, &form.password).await? {
        return Ok(login_failed(&form.username));
    }
    info!("user \"{username}\" logged in");
    cookies.add_private(Cookie::new(SESSION_COOKIE, username.to_string()));
    Ok(
        Flash::success(
            Redirect::to(config.login_redirect.clone()),
            format!("Welcome back, {username}!"),
        ).into()
    )
}

fn login_failed(username: &str) -> PageResponse {
    warn!("failed login attempt for \"{username}\"");
    pages::login(None, Some("Invalid username or password!"), username).into()
}

#[get("/register/")]
fn register_page(
    _host: AllowedHost,
    user: Option<CurrentUser>,
    flash: Option<FlashMessage<'_>>,
) -> PageResponse {
    if user.is_some() {
        return Redirect::to(DASHBOARD_PATH).into();
    }
    pages::register(flash.as_ref(), None, "").into()
}

#[post("/register/", data = "<form>")]
async fn register(
    _host: AllowedHost,
    form: Form<RegistrationForm>,
    user_db: &State<Box<dyn UserDb>>,
) -> Result<PageResponse, WebError> {
    let username = match form.username.parse::<UsernameString>() {
        Ok(username) => username,
        Err(e) => return Ok(
            pages::register(None, Some(&format!("Invalid username: {e}.")), &form.username)
                .into()
        ),
    };
    let result = user_db
        .register_user(&username, &form.password, &form.confirmation)
        .await;
    let message = match result {
        Ok(()) => return Ok(
            Flash::success(
                Redirect::to(LOGIN_PATH),
                "Registration successful! Please log in.",
            ).into()
        ),
        Err(RegistrationError::Db(e)) => return Err(e.into()),
        Err(RegistrationError::PasswordMismatch) =>
            "Passwords do not match!".to_owned(),
        Err(RegistrationError::UsernameTaken) =>
            "Username is already taken!".to_owned(),
        Err(RegistrationError::PasswordTooShort { min_length }) =>
            format!("Password must be at least {min_length} characters long!"),
    };
    Ok(pages::register(None, Some(&message), &form.username).into())
}

#[post("/logout/")]
fn logout(
    user: CurrentUser,
    cookies: &CookieJar<'_>,
    config: &State<AppConfig>,
) -> Flash<Redirect> {
    cookies.remove_private(Cookie::from(SESSION_COOKIE));
    info!("user \"{}\" logged out", *user);
    Flash::success(
        Redirect::to(config.logout_redirect.clone()),
        "You have been logged out. See you!",
    )
}

#[post("/logout/", rank = 2)]
fn logout_unauthenticated() -> Redirect {
    Redirect::to(LOGIN_PATH)
}

pub fn account_routes() -> Vec<Route> {
    routes![
        login_page,
        login,
        register_page,
        register,
        logout,
        logout_unauthenticated,
    ]
}
