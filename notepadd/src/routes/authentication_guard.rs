use std::ops::Deref;
use async_trait::async_trait;
use log::{error, info, warn};
use notepad::user_db::UserDb;
use notepad::username_string::UsernameString;
use rocket::http::{Cookie, Status};
use rocket::outcome::try_outcome;
use rocket::request::{FromRequest, Outcome};
use rocket::{Request, State};
use crate::app_constants::SESSION_COOKIE;
use crate::routes::host_guard::AllowedHost;

/// The logged-in user of the request's session.
///
/// Without a valid session the request is forwarded, so that a lower ranked
/// route can send the browser to the login page.
#[derive(Debug)]
pub struct CurrentUser(UsernameString);

impl Deref for CurrentUser {
    type Target = UsernameString;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<'r> FromRequest<'r> for CurrentUser {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        try_outcome!(request.guard::<AllowedHost>().await);
        let cookies = request.cookies();
        let Some(cookie) = cookies.get_private(SESSION_COOKIE) else {
            return Outcome::Forward(Status::Unauthorized);
        };
        let username = match cookie.value().parse::<UsernameString>() {
            Ok(username) => username,
            Err(e) => {
                warn!("invalid username in a session cookie: {e}");
                cookies.remove_private(Cookie::from(SESSION_COOKIE));
                return Outcome::Forward(Status::Unauthorized);
            },
        };
        let user_db = try_outcome!(request.guard::<&State<Box<dyn UserDb>>>().await);
        match user_db.does_user_exist(&username).await {
            Ok(true) => Outcome::Success(CurrentUser(username)),
            Ok(false) => {
                info!("dropping the session of unknown user \"{username}\"");
                cookies.remove_private(Cookie::from(SESSION_COOKIE));
                Outcome::Forward(Status::Unauthorized)
            },
            Err(e) => {
                error!("failed to look up user \"{username}\": {e}");
                Outcome::Error((Status::InternalServerError, ()))
            },
        }
    }
}
