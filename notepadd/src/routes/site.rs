use log::info;
use notepad::config::app_config::AppConfig;
use notepad::contact::{whatsapp_url, ContactMessage};
use rocket::form::Form;
use rocket::request::FlashMessage;
use rocket::response::content::RawHtml;
use rocket::response::Redirect;
use rocket::{get, post, routes, FromForm, Route, State};
use crate::app_constants::{DASHBOARD_PATH, LANDING_PATH};
use crate::pages;
use crate::routes::authentication_guard::CurrentUser;
use crate::routes::host_guard::AllowedHost;
use crate::routes::PageResponse;

#[derive(FromForm)]
struct ContactForm {
    name: Option<String>,
    email: Option<String>,
    message: Option<String>,
}

#[get("/")]
fn landing(
    _host: AllowedHost,
    user: Option<CurrentUser>,
    flash: Option<FlashMessage<'_>>,
) -> PageResponse {
    if user.is_some() {
        return Redirect::to(DASHBOARD_PATH).into();
    }
    pages::landing(flash.as_ref()).into()
}

#[get("/about/")]
fn about(_host: AllowedHost, user: Option<CurrentUser>) -> RawHtml<String> {
    pages::about(user.as_deref().map(|u| &**u))
}

#[get("/gallery/")]
fn gallery(_host: AllowedHost, user: Option<CurrentUser>) -> RawHtml<String> {
    pages::gallery(user.as_deref().map(|u| &**u))
}

#[post("/contact/whatsapp/", data = "<form>")]
fn contact_whatsapp(
    _host: AllowedHost,
    form: Form<ContactForm>,
    config: &State<AppConfig>,
) -> Redirect {
    let form = form.into_inner();
    let message = ContactMessage {
        name: form.name.unwrap_or_default(),
        email: form.email.unwrap_or_default(),
        message: form.message.unwrap_or_default(),
    };
    info!("forwarding a contact message from \"{}\" to WhatsApp", message.email);
    Redirect::to(
        whatsapp_url(
            &config.whatsapp_base_url,
            &config.whatsapp_number,
            &message,
        )
    )
}

#[get("/contact/whatsapp/")]
fn contact_whatsapp_get(_host: AllowedHost) -> Redirect {
    Redirect::to(LANDING_PATH)
}

pub fn site_routes() -> Vec<Route> {
    routes![
        landing,
        about,
        gallery,
        contact_whatsapp,
        contact_whatsapp_get,
    ]
}
