use rocket::http::RawStr;

/// What a visitor typed into the contact form.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    pub fn to_whatsapp_text(&self) -> String {
        format!(
            "*Message from the MyNotepad website*\n\n*Name:* {}\n*Email:* {}\n\n*Message:*\n{}",
            self.name,
            self.email,
            self.message,
        )
    }
}

/// A `wa.me`-style link that opens a chat with `number`, the message
/// already typed in.
pub fn whatsapp_url(
    base_url: &str,
    number: &str,
    message: &ContactMessage,
) -> String {
    format!(
        "{}/{}?text={}",
        base_url.trim_end_matches('/'),
        number,
        RawStr::new(&message.to_whatsapp_text()).percent_encode().as_str(),
    )
}
