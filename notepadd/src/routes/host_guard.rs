use async_trait::async_trait;
use log::warn;
use notepad::config::app_config::AppConfig;
use rocket::http::Status;
use rocket::outcome::try_outcome;
use rocket::request::{FromRequest, Outcome};
use rocket::{Request, State};

/// Succeeds when the `Host` header names one of the configured
/// `allowed_hosts`, fails with 400 otherwise.
#[derive(Debug)]
pub struct AllowedHost;

#[async_trait]
impl<'r> FromRequest<'r> for AllowedHost {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let config = try_outcome!(request.guard::<&State<AppConfig>>().await);
        let host = request.headers().get_one("Host").unwrap_or("");
        if is_host_allowed(&config.allowed_hosts, host) {
            Outcome::Success(AllowedHost)
        } else {
            warn!("rejecting a request for disallowed host \"{host}\"");
            Outcome::Error((Status::BadRequest, ()))
        }
    }
}

/// An empty list or `*` allows everything. A leading `.` matches the domain
/// itself and all of its subdomains.
pub fn is_host_allowed(allowed_hosts: &[String], host_header: &str) -> bool {
    if allowed_hosts.is_empty() || allowed_hosts.iter().any(|h| h == "*") {
        return true;
    }
    let host = strip_port(host_header.trim()).to_ascii_lowercase();
    if host.is_empty() {
        return false;
    }
    allowed_hosts.iter()
        .map(|pattern| pattern.to_ascii_lowercase())
        .any(|pattern|
            match pattern.strip_prefix('.') {
                Some(domain) => host == domain || host.ends_with(&pattern),
                None => host == pattern,
            }
        )
}

fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    match host.rsplit_once(':') {
        Some((name, port)) if port.bytes().all(|b| b.is_ascii_digit()) => name,
        _ => host,
    }
}
