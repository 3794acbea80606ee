use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use uuid::Uuid;

pub const SESSION_COOKIE_NAME: &str = "folio_contact";

pub fn build_cookie<'a>(id: String, secure: bool) -> Cookie<'a> {
    Cookie::build((SESSION_COOKIE_NAME, id))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build()
}

/// Visitor id carried by the request, if any.
pub fn current(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_owned())
        .filter(|value| Uuid::parse_str(value).is_ok())
}

/// Returns the visitor id, minting a new one (and its cookie) on first contact.
pub fn ensure(jar: CookieJar, secure: bool) -> (CookieJar, String) {
    if let Some(id) = current(&jar) {
        return (jar, id);
    }

    let id = Uuid::new_v4().to_string();
    let jar = jar.add(build_cookie(id.to_owned(), secure));

    (jar, id)
}
