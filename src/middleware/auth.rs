use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use time::Duration;

use crate::db::models::CustomUser;
use crate::error::OpalError;
use crate::router::OpalState;

pub const SESSION_COOKIE: &str = "opal_session";

const SESSION_TTL: Duration = Duration::hours(24);

/// The authenticated principal for the current request.
///
/// Implemented as an extractor so the session is checked before any
/// controller logic runs: a handler that takes `AuthSession` cannot be
/// reached without a valid session cookie. Missing or stale sessions are
/// redirected to `/login`.
pub struct AuthSession {
    pub user: CustomUser,
}

impl FromRequestParts<OpalState> for AuthSession {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &OpalState,
    ) -> Result<Self, Self::Rejection> {
        let jar: PrivateCookieJar<Key> =
            match PrivateCookieJar::from_request_parts(parts, state).await {
                Ok(jar) => jar,
                Err(err) => match err {},
            };

        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            return Err(OpalError::Unauthorized.into_response());
        };
        let Ok(user_id) = cookie.value().parse::<i64>() else {
            return Err(OpalError::Unauthorized.into_response());
        };

        // A session referencing a deleted user is treated as logged out.
        match state.storage.user_by_id(user_id).await {
            Ok(user) => Ok(Self { user }),
            Err(OpalError::NotFound) => Err(OpalError::Unauthorized.into_response()),
            Err(e) => Err(e.into_response()),
        }
    }
}

pub fn session_cookie(user_id: i64) -> Cookie<'static> {
    Cookie::build(Cookie::new(SESSION_COOKIE.to_string(), user_id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(SESSION_TTL)
        .build()
}

pub fn clear_cookie(name: &str) -> Cookie<'static> {
    Cookie::build(Cookie::new(name.to_string(), ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}
