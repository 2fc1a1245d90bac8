//! Login, login check and logout. The session principal is the user id in a
//! private (encrypted, tamper-proof) cookie; a failed attempt flashes the
//! last username and an error flag back to the login form.

use axum::Form;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};
use serde::Deserialize;
use time::Duration;
use tracing::{info, warn};

use crate::error::OpalError;
use crate::middleware::auth::{self, SESSION_COOKIE};
use crate::password;
use crate::router::OpalState;
use crate::views;

const LAST_USERNAME_COOKIE: &str = "opal_last_username";
const LOGIN_FAILED_COOKIE: &str = "opal_login_failed";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// GET /login -> the login form, with last username and error from the
/// previous attempt when present.
pub async fn login_form(jar: PrivateCookieJar) -> impl IntoResponse {
    let last_username = jar
        .get(LAST_USERNAME_COOKIE)
        .map(|c| c.value().to_owned())
        .unwrap_or_default();
    let failed = jar.get(LOGIN_FAILED_COOKIE).is_some();
    let jar = jar
        .remove(auth::clear_cookie(LAST_USERNAME_COOKIE))
        .remove(auth::clear_cookie(LOGIN_FAILED_COOKIE));
    (jar, Html(views::login_page(&last_username, failed)))
}

/// POST /login_check -> establish the session or bounce back to /login.
pub async fn login_check(
    State(state): State<OpalState>,
    jar: PrivateCookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, OpalError> {
    let user = state.storage.user_by_username(&form.username).await?;
    let verified = match &user {
        Some(user) => password::verify_password(&form.password, &user.password_hash)?,
        None => false,
    };

    match (user, verified) {
        (Some(user), true) => {
            info!(username = %user.username, "login succeeded");
            let jar = jar.add(auth::session_cookie(user.id));
            Ok((jar, Redirect::to("/admin")).into_response())
        }
        _ => {
            warn!(username = %form.username, "login failed");
            let jar = jar
                .add(flash_cookie(LAST_USERNAME_COOKIE, form.username))
                .add(flash_cookie(LOGIN_FAILED_COOKIE, "1".to_string()));
            Ok((jar, Redirect::to("/login")).into_response())
        }
    }
}

/// GET /logout -> clear the session and return to the login form.
pub async fn logout(jar: PrivateCookieJar) -> impl IntoResponse {
    let jar = jar.remove(auth::clear_cookie(SESSION_COOKIE));
    (jar, Redirect::to("/login"))
}

fn flash_cookie(name: &str, value: String) -> Cookie<'static> {
    Cookie::build(Cookie::new(name.to_string(), value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::minutes(5))
        .build()
}
