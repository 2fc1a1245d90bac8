//! Shared harness for the functional tests: a full router over a throwaway
//! sqlite file, a seeded admin user, and a browser-style login helper.

// not every test binary uses every helper
#![allow(dead_code)]

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, Response, StatusCode, header};
use axum_extra::extract::cookie::Key;
use tower::ServiceExt;

use opal::CmsStorage;
use opal::db::NewUser;
use opal::router::{OpalState, opal_router};

pub const ADMIN_USERNAME: &str = "admin@test.com";
pub const ADMIN_PASSWORD: &str = "secret";

pub struct TestApp {
    pub app: Router,
    pub storage: CmsStorage,
    db_path: PathBuf,
}

impl TestApp {
    pub async fn spawn(tag: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();
        let mut db_path = std::env::temp_dir();
        db_path.push(format!("opal-{tag}-{}-{nanos}.sqlite", std::process::id()));

        let database_url = format!("sqlite:{}", db_path.display());
        let storage = CmsStorage::connect(&database_url)
            .await
            .expect("failed to open test database");
        storage.init_schema().await.expect("failed to init schema");

        let password_hash =
            opal::password::hash_password(ADMIN_PASSWORD).expect("failed to hash password");
        storage
            .insert_user(&NewUser {
                username: ADMIN_USERNAME.to_string(),
                password_hash,
            })
            .await
            .expect("failed to seed admin user");

        let state = OpalState::new(storage.clone(), Key::generate());
        Self {
            app: opal_router(state),
            storage,
            db_path,
        }
    }

    pub async fn request(&self, req: Request<Body>) -> Response<Body> {
        self.app.clone().oneshot(req).await.expect("request failed")
    }

    pub async fn get(&self, uri: &str, session: &str) -> Response<Body> {
        self.request(
            Request::builder()
                .uri(uri)
                .header(header::COOKIE, session)
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
    }

    /// POST a form, the way a rendered form submits (method overrides go in
    /// as a `_method` field).
    pub async fn submit(
        &self,
        uri: &str,
        session: &str,
        fields: &[(&str, &str)],
    ) -> Response<Body> {
        self.request(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::COOKIE, session)
                .header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                )
                .body(Body::from(form_body(fields)))
                .expect("failed to build request"),
        )
        .await
    }

    /// Log in as the seeded admin and return the session `Cookie` header
    /// value for subsequent requests.
    pub async fn login(&self) -> String {
        let resp = self
            .request(
                Request::builder()
                    .method("POST")
                    .uri("/login_check")
                    .header(
                        header::CONTENT_TYPE,
                        "application/x-www-form-urlencoded",
                    )
                    .body(Body::from(form_body(&[
                        ("username", ADMIN_USERNAME),
                        ("password", ADMIN_PASSWORD),
                    ])))
                    .expect("failed to build request"),
            )
            .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "login did not succeed");
        session_cookie(&resp).expect("login response carried no session cookie")
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_path);
    }
}

pub fn form_body(fields: &[(&str, &str)]) -> String {
    let mut ser = url::form_urlencoded::Serializer::new(String::new());
    for (k, v) in fields {
        ser.append_pair(k, v);
    }
    ser.finish()
}

pub async fn body_string(resp: Response<Body>) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(bytes.to_vec()).expect("response body was not utf-8")
}

pub fn location(resp: &Response<Body>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("missing location header")
        .to_string()
}

/// The `name=value` pair of the session cookie set by this response.
pub fn session_cookie(resp: &Response<Body>) -> Option<String> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("opal_session=") && !v.starts_with("opal_session=;"))
        .and_then(|v| v.split(';').next())
        .map(|v| v.to_string())
}

/// All cookies set by this response, as a `Cookie` header value.
pub fn cookie_pairs(resp: &Response<Body>) -> String {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .collect::<Vec<_>>()
        .join("; ")
}
