use axum::Router;
use axum::extract::FromRef;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum_extra::extract::cookie::Key;

use crate::db::CmsStorage;
use crate::handlers::{admin, category, page, security, user};
use crate::middleware::method_override::method_override;

/// Shared application state: the repository gateway plus the key sealing the
/// private session cookies.
#[derive(Clone)]
pub struct OpalState {
    pub storage: CmsStorage,
    key: Key,
}

impl OpalState {
    pub fn new(storage: CmsStorage, key: Key) -> Self {
        Self { storage, key }
    }
}

impl FromRef<OpalState> for Key {
    fn from_ref(state: &OpalState) -> Self {
        state.key.clone()
    }
}

pub fn opal_router(state: OpalState) -> Router {
    let routes = Router::new()
        .route("/", get(admin::root))
        .route("/admin", get(admin::index))
        .route("/login", get(security::login_form))
        .route("/login_check", post(security::login_check))
        .route("/logout", get(security::logout))
        .route(
            "/cms/category/",
            get(category::list).post(category::create),
        )
        .route("/cms/category/new", get(category::new_form))
        .route(
            "/cms/category/{id}",
            get(category::show)
                .put(category::update)
                .delete(category::remove),
        )
        .route("/cms/category/{id}/edit", get(category::edit_form))
        .route("/cms/page/", get(page::list).post(page::create))
        .route("/cms/page/new", get(page::new_form))
        .route(
            "/cms/page/{id}",
            get(page::show).put(page::update).delete(page::remove),
        )
        .route("/cms/page/{id}/edit", get(page::edit_form))
        .route("/cms/user/", get(user::list).post(user::create))
        .route("/cms/user/new", get(user::new_form))
        .route(
            "/cms/user/{id}",
            get(user::show).put(user::update).delete(user::remove),
        )
        .route("/cms/user/{id}/edit", get(user::edit_form))
        .with_state(state);

    // `Router::layer` runs middleware after method dispatch, which would 405
    // overridden POSTs before the verb is rewritten; wrapping the routed
    // router keeps the override ahead of routing.
    Router::new()
        .fallback_service(routes)
        .layer(from_fn(method_override))
}
