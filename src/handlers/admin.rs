use axum::response::{Html, Redirect};

use crate::middleware::auth::AuthSession;
use crate::views;

pub async fn root() -> Redirect {
    Redirect::to("/admin")
}

/// GET /admin -> authenticated landing page.
pub async fn index(session: AuthSession) -> Html<String> {
    Html(views::admin_page(&session.user.username))
}
