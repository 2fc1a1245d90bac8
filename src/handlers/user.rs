use axum::Form;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::error::OpalError;
use crate::forms::{self, FieldErrors, UserInput};
use crate::middleware::auth::AuthSession;
use crate::router::OpalState;
use crate::views;

/// GET /cms/user/
pub async fn list(
    _session: AuthSession,
    State(state): State<OpalState>,
) -> Result<Html<String>, OpalError> {
    let users = state.storage.list_users().await?;
    Ok(Html(views::user_list(&users)))
}

/// GET /cms/user/new
pub async fn new_form(_session: AuthSession) -> Html<String> {
    Html(views::user_form(
        None,
        &UserInput::default(),
        &FieldErrors::default(),
    ))
}

/// POST /cms/user/ -> redirect to show on valid submit. The submitted
/// password is hashed inside the binder; only the hash is persisted.
pub async fn create(
    _session: AuthSession,
    State(state): State<OpalState>,
    Form(input): Form<UserInput>,
) -> Result<Response, OpalError> {
    let draft = match forms::bind_user(&input, None) {
        Ok(draft) => draft,
        Err(OpalError::Validation(errors)) => {
            let body = views::user_form(None, &input, &errors);
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response());
        }
        Err(e) => return Err(e),
    };
    let id = state.storage.insert_user(&draft).await?;
    Ok(Redirect::to(&format!("/cms/user/{id}")).into_response())
}

/// GET /cms/user/{id}
pub async fn show(
    _session: AuthSession,
    State(state): State<OpalState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, OpalError> {
    let user = state.storage.user_by_id(id).await?;
    Ok(Html(views::user_show(&user)))
}

/// GET /cms/user/{id}/edit
pub async fn edit_form(
    _session: AuthSession,
    State(state): State<OpalState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, OpalError> {
    let user = state.storage.user_by_id(id).await?;
    let input = UserInput {
        username: user.username,
        password: String::new(),
    };
    Ok(Html(views::user_form(
        Some(id),
        &input,
        &FieldErrors::default(),
    )))
}

/// PUT /cms/user/{id} -> redirect back to the edit form on valid submit.
/// An empty password field keeps the stored hash.
pub async fn update(
    _session: AuthSession,
    State(state): State<OpalState>,
    Path(id): Path<i64>,
    Form(input): Form<UserInput>,
) -> Result<Response, OpalError> {
    let existing = state.storage.user_by_id(id).await?;
    let draft = match forms::bind_user(&input, Some(&existing)) {
        Ok(draft) => draft,
        Err(OpalError::Validation(errors)) => {
            let body = views::user_form(Some(id), &input, &errors);
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response());
        }
        Err(e) => return Err(e),
    };
    state.storage.update_user(id, &draft).await?;
    Ok(Redirect::to(&format!("/cms/user/{id}/edit")).into_response())
}

/// DELETE /cms/user/{id}
pub async fn remove(
    _session: AuthSession,
    State(state): State<OpalState>,
    Path(id): Path<i64>,
) -> Result<Redirect, OpalError> {
    state.storage.user_by_id(id).await?;
    state.storage.delete_user(id).await?;
    Ok(Redirect::to("/cms/user/"))
}
