use axum::Form;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::error::OpalError;
use crate::forms::{self, CategoryInput, FieldErrors};
use crate::middleware::auth::AuthSession;
use crate::router::OpalState;
use crate::views;

/// GET /cms/category/
pub async fn list(
    _session: AuthSession,
    State(state): State<OpalState>,
) -> Result<Html<String>, OpalError> {
    let categories = state.storage.list_categories().await?;
    Ok(Html(views::category_list(&categories)))
}

/// GET /cms/category/new
pub async fn new_form(_session: AuthSession) -> Html<String> {
    Html(views::category_form(
        None,
        &CategoryInput::default(),
        &FieldErrors::default(),
    ))
}

/// POST /cms/category/ -> redirect to show on valid submit.
pub async fn create(
    _session: AuthSession,
    State(state): State<OpalState>,
    Form(input): Form<CategoryInput>,
) -> Result<Response, OpalError> {
    let draft = match forms::bind_category(&input) {
        Ok(draft) => draft,
        Err(OpalError::Validation(errors)) => {
            let body = views::category_form(None, &input, &errors);
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response());
        }
        Err(e) => return Err(e),
    };
    let id = state.storage.insert_category(&draft).await?;
    Ok(Redirect::to(&format!("/cms/category/{id}")).into_response())
}

/// GET /cms/category/{id}
pub async fn show(
    _session: AuthSession,
    State(state): State<OpalState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, OpalError> {
    let category = state.storage.category_by_id(id).await?;
    let pages = state.storage.pages_in_category(id).await?;
    Ok(Html(views::category_show(&category, &pages)))
}

/// GET /cms/category/{id}/edit
pub async fn edit_form(
    _session: AuthSession,
    State(state): State<OpalState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, OpalError> {
    let category = state.storage.category_by_id(id).await?;
    let input = CategoryInput {
        name: category.name,
    };
    Ok(Html(views::category_form(
        Some(id),
        &input,
        &FieldErrors::default(),
    )))
}

/// PUT /cms/category/{id} -> redirect back to the edit form on valid submit.
pub async fn update(
    _session: AuthSession,
    State(state): State<OpalState>,
    Path(id): Path<i64>,
    Form(input): Form<CategoryInput>,
) -> Result<Response, OpalError> {
    state.storage.category_by_id(id).await?;
    let draft = match forms::bind_category(&input) {
        Ok(draft) => draft,
        Err(OpalError::Validation(errors)) => {
            let body = views::category_form(Some(id), &input, &errors);
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response());
        }
        Err(e) => return Err(e),
    };
    state.storage.update_category(id, &draft).await?;
    Ok(Redirect::to(&format!("/cms/category/{id}/edit")).into_response())
}

/// DELETE /cms/category/{id}
pub async fn remove(
    _session: AuthSession,
    State(state): State<OpalState>,
    Path(id): Path<i64>,
) -> Result<Redirect, OpalError> {
    state.storage.category_by_id(id).await?;
    state.storage.delete_category(id).await?;
    Ok(Redirect::to("/cms/category/"))
}
