use axum::Form;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::error::OpalError;
use crate::forms::{self, FieldErrors, PageInput};
use crate::middleware::auth::AuthSession;
use crate::router::OpalState;
use crate::views;

/// GET /cms/page/
pub async fn list(
    _session: AuthSession,
    State(state): State<OpalState>,
) -> Result<Html<String>, OpalError> {
    let pages = state.storage.list_pages().await?;
    Ok(Html(views::page_list(&pages)))
}

/// GET /cms/page/new
pub async fn new_form(
    _session: AuthSession,
    State(state): State<OpalState>,
) -> Result<Html<String>, OpalError> {
    let categories = state.storage.list_categories().await?;
    Ok(Html(views::page_form(
        None,
        &PageInput::default(),
        &categories,
        &FieldErrors::default(),
    )))
}

/// POST /cms/page/ -> redirect to show on valid submit.
pub async fn create(
    _session: AuthSession,
    State(state): State<OpalState>,
    Form(input): Form<PageInput>,
) -> Result<Response, OpalError> {
    let draft = match forms::bind_page(&input) {
        Ok(draft) => draft,
        Err(OpalError::Validation(errors)) => {
            let categories = state.storage.list_categories().await?;
            let body = views::page_form(None, &input, &categories, &errors);
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response());
        }
        Err(e) => return Err(e),
    };
    let id = state.storage.insert_page(&draft).await?;
    Ok(Redirect::to(&format!("/cms/page/{id}")).into_response())
}

/// GET /cms/page/{id}
pub async fn show(
    _session: AuthSession,
    State(state): State<OpalState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, OpalError> {
    let page = state.storage.page_by_id(id).await?;
    let category = match page.category_id {
        Some(category_id) => Some(state.storage.category_by_id(category_id).await?),
        None => None,
    };
    Ok(Html(views::page_show(&page, category.as_ref())))
}

/// GET /cms/page/{id}/edit
pub async fn edit_form(
    _session: AuthSession,
    State(state): State<OpalState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, OpalError> {
    let page = state.storage.page_by_id(id).await?;
    let categories = state.storage.list_categories().await?;
    let input = PageInput {
        title: page.title,
        content: page.content,
        category_id: page
            .category_id
            .map(|id| id.to_string())
            .unwrap_or_default(),
    };
    Ok(Html(views::page_form(
        Some(id),
        &input,
        &categories,
        &FieldErrors::default(),
    )))
}

/// PUT /cms/page/{id} -> redirect back to the edit form on valid submit.
pub async fn update(
    _session: AuthSession,
    State(state): State<OpalState>,
    Path(id): Path<i64>,
    Form(input): Form<PageInput>,
) -> Result<Response, OpalError> {
    state.storage.page_by_id(id).await?;
    let draft = match forms::bind_page(&input) {
        Ok(draft) => draft,
        Err(OpalError::Validation(errors)) => {
            let categories = state.storage.list_categories().await?;
            let body = views::page_form(Some(id), &input, &categories, &errors);
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response());
        }
        Err(e) => return Err(e),
    };
    state.storage.update_page(id, &draft).await?;
    Ok(Redirect::to(&format!("/cms/page/{id}/edit")).into_response())
}

/// DELETE /cms/page/{id}
pub async fn remove(
    _session: AuthSession,
    State(state): State<OpalState>,
    Path(id): Path<i64>,
) -> Result<Redirect, OpalError> {
    state.storage.page_by_id(id).await?;
    state.storage.delete_page(id).await?;
    Ok(Redirect::to("/cms/page/"))
}
