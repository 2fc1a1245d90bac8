//! HTML forms can only submit GET and POST, so edit and delete forms POST
//! with a hidden `_method` field. This layer rewrites such requests to the
//! intended verb before routing, the way the original framework's method
//! override does.

use axum::body::{Body, to_bytes};
use axum::extract::Request;
use axum::http::{Method, StatusCode, header::CONTENT_TYPE};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

const MAX_FORM_BYTES: usize = 64 * 1024;

pub async fn method_override(req: Request, next: Next) -> Response {
    if req.method() != Method::POST || !is_urlencoded_form(&req) {
        return next.run(req).await;
    }

    // Buffer the body to peek at `_method`, then hand the same bytes on.
    let (parts, body) = req.into_parts();
    let bytes = match to_bytes(body, MAX_FORM_BYTES).await {
        Ok(bytes) => bytes,
        Err(_) => return StatusCode::PAYLOAD_TOO_LARGE.into_response(),
    };

    let override_method = url::form_urlencoded::parse(&bytes)
        .find(|(k, _)| k == "_method")
        .and_then(|(_, v)| match v.to_ascii_uppercase().as_str() {
            "PUT" => Some(Method::PUT),
            "DELETE" => Some(Method::DELETE),
            _ => None,
        });

    let mut req = Request::from_parts(parts, Body::from(bytes));
    if let Some(method) = override_method {
        *req.method_mut() = method;
    }
    next.run(req).await
}

fn is_urlencoded_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}
