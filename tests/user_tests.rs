mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};

use common::{TestApp, body_string, form_body, location};

/// Mirror of the browser scenario: create, verify the stored hash, edit the
/// username without touching the password, delete.
#[tokio::test]
async fn complete_user_scenario() {
    let app = TestApp::spawn("user-scenario").await;
    let session = app.login().await;

    // create
    let resp = app
        .submit(
            "/cms/user/",
            &session,
            &[("username", "user@test.com"), ("password", "123")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let id: i64 = location(&resp)
        .rsplit('/')
        .next()
        .and_then(|s| s.parse().ok())
        .expect("create did not redirect to a show url");

    // the stored password is a one-way hash, never the plaintext
    let created = app.storage.user_by_id(id).await.unwrap();
    assert_ne!(created.password_hash, "123");
    assert!(created.password_hash.starts_with("$argon2"));
    assert!(opal::password::verify_password("123", &created.password_hash).unwrap());

    let resp = app.get("/cms/user/", &session).await;
    let body = body_string(resp).await;
    assert!(body.contains("user@test.com"));
    assert!(!body.contains("$argon2"), "list must not leak hashes");

    // update the username; an empty password keeps the stored hash
    let resp = app
        .submit(
            &format!("/cms/user/{id}"),
            &session,
            &[
                ("_method", "PUT"),
                ("username", "user@testupdate.com"),
                ("password", ""),
            ],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/cms/user/{id}/edit"));

    let updated = app.storage.user_by_id(id).await.unwrap();
    assert_eq!(updated.username, "user@testupdate.com");
    assert_eq!(updated.password_hash, created.password_hash);

    let resp = app.get("/cms/user/", &session).await;
    let body = body_string(resp).await;
    assert!(body.contains("user@testupdate.com"));
    assert!(!body.contains(">user@test.com<"));

    // the renamed user can log in with the original password
    let resp = app
        .request(
            Request::builder()
                .method("POST")
                .uri("/login_check")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form_body(&[
                    ("username", "user@testupdate.com"),
                    ("password", "123"),
                ])))
                .expect("failed to build request"),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/admin");

    // delete
    let resp = app
        .submit(&format!("/cms/user/{id}"), &session, &[("_method", "DELETE")])
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/cms/user/");

    let resp = app.get("/cms/user/", &session).await;
    assert!(!body_string(resp).await.contains("user@testupdate.com"));
}

#[tokio::test]
async fn user_create_requires_username_and_password() {
    let app = TestApp::spawn("user-invalid").await;
    let session = app.login().await;

    let resp = app
        .submit(
            "/cms/user/",
            &session,
            &[("username", ""), ("password", "")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_string(resp).await;
    assert!(body.contains("must not be blank"));

    // only the seeded admin remains
    assert_eq!(app.storage.list_users().await.unwrap().len(), 1);
}
