use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Page {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct CustomUser {
    pub id: i64,
    pub username: String,
    /// One-way Argon2id hash; the plaintext is hashed in the form binder and
    /// never reaches this struct. Skipped on serialization.
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Validated drafts produced by the form binders, ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPage {
    pub title: String,
    pub content: String,
    pub category_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}
