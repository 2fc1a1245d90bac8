//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows plus new-record drafts
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: the repository gateway over an sqlx pool

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{Category, CustomUser, NewCategory, NewPage, NewUser, Page};
pub use schema::SQLITE_INIT;
pub use sqlite::{CmsStorage, SqlitePool};
