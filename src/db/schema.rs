//! SQL DDL for initializing the content store.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema with:
/// - `id` INTEGER PRIMARY KEY AUTOINCREMENT on every table
/// - `pages.category_id` nullable, set to NULL when the category goes away
/// - `users.username` UNIQUE
/// - `users.password_hash` holds a PHC-format Argon2id string, never plaintext
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS pages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    category_id INTEGER NULL REFERENCES categories(id) ON DELETE SET NULL
);

CREATE INDEX IF NOT EXISTS idx_pages_category_id ON pages(category_id);

CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL
);
"#;
