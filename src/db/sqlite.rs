use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;

use crate::db::models::{Category, CustomUser, NewCategory, NewPage, NewUser, Page};
use crate::db::schema::SQLITE_INIT;
use crate::error::OpalError;

pub type SqlitePool = Pool<Sqlite>;

/// Repository gateway over the content store. Cheap to clone; all methods
/// are single statements, last write wins.
#[derive(Clone)]
pub struct CmsStorage {
    pool: SqlitePool,
}

impl CmsStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (and create if missing) the sqlite database at `database_url`.
    /// Foreign keys are enabled per connection so deleting a category nulls
    /// the `category_id` of its pages.
    pub async fn connect(database_url: &str) -> Result<Self, OpalError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), OpalError> {
        // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    // -- categories --

    pub async fn list_categories(&self) -> Result<Vec<Category>, OpalError> {
        let rows = sqlx::query_as("SELECT id, name FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn category_by_id(&self, id: i64) -> Result<Category, OpalError> {
        sqlx::query_as("SELECT id, name FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(OpalError::NotFound)
    }

    pub async fn insert_category(&self, new: &NewCategory) -> Result<i64, OpalError> {
        let res = sqlx::query("INSERT INTO categories (name) VALUES (?)")
            .bind(&new.name)
            .execute(&self.pool)
            .await?;
        Ok(res.last_insert_rowid())
    }

    pub async fn update_category(&self, id: i64, new: &NewCategory) -> Result<(), OpalError> {
        sqlx::query("UPDATE categories SET name = ? WHERE id = ?")
            .bind(&new.name)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn delete_category(&self, id: i64) -> Result<(), OpalError> {
        sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // -- pages --

    pub async fn list_pages(&self) -> Result<Vec<Page>, OpalError> {
        let rows = sqlx::query_as("SELECT id, title, content, category_id FROM pages ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn pages_in_category(&self, category_id: i64) -> Result<Vec<Page>, OpalError> {
        let rows = sqlx::query_as(
            "SELECT id, title, content, category_id FROM pages WHERE category_id = ? ORDER BY id",
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn page_by_id(&self, id: i64) -> Result<Page, OpalError> {
        sqlx::query_as("SELECT id, title, content, category_id FROM pages WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(OpalError::NotFound)
    }

    pub async fn insert_page(&self, new: &NewPage) -> Result<i64, OpalError> {
        let res = sqlx::query("INSERT INTO pages (title, content, category_id) VALUES (?, ?, ?)")
            .bind(&new.title)
            .bind(&new.content)
            .bind(new.category_id)
            .execute(&self.pool)
            .await?;
        Ok(res.last_insert_rowid())
    }

    pub async fn update_page(&self, id: i64, new: &NewPage) -> Result<(), OpalError> {
        sqlx::query("UPDATE pages SET title = ?, content = ?, category_id = ? WHERE id = ?")
            .bind(&new.title)
            .bind(&new.content)
            .bind(new.category_id)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn delete_page(&self, id: i64) -> Result<(), OpalError> {
        sqlx::query("DELETE FROM pages WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // -- users --

    pub async fn list_users(&self) -> Result<Vec<CustomUser>, OpalError> {
        let rows = sqlx::query_as("SELECT id, username, password_hash FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn user_by_id(&self, id: i64) -> Result<CustomUser, OpalError> {
        sqlx::query_as("SELECT id, username, password_hash FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(OpalError::NotFound)
    }

    /// Lookup for the login path; `None` is not an error there.
    pub async fn user_by_username(&self, username: &str) -> Result<Option<CustomUser>, OpalError> {
        let row = sqlx::query_as("SELECT id, username, password_hash FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn insert_user(&self, new: &NewUser) -> Result<i64, OpalError> {
        let res = sqlx::query("INSERT INTO users (username, password_hash) VALUES (?, ?)")
            .bind(&new.username)
            .bind(&new.password_hash)
            .execute(&self.pool)
            .await?;
        Ok(res.last_insert_rowid())
    }

    pub async fn update_user(&self, id: i64, new: &NewUser) -> Result<(), OpalError> {
        sqlx::query("UPDATE users SET username = ?, password_hash = ? WHERE id = ?")
            .bind(&new.username)
            .bind(&new.password_hash)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), OpalError> {
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
