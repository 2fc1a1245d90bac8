//! Runtime configuration, loaded once from the environment.
//!
//! Every field can be overridden with an `OPAL_`-prefixed variable
//! (`OPAL_DATABASE_URL`, `OPAL_LISTEN_ADDR`, ...). `dotenvy` is loaded by
//! `main` before the first access, so a local `.env` works too.

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,
    /// Master secret for the private session cookie, at least 32 bytes.
    /// When unset a random key is generated at startup and sessions do not
    /// survive a restart.
    pub cookie_key: Option<String>,
    /// Credentials for the admin user seeded on first start.
    pub admin_username: String,
    pub admin_password: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:opal.db".to_string(),
            listen_addr: "0.0.0.0:8000".to_string(),
            loglevel: "info".to_string(),
            cookie_key: None,
            admin_username: "admin@localhost".to_string(),
            admin_password: "admin".to_string(),
        }
    }
}

pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Figment::from(Serialized::defaults(Config::default()))
        .merge(Env::prefixed("OPAL_"))
        .extract()
        .unwrap_or_else(|e| {
            eprintln!("invalid configuration: {e}");
            std::process::exit(1);
        })
});
