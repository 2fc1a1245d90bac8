pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod password;
pub mod router;
pub mod views;

pub use db::CmsStorage;
pub use error::OpalError;
