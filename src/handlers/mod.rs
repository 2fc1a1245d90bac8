pub mod admin;
pub mod category;
pub mod page;
pub mod security;
pub mod user;
