pub mod auth;
pub mod method_override;
