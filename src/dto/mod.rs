pub mod auth;
pub mod teams;
