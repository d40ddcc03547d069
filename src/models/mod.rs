pub mod brackets;
pub mod settings;
pub mod teams;
pub mod users;
