pub mod settings;
pub mod teams;
pub mod users;
