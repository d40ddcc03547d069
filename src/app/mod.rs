pub mod middleware;
pub mod router;
mod run;
pub mod state;

pub use run::run;
