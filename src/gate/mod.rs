pub mod middleware;
pub mod payload;

pub use middleware::{team_create_gate, team_join_gate};
