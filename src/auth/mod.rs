pub mod invite_codes;
pub mod jwt;
pub mod middleware;
pub mod rate_limit;
