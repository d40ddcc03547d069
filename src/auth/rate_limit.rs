use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use redis::AsyncCommands;
use std::net::SocketAddr;

use crate::app::state::AppState;

const WINDOW_SECS: i64 = 60;
const MAX_REQUESTS_PER_WINDOW: u64 = 10;

/// Fixed-window per-IP limiter in front of auth and team-join routes.
/// Fails open whenever redis is missing or unreachable.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if let Some(client) = &state.redis {
        match client.get_multiplexed_async_connection().await {
            Ok(mut conn) => {
                let ip = addr.ip().to_string();
                let path = req.uri().path().to_string();
                let key = format!("rate_limit:{}:{}", path, ip);

                let count: u64 = match conn.incr(&key, 1).await {
                    Ok(c) => c,
                    Err(e) => {
                        tracing::error!("Redis incr error: {}", e);
                        return Ok(next.run(req).await);
                    }
                };

                if count == 1 {
                    if let Err(e) = conn.expire::<_, ()>(&key, WINDOW_SECS).await {
                        tracing::error!("Redis expire error: {}", e);
                    }
                }

                if count > MAX_REQUESTS_PER_WINDOW {
                    return Err(StatusCode::TOO_MANY_REQUESTS);
                }
            }
            Err(e) => {
                tracing::error!("Redis connection error: {}", e);
            }
        }
    }

    Ok(next.run(req).await)
}
