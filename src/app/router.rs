use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use crate::{
    api::http::{auth as auth_http, teams as teams_http},
    app::{middleware::security_headers, state::AppState},
    auth::{middleware::auth_middleware, rate_limit::rate_limit_middleware},
    gate::{team_create_gate, team_join_gate},
    telemetry::request_logging_middleware,
};

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origin())
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]);

    let auth_routes = Router::new()
        .route("/auth/register", post(auth_http::register_handle))
        .route("/auth/login", post(auth_http::login_handle))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ));

    let create_routes = Router::new()
        .route("/teams", post(teams_http::create_team_handle))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            team_create_gate,
        ));

    let join_routes = Router::new()
        .route("/teams/join", post(teams_http::join_team_handle))
        .layer(middleware::from_fn_with_state(state.clone(), team_join_gate))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ));

    let protected_routes = Router::new()
        .route("/users/me", get(auth_http::get_me_handle))
        .route("/teams/{team_id}", get(teams_http::get_team_handle))
        .route(
            "/teams/{team_id}/members",
            get(teams_http::list_team_members_handle),
        )
        .merge(create_routes)
        .merge(join_routes)
        // Layer order matters: auth must run before the gate, which reads the
        // AuthUser extension.
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(auth_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(cors)
        .with_state(state)
}

fn allowed_origin() -> HeaderValue {
    std::env::var("ALLOWED_ORIGIN")
        .ok()
        .and_then(|origin| origin.parse::<HeaderValue>().ok())
        .unwrap_or_else(|| HeaderValue::from_static("http://localhost:5173"))
}
