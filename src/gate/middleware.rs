use axum::{
    body::Body,
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::{
    app::state::AppState,
    auth::middleware::AuthUser,
    error::AppError,
    gate::payload::GatePayload,
    models::{settings::PlatformMode, users::User},
    repositories::users as user_repo,
    usecases::teams::TeamService,
};

// Gate payloads are a handful of small fields; anything bigger is not a
// request this service serves.
const MAX_GATE_BODY_BYTES: usize = 64 * 1024;

enum GateDecision {
    Bypass,
    Check(AuthUser),
}

/// Request-validation hook in front of `POST /teams/join`.
pub async fn team_join_gate(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_user = req.extensions().get::<AuthUser>().cloned();
    let auth_user = match gate_decision(&state, auth_user).await? {
        GateDecision::Bypass => return Ok(next.run(req).await),
        GateDecision::Check(auth_user) => auth_user,
    };

    let (req, payload) = buffer_and_sniff(req).await?;
    let user = load_gate_user(&state, &auth_user).await?;

    tracing::debug!(
        user = %user.username,
        payload = ?payload,
        "Evaluating team join against bracket policy"
    );
    TeamService::check_join(&state.db, &user, &payload).await?;

    Ok(next.run(req).await)
}

/// Request-validation hook in front of `POST /teams`.
pub async fn team_create_gate(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_user = req.extensions().get::<AuthUser>().cloned();
    let auth_user = match gate_decision(&state, auth_user).await? {
        GateDecision::Bypass => return Ok(next.run(req).await),
        GateDecision::Check(auth_user) => auth_user,
    };

    let (req, payload) = buffer_and_sniff(req).await?;
    let user = load_gate_user(&state, &auth_user).await?;

    tracing::debug!(
        user = %user.username,
        payload = ?payload,
        "Evaluating team creation against bracket policy"
    );
    TeamService::check_create(&user, &payload)?;

    Ok(next.run(req).await)
}

/// Decides whether the gate applies to this request at all.
///
/// Enforcement is skipped entirely outside team mode, and when no
/// authenticated user is attached; rejecting unauthenticated requests is the
/// auth middleware's job, not the gate's.
async fn gate_decision(
    state: &AppState,
    auth_user: Option<AuthUser>,
) -> Result<GateDecision, AppError> {
    if state.settings.platform_mode(&state.db).await? != PlatformMode::Teams {
        tracing::debug!("Platform not in team mode, gate bypassed");
        return Ok(GateDecision::Bypass);
    }

    match auth_user {
        Some(auth_user) => Ok(GateDecision::Check(auth_user)),
        None => {
            tracing::debug!("No authenticated user on request, gate bypassed");
            Ok(GateDecision::Bypass)
        }
    }
}

/// Buffers the body, sniffs the gate fields out of it, and rebuilds the
/// request so the downstream handler still sees the original bytes.
async fn buffer_and_sniff(req: Request) -> Result<(Request, GatePayload), AppError> {
    let (parts, body) = req.into_parts();

    let bytes = axum::body::to_bytes(body, MAX_GATE_BODY_BYTES)
        .await
        .map_err(|err| AppError::BadRequest(format!("Unable to read request body: {}", err)))?;

    let content_type = parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let payload = GatePayload::sniff(content_type.as_deref(), &bytes);
    let req = Request::from_parts(parts, Body::from(bytes));

    Ok((req, payload))
}

async fn load_gate_user(state: &AppState, auth_user: &AuthUser) -> Result<User, AppError> {
    user_repo::find_user_by_id(&state.db, auth_user.user_id)
        .await?
        .ok_or(AppError::Unauthorized(
            "User account no longer exists".to_string(),
        ))
}
