use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, RegisterRequest, RegisterResponse, TokenResponse},
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo::User,
    },
    error::AuthError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AuthError> {
    let required = [
        &payload.username,
        &payload.email,
        &payload.phone,
        &payload.password,
        &payload.ration_card_id,
        &payload.role,
    ];
    if required.iter().any(|field| field.is_empty()) {
        warn!("registration with missing fields");
        return Err(AuthError::MissingFields);
    }

    if User::find_by_email_or_username(&state.db, &payload.email, &payload.username)
        .await?
        .is_some()
    {
        warn!(email = %payload.email, username = %payload.username, "duplicate registration");
        return Err(AuthError::DuplicateUser);
    }

    let hash = hash_password(&payload.password)?;

    // A concurrent register between the check above and this insert loses
    // on the UNIQUE constraints and maps to the same duplicate error.
    let user = User::create(
        &state.db,
        &payload.username,
        &payload.email,
        &payload.phone,
        &hash,
        &payload.ration_card_id,
        &payload.role,
    )
    .await?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.user_id, &user.role)?;

    info!(user_id = %user.user_id, username = %user.username, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            msg: "User registered successfully".into(),
            token,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AuthError> {
    if payload.identifier.is_empty() || payload.password.is_empty() {
        warn!("login with missing fields");
        return Err(AuthError::MissingFields);
    }

    // Unknown identifier and wrong password must be indistinguishable to
    // the caller.
    let Some(user) = User::find_by_identifier(&state.db, &payload.identifier).await? else {
        warn!("login with unknown identifier");
        return Err(AuthError::InvalidCredentials);
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.user_id, "login with wrong password");
        return Err(AuthError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.user_id, &user.role)?;

    info!(user_id = %user.user_id, "user logged in");
    Ok(Json(TokenResponse { token }))
}
