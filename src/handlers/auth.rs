use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use crate::app::AppState;
use crate::errors::{AppError, AppResult, AuthError};
use crate::extract::{AppForm, AppJson};
use crate::models::{LoginForm, NewUser, RegisterForm, RegisterResponse, TokenResponse};

pub async fn handle_register(
    State(state): State<AppState>,
    AppJson(form): AppJson<RegisterForm>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    tracing::info!("Registration attempt for user: {}", form.username);

    // Check before paying for a hash; the insert still catches races
    if state.db.get_user(&form.username).await?.is_some() {
        tracing::info!("Username already taken: {}", form.username);
        return Err(AppError::Conflict("Username already registered".into()));
    }

    let hasher = state.hasher.clone();
    let password = form.password;
    let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password)).await??;

    let user = state
        .db
        .create_user(NewUser {
            username: form.username,
            password_hash,
            full_name: form.full_name,
        })
        .await?;

    tracing::info!("Registered user {} with id {}", user.username, user.id);
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse { username: user.username, id: user.id }),
    ))
}

#[axum::debug_handler]
pub async fn handle_login(
    State(state): State<AppState>,
    AppForm(form): AppForm<LoginForm>,
) -> AppResult<Json<TokenResponse>> {
    tracing::info!("Login attempt for user: {}", form.username);
    tracing::debug!(
        "Token request scope: {:?}, client: {:?}, client secret supplied: {}",
        form.scope,
        form.client_id,
        form.client_secret.is_some()
    );

    if let Some(grant_type) = form.grant_type.as_deref() {
        if grant_type != "password" {
            return Err(AppError::Validation(StatusCode::UNPROCESSABLE_ENTITY, format!(
                "Unsupported grant_type '{}', expected 'password'",
                grant_type
            )));
        }
    }

    let user = state.db.get_user(&form.username).await?;
    let hasher = state.hasher.clone();
    let password = form.password;

    // Unknown users still pay for one verification
    let verified = tokio::task::spawn_blocking(move || match user {
        Some(user) => hasher
            .verify(&password, &user.password_hash)
            .map(|ok| ok.then_some(user)),
        None => {
            hasher.verify_dummy(&password);
            Ok(None)
        }
    })
    .await??;

    let user = verified.ok_or(AuthError::InvalidCredentials)?;

    let access_token = state.tokens.issue(&user.username)?;
    tracing::info!("Issued access token for user: {}", user.username);
    Ok(Json(TokenResponse::bearer(access_token)))
}
