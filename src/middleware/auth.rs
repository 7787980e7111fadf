use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use crate::app::AppState;
use crate::errors::{AppResult, AuthError};
use crate::models::User;

/// The user resolved from the request's bearer token.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

// Guards the task routes: valid bearer token whose subject is a known user.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> AppResult<Response> {
    let bearer = req
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or(AuthError::MissingToken)?;

    let username = state.tokens.verify(bearer.token())?;

    let user = state
        .db
        .get_user(&username)
        .await?
        .ok_or_else(|| AuthError::UnknownSubject(username.clone()))?;

    tracing::debug!("Authenticated request from {}", user.username);
    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}
