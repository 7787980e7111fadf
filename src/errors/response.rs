use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use crate::errors::{AppError, AuthError};

// Every error leaves the service as {"detail": "..."} with a matching status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Auth(err) => convert_auth_error(err),

            // Duplicate usernames are reported as a plain bad request
            AppError::Conflict(msg) => detail(StatusCode::BAD_REQUEST, &msg),

            AppError::Validation(status, msg) => detail(status, &msg),

            // Store, hashing and runtime failures stay internal
            err => {
                tracing::error!("Request failed: {}", err);
                detail(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

fn convert_auth_error(err: AuthError) -> Response {
    tracing::warn!("Rejected credentials: {}", err);
    let mut response = detail(StatusCode::UNAUTHORIZED, err.public_message());
    response.headers_mut().insert(
        header::WWW_AUTHENTICATE,
        header::HeaderValue::from_static("Bearer"),
    );
    response
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_are_401_with_bearer_challenge() {
        let response = AppError::from(AuthError::TokenExpired).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[test]
    fn conflict_maps_to_400() {
        let response = AppError::Conflict("Username already registered".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn validation_maps_to_422() {
        let response = AppError::Validation(StatusCode::UNPROCESSABLE_ENTITY, "bad grant".into())
            .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn validation_keeps_its_status() {
        let response = AppError::Validation(StatusCode::PAYLOAD_TOO_LARGE, "too big".into())
            .into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn expiry_overflow_maps_to_500() {
        let response = AppError::ExpiryOutOfRange.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn store_errors_map_to_500() {
        let response = AppError::Database(rusqlite::Error::QueryReturnedNoRows).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
