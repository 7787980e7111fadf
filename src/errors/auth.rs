use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    // Shared by "no such user" and "wrong password"
    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Token has no subject claim")]
    MissingSubject,

    #[error("Token subject {0} does not match any user")]
    UnknownSubject(String),
}

impl AuthError {
    /// Message returned to the caller. Token failures collapse into one
    /// generic detail; the precise cause only goes to the log.
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "Incorrect username or password",
            AuthError::MissingToken => "Not authenticated",
            _ => "Could not validate credentials",
        }
    }
}
