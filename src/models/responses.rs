use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub username: String,
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self { access_token, token_type: "bearer" }
    }
}

#[derive(Debug, Serialize)]
pub struct TaskCreated {
    pub message: &'static str,
    pub id: i64,
}
