use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use crate::{
    config::{AuthConfig, ServerConfig},
    errors::AppResult,
    handlers,
    middleware,
    services::{DbService, PasswordHasher, TokenService},
};

// Application state shared between handlers
#[derive(Clone)]
pub struct AppState {
    pub db: DbService,
    pub tokens: TokenService,
    pub hasher: PasswordHasher,
}

impl AppState {
    pub fn new(db: DbService, auth: &AuthConfig) -> AppResult<Self> {
        Ok(Self {
            db,
            tokens: TokenService::new(auth)?,
            hasher: PasswordHasher::new(auth.bcrypt_cost)?,
        })
    }
}

pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    // Task routes sit behind the bearer token check
    let protected = Router::new()
        .route("/todolist", post(handlers::create_task))
        .route("/taskuri_existente", get(handlers::list_tasks))
        .route_layer(from_fn_with_state(state.clone(), middleware::require_auth));

    Router::new()
        // Auth routes
        .route("/users/", post(handlers::handle_register))
        .route("/users", post(handlers::handle_register))
        .route("/token", post(handlers::handle_login))
        .merge(protected)

        .layer(TraceLayer::new_for_http())

        // Request size limit from config, enforced by the body extractors
        .layer(DefaultBodyLimit::max(server.max_body_size))

        .with_state(state)
}
