pub mod admin;
pub mod error;
pub mod middleware;
pub mod pages;
pub mod submissions;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use registry_crypto::Cipher;
use registry_db::SubmissionStore;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: SubmissionStore,
    pub cipher: Cipher,
    /// `None` when no admin secret is configured; the gate then denies everything.
    pub admin_token: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RouterOptions {
    pub secure_headers: bool,
    /// Served under `/static` when set.
    pub static_dir: Option<PathBuf>,
}

pub fn router(state: AppState, options: &RouterOptions) -> Router {
    let admin_routes = Router::new()
        .route("/admin/count", get(admin::count))
        .route("/admin/export", get(admin::export))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_admin,
        ));

    let mut app = Router::new()
        .route("/", get(pages::index))
        .route("/submit", post(submissions::submit))
        .route("/success", get(pages::success))
        .route("/health", get(pages::health))
        .merge(admin_routes)
        .with_state(state);

    if let Some(dir) = &options.static_dir {
        app = app.nest_service("/static", ServeDir::new(dir));
    }

    if options.secure_headers {
        app = app.layer(axum_middleware::from_fn(middleware::security_headers));
    }

    app.layer(TraceLayer::new_for_http())
}
