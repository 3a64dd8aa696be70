use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::handlers::{auth, contacts, health, session};
use crate::middleware::request_deadline;
use crate::state::AppState;

/// Directory endpoints. `suffix` is `""` for the canonical paths and
/// `".php"` for the legacy `/LAMPAPI` paths older clients still call.
fn directory_routes(suffix: &str) -> Router<AppState> {
    Router::new()
        .route(&format!("/Register{suffix}"), post(auth::register))
        .route(&format!("/Login{suffix}"), post(auth::login))
        .route(&format!("/Logout{suffix}"), post(auth::logout))
        .route(&format!("/Session{suffix}"), get(session::current_session))
        .route(&format!("/AddContact{suffix}"), post(contacts::add_contact))
        .route(&format!("/SearchContacts{suffix}"), post(contacts::search_contacts))
}

pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(directory_routes(""))
        .nest("/LAMPAPI", directory_routes(".php"))
        .with_state(state)
        // CORS
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(from_fn_with_state(request_timeout, request_deadline))
        // Tracing
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
