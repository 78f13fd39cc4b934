pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(root: PathBuf) -> Router {
    let app_state = state::AppState::new(root);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // State
        .route("/api/state", get(routes::state::get_state))
        // Cases
        .route("/api/cases", get(routes::cases::list_cases))
        .route("/api/cases", post(routes::cases::create_case))
        .route("/api/cases/{slug}", get(routes::cases::get_case))
        .route("/api/cases/{slug}/next", get(routes::cases::next_for_case))
        .route(
            "/api/cases/{slug}/actions",
            post(routes::cases::apply_case_action),
        )
        // Messages
        .route(
            "/api/cases/{slug}/messages",
            get(routes::messages::list_messages),
        )
        .route(
            "/api/cases/{slug}/messages",
            post(routes::messages::add_case_message),
        )
        // Notifications
        .route(
            "/api/notifications",
            get(routes::notifications::list_notifications),
        )
        .route(
            "/api/notifications/read",
            post(routes::notifications::mark_read),
        )
        // Init
        .route("/api/init", post(routes::init::init_project))
        .layer(cors)
        .with_state(app_state)
}

/// Start the parcours API server.
pub async fn serve(root: PathBuf, port: u16) -> anyhow::Result<()> {
    let app = build_router(root);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("parcours API server listening on http://localhost:{port}");

    axum::serve(listener, app).await?;
    Ok(())
}
