use axum::extract::{Query, State};
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;
use parcours_core::state::State as ProjectState;
use parcours_core::types::Role;
use parcours_core::CaseError;

#[derive(serde::Deserialize)]
pub struct RoleQuery {
    pub role: Role,
}

/// GET /api/notifications?role= — a role's notification feed.
pub async fn list_notifications(
    State(app): State<AppState>,
    Query(q): Query<RoleQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let state = ProjectState::load(&root)?;
        let notifications: Vec<_> = state
            .notifications_for(q.role)
            .into_iter()
            .cloned()
            .collect();
        Ok::<_, CaseError>(serde_json::json!(notifications))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
pub struct MarkReadBody {
    pub role: Role,
}

/// POST /api/notifications/read — mark a role's feed read.
pub async fn mark_read(
    State(app): State<AppState>,
    Json(body): Json<MarkReadBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut state = ProjectState::load(&root)?;
        let changed = state.mark_read(body.role);
        state.save(&root)?;
        Ok::<_, CaseError>(serde_json::json!({ "marked_read": changed }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
