use axum::extract::State;
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;
use parcours_core::state::State as ProjectState;
use parcours_core::CaseError;

/// GET /api/state — project-level summary.
pub async fn get_state(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let state = ProjectState::load(&root)?;
        Ok::<_, CaseError>(serde_json::json!({
            "project": state.project,
            "active_cases": state.active_cases,
            "history": state.history,
            "last_updated": state.last_updated,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
