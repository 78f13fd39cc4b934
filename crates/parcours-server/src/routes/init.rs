use axum::extract::State;
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;
use parcours_core::CaseError;

#[derive(serde::Deserialize)]
pub struct InitBody {
    #[serde(default)]
    pub project: Option<String>,
}

/// POST /api/init — scaffold `.parcours/` in the server root.
pub async fn init_project(
    State(app): State<AppState>,
    Json(body): Json<InitBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let project = body.project.unwrap_or_else(|| "parcours".to_string());
        let created = parcours_core::workspace::init_project(&root, &project)?;
        Ok::<_, CaseError>(serde_json::json!({ "created": created, "project": project }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
