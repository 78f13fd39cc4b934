use axum::extract::{Path, Query, State};
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;
use parcours_core::case::Case;
use parcours_core::engine::{apply_action, ActionPayload};
use parcours_core::timeline::timeline;
use parcours_core::types::{ActionId, Role};
use parcours_core::{guidance, resolve, CaseError};

/// GET /api/cases — list all cases.
pub async fn list_cases(
    State(app): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let cases = Case::list(&root)?;
        let list: Vec<serde_json::Value> = cases
            .iter()
            .map(|c| {
                serde_json::json!({
                    "slug": c.slug,
                    "patient_name": c.patient_name,
                    "status": c.global_status(),
                    "status_label": c.status.display_label(),
                    "quote_accepted": c.quote_accepted,
                    "date_accepted": c.date_accepted,
                    "updated_at": c.updated_at,
                })
            })
            .collect();
        Ok::<_, CaseError>(serde_json::json!(list))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// GET /api/cases/:slug — full case detail.
pub async fn get_case(
    State(app): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let c = Case::load(&root, &slug)?;
        let status = c.global_status();
        Ok::<_, CaseError>(serde_json::json!({
            "slug": c.slug,
            "patient_name": c.patient_name,
            "clinical_summary": c.clinical_summary,
            "document_link": c.document_link,
            "status": status,
            "status_record": c.status,
            "quote_accepted": c.quote_accepted,
            "date_accepted": c.date_accepted,
            "budget": c.budget,
            "proposed_dates": c.proposed_dates,
            "recommended_surgeons": c.recommended_surgeons,
            "status_history": c.status_history,
            "timeline": timeline(status),
            "created_at": c.created_at,
            "updated_at": c.updated_at,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
pub struct RoleQuery {
    pub role: Role,
}

/// GET /api/cases/:slug/next?role= — guidance and permitted actions for a role.
pub async fn next_for_case(
    State(app): State<AppState>,
    Path(slug): Path<String>,
    Query(q): Query<RoleQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let c = Case::load(&root, &slug)?;
        let status = c.global_status();
        let actions = resolve(status, q.role, c.quote_accepted, c.date_accepted);
        Ok::<_, CaseError>(serde_json::json!({
            "case": c.slug,
            "role": q.role,
            "status": status,
            "guidance": guidance(status, q.role),
            "actions": actions,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
pub struct CreateCaseBody {
    pub slug: String,
    pub patient_name: String,
    #[serde(default)]
    pub clinical_summary: Option<String>,
    #[serde(default)]
    pub document_link: Option<String>,
}

/// POST /api/cases — create a new case.
pub async fn create_case(
    State(app): State<AppState>,
    Json(body): Json<CreateCaseBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut c = Case::create(&root, body.slug, body.patient_name)?;
        if let Some(summary) = body.clinical_summary {
            c.set_summary(summary);
        }
        if let Some(link) = body.document_link {
            c.set_document_link(link);
        }
        c.save(&root)?;

        // Register as active in project state
        if let Ok(mut state) = parcours_core::state::State::load(&root) {
            state.add_active_case(&c.slug);
            let _ = state.save(&root);
        }

        Ok::<_, CaseError>(serde_json::json!({
            "slug": c.slug,
            "patient_name": c.patient_name,
            "status": c.global_status(),
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
pub struct ActionBody {
    pub role: Role,
    pub action: ActionId,
    #[serde(default)]
    pub actor: Option<String>,
    #[serde(flatten)]
    pub payload: ActionPayload,
}

/// POST /api/cases/:slug/actions — the transition endpoint: apply one
/// workflow action with its input payload.
pub async fn apply_case_action(
    State(app): State<AppState>,
    Path(slug): Path<String>,
    Json(body): Json<ActionBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let outcome = apply_action(
            &root,
            &slug,
            body.role,
            body.actor.as_deref(),
            body.action,
            &body.payload,
        )?;
        Ok::<_, CaseError>(serde_json::json!({
            "case": outcome.case_slug,
            "action": outcome.action,
            "from": outcome.from,
            "to": outcome.to,
            "notified": outcome.notified,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
