use axum::extract::{Path, Query, State};
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;
use parcours_core::case::Case;
use parcours_core::message::MessageKind;
use parcours_core::types::{MessageTopic, Role};
use parcours_core::CaseError;

#[derive(serde::Deserialize, Default)]
pub struct TopicQuery {
    #[serde(default)]
    pub topic: Option<MessageTopic>,
}

/// GET /api/cases/:slug/messages?topic= — the case thread, optionally
/// filtered by topic.
pub async fn list_messages(
    State(app): State<AppState>,
    Path(slug): Path<String>,
    Query(q): Query<TopicQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let c = Case::load(&root, &slug)?;
        let messages: Vec<_> = match q.topic {
            Some(topic) => c.messages_for_topic(topic).into_iter().cloned().collect(),
            None => c.messages.clone(),
        };
        Ok::<_, CaseError>(serde_json::json!(messages))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
pub struct AddMessageBody {
    pub role: Role,
    pub topic: MessageTopic,
    pub body: String,
    #[serde(default)]
    pub author: Option<String>,
}

/// POST /api/cases/:slug/messages — append a comment to the thread.
pub async fn add_case_message(
    State(app): State<AppState>,
    Path(slug): Path<String>,
    Json(body): Json<AddMessageBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut c = Case::load(&root, &slug)?;
        let id = c.add_message(
            body.author,
            body.role,
            body.topic,
            MessageKind::Comment,
            None,
            body.body,
            None,
        );
        c.save(&root)?;
        Ok::<_, CaseError>(serde_json::json!({ "id": id }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
