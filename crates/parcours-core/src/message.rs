use crate::types::{MessageTopic, Role};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// MessageKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Comment,
    StatusChange,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MessageKind::Comment => "comment",
            MessageKind::StatusChange => "status_change",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// CaseMessage
// ---------------------------------------------------------------------------

/// Old/new raw codes carried on transition audit messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChangeMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_status: Option<String>,
    pub new_status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseMessage {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    pub author_role: Role,
    pub topic: MessageTopic,
    pub kind: MessageKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<StatusChangeMeta>,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Append a message to the thread and return its auto-generated ID.
///
/// `seq` is a monotonic counter stored on the owning `Case`; incrementing it
/// before generating the ID keeps IDs unique regardless of the list length.
#[allow(clippy::too_many_arguments)]
pub fn add_message(
    messages: &mut Vec<CaseMessage>,
    seq: &mut u32,
    author_name: Option<String>,
    author_role: Role,
    topic: MessageTopic,
    kind: MessageKind,
    title: Option<String>,
    body: impl Into<String>,
    meta: Option<StatusChangeMeta>,
) -> String {
    *seq += 1;
    let id = format!("M{}", *seq);
    messages.push(CaseMessage {
        id: id.clone(),
        author_name,
        author_role,
        topic,
        kind,
        title,
        body: body.into(),
        meta,
        created_at: Utc::now(),
    });
    id
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_message_increments_id() {
        let mut messages: Vec<CaseMessage> = Vec::new();
        let mut seq: u32 = 0;
        let id1 = add_message(
            &mut messages,
            &mut seq,
            None,
            Role::Coordinator,
            MessageTopic::Medical,
            MessageKind::Comment,
            None,
            "premier message",
            None,
        );
        let id2 = add_message(
            &mut messages,
            &mut seq,
            Some("Marcel".to_string()),
            Role::Coordinator,
            MessageTopic::Commercial,
            MessageKind::Comment,
            None,
            "second message",
            None,
        );
        assert_eq!(id1, "M1");
        assert_eq!(id2, "M2");
        assert_eq!(messages[1].author_name.as_deref(), Some("Marcel"));
        assert_eq!(messages[1].topic, MessageTopic::Commercial);
    }

    #[test]
    fn status_change_carries_meta() {
        let mut messages: Vec<CaseMessage> = Vec::new();
        let mut seq: u32 = 0;
        add_message(
            &mut messages,
            &mut seq,
            None,
            Role::Physician,
            MessageTopic::Medical,
            MessageKind::StatusChange,
            Some("Statut : Validé médicalement".to_string()),
            "Dossier validé",
            Some(StatusChangeMeta {
                old_status: Some("medical_review".to_string()),
                new_status: "validated_medical".to_string(),
            }),
        );
        let meta = messages[0].meta.as_ref().unwrap();
        assert_eq!(meta.old_status.as_deref(), Some("medical_review"));
        assert_eq!(meta.new_status, "validated_medical");
    }
}
