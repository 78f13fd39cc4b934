use crate::error::{CaseError, Result};
use crate::message::{add_message, CaseMessage, MessageKind, StatusChangeMeta};
use crate::paths;
use crate::record::{normalize, StatusRecord};
use crate::types::{GlobalStatus, MessageTopic, Role};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// StatusEntry
// ---------------------------------------------------------------------------

/// One stay in a status, with entry and exit stamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusEntry {
    pub status: GlobalStatus,
    pub code: String,
    pub entered: DateTime<Utc>,
    pub exited: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Case
// ---------------------------------------------------------------------------

/// A patient case moving through the workflow. One YAML manifest per case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Case {
    pub slug: String,
    pub patient_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinical_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_link: Option<String>,
    /// Raw status row as persisted; all decisioning goes through
    /// [`Case::global_status`].
    pub status: StatusRecord,
    #[serde(default)]
    pub quote_accepted: bool,
    #[serde(default)]
    pub date_accepted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposed_dates: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommended_surgeons: Vec<String>,
    #[serde(default)]
    pub messages: Vec<CaseMessage>,
    #[serde(default)]
    pub next_message_seq: u32,
    pub status_history: Vec<StatusEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Case {
    pub fn new(slug: impl Into<String>, patient_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            slug: slug.into(),
            patient_name: patient_name.into(),
            clinical_summary: None,
            document_link: None,
            status: StatusRecord::new("draft", "Brouillon"),
            quote_accepted: false,
            date_accepted: false,
            budget: None,
            proposed_dates: None,
            recommended_surgeons: Vec::new(),
            messages: Vec::new(),
            next_message_seq: 0,
            status_history: vec![StatusEntry {
                status: GlobalStatus::Draft,
                code: "draft".to_string(),
                entered: now,
                exited: None,
            }],
            created_at: now,
            updated_at: now,
        }
    }

    // ---------------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------------

    pub fn create(
        root: &Path,
        slug: impl Into<String>,
        patient_name: impl Into<String>,
    ) -> Result<Self> {
        let slug = slug.into();
        paths::validate_slug(&slug)?;

        let case_dir = paths::case_dir(root, &slug);
        if case_dir.exists() {
            return Err(CaseError::CaseExists(slug));
        }

        let case = Self::new(slug, patient_name);
        case.save(root)?;
        Ok(case)
    }

    pub fn load(root: &Path, slug: &str) -> Result<Self> {
        let manifest = paths::case_manifest(root, slug);
        if !manifest.exists() {
            return Err(CaseError::CaseNotFound(slug.to_string()));
        }
        let data = std::fs::read_to_string(&manifest)?;
        let case: Case = serde_yaml::from_str(&data)?;
        Ok(case)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let manifest = paths::case_manifest(root, &self.slug);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&manifest, data.as_bytes())
    }

    pub fn list(root: &Path) -> Result<Vec<Self>> {
        let cases_dir = paths::cases_dir(root);
        if !cases_dir.exists() {
            return Ok(Vec::new());
        }

        let mut cases = Vec::new();
        for entry in std::fs::read_dir(&cases_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                let slug = entry.file_name().to_string_lossy().into_owned();
                match Self::load(root, &slug) {
                    Ok(c) => cases.push(c),
                    Err(CaseError::CaseNotFound(_)) => {}
                    Err(e) => return Err(e),
                }
            }
        }
        cases.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(cases)
    }

    // ---------------------------------------------------------------------------
    // Status
    // ---------------------------------------------------------------------------

    /// Canonical status of the case as the normalizer sees the stored row.
    pub fn global_status(&self) -> GlobalStatus {
        normalize(Some(&self.status))
    }

    /// Write a new raw status (code + label), closing the current history
    /// entry and opening a new one.
    pub fn set_status(&mut self, code: impl Into<String>, label: impl Into<String>) {
        let code = code.into();
        let now = Utc::now();

        if let Some(last) = self.status_history.last_mut() {
            last.exited = Some(now);
        }

        self.status = StatusRecord::new(code.clone(), label);
        let status = self.global_status();
        self.status_history.push(StatusEntry {
            status,
            code,
            entered: now,
            exited: None,
        });
        self.updated_at = now;
    }

    // ---------------------------------------------------------------------------
    // Messages
    // ---------------------------------------------------------------------------

    #[allow(clippy::too_many_arguments)]
    pub fn add_message(
        &mut self,
        author_name: Option<String>,
        author_role: Role,
        topic: MessageTopic,
        kind: MessageKind,
        title: Option<String>,
        body: impl Into<String>,
        meta: Option<StatusChangeMeta>,
    ) -> String {
        let id = add_message(
            &mut self.messages,
            &mut self.next_message_seq,
            author_name,
            author_role,
            topic,
            kind,
            title,
            body,
            meta,
        );
        self.updated_at = Utc::now();
        id
    }

    pub fn messages_for_topic(&self, topic: MessageTopic) -> Vec<&CaseMessage> {
        self.messages.iter().filter(|m| m.topic == topic).collect()
    }

    // ---------------------------------------------------------------------------
    // Metadata mutations
    // ---------------------------------------------------------------------------

    pub fn set_summary(&mut self, summary: impl Into<String>) {
        self.clinical_summary = Some(summary.into());
        self.updated_at = Utc::now();
    }

    pub fn set_document_link(&mut self, link: impl Into<String>) {
        self.document_link = Some(link.into());
        self.updated_at = Utc::now();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
