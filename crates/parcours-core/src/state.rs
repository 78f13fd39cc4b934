use crate::error::{CaseError, Result};
use crate::notify::Notification;
use crate::paths;
use crate::types::{ActionId, GlobalStatus, Role};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// TransitionRecord
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub case_slug: String,
    pub action: ActionId,
    pub role: Role,
    pub from: GlobalStatus,
    pub to: GlobalStatus,
    pub timestamp: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

fn default_version() -> u32 {
    1
}

/// Project-level ledger at `.parcours/state.yaml`: which cases are open,
/// what happened recently, and the per-role notification feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct State {
    #[serde(default = "default_version")]
    pub version: u32,
    pub project: String,
    pub active_cases: Vec<String>,
    pub history: Vec<TransitionRecord>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
    pub last_updated: DateTime<Utc>,
}

impl State {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            version: 1,
            project: project.into(),
            active_cases: Vec::new(),
            history: Vec::new(),
            notifications: Vec::new(),
            last_updated: Utc::now(),
        }
    }

    // ---------------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------------

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::state_path(root);
        if !path.exists() {
            return Err(CaseError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let state: State = serde_yaml::from_str(&data)?;
        Ok(state)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::state_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // ---------------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------------

    pub fn add_active_case(&mut self, slug: &str) {
        if !self.active_cases.contains(&slug.to_string()) {
            self.active_cases.push(slug.to_string());
        }
        self.last_updated = Utc::now();
    }

    pub fn remove_active_case(&mut self, slug: &str) {
        self.active_cases.retain(|s| s != slug);
        self.last_updated = Utc::now();
    }

    pub fn record_transition(&mut self, record: TransitionRecord) {
        self.history.push(record);
        // Trim history to the last 200 entries
        if self.history.len() > 200 {
            self.history.drain(..self.history.len() - 200);
        }
        self.last_updated = Utc::now();
    }

    pub fn push_notifications(&mut self, notifications: Vec<Notification>) {
        if notifications.is_empty() {
            return;
        }
        self.notifications.extend(notifications);
        self.last_updated = Utc::now();
    }

    pub fn notifications_for(&self, role: Role) -> Vec<&Notification> {
        self.notifications
            .iter()
            .filter(|n| n.role == role)
            .collect()
    }

    /// Mark all of a role's notifications read. Returns how many changed.
    pub fn mark_read(&mut self, role: Role) -> usize {
        let mut changed = 0;
        for n in self.notifications.iter_mut() {
            if n.role == role && !n.read {
                n.read = true;
                changed += 1;
            }
        }
        if changed > 0 {
            self.last_updated = Utc::now();
        }
        changed
    }

    pub fn last_transition(&self) -> Option<&TransitionRecord> {
        self.history.last()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(slug: &str) -> TransitionRecord {
        TransitionRecord {
            case_slug: slug.to_string(),
            action: ActionId::SubmitToMedical,
            role: Role::Coordinator,
            from: GlobalStatus::Draft,
            to: GlobalStatus::MedicalReview,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn state_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut state = State::new("clinique-toulouse");
        state.add_active_case("dupont-jean");
        state.record_transition(record("dupont-jean"));
        state.save(dir.path()).unwrap();

        let loaded = State::load(dir.path()).unwrap();
        assert_eq!(loaded.project, "clinique-toulouse");
        assert!(loaded.active_cases.contains(&"dupont-jean".to_string()));
        assert_eq!(loaded.history.len(), 1);
    }

    #[test]
    fn state_not_initialized() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            State::load(dir.path()),
            Err(CaseError::NotInitialized)
        ));
    }

    #[test]
    fn history_is_capped() {
        let mut state = State::new("proj");
        for _ in 0..250 {
            state.record_transition(record("c"));
        }
        assert_eq!(state.history.len(), 200);
    }

    #[test]
    fn notifications_filtered_and_marked_read() {
        let mut state = State::new("proj");
        state.push_notifications(vec![
            Notification {
                role: Role::Physician,
                case_slug: "c".to_string(),
                title: "Nouveau statut patient".to_string(),
                message: "prêt pour revue".to_string(),
                created_at: Utc::now(),
                read: false,
            },
            Notification {
                role: Role::Coordinator,
                case_slug: "c".to_string(),
                title: "Nouveau statut patient".to_string(),
                message: "validé".to_string(),
                created_at: Utc::now(),
                read: false,
            },
        ]);

        assert_eq!(state.notifications_for(Role::Physician).len(), 1);
        assert_eq!(state.mark_read(Role::Physician), 1);
        assert_eq!(state.mark_read(Role::Physician), 0);
        assert!(state.notifications_for(Role::Physician)[0].read);
        assert!(!state.notifications_for(Role::Coordinator)[0].read);
    }

    #[test]
    fn active_case_add_remove() {
        let mut state = State::new("proj");
        state.add_active_case("a");
        state.add_active_case("a");
        assert_eq!(state.active_cases.len(), 1);
        state.remove_active_case("a");
        assert!(state.active_cases.is_empty());
    }
}
