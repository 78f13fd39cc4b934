use crate::actions::{resolve, ActionDescriptor};
use crate::case::Case;
use crate::config::Config;
use crate::error::{CaseError, Result};
use crate::message::{MessageKind, StatusChangeMeta};
use crate::notify;
use crate::permissions::{can, required_permission};
use crate::state::{State, TransitionRecord};
use crate::types::{ActionId, GlobalStatus, InputKind, MessageTopic, Role};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ActionPayload
// ---------------------------------------------------------------------------

/// Free-text and selection inputs accompanying an action, matching the
/// descriptor's declared fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionPayload {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub justification: Option<String>,
    #[serde(default)]
    pub surgeons: Vec<String>,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub dates: Option<String>,
}

impl ActionPayload {
    fn text_for(&self, kind: InputKind) -> Option<&str> {
        let value = match kind {
            InputKind::Message => self.message.as_deref(),
            InputKind::Justification => self.justification.as_deref(),
            InputKind::Budget => self.budget.as_deref(),
            InputKind::Dates => self.dates.as_deref(),
            InputKind::Surgeons => None,
        };
        value.map(str::trim).filter(|s| !s.is_empty())
    }
}

// ---------------------------------------------------------------------------
// ActionOutcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ActionOutcome {
    pub case_slug: String,
    pub action: ActionId,
    pub from: GlobalStatus,
    pub to: GlobalStatus,
    /// How many notifications were fanned out (best-effort).
    pub notified: usize,
}

// ---------------------------------------------------------------------------
// apply_action
// ---------------------------------------------------------------------------

/// Execute one workflow action against a stored case.
///
/// The decision is re-derived from the same resolver the UI renders from: an
/// action not offered for the current (status, role, flags) tuple is refused,
/// then the permission table is consulted, then required inputs are checked
/// against the descriptor. The case manifest is the one authoritative write;
/// history and notification fan-out are best-effort and never roll the
/// transition back.
pub fn apply_action(
    root: &Path,
    slug: &str,
    role: Role,
    actor_name: Option<&str>,
    action: ActionId,
    payload: &ActionPayload,
) -> Result<ActionOutcome> {
    let mut case = Case::load(root, slug)?;
    let from = case.global_status();

    let offered = resolve(from, role, case.quote_accepted, case.date_accepted);
    let Some(descriptor) = offered.get(action).cloned() else {
        return Err(CaseError::ActionNotAvailable {
            action,
            role,
            status: from,
        });
    };

    if let Some(required) = required_permission(action) {
        if !can(role, required) {
            return Err(CaseError::PermissionDenied { role, action });
        }
    }

    validate_inputs(root, &descriptor, payload)?;

    let old_code = case.status.code.clone();
    let old_label = case.status.display_label().to_string();

    apply_effect(&mut case, action, payload);

    let to = case.global_status();
    append_audit_message(
        &mut case,
        role,
        actor_name,
        action,
        payload,
        old_code.as_deref(),
        &old_label,
        from != to,
    );

    case.save(root)?;

    // History and notifications after the authoritative write; a failure here
    // is logged, not surfaced.
    let mut notified = 0;
    match State::load(root) {
        Ok(mut state) => {
            state.record_transition(TransitionRecord {
                case_slug: case.slug.clone(),
                action,
                role,
                from,
                to,
                timestamp: Utc::now(),
            });
            let notifications =
                notify::fan_out(action, &case.slug, &case.patient_name, role, Utc::now());
            notified = notifications.len();
            state.push_notifications(notifications);
            if let Err(e) = state.save(root) {
                tracing::warn!(case = %case.slug, error = %e, "failed to save state after action");
                notified = 0;
            }
        }
        Err(e) => {
            tracing::warn!(case = %case.slug, error = %e, "state unavailable; skipping history and notifications");
        }
    }

    Ok(ActionOutcome {
        case_slug: case.slug,
        action,
        from,
        to,
        notified,
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_inputs(root: &Path, descriptor: &ActionDescriptor, payload: &ActionPayload) -> Result<()> {
    for field in descriptor.inputs {
        match field.kind {
            InputKind::Surgeons => {
                if field.required {
                    validate_surgeons(root, &payload.surgeons)?;
                }
            }
            _ => {
                if field.required && payload.text_for(field.kind).is_none() {
                    return Err(CaseError::MissingInput(field.label.to_string()));
                }
            }
        }
    }
    Ok(())
}

/// The 1–2 bound and roster membership are endpoint-side checks; the resolver
/// only declares the field required.
fn validate_surgeons(root: &Path, selected: &[String]) -> Result<()> {
    if selected.is_empty() || selected.len() > 2 {
        return Err(CaseError::InvalidSurgeons(format!(
            "expected 1 or 2 surgeons, got {}",
            selected.len()
        )));
    }
    let roster = Config::load(root).unwrap_or_default().surgeons;
    for surgeon in selected {
        if !roster.iter().any(|s| s == surgeon) {
            return Err(CaseError::InvalidSurgeons(format!(
                "'{surgeon}' is not on the roster"
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Effects
// ---------------------------------------------------------------------------

fn apply_effect(case: &mut Case, action: ActionId, payload: &ActionPayload) {
    match action {
        ActionId::SubmitToMedical | ActionId::ResubmitToMedical => {
            case.set_status("medical_review", "Revue médicale");
        }
        ActionId::ApproveMedical => {
            case.recommended_surgeons = payload.surgeons.clone();
            case.set_status("validated_medical", "Validé médicalement");
        }
        ActionId::RequestMoreInfo => {
            case.set_status("need_info", "Informations complémentaires demandées");
        }
        ActionId::RejectMedical => {
            case.set_status("rejected_medical", "Refusé médicalement");
        }
        ActionId::ConfirmQuote => {
            case.quote_accepted = true;
            case.updated_at = Utc::now();
        }
        ActionId::ConfirmDate => {
            case.date_accepted = true;
            case.updated_at = Utc::now();
        }
        ActionId::AddBudget => {
            case.budget = payload.budget.clone();
            case.updated_at = Utc::now();
        }
        ActionId::ProposeDates => {
            case.proposed_dates = payload.dates.clone();
            case.updated_at = Utc::now();
        }
        ActionId::ReopenCase => {
            // A reopened case restarts the funnel: stale acceptances would
            // skip the coordinator's confirmations on the next pass.
            case.quote_accepted = false;
            case.date_accepted = false;
            case.recommended_surgeons.clear();
            case.set_status("draft", "Brouillon");
        }
    }
}

fn topic_for(action: ActionId) -> MessageTopic {
    match action {
        ActionId::SubmitToMedical
        | ActionId::ResubmitToMedical
        | ActionId::ApproveMedical
        | ActionId::RequestMoreInfo
        | ActionId::RejectMedical => MessageTopic::Medical,
        ActionId::ConfirmQuote
        | ActionId::ConfirmDate
        | ActionId::AddBudget
        | ActionId::ProposeDates => MessageTopic::Commercial,
        ActionId::ReopenCase => MessageTopic::System,
    }
}

#[allow(clippy::too_many_arguments)]
fn append_audit_message(
    case: &mut Case,
    role: Role,
    actor_name: Option<&str>,
    action: ActionId,
    payload: &ActionPayload,
    old_code: Option<&str>,
    old_label: &str,
    status_changed: bool,
) {
    let descriptor = action.descriptor();
    let new_label = case.status.display_label().to_string();

    let supplied_text = descriptor
        .inputs
        .iter()
        .find_map(|f| payload.text_for(f.kind))
        .map(str::to_string);

    let (title, body, meta) = if status_changed {
        let body = supplied_text
            .unwrap_or_else(|| format!("Statut changé de \"{old_label}\" vers \"{new_label}\""));
        let meta = StatusChangeMeta {
            old_status: old_code.map(str::to_string),
            new_status: case
                .status
                .code
                .clone()
                .unwrap_or_else(|| new_label.clone()),
        };
        (Some(format!("Statut : {new_label}")), body, Some(meta))
    } else {
        let body = supplied_text.unwrap_or_else(|| descriptor.label.to_string());
        (Some(descriptor.label.to_string()), body, None)
    };

    case.add_message(
        actor_name.map(str::to_string),
        role,
        topic_for(action),
        MessageKind::StatusChange,
        title,
        body,
        meta,
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
