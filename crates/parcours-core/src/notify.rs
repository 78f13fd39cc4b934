use crate::types::{ActionId, Role};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub role: Role,
    pub case_slug: String,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}

// ---------------------------------------------------------------------------
// Fan-out rules
// ---------------------------------------------------------------------------

/// Fn-pointer rule: which roles hear about an action, and with what text.
struct FanoutRule {
    roles: &'static [Role],
    message: fn(&str) -> String,
}

/// Static fan-out table, total over the action set.
fn rule_for(action: ActionId) -> FanoutRule {
    match action {
        ActionId::SubmitToMedical | ActionId::ResubmitToMedical => FanoutRule {
            roles: &[Role::Physician],
            message: |p| format!("Le dossier de {p} est prêt pour votre revue médicale."),
        },
        ActionId::ApproveMedical => FanoutRule {
            roles: &[Role::Coordinator, Role::Partner, Role::Admin],
            message: |p| {
                format!("Le dossier de {p} a été validé médicalement. Vous pouvez préparer le devis.")
            },
        },
        ActionId::RequestMoreInfo => FanoutRule {
            roles: &[Role::Coordinator, Role::Partner, Role::Admin],
            message: |p| format!("Des informations supplémentaires sont demandées pour {p}."),
        },
        ActionId::RejectMedical => FanoutRule {
            roles: &[Role::Coordinator, Role::Partner, Role::Admin],
            message: |p| format!("Le dossier de {p} a été refusé médicalement."),
        },
        ActionId::ConfirmQuote => FanoutRule {
            roles: &[Role::Coordinator, Role::Partner, Role::Physician, Role::Admin],
            message: |p| {
                format!("Le devis de {p} a été accepté. Vous pouvez programmer la chirurgie.")
            },
        },
        ActionId::ConfirmDate => FanoutRule {
            roles: &[Role::Coordinator, Role::Partner, Role::Physician, Role::Admin],
            message: |p| format!("La date de chirurgie de {p} a été confirmée."),
        },
        ActionId::AddBudget => FanoutRule {
            roles: &[Role::Coordinator, Role::Admin],
            message: |p| format!("Un budget indicatif a été renseigné pour {p}."),
        },
        ActionId::ProposeDates => FanoutRule {
            roles: &[Role::Coordinator, Role::Admin],
            message: |p| format!("Des dates de chirurgie ont été proposées pour {p}."),
        },
        ActionId::ReopenCase => FanoutRule {
            roles: &[Role::Coordinator, Role::Partner, Role::Physician],
            message: |p| format!("Le dossier de {p} a été réouvert par un administrateur."),
        },
    }
}

/// Build the notifications an action fans out to. The acting role never
/// notifies itself.
pub fn fan_out(
    action: ActionId,
    case_slug: &str,
    patient_name: &str,
    actor: Role,
    at: DateTime<Utc>,
) -> Vec<Notification> {
    let rule = rule_for(action);
    rule.roles
        .iter()
        .filter(|&&role| role != actor)
        .map(|&role| Notification {
            role,
            case_slug: case_slug.to_string(),
            title: "Nouveau statut patient".to_string(),
            message: (rule.message)(patient_name),
            created_at: at,
            read: false,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_notifies_the_physician() {
        let notes = fan_out(
            ActionId::SubmitToMedical,
            "dupont-jean",
            "Jean Dupont",
            Role::Coordinator,
            Utc::now(),
        );
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].role, Role::Physician);
        assert!(notes[0].message.contains("Jean Dupont"));
        assert!(!notes[0].read);
    }

    #[test]
    fn fan_out_excludes_the_actor() {
        let notes = fan_out(
            ActionId::ApproveMedical,
            "dupont-jean",
            "Jean Dupont",
            Role::Admin,
            Utc::now(),
        );
        let roles: Vec<_> = notes.iter().map(|n| n.role).collect();
        assert_eq!(roles, vec![Role::Coordinator, Role::Partner]);
    }

    #[test]
    fn quote_confirmation_reaches_everyone_else() {
        let notes = fan_out(
            ActionId::ConfirmQuote,
            "dupont-jean",
            "Jean Dupont",
            Role::Coordinator,
            Utc::now(),
        );
        let roles: Vec<_> = notes.iter().map(|n| n.role).collect();
        assert_eq!(roles, vec![Role::Partner, Role::Physician, Role::Admin]);
    }

    #[test]
    fn no_action_ever_notifies_the_actor() {
        for action in ActionId::all() {
            for actor in Role::all() {
                let notes = fan_out(*action, "c", "P", *actor, Utc::now());
                assert!(
                    notes.iter().all(|n| n.role != *actor),
                    "{action} notified its own actor {actor}"
                );
            }
        }
    }
}
