use crate::types::{ActionId, GlobalStatus, InputKind, Role};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Descriptors
// ---------------------------------------------------------------------------

/// UI emphasis tier of an action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionVariant {
    Primary,
    Secondary,
    Danger,
}

/// Where an action takes the case: a new canonical status, or nowhere
/// (flag/data updates that leave the status untouched).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionTarget {
    Status(GlobalStatus),
    Stay,
}

impl ActionTarget {
    pub fn status(self) -> Option<GlobalStatus> {
        match self {
            ActionTarget::Status(s) => Some(s),
            ActionTarget::Stay => None,
        }
    }
}

/// One input field an action collects before executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InputField {
    pub kind: InputKind,
    pub label: &'static str,
    pub required: bool,
}

/// Renderable description of one user-triggerable transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionDescriptor {
    pub id: ActionId,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    pub variant: ActionVariant,
    pub target: ActionTarget,
    pub inputs: &'static [InputField],
}

impl ActionId {
    /// Static descriptor for this action: label, emphasis, target status and
    /// declared inputs. The variant is intrinsic to the action; whether it
    /// lands in the primary slot is decided by [`resolve`].
    pub fn descriptor(self) -> ActionDescriptor {
        match self {
            ActionId::SubmitToMedical => ActionDescriptor {
                id: self,
                label: "Soumettre à validation médicale (Dr Dubois)",
                description: Some("Envoyer le dossier au Dr Dubois pour revue médicale"),
                variant: ActionVariant::Primary,
                target: ActionTarget::Status(GlobalStatus::MedicalReview),
                inputs: &[],
            },
            ActionId::ResubmitToMedical => ActionDescriptor {
                id: self,
                label: "Renvoyer à validation médicale (Dr Dubois)",
                description: Some("Renvoyer le dossier complété au Dr Dubois pour revue médicale"),
                variant: ActionVariant::Primary,
                target: ActionTarget::Status(GlobalStatus::MedicalReview),
                inputs: &[InputField {
                    kind: InputKind::Message,
                    label: "Informations complémentaires fournies",
                    required: false,
                }],
            },
            ActionId::ApproveMedical => ActionDescriptor {
                id: self,
                label: "Valider médicalement",
                description: Some("Approuver le dossier et recommander des chirurgiens"),
                variant: ActionVariant::Primary,
                target: ActionTarget::Status(GlobalStatus::CommercialInProgress),
                inputs: &[
                    InputField {
                        kind: InputKind::Surgeons,
                        label: "Chirurgiens recommandés (1 ou 2)",
                        required: true,
                    },
                    InputField {
                        kind: InputKind::Message,
                        label: "Commentaire médical",
                        required: false,
                    },
                ],
            },
            ActionId::RequestMoreInfo => ActionDescriptor {
                id: self,
                label: "Demander un complément",
                description: None,
                variant: ActionVariant::Secondary,
                target: ActionTarget::Status(GlobalStatus::MedicalMoreInfo),
                inputs: &[InputField {
                    kind: InputKind::Message,
                    label: "Informations manquantes",
                    required: true,
                }],
            },
            ActionId::RejectMedical => ActionDescriptor {
                id: self,
                label: "Refuser le dossier",
                description: None,
                variant: ActionVariant::Danger,
                target: ActionTarget::Status(GlobalStatus::Rejected),
                inputs: &[InputField {
                    kind: InputKind::Justification,
                    label: "Justification du refus",
                    required: true,
                }],
            },
            ActionId::ConfirmQuote => ActionDescriptor {
                id: self,
                label: "Confirmer le devis",
                description: None,
                variant: ActionVariant::Primary,
                target: ActionTarget::Stay,
                inputs: &[],
            },
            ActionId::ConfirmDate => ActionDescriptor {
                id: self,
                label: "Confirmer la date",
                description: None,
                variant: ActionVariant::Primary,
                target: ActionTarget::Stay,
                inputs: &[],
            },
            ActionId::ReopenCase => ActionDescriptor {
                id: self,
                label: "Réouvrir le dossier",
                description: None,
                variant: ActionVariant::Primary,
                target: ActionTarget::Status(GlobalStatus::Draft),
                inputs: &[InputField {
                    kind: InputKind::Message,
                    label: "Raison de la réouverture",
                    required: true,
                }],
            },
            ActionId::AddBudget => ActionDescriptor {
                id: self,
                label: "Renseigner budget indicatif",
                description: None,
                variant: ActionVariant::Secondary,
                target: ActionTarget::Stay,
                inputs: &[InputField {
                    kind: InputKind::Budget,
                    label: "Montant et conditions",
                    required: true,
                }],
            },
            ActionId::ProposeDates => ActionDescriptor {
                id: self,
                label: "Proposer des dates",
                description: None,
                variant: ActionVariant::Secondary,
                target: ActionTarget::Stay,
                inputs: &[InputField {
                    kind: InputKind::Dates,
                    label: "Dates proposées (1 à 3)",
                    required: true,
                }],
            },
        }
    }
}

// ---------------------------------------------------------------------------
// ActionSet
// ---------------------------------------------------------------------------

/// Non-actionable hint describing a later stage, shown while no action
/// exists yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FutureStep {
    pub label: &'static str,
    pub reason: &'static str,
}

/// Steps ahead of a freshly created case, in presentation order.
const DRAFT_FUTURE_STEPS: [FutureStep; 3] = [
    FutureStep {
        label: "Validation médicale",
        reason: "Après soumission",
    },
    FutureStep {
        label: "Proposition commerciale",
        reason: "Après validation",
    },
    FutureStep {
        label: "Confirmation",
        reason: "Après acceptation devis et date",
    },
];

/// What a given role can do right now. Ordering is significant: the primary
/// slot is the single recommended step, `secondary` renders in list order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActionSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<ActionDescriptor>,
    pub secondary: Vec<ActionDescriptor>,
    pub future_steps: Vec<FutureStep>,
}

impl ActionSet {
    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.secondary.is_empty() && self.future_steps.is_empty()
    }

    pub fn contains(&self, id: ActionId) -> bool {
        self.get(id).is_some()
    }

    /// Look an offered action up by id, across both emphasis tiers.
    pub fn get(&self, id: ActionId) -> Option<&ActionDescriptor> {
        self.primary
            .iter()
            .chain(self.secondary.iter())
            .find(|a| a.id == id)
    }
}

// ---------------------------------------------------------------------------
// resolve
// ---------------------------------------------------------------------------

/// Compute the actions currently permitted for `(status, role)` plus the two
/// commercial acceptance flags the core cannot derive itself.
///
/// The rules form a fixed decision table:
/// - rejected cases short-circuit: only the admin may reopen;
/// - the coordinator drives draft, more-info and the two commercial
///   confirmations (quote before date, pending ones only);
/// - physician and admin decide medical review;
/// - partner and admin feed the commercial stage with budget and dates.
///
/// Statuses are singular, so at most one rule fills the primary slot per
/// call. Unmatched combinations return an empty set, which is a valid
/// "nothing to do" rendering, not an error.
pub fn resolve(
    status: GlobalStatus,
    role: Role,
    quote_accepted: bool,
    date_accepted: bool,
) -> ActionSet {
    let mut set = ActionSet::default();

    if status == GlobalStatus::Rejected {
        if role == Role::Admin {
            set.primary = Some(ActionId::ReopenCase.descriptor());
        }
        return set;
    }

    if role == Role::Coordinator {
        match status {
            GlobalStatus::Draft => {
                set.primary = Some(ActionId::SubmitToMedical.descriptor());
                set.future_steps = DRAFT_FUTURE_STEPS.to_vec();
            }
            GlobalStatus::MedicalMoreInfo => {
                set.primary = Some(ActionId::ResubmitToMedical.descriptor());
            }
            GlobalStatus::CommercialInProgress => {
                // Quote before date; only pending confirmations are offered.
                // Both accepted means no coordinator action here: moving to
                // scheduled is an explicit external step, never automatic.
                let mut pending = Vec::new();
                if !quote_accepted {
                    pending.push(ActionId::ConfirmQuote.descriptor());
                }
                if !date_accepted {
                    pending.push(ActionId::ConfirmDate.descriptor());
                }
                let mut pending = pending.into_iter();
                set.primary = pending.next();
                set.secondary.extend(pending);
            }
            _ => {}
        }
    }

    if (role == Role::Physician || role == Role::Admin) && status == GlobalStatus::MedicalReview {
        set.primary = Some(ActionId::ApproveMedical.descriptor());
        set.secondary.push(ActionId::RequestMoreInfo.descriptor());
        set.secondary.push(ActionId::RejectMedical.descriptor());
    }

    if (role == Role::Partner || role == Role::Admin)
        && status == GlobalStatus::CommercialInProgress
    {
        set.secondary.push(ActionId::AddBudget.descriptor());
        set.secondary.push(ActionId::ProposeDates.descriptor());
    }

    set
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(actions: &[ActionDescriptor]) -> Vec<ActionId> {
        actions.iter().map(|a| a.id).collect()
    }

    #[test]
    fn rejected_only_admin_can_reopen() {
        let set = resolve(GlobalStatus::Rejected, Role::Admin, false, false);
        assert_eq!(set.primary.as_ref().map(|a| a.id), Some(ActionId::ReopenCase));
        assert!(set.secondary.is_empty());
        assert!(set.future_steps.is_empty());

        for role in [Role::Coordinator, Role::Partner, Role::Physician] {
            let set = resolve(GlobalStatus::Rejected, role, false, false);
            assert!(set.is_empty(), "role {role} must get nothing on rejected");
        }
    }

    #[test]
    fn rejected_short_circuits_other_rules() {
        // Even the admin gets nothing but reopen, whatever the flags say.
        let set = resolve(GlobalStatus::Rejected, Role::Admin, true, true);
        assert_eq!(ids(&set.secondary), vec![]);
        assert_eq!(set.primary.as_ref().map(|a| a.id), Some(ActionId::ReopenCase));
    }

    #[test]
    fn coordinator_draft_submits_with_three_future_steps() {
        let set = resolve(GlobalStatus::Draft, Role::Coordinator, false, false);
        assert_eq!(
            set.primary.as_ref().map(|a| a.id),
            Some(ActionId::SubmitToMedical)
        );
        assert!(set.secondary.is_empty());
        let labels: Vec<_> = set.future_steps.iter().map(|s| s.label).collect();
        assert_eq!(
            labels,
            vec![
                "Validation médicale",
                "Proposition commerciale",
                "Confirmation"
            ]
        );
    }

    #[test]
    fn coordinator_more_info_resubmits() {
        let set = resolve(GlobalStatus::MedicalMoreInfo, Role::Coordinator, false, false);
        assert_eq!(
            set.primary.as_ref().map(|a| a.id),
            Some(ActionId::ResubmitToMedical)
        );
        assert!(set.secondary.is_empty());
        assert!(set.future_steps.is_empty());
    }

    #[test]
    fn coordinator_commercial_quote_before_date() {
        let set = resolve(
            GlobalStatus::CommercialInProgress,
            Role::Coordinator,
            false,
            false,
        );
        assert_eq!(set.primary.as_ref().map(|a| a.id), Some(ActionId::ConfirmQuote));
        assert_eq!(ids(&set.secondary), vec![ActionId::ConfirmDate]);
    }

    #[test]
    fn coordinator_commercial_quote_done_promotes_date() {
        let set = resolve(
            GlobalStatus::CommercialInProgress,
            Role::Coordinator,
            true,
            false,
        );
        assert_eq!(set.primary.as_ref().map(|a| a.id), Some(ActionId::ConfirmDate));
        assert!(set.secondary.is_empty());
    }

    #[test]
    fn coordinator_commercial_both_accepted_yields_nothing() {
        // Pinned reference behavior: no auto-created finalize action when
        // both confirmations are in.
        let set = resolve(
            GlobalStatus::CommercialInProgress,
            Role::Coordinator,
            true,
            true,
        );
        assert!(set.primary.is_none());
        assert!(set.secondary.is_empty());
        assert!(set.future_steps.is_empty());
    }

    #[test]
    fn physician_review_order_is_fixed() {
        let set = resolve(GlobalStatus::MedicalReview, Role::Physician, false, false);
        assert_eq!(
            set.primary.as_ref().map(|a| a.id),
            Some(ActionId::ApproveMedical)
        );
        assert_eq!(
            ids(&set.secondary),
            vec![ActionId::RequestMoreInfo, ActionId::RejectMedical]
        );
    }

    #[test]
    fn admin_gets_physician_actions_on_review() {
        let set = resolve(GlobalStatus::MedicalReview, Role::Admin, false, false);
        assert_eq!(
            set.primary.as_ref().map(|a| a.id),
            Some(ActionId::ApproveMedical)
        );
        assert_eq!(
            ids(&set.secondary),
            vec![ActionId::RequestMoreInfo, ActionId::RejectMedical]
        );
    }

    #[test]
    fn partner_commercial_secondary_only() {
        let set = resolve(GlobalStatus::CommercialInProgress, Role::Partner, false, false);
        assert!(set.primary.is_none());
        assert_eq!(
            ids(&set.secondary),
            vec![ActionId::AddBudget, ActionId::ProposeDates]
        );
    }

    #[test]
    fn admin_commercial_accumulates_only_partner_rule() {
        // Rules 2 and 3 need other statuses; the admin gets the partner's
        // two secondaries and no primary.
        let set = resolve(GlobalStatus::CommercialInProgress, Role::Admin, false, false);
        assert!(set.primary.is_none());
        assert_eq!(
            ids(&set.secondary),
            vec![ActionId::AddBudget, ActionId::ProposeDates]
        );
    }

    #[test]
    fn unmatched_tuples_are_empty_not_errors() {
        for (status, role) in [
            (GlobalStatus::Scheduled, Role::Coordinator),
            (GlobalStatus::Draft, Role::Physician),
            (GlobalStatus::Draft, Role::Partner),
            (GlobalStatus::MedicalReview, Role::Coordinator),
            (GlobalStatus::Scheduled, Role::Admin),
        ] {
            assert!(resolve(status, role, false, false).is_empty());
        }
    }

    #[test]
    fn reject_medical_is_the_danger_variant() {
        let set = resolve(GlobalStatus::MedicalReview, Role::Physician, false, false);
        let reject = set.get(ActionId::RejectMedical).unwrap();
        assert_eq!(reject.variant, ActionVariant::Danger);
        assert_eq!(reject.target, ActionTarget::Status(GlobalStatus::Rejected));
        assert!(reject.inputs.iter().any(|i| i.required));
    }

    #[test]
    fn approve_medical_declares_surgeons_required() {
        let d = ActionId::ApproveMedical.descriptor();
        assert_eq!(d.inputs[0].kind, InputKind::Surgeons);
        assert!(d.inputs[0].required);
        assert_eq!(d.inputs[1].kind, InputKind::Message);
        assert!(!d.inputs[1].required);
    }

    #[test]
    fn resolve_is_structurally_idempotent() {
        let a = resolve(GlobalStatus::MedicalReview, Role::Admin, false, true);
        let b = resolve(GlobalStatus::MedicalReview, Role::Admin, false, true);
        assert_eq!(a, b);
    }

    #[test]
    fn action_set_serializes_for_the_wire() {
        let set = resolve(GlobalStatus::Draft, Role::Coordinator, false, false);
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["primary"]["id"], "submit_to_medical");
        assert_eq!(json["future_steps"].as_array().unwrap().len(), 3);
    }
}
