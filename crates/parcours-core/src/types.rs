use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed roster of surgeons offered when a physician validates a case.
/// Ordering is the presentation order.
pub const SURGEONS: [&str; 5] = [
    "Doan Co-Minh",
    "Simon Teyssedou",
    "Jean-Patrick Rakover",
    "David Brauge",
    "Robin Arvieu",
];

// ---------------------------------------------------------------------------
// GlobalStatus
// ---------------------------------------------------------------------------

/// Canonical workflow stage of a case. All decisioning runs on this closed
/// set; the raw status rows from storage are mapped onto it by
/// [`crate::record::normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlobalStatus {
    Draft,
    MedicalReview,
    MedicalMoreInfo,
    CommercialInProgress,
    Scheduled,
    Rejected,
}

impl GlobalStatus {
    pub fn all() -> &'static [GlobalStatus] {
        &[
            GlobalStatus::Draft,
            GlobalStatus::MedicalReview,
            GlobalStatus::MedicalMoreInfo,
            GlobalStatus::CommercialInProgress,
            GlobalStatus::Scheduled,
            GlobalStatus::Rejected,
        ]
    }

    /// Position on the progress timeline. `Rejected` is a terminal state
    /// outside the progression and has no index.
    pub fn timeline_index(self) -> Option<usize> {
        match self {
            GlobalStatus::Draft => Some(0),
            GlobalStatus::MedicalReview => Some(1),
            GlobalStatus::MedicalMoreInfo => Some(2),
            GlobalStatus::CommercialInProgress => Some(3),
            GlobalStatus::Scheduled => Some(4),
            GlobalStatus::Rejected => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GlobalStatus::Draft => "draft",
            GlobalStatus::MedicalReview => "medical_review",
            GlobalStatus::MedicalMoreInfo => "medical_more_info",
            GlobalStatus::CommercialInProgress => "commercial_in_progress",
            GlobalStatus::Scheduled => "scheduled",
            GlobalStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for GlobalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GlobalStatus {
    type Err = crate::error::CaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(GlobalStatus::Draft),
            "medical_review" => Ok(GlobalStatus::MedicalReview),
            "medical_more_info" => Ok(GlobalStatus::MedicalMoreInfo),
            "commercial_in_progress" => Ok(GlobalStatus::CommercialInProgress),
            "scheduled" => Ok(GlobalStatus::Scheduled),
            "rejected" => Ok(GlobalStatus::Rejected),
            _ => Err(crate::error::CaseError::InvalidStatus(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Who is looking at a case. Exactly one role per session.
///
/// Wire names are the historical account names of the original deployment
/// ("marcel" coordinates, "franchir" is the local partner, "gilles" is the
/// reviewing physician); `FromStr` also accepts the role words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "marcel", alias = "coordinator")]
    Coordinator,
    #[serde(rename = "franchir", alias = "partner")]
    Partner,
    #[serde(rename = "gilles", alias = "physician")]
    Physician,
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    pub fn all() -> &'static [Role] {
        &[Role::Coordinator, Role::Partner, Role::Physician, Role::Admin]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Coordinator => "marcel",
            Role::Partner => "franchir",
            Role::Physician => "gilles",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = crate::error::CaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "marcel" | "coordinator" => Ok(Role::Coordinator),
            "franchir" | "partner" => Ok(Role::Partner),
            "gilles" | "physician" => Ok(Role::Physician),
            "admin" => Ok(Role::Admin),
            _ => Err(crate::error::CaseError::InvalidRole(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// ActionId
// ---------------------------------------------------------------------------

/// Closed set of user-triggerable transitions. Every id maps 1:1 to a
/// transition handled by [`crate::engine::apply_action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionId {
    SubmitToMedical,
    ResubmitToMedical,
    ApproveMedical,
    RequestMoreInfo,
    RejectMedical,
    ConfirmQuote,
    ConfirmDate,
    ReopenCase,
    AddBudget,
    ProposeDates,
}

impl ActionId {
    pub fn all() -> &'static [ActionId] {
        &[
            ActionId::SubmitToMedical,
            ActionId::ResubmitToMedical,
            ActionId::ApproveMedical,
            ActionId::RequestMoreInfo,
            ActionId::RejectMedical,
            ActionId::ConfirmQuote,
            ActionId::ConfirmDate,
            ActionId::ReopenCase,
            ActionId::AddBudget,
            ActionId::ProposeDates,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActionId::SubmitToMedical => "submit_to_medical",
            ActionId::ResubmitToMedical => "resubmit_to_medical",
            ActionId::ApproveMedical => "approve_medical",
            ActionId::RequestMoreInfo => "request_more_info",
            ActionId::RejectMedical => "reject_medical",
            ActionId::ConfirmQuote => "confirm_quote",
            ActionId::ConfirmDate => "confirm_date",
            ActionId::ReopenCase => "reopen_case",
            ActionId::AddBudget => "add_budget",
            ActionId::ProposeDates => "propose_dates",
        }
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActionId {
    type Err = crate::error::CaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionId::all()
            .iter()
            .find(|a| a.as_str() == s)
            .copied()
            .ok_or_else(|| crate::error::CaseError::InvalidAction(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// InputKind
// ---------------------------------------------------------------------------

/// Typed input field an action can ask the user for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Surgeons,
    Message,
    Justification,
    Budget,
    Dates,
}

impl InputKind {
    pub fn as_str(self) -> &'static str {
        match self {
            InputKind::Surgeons => "surgeons",
            InputKind::Message => "message",
            InputKind::Justification => "justification",
            InputKind::Budget => "budget",
            InputKind::Dates => "dates",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MessageTopic
// ---------------------------------------------------------------------------

/// Which tab of the case thread a message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageTopic {
    Medical,
    Commercial,
    System,
}

impl MessageTopic {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageTopic::Medical => "medical",
            MessageTopic::Commercial => "commercial",
            MessageTopic::System => "system",
        }
    }
}

impl fmt::Display for MessageTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MessageTopic {
    type Err = crate::error::CaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "medical" => Ok(MessageTopic::Medical),
            "commercial" => Ok(MessageTopic::Commercial),
            "system" => Ok(MessageTopic::System),
            _ => Err(crate::error::CaseError::InvalidTopic(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
