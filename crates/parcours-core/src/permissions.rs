use crate::types::{ActionId, Role};
use serde::{Deserialize, Serialize};

/// Capabilities the transition endpoint checks before executing an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    CreateCase,
    ValidateMedical,
    EditQuote,
    ScheduleSurgery,
    ViewAll,
    Admin,
}

/// Static grant table. Coordinator and partner share the commercial
/// capabilities; only the physician (and the admin) validates medically.
pub fn grants(role: Role) -> &'static [Permission] {
    match role {
        Role::Coordinator | Role::Partner => &[
            Permission::CreateCase,
            Permission::EditQuote,
            Permission::ScheduleSurgery,
            Permission::ViewAll,
        ],
        Role::Physician => &[Permission::ValidateMedical, Permission::ViewAll],
        Role::Admin => &[
            Permission::CreateCase,
            Permission::ValidateMedical,
            Permission::EditQuote,
            Permission::ScheduleSurgery,
            Permission::ViewAll,
            Permission::Admin,
        ],
    }
}

pub fn can(role: Role, permission: Permission) -> bool {
    grants(role).contains(&permission)
}

/// Permission an action requires, if any. Case submissions are ungated: any
/// role that is offered the action may trigger it.
pub fn required_permission(action: ActionId) -> Option<Permission> {
    match action {
        ActionId::ApproveMedical | ActionId::RequestMoreInfo | ActionId::RejectMedical => {
            Some(Permission::ValidateMedical)
        }
        ActionId::ConfirmQuote | ActionId::AddBudget => Some(Permission::EditQuote),
        ActionId::ConfirmDate | ActionId::ProposeDates => Some(Permission::ScheduleSurgery),
        ActionId::ReopenCase => Some(Permission::Admin),
        ActionId::SubmitToMedical | ActionId::ResubmitToMedical => None,
    }
}
