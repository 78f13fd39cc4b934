use crate::types::{ActionId, GlobalStatus, Role};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaseError {
    #[error("not initialized: run 'parcours init'")]
    NotInitialized,

    #[error("case not found: {0}")]
    CaseNotFound(String),

    #[error("case already exists: {0}")]
    CaseExists(String),

    #[error("invalid slug '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidSlug(String),

    #[error("invalid role: {0}")]
    InvalidRole(String),

    #[error("invalid status: {0}")]
    InvalidStatus(String),

    #[error("invalid action: {0}")]
    InvalidAction(String),

    #[error("invalid message topic: {0}")]
    InvalidTopic(String),

    #[error("action '{action}' is not available for role '{role}' in status '{status}'")]
    ActionNotAvailable {
        action: ActionId,
        role: Role,
        status: GlobalStatus,
    },

    #[error("role '{role}' is not allowed to perform '{action}'")]
    PermissionDenied { role: Role, action: ActionId },

    #[error("missing required input: {0}")]
    MissingInput(String),

    #[error("invalid surgeon selection: {0}")]
    InvalidSurgeons(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, CaseError>;
