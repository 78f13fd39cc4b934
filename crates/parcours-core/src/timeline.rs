use crate::types::GlobalStatus;
use serde::Serialize;

/// The five timeline stations, in progress order, with their display labels.
const STEPS: [(GlobalStatus, &str); 5] = [
    (GlobalStatus::Draft, "Brouillon"),
    (GlobalStatus::MedicalReview, "Revue médicale"),
    (GlobalStatus::MedicalMoreInfo, "À compléter"),
    (GlobalStatus::CommercialInProgress, "Commercial"),
    (GlobalStatus::Scheduled, "Programmé"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    Completed,
    Active,
    Upcoming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelineStep {
    pub status: GlobalStatus,
    pub label: &'static str,
    pub state: StepState,
}

/// Progress-timeline rendering input. A rejected case gets a banner instead
/// of the step row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Timeline {
    Rejected,
    InProgress { steps: Vec<TimelineStep> },
}

/// Compute the timeline for the current canonical status.
pub fn timeline(current: GlobalStatus) -> Timeline {
    let Some(current_index) = current.timeline_index() else {
        return Timeline::Rejected;
    };

    let steps = STEPS
        .iter()
        .enumerate()
        .map(|(index, &(status, label))| {
            let state = if status == current {
                StepState::Active
            } else if index < current_index {
                StepState::Completed
            } else {
                StepState::Upcoming
            };
            TimelineStep {
                status,
                label,
                state,
            }
        })
        .collect();

    Timeline::InProgress { steps }
}
