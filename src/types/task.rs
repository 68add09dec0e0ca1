use std::fmt;

use serde::{Deserialize, Serialize};

use super::Reference;
use crate::error::{Result, SolidFhirError};

/// A FHIR STU3 task, reduced to the fields exchanged with a Solid pod.
///
/// Instances are only ever built from a subject resource that carries all
/// three required statements (identifier, status, definitionReference);
/// there is no partially populated form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Logical id, copied verbatim from the identifier statement.
    pub id: String,
    /// Who the task is for. Supplied by the caller, never read from the graph.
    pub r#for: Reference,
    /// What to perform, as an `ActivityDefinition/...` reference.
    pub definition: Reference,
    /// Current lifecycle state.
    pub status: TaskStatus,
}

/// FHIR STU3 task status codes.
///
/// This is a closed value set: [`TaskStatus::from_code`] fails on anything
/// outside it rather than defaulting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Draft,
    Requested,
    Received,
    Accepted,
    Rejected,
    Ready,
    Cancelled,
    InProgress,
    OnHold,
    Failed,
    Completed,
    EnteredInError,
}

impl TaskStatus {
    /// Every code in the value set, in definition order.
    pub const ALL: [TaskStatus; 12] = [
        TaskStatus::Draft,
        TaskStatus::Requested,
        TaskStatus::Received,
        TaskStatus::Accepted,
        TaskStatus::Rejected,
        TaskStatus::Ready,
        TaskStatus::Cancelled,
        TaskStatus::InProgress,
        TaskStatus::OnHold,
        TaskStatus::Failed,
        TaskStatus::Completed,
        TaskStatus::EnteredInError,
    ];

    /// The wire code for this status, e.g. `in-progress`.
    pub const fn as_code(self) -> &'static str {
        match self {
            TaskStatus::Draft => "draft",
            TaskStatus::Requested => "requested",
            TaskStatus::Received => "received",
            TaskStatus::Accepted => "accepted",
            TaskStatus::Rejected => "rejected",
            TaskStatus::Ready => "ready",
            TaskStatus::Cancelled => "cancelled",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::OnHold => "on-hold",
            TaskStatus::Failed => "failed",
            TaskStatus::Completed => "completed",
            TaskStatus::EnteredInError => "entered-in-error",
        }
    }

    /// Resolve a wire code to a status.
    ///
    /// # Errors
    ///
    /// Returns [`SolidFhirError::UnknownStatusCode`] for any string outside
    /// the value set; matching is exact and case-sensitive.
    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "draft" => Ok(TaskStatus::Draft),
            "requested" => Ok(TaskStatus::Requested),
            "received" => Ok(TaskStatus::Received),
            "accepted" => Ok(TaskStatus::Accepted),
            "rejected" => Ok(TaskStatus::Rejected),
            "ready" => Ok(TaskStatus::Ready),
            "cancelled" => Ok(TaskStatus::Cancelled),
            "in-progress" => Ok(TaskStatus::InProgress),
            "on-hold" => Ok(TaskStatus::OnHold),
            "failed" => Ok(TaskStatus::Failed),
            "completed" => Ok(TaskStatus::Completed),
            "entered-in-error" => Ok(TaskStatus::EnteredInError),
            other => Err(SolidFhirError::UnknownStatusCode {
                code: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}
