//! Contract error types for the supervisor validation workflow
//!
//! These errors are transport-agnostic and used for inter-module communication.

use uuid::Uuid;

/// Supervisor validation domain errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Validation, item or inspection not found
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Resource type (validation, validation_item, inspection)
        resource: &'static str,
        /// Resource identifier
        id: Uuid,
    },
    /// The user's role or assignment does not allow the operation
    #[error("Forbidden: {reason}")]
    Forbidden { reason: String },
    /// Completion attempted while items are still undecided
    #[error("Validation {validation_id} still has {pending} pending item(s)")]
    PendingItems { validation_id: Uuid, pending: usize },
    /// The validation already reached approved or rejected
    #[error("Validation {validation_id} is already completed")]
    AlreadyCompleted { validation_id: Uuid },
    /// Item decisions kept changing while the validation was being completed
    #[error("Decisions on validation {validation_id} changed during completion")]
    DecisionsChanged { validation_id: Uuid },
    /// Inspection is not in a state that allows the requested transition
    #[error("Inspection {inspection_id} cannot move from '{from}' to '{to}'")]
    InvalidTransition {
        inspection_id: Uuid,
        from: String,
        to: String,
    },
    /// Request validation error
    #[error("Validation error: {message}")]
    Validation { message: String },
    /// Internal error
    #[error("Internal error")]
    Internal,
}

impl ValidationError {
    pub fn not_found(resource: &'static str, id: Uuid) -> Self {
        Self::NotFound { resource, id }
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
