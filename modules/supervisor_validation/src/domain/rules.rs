//! Decision rules of the validation workflow

use crate::contract::{
    InspectionStatus, ItemStatus, NewNotification, NotificationType, ValidationError,
    ValidationItem, ValidationStatus,
};
use uuid::Uuid;

/// Statuses from which an inspection may be handed to a supervisor
pub const SUBMITTABLE_FROM: [InspectionStatus; 3] = [
    InspectionStatus::Draft,
    InspectionStatus::Submitted,
    InspectionStatus::Rejected,
];

/// Aggregate verdict over a fully decided set of items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub validation_status: ValidationStatus,
    pub inspection_status: InspectionStatus,
    pub approved: usize,
    pub rejected: usize,
}

impl Verdict {
    pub fn is_rejected(&self) -> bool {
        self.validation_status == ValidationStatus::Rejected
    }
}

/// Trim a rejection comment; blank comments are refused
pub fn normalize_rejection_comment(comment: &str) -> Result<String, ValidationError> {
    let trimmed = comment.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::validation(
            "a rejected item requires a comment",
        ));
    }
    Ok(trimmed.to_string())
}

/// Rejected iff at least one item is rejected; fails while any item is pending
pub fn decide_verdict(
    validation_id: Uuid,
    items: &[ValidationItem],
) -> Result<Verdict, ValidationError> {
    let pending = items
        .iter()
        .filter(|i| i.status == ItemStatus::Pending)
        .count();
    if pending > 0 {
        return Err(ValidationError::PendingItems {
            validation_id,
            pending,
        });
    }

    let rejected = items
        .iter()
        .filter(|i| i.status == ItemStatus::Rejected)
        .count();
    let approved = items.len() - rejected;

    Ok(if rejected > 0 {
        Verdict {
            validation_status: ValidationStatus::Rejected,
            inspection_status: InspectionStatus::Rejected,
            approved,
            rejected,
        }
    } else {
        Verdict {
            validation_status: ValidationStatus::Approved,
            inspection_status: InspectionStatus::Validated,
            approved,
            rejected,
        }
    })
}

/// Notification sent to the inspector once their inspection was reviewed
pub fn completion_notification(
    verdict: &Verdict,
    inspector_id: Option<Uuid>,
    franchise_id: Option<Uuid>,
) -> NewNotification {
    let (title, content, r#type) = if verdict.is_rejected() {
        (
            "Inspection rejetée",
            "Votre inspection a été rejetée par un superviseur. Veuillez consulter les commentaires.",
            NotificationType::InspectionRejected,
        )
    } else {
        (
            "Inspection validée",
            "Votre inspection a été validée par un superviseur.",
            NotificationType::InspectionValidated,
        )
    };

    NewNotification {
        title: title.to_string(),
        content: content.to_string(),
        r#type,
        target_user_id: inspector_id,
        franchise_id,
    }
}

/// Notification sent to the supervisor a new inspection was assigned to
pub fn request_notification(supervisor_id: Uuid, franchise_id: Option<Uuid>) -> NewNotification {
    NewNotification {
        title: "Inspection à valider".to_string(),
        content: "Une nouvelle inspection est en attente de votre validation.".to_string(),
        r#type: NotificationType::ValidationRequested,
        target_user_id: Some(supervisor_id),
        franchise_id,
    }
}

/// History comment recorded alongside the inspection status change
pub fn history_comment(verdict: &Verdict) -> Option<String> {
    verdict
        .is_rejected()
        .then(|| format!("{} élément(s) rejeté(s) par le superviseur", verdict.rejected))
}

pub fn can_submit(status: InspectionStatus) -> bool {
    SUBMITTABLE_FROM.contains(&status)
}
