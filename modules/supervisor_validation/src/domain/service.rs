//! Domain service - business logic orchestration

use crate::config::Config;
use crate::contract::{
    Capability, CompletionOutcome, CurrentUser, InspectionDetail, InspectionStatus, ItemStatus,
    NavEntry, Notification, Role, SupervisorValidation, ValidationDetail, ValidationError,
    ValidationItem, ValidationItemView, ValidationListQuery, ValidationSummary,
};
use super::capabilities;
use super::events::{EventPublisher, ValidationEvent};
use super::repository::{
    CompletionRecord, CompletionWrite, InspectionRepository, ItemWrite, SubmissionRecord,
    SubmissionWrite, SummaryFilter, ValidationRepository,
};
use super::rules;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Completion re-reads the items this many times when decisions change underneath it
const COMPLETION_ATTEMPTS: usize = 3;

/// Domain service for supervisor validations
pub struct Service {
    validations: Arc<dyn ValidationRepository>,
    inspections: Arc<dyn InspectionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    config: Config,
}

impl Service {
    /// Create a new service instance
    pub fn new(
        validations: Arc<dyn ValidationRepository>,
        inspections: Arc<dyn InspectionRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        config: Config,
    ) -> Self {
        Self {
            validations,
            inspections,
            event_publisher,
            config,
        }
    }

    // ===== Validation list and detail =====

    /// List validations visible to the user, newest first
    pub async fn list_validations(
        &self,
        user: &CurrentUser,
        query: &ValidationListQuery,
    ) -> Result<Vec<ValidationSummary>, ValidationError> {
        require(user, Capability::SupervisorValidation)?;

        let filter = SummaryFilter {
            supervisor_id: (user.role == Role::Supervisor).then_some(user.id),
            statuses: query
                .tab
                .map(|tab| tab.statuses().to_vec())
                .unwrap_or_default(),
            search: query
                .search
                .as_deref()
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty()),
        };

        self.validations
            .list_summaries(&filter, self.config.list_limit)
            .await
            .map_err(|e| internal("list validations", e))
    }

    /// Load a validation's checklist and make sure every line has an item
    pub async fn open_validation(
        &self,
        user: &CurrentUser,
        validation_id: Uuid,
    ) -> Result<ValidationDetail, ValidationError> {
        let summary = self.authorized_summary(user, validation_id).await?;
        let inspection_id = summary.validation.inspection_id;
        // A finished validation shows what was decided; lines added later stay out
        let details = if summary.validation.status.is_terminal() {
            self.list_details(inspection_id).await?
        } else {
            self.materialize(validation_id, inspection_id).await?
        };

        let mut by_detail: HashMap<Uuid, ValidationItem> = self
            .validations
            .list_items(validation_id)
            .await
            .map_err(|e| internal("list validation items", e))?
            .into_iter()
            .map(|item| (item.inspection_detail_id, item))
            .collect();

        let items = details
            .into_iter()
            .filter_map(|detail| {
                let item = by_detail.remove(&detail.id);
                if item.is_none() {
                    tracing::warn!(%validation_id, detail_id = %detail.id, "checklist line has no validation item");
                }
                item.map(|item| ValidationItemView { item, detail })
            })
            .collect();

        Ok(ValidationDetail { summary, items })
    }

    // ===== Item decisions =====

    pub async fn approve_item(
        &self,
        user: &CurrentUser,
        item_id: Uuid,
    ) -> Result<ValidationItem, ValidationError> {
        self.decide(user, item_id, ItemStatus::Approved, None).await
    }

    /// Reject an item with a mandatory comment
    pub async fn reject_item(
        &self,
        user: &CurrentUser,
        item_id: Uuid,
        comment: &str,
    ) -> Result<ValidationItem, ValidationError> {
        let comment = rules::normalize_rejection_comment(comment)?;
        self.decide(user, item_id, ItemStatus::Rejected, Some(comment))
            .await
    }

    /// Approve every item of the validation that is still pending
    pub async fn approve_all_pending(
        &self,
        user: &CurrentUser,
        validation_id: Uuid,
    ) -> Result<u64, ValidationError> {
        let summary = self.authorized_summary(user, validation_id).await?;
        ensure_open(&summary.validation)?;

        let changed = match self
            .validations
            .approve_pending(validation_id)
            .await
            .map_err(|e| internal("approve pending items", e))?
        {
            ItemWrite::Applied(changed) => changed,
            ItemWrite::Missing => {
                return Err(ValidationError::not_found("validation", validation_id))
            }
            ItemWrite::Closed => return Err(ValidationError::AlreadyCompleted { validation_id }),
        };

        tracing::info!(%validation_id, changed, user_id = %user.id, "approved all pending items");
        self.publish(ValidationEvent::item_decided(
            validation_id,
            None,
            ItemStatus::Approved.as_str(),
            user.id,
        ))
        .await;

        Ok(changed)
    }

    // ===== Lifecycle =====

    /// Finalize a validation once every item is decided
    pub async fn complete_validation(
        &self,
        user: &CurrentUser,
        validation_id: Uuid,
    ) -> Result<CompletionOutcome, ValidationError> {
        let summary = self.authorized_summary(user, validation_id).await?;
        ensure_open(&summary.validation)?;
        let inspection_id = summary.validation.inspection_id;

        // Lines never opened count as pending
        self.materialize(validation_id, inspection_id).await?;

        let mut attempt = 0;
        let (verdict, completed_at) = loop {
            attempt += 1;
            let items = self
                .validations
                .list_items(validation_id)
                .await
                .map_err(|e| internal("list validation items", e))?;
            let verdict = rules::decide_verdict(validation_id, &items)?;

            let completed_at = chrono::Utc::now();
            let record = CompletionRecord {
                validation_id,
                inspection_id,
                rejected_items: verdict.rejected,
                validation_status: verdict.validation_status,
                inspection_status: verdict.inspection_status,
                completed_at,
                changed_by: user.id,
                history_comment: rules::history_comment(&verdict),
                notification: rules::completion_notification(
                    &verdict,
                    summary.inspector_id,
                    summary.franchise_id,
                ),
            };

            match self
                .validations
                .complete(&record)
                .await
                .map_err(|e| internal("complete validation", e))?
            {
                CompletionWrite::Committed => break (verdict, completed_at),
                CompletionWrite::DecisionsChanged if attempt < COMPLETION_ATTEMPTS => {
                    tracing::debug!(%validation_id, attempt, "item decisions changed, re-reading");
                }
                CompletionWrite::DecisionsChanged => {
                    return Err(ValidationError::DecisionsChanged { validation_id })
                }
                CompletionWrite::AlreadyCompleted => {
                    return Err(ValidationError::AlreadyCompleted { validation_id })
                }
                CompletionWrite::PendingItems(pending) => {
                    return Err(ValidationError::PendingItems {
                        validation_id,
                        pending,
                    })
                }
                CompletionWrite::Missing => {
                    return Err(ValidationError::not_found("validation", validation_id))
                }
            }
        };

        tracing::info!(
            %validation_id,
            %inspection_id,
            status = %verdict.validation_status,
            rejected = verdict.rejected,
            user_id = %user.id,
            "validation completed"
        );
        self.publish(ValidationEvent::completed(
            validation_id,
            inspection_id,
            verdict.validation_status.as_str(),
            verdict.rejected,
            user.id,
        ))
        .await;

        Ok(CompletionOutcome {
            validation_id,
            inspection_id,
            validation_status: verdict.validation_status,
            inspection_status: verdict.inspection_status,
            completed_at,
            approved_items: verdict.approved,
            rejected_items: verdict.rejected,
        })
    }

    /// Move an inspection to awaiting_validation under a supervisor
    pub async fn submit_for_validation(
        &self,
        user: &CurrentUser,
        inspection_id: Uuid,
        supervisor_id: Uuid,
    ) -> Result<SupervisorValidation, ValidationError> {
        require(user, Capability::SubmitForValidation)?;

        let inspection = self
            .inspections
            .find_inspection(inspection_id)
            .await
            .map_err(|e| internal("find inspection", e))?
            .ok_or_else(|| ValidationError::not_found("inspection", inspection_id))?;

        if user.role == Role::Inspector && inspection.inspector_id != Some(user.id) {
            return Err(ValidationError::forbidden(
                "inspectors may only submit their own inspections",
            ));
        }
        if !rules::can_submit(inspection.status) {
            return Err(awaiting_transition(inspection_id, inspection.status));
        }

        let detail_ids = if self.config.materialize_on_submit {
            self.list_details(inspection_id)
                .await?
                .into_iter()
                .map(|d| d.id)
                .collect()
        } else {
            Vec::new()
        };

        let record = SubmissionRecord {
            inspection_id,
            supervisor_id,
            submitted_by: user.id,
            allowed_from: rules::SUBMITTABLE_FROM.to_vec(),
            detail_ids,
            notification: rules::request_notification(supervisor_id, inspection.franchise_id),
            submitted_at: chrono::Utc::now(),
        };

        let validation = match self
            .inspections
            .submit(&record)
            .await
            .map_err(|e| internal("submit inspection", e))?
        {
            SubmissionWrite::Created(validation) => validation,
            SubmissionWrite::InvalidState(status) => {
                return Err(awaiting_transition(inspection_id, status))
            }
            SubmissionWrite::Missing => {
                return Err(ValidationError::not_found("inspection", inspection_id))
            }
        };

        tracing::info!(
            validation_id = %validation.id,
            %inspection_id,
            %supervisor_id,
            user_id = %user.id,
            "inspection submitted for validation"
        );
        self.publish(ValidationEvent::requested(
            validation.id,
            inspection_id,
            supervisor_id,
            user.id,
        ))
        .await;

        Ok(validation)
    }

    // ===== Dashboard =====

    /// Sidebar entries for the user's role
    pub fn navigation(&self, user: &CurrentUser) -> Vec<NavEntry> {
        capabilities::navigation(user.role)
    }

    /// Notifications addressed to the user, newest first
    pub async fn notifications(
        &self,
        user: &CurrentUser,
    ) -> Result<Vec<Notification>, ValidationError> {
        require(user, Capability::Dashboard)?;
        self.validations
            .list_notifications(user.id)
            .await
            .map_err(|e| internal("list notifications", e))
    }

    // ===== Helper Methods =====

    /// Find the validation and check the user may act on it
    async fn authorized_summary(
        &self,
        user: &CurrentUser,
        validation_id: Uuid,
    ) -> Result<ValidationSummary, ValidationError> {
        require(user, Capability::SupervisorValidation)?;

        let summary = self
            .validations
            .find_summary(validation_id)
            .await
            .map_err(|e| internal("find validation", e))?
            .ok_or_else(|| ValidationError::not_found("validation", validation_id))?;

        if user.role == Role::Supervisor && summary.validation.supervisor_id != user.id {
            return Err(ValidationError::forbidden(
                "validation is assigned to another supervisor",
            ));
        }
        Ok(summary)
    }

    async fn list_details(
        &self,
        inspection_id: Uuid,
    ) -> Result<Vec<InspectionDetail>, ValidationError> {
        self.inspections
            .list_details(inspection_id)
            .await
            .map_err(|e| internal("list inspection details", e))
    }

    /// Ensure one item per checklist line; returns the ordered checklist
    async fn materialize(
        &self,
        validation_id: Uuid,
        inspection_id: Uuid,
    ) -> Result<Vec<InspectionDetail>, ValidationError> {
        let details = self.list_details(inspection_id).await?;
        if details.is_empty() {
            return Ok(details);
        }

        let detail_ids: Vec<Uuid> = details.iter().map(|d| d.id).collect();
        let created = self
            .validations
            .ensure_items(validation_id, &detail_ids)
            .await
            .map_err(|e| internal("create validation items", e))?;
        if created > 0 {
            tracing::debug!(%validation_id, created, "validation items created");
        }
        Ok(details)
    }

    async fn decide(
        &self,
        user: &CurrentUser,
        item_id: Uuid,
        status: ItemStatus,
        comment: Option<String>,
    ) -> Result<ValidationItem, ValidationError> {
        let item = self
            .validations
            .find_item(item_id)
            .await
            .map_err(|e| internal("find validation item", e))?
            .ok_or_else(|| ValidationError::not_found("validation_item", item_id))?;

        let summary = self.authorized_summary(user, item.validation_id).await?;
        ensure_open(&summary.validation)?;

        let updated = match self
            .validations
            .update_item(item_id, status, comment)
            .await
            .map_err(|e| internal("update validation item", e))?
        {
            ItemWrite::Applied(item) => item,
            ItemWrite::Missing => return Err(ValidationError::not_found("validation_item", item_id)),
            ItemWrite::Closed => {
                return Err(ValidationError::AlreadyCompleted {
                    validation_id: item.validation_id,
                })
            }
        };

        tracing::info!(
            validation_id = %updated.validation_id,
            %item_id,
            status = %status,
            user_id = %user.id,
            "validation item decided"
        );
        self.publish(ValidationEvent::item_decided(
            updated.validation_id,
            Some(item_id),
            status.as_str(),
            user.id,
        ))
        .await;

        Ok(updated)
    }

    async fn publish(&self, event: ValidationEvent) {
        if let Err(e) = self.event_publisher.publish(event).await {
            tracing::warn!(error = %e, "failed to publish validation event");
        }
    }
}

fn require(user: &CurrentUser, capability: Capability) -> Result<(), ValidationError> {
    if capabilities::can(user.role, capability) {
        Ok(())
    } else {
        Err(ValidationError::forbidden(format!(
            "role '{}' lacks capability '{}'",
            user.role, capability
        )))
    }
}

fn ensure_open(validation: &SupervisorValidation) -> Result<(), ValidationError> {
    if validation.status.is_terminal() {
        return Err(ValidationError::AlreadyCompleted {
            validation_id: validation.id,
        });
    }
    Ok(())
}

fn awaiting_transition(inspection_id: Uuid, from: InspectionStatus) -> ValidationError {
    ValidationError::InvalidTransition {
        inspection_id,
        from: from.to_string(),
        to: InspectionStatus::AwaitingValidation.to_string(),
    }
}

/// Log a data-access failure and hide it behind `Internal`
fn internal(operation: &'static str, error: anyhow::Error) -> ValidationError {
    tracing::error!(operation, error = ?error, "data access failed");
    ValidationError::Internal
}
