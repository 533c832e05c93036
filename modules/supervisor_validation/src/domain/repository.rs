//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs

use crate::contract::{
    Inspection, InspectionDetail, InspectionStatus, ItemStatus, NewNotification, Notification,
    SupervisorValidation, ValidationItem, ValidationStatus, ValidationSummary,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Which validations a list query returns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryFilter {
    pub supervisor_id: Option<Uuid>,
    /// Empty keeps every status
    pub statuses: Vec<ValidationStatus>,
    /// Lowercased, trimmed needle matched against brand, model, plate and franchise name
    pub search: Option<String>,
}

/// What an item decision found when it ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemWrite<T> {
    Applied(T),
    /// The item or its validation does not exist
    Missing,
    /// The validation was already approved or rejected
    Closed,
}

/// Writes that finalize a validation, applied in one transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRecord {
    pub validation_id: Uuid,
    pub inspection_id: Uuid,
    /// Rejected items the verdict was computed from; re-checked inside the transaction
    pub rejected_items: usize,
    pub validation_status: ValidationStatus,
    pub inspection_status: InspectionStatus,
    pub completed_at: DateTime<Utc>,
    pub changed_by: Uuid,
    pub history_comment: Option<String>,
    pub notification: NewNotification,
}

/// What the completion transaction observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionWrite {
    Committed,
    /// The validation was no longer pending when the transaction ran
    AlreadyCompleted,
    /// Items were still pending when the transaction ran
    PendingItems(usize),
    /// The rejected count differs from the one the verdict was computed from
    DecisionsChanged,
    /// The validation disappeared
    Missing,
}

/// Writes that hand an inspection to a supervisor, applied in one transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRecord {
    pub inspection_id: Uuid,
    pub supervisor_id: Uuid,
    pub submitted_by: Uuid,
    /// The inspection must be in one of these statuses for the submission to apply
    pub allowed_from: Vec<InspectionStatus>,
    /// Checklist lines to materialize as pending items; empty skips materialization
    pub detail_ids: Vec<Uuid>,
    pub notification: NewNotification,
    pub submitted_at: DateTime<Utc>,
}

/// What the submission transaction observed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionWrite {
    Created(SupervisorValidation),
    /// The inspection's status did not allow submission
    InvalidState(InspectionStatus),
    /// The inspection disappeared
    Missing,
}

/// Repository for inspections and their checklists
#[async_trait]
pub trait InspectionRepository: Send + Sync {
    /// Find an inspection by id
    async fn find_inspection(&self, inspection_id: Uuid) -> Result<Option<Inspection>>;

    /// Checklist lines of an inspection ordered by (section, item)
    async fn list_details(&self, inspection_id: Uuid) -> Result<Vec<InspectionDetail>>;

    /// Move an inspection to awaiting_validation and open a pending validation
    async fn submit(&self, record: &SubmissionRecord) -> Result<SubmissionWrite>;
}

/// Repository for validations and their items
#[async_trait]
pub trait ValidationRepository: Send + Sync {
    /// Validations matching the filter joined with display context, newest first.
    /// The limit applies after filtering.
    async fn list_summaries(
        &self,
        filter: &SummaryFilter,
        limit: u64,
    ) -> Result<Vec<ValidationSummary>>;

    /// One validation joined with display context
    async fn find_summary(&self, validation_id: Uuid) -> Result<Option<ValidationSummary>>;

    async fn list_items(&self, validation_id: Uuid) -> Result<Vec<ValidationItem>>;

    async fn find_item(&self, item_id: Uuid) -> Result<Option<ValidationItem>>;

    /// Create a pending item for every detail that has none yet.
    /// Keyed on (validation_id, inspection_detail_id); returns the number created.
    async fn ensure_items(&self, validation_id: Uuid, detail_ids: &[Uuid]) -> Result<u64>;

    /// Overwrite an item's decision while its validation is still open
    async fn update_item(
        &self,
        item_id: Uuid,
        status: ItemStatus,
        comment: Option<String>,
    ) -> Result<ItemWrite<ValidationItem>>;

    /// Approve every pending item of an open validation; applies the number changed
    async fn approve_pending(&self, validation_id: Uuid) -> Result<ItemWrite<u64>>;

    /// Finalize a validation, its inspection and the inspector notification together
    async fn complete(&self, record: &CompletionRecord) -> Result<CompletionWrite>;

    /// Notifications addressed to a user, newest first
    async fn list_notifications(&self, target_user_id: Uuid) -> Result<Vec<Notification>>;
}
