//! Native client trait for inter-module communication
//!
//! This trait defines the API that other modules use to drive the validation workflow.
//! NO HTTP - direct function calls.

use super::{
    error::ValidationError,
    model::{
        CompletionOutcome, CurrentUser, NavEntry, Notification, Role, SupervisorValidation,
        ValidationDetail, ValidationItem, ValidationListQuery, ValidationSummary,
    },
};
use async_trait::async_trait;
use uuid::Uuid;

/// Supervisor validation API for inter-module communication
#[async_trait]
pub trait SupervisorValidationApi: Send + Sync {
    // ===== Validation list and detail =====

    /// List validations visible to the user, newest first
    async fn list_validations(
        &self,
        user: &CurrentUser,
        query: &ValidationListQuery,
    ) -> Result<Vec<ValidationSummary>, ValidationError>;

    /// Load a validation's checklist, creating its items on first access
    async fn open_validation(
        &self,
        user: &CurrentUser,
        validation_id: Uuid,
    ) -> Result<ValidationDetail, ValidationError>;

    // ===== Item decisions =====

    async fn approve_item(
        &self,
        user: &CurrentUser,
        item_id: Uuid,
    ) -> Result<ValidationItem, ValidationError>;

    /// Reject an item; the comment must not be blank
    async fn reject_item(
        &self,
        user: &CurrentUser,
        item_id: Uuid,
        comment: &str,
    ) -> Result<ValidationItem, ValidationError>;

    /// Approve every item still pending; returns how many changed
    async fn approve_all_pending(
        &self,
        user: &CurrentUser,
        validation_id: Uuid,
    ) -> Result<u64, ValidationError>;

    // ===== Lifecycle =====

    /// Finalize a fully decided validation
    async fn complete_validation(
        &self,
        user: &CurrentUser,
        validation_id: Uuid,
    ) -> Result<CompletionOutcome, ValidationError>;

    /// Hand an inspection to a supervisor for review
    async fn submit_for_validation(
        &self,
        user: &CurrentUser,
        inspection_id: Uuid,
        supervisor_id: Uuid,
    ) -> Result<SupervisorValidation, ValidationError>;

    // ===== Dashboard =====

    /// Navigation entries for a role
    fn navigation(&self, role: Role) -> Vec<NavEntry>;

    /// Notifications addressed to the user, newest first
    async fn notifications(&self, user: &CurrentUser) -> Result<Vec<Notification>, ValidationError>;
}
