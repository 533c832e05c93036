//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{
    CompletionOutcome, CurrentUser, NavEntry, Notification, Role, SupervisorValidation,
    SupervisorValidationApi, ValidationDetail, ValidationError, ValidationItem,
    ValidationListQuery, ValidationSummary,
};
use crate::domain::capabilities;
use crate::domain::Service;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Native client implementation that directly calls the domain service
///
/// Used by in-process callers that need the workflow without the HTTP layer.
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl SupervisorValidationApi for NativeClient {
    async fn list_validations(
        &self,
        user: &CurrentUser,
        query: &ValidationListQuery,
    ) -> Result<Vec<ValidationSummary>, ValidationError> {
        self.service.list_validations(user, query).await
    }

    async fn open_validation(
        &self,
        user: &CurrentUser,
        validation_id: Uuid,
    ) -> Result<ValidationDetail, ValidationError> {
        self.service.open_validation(user, validation_id).await
    }

    async fn approve_item(
        &self,
        user: &CurrentUser,
        item_id: Uuid,
    ) -> Result<ValidationItem, ValidationError> {
        self.service.approve_item(user, item_id).await
    }

    async fn reject_item(
        &self,
        user: &CurrentUser,
        item_id: Uuid,
        comment: &str,
    ) -> Result<ValidationItem, ValidationError> {
        self.service.reject_item(user, item_id, comment).await
    }

    async fn approve_all_pending(
        &self,
        user: &CurrentUser,
        validation_id: Uuid,
    ) -> Result<u64, ValidationError> {
        self.service.approve_all_pending(user, validation_id).await
    }

    async fn complete_validation(
        &self,
        user: &CurrentUser,
        validation_id: Uuid,
    ) -> Result<CompletionOutcome, ValidationError> {
        self.service.complete_validation(user, validation_id).await
    }

    async fn submit_for_validation(
        &self,
        user: &CurrentUser,
        inspection_id: Uuid,
        supervisor_id: Uuid,
    ) -> Result<SupervisorValidation, ValidationError> {
        self.service
            .submit_for_validation(user, inspection_id, supervisor_id)
            .await
    }

    fn navigation(&self, role: Role) -> Vec<NavEntry> {
        capabilities::navigation(role)
    }

    async fn notifications(&self, user: &CurrentUser) -> Result<Vec<Notification>, ValidationError> {
        self.service.notifications(user).await
    }
}
