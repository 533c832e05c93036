//! Domain events for the validation workflow
//!
//! Events are published after the corresponding writes succeeded. Publishing is
//! best effort: a failing publisher is logged and never fails the operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain event types for supervisor validations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum ValidationEvent {
    /// An inspection was handed to a supervisor
    ValidationRequested(ValidationRequestedEvent),
    /// A single item was approved or rejected
    ItemDecided(ItemDecidedEvent),
    /// A validation reached approved or rejected
    ValidationCompleted(ValidationCompletedEvent),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRequestedEvent {
    pub validation_id: Uuid,
    pub inspection_id: Uuid,
    pub supervisor_id: Uuid,
    pub requested_by: Uuid,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDecidedEvent {
    pub validation_id: Uuid,
    /// `None` for a bulk approval of all pending items
    pub item_id: Option<Uuid>,
    /// Wire name of the new item status
    pub status: String,
    pub decided_by: Uuid,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationCompletedEvent {
    pub validation_id: Uuid,
    pub inspection_id: Uuid,
    /// Wire name of the final validation status
    pub status: String,
    pub rejected_items: usize,
    pub completed_by: Uuid,
    pub timestamp: DateTime<Utc>,
}

/// Event publisher trait for publishing domain events
#[async_trait::async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: ValidationEvent) -> anyhow::Result<()>;
}

/// No-op event publisher for testing or when events are disabled
pub struct NoOpEventPublisher;

#[async_trait::async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _event: ValidationEvent) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Writes every event to the log as one structured JSON record
pub struct TracingEventPublisher;

#[async_trait::async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, event: ValidationEvent) -> anyhow::Result<()> {
        let payload = serde_json::to_string(&event)?;
        tracing::info!(target: "supervisor_validation::events", event = %payload, "domain event");
        Ok(())
    }
}

impl ValidationEvent {
    pub fn requested(
        validation_id: Uuid,
        inspection_id: Uuid,
        supervisor_id: Uuid,
        requested_by: Uuid,
    ) -> Self {
        Self::ValidationRequested(ValidationRequestedEvent {
            validation_id,
            inspection_id,
            supervisor_id,
            requested_by,
            timestamp: Utc::now(),
        })
    }

    pub fn item_decided(
        validation_id: Uuid,
        item_id: Option<Uuid>,
        status: &str,
        decided_by: Uuid,
    ) -> Self {
        Self::ItemDecided(ItemDecidedEvent {
            validation_id,
            item_id,
            status: status.to_string(),
            decided_by,
            timestamp: Utc::now(),
        })
    }

    pub fn completed(
        validation_id: Uuid,
        inspection_id: Uuid,
        status: &str,
        rejected_items: usize,
        completed_by: Uuid,
    ) -> Self {
        Self::ValidationCompleted(ValidationCompletedEvent {
            validation_id,
            inspection_id,
            status: status.to_string(),
            rejected_items,
            completed_by,
            timestamp: Utc::now(),
        })
    }
}
