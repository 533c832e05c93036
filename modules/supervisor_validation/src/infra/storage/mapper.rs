//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models. Status columns are
//! parsed strictly; an unknown value surfaces as an error instead of a default.

use super::entity;
use crate::contract::{
    Inspection, InspectionDetail, ItemStatus, NewNotification, Notification, SupervisorValidation,
    ValidationItem,
};
use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use uuid::Uuid;

// ===== Inspection Conversions =====

impl TryFrom<entity::inspection::Model> for Inspection {
    type Error = anyhow::Error;

    fn try_from(entity: entity::inspection::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            status: entity.status.parse()?,
            inspector_id: entity.inspector_id,
            supervisor_id: entity.supervisor_id,
            franchise_id: entity.franchise_id,
            vehicle_id: entity.vehicle_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

impl From<entity::inspection_detail::Model> for InspectionDetail {
    fn from(entity: entity::inspection_detail::Model) -> Self {
        Self {
            id: entity.id,
            inspection_id: entity.inspection_id,
            section: entity.section,
            item: entity.item,
            status: entity.status,
            comment: entity.comment,
            photo_url: entity.photo_url,
        }
    }
}

// ===== Validation Conversions =====

impl TryFrom<entity::supervisor_validation::Model> for SupervisorValidation {
    type Error = anyhow::Error;

    fn try_from(entity: entity::supervisor_validation::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            inspection_id: entity.inspection_id,
            supervisor_id: entity.supervisor_id,
            status: entity.status.parse()?,
            notes: entity.notes,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            completed_at: entity.completed_at,
        })
    }
}

impl From<&SupervisorValidation> for entity::supervisor_validation::ActiveModel {
    fn from(model: &SupervisorValidation) -> Self {
        Self {
            id: Set(model.id),
            inspection_id: Set(model.inspection_id),
            supervisor_id: Set(model.supervisor_id),
            status: Set(model.status.as_str().to_string()),
            notes: Set(model.notes.clone()),
            completed_at: Set(model.completed_at),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        }
    }
}

impl TryFrom<entity::validation_item::Model> for ValidationItem {
    type Error = anyhow::Error;

    fn try_from(entity: entity::validation_item::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            validation_id: entity.validation_id,
            inspection_detail_id: entity.inspection_detail_id,
            status: entity.status.parse()?,
            comment: entity.comment,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

/// Fresh pending item for one checklist line
pub fn pending_item(
    validation_id: Uuid,
    inspection_detail_id: Uuid,
    now: DateTime<Utc>,
) -> entity::validation_item::ActiveModel {
    entity::validation_item::ActiveModel {
        id: Set(Uuid::new_v4()),
        validation_id: Set(validation_id),
        inspection_detail_id: Set(inspection_detail_id),
        status: Set(ItemStatus::Pending.as_str().to_string()),
        comment: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

// ===== Notification Conversions =====

impl TryFrom<entity::notification::Model> for Notification {
    type Error = anyhow::Error;

    fn try_from(entity: entity::notification::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            title: entity.title,
            content: entity.content,
            r#type: entity.r#type.parse()?,
            target_user_id: entity.target_user_id,
            franchise_id: entity.franchise_id,
            is_read: entity.is_read,
            created_at: entity.created_at,
        })
    }
}

/// Unread notification row
pub fn new_notification(
    notification: &NewNotification,
    now: DateTime<Utc>,
) -> entity::notification::ActiveModel {
    entity::notification::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(notification.title.clone()),
        content: Set(notification.content.clone()),
        r#type: Set(notification.r#type.as_str().to_string()),
        target_user_id: Set(notification.target_user_id),
        target_user_role: Set(None),
        franchise_id: Set(notification.franchise_id),
        is_read: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

/// Status history row for one inspection transition
pub fn status_change(
    inspection_id: Uuid,
    old_status: Option<&str>,
    new_status: &str,
    changed_by: Uuid,
    comment: Option<String>,
    now: DateTime<Utc>,
) -> entity::inspection_status_history::ActiveModel {
    entity::inspection_status_history::ActiveModel {
        id: Set(Uuid::new_v4()),
        inspection_id: Set(inspection_id),
        old_status: Set(old_status.map(str::to_string)),
        new_status: Set(new_status.to_string()),
        changed_by: Set(changed_by),
        comment: Set(comment),
        created_at: Set(now),
    }
}
