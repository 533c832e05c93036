//! Mapper implementations for converting contract models into REST DTOs

use super::dto::*;
use crate::contract;

// ===== Validation conversions =====

impl From<contract::ValidationSummary> for ValidationSummaryDto {
    fn from(summary: contract::ValidationSummary) -> Self {
        let validation = summary.validation;
        Self {
            id: validation.id,
            inspection_id: validation.inspection_id,
            supervisor_id: validation.supervisor_id,
            status: validation.status.as_str().to_string(),
            notes: validation.notes,
            inspector_id: summary.inspector_id,
            vehicle_brand: summary.vehicle_brand,
            vehicle_model: summary.vehicle_model,
            license_plate: summary.license_plate,
            client_name: summary.client_name,
            franchise_name: summary.franchise_name,
            created_at: validation.created_at,
            updated_at: validation.updated_at,
            completed_at: validation.completed_at,
        }
    }
}

impl From<contract::InspectionDetail> for InspectionDetailDto {
    fn from(detail: contract::InspectionDetail) -> Self {
        Self {
            id: detail.id,
            section: detail.section,
            item: detail.item,
            status: detail.status,
            comment: detail.comment,
            photo_url: detail.photo_url,
        }
    }
}

impl From<contract::ValidationItem> for ValidationItemDto {
    fn from(item: contract::ValidationItem) -> Self {
        Self {
            id: item.id,
            validation_id: item.validation_id,
            inspection_detail_id: item.inspection_detail_id,
            status: item.status.as_str().to_string(),
            comment: item.comment,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

impl From<contract::ValidationDetail> for ValidationDetailDto {
    fn from(detail: contract::ValidationDetail) -> Self {
        Self {
            validation: detail.summary.into(),
            items: detail
                .items
                .into_iter()
                .map(|view| ValidationItemViewDto {
                    item: view.item.into(),
                    detail: view.detail.into(),
                })
                .collect(),
        }
    }
}

impl From<contract::CompletionOutcome> for CompletionDto {
    fn from(outcome: contract::CompletionOutcome) -> Self {
        Self {
            validation_id: outcome.validation_id,
            inspection_id: outcome.inspection_id,
            validation_status: outcome.validation_status.as_str().to_string(),
            inspection_status: outcome.inspection_status.as_str().to_string(),
            completed_at: outcome.completed_at,
            approved_items: outcome.approved_items,
            rejected_items: outcome.rejected_items,
        }
    }
}

impl From<contract::SupervisorValidation> for SupervisorValidationDto {
    fn from(validation: contract::SupervisorValidation) -> Self {
        Self {
            id: validation.id,
            inspection_id: validation.inspection_id,
            supervisor_id: validation.supervisor_id,
            status: validation.status.as_str().to_string(),
            created_at: validation.created_at,
        }
    }
}

// ===== Dashboard conversions =====

impl From<contract::NavEntry> for NavEntryDto {
    fn from(entry: contract::NavEntry) -> Self {
        Self {
            capability: entry.capability.as_str().to_string(),
            path: entry.path.to_string(),
            label: entry.label.to_string(),
        }
    }
}

impl From<contract::Notification> for NotificationDto {
    fn from(notification: contract::Notification) -> Self {
        Self {
            id: notification.id,
            title: notification.title,
            content: notification.content,
            r#type: notification.r#type.as_str().to_string(),
            franchise_id: notification.franchise_id,
            is_read: notification.is_read,
            created_at: notification.created_at,
        }
    }
}
