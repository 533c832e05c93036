//! REST DTOs with serde derives for HTTP API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ===== Validation DTOs =====

/// Validation row with the inspection context shown in the list screen
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidationSummaryDto {
    pub id: Uuid,
    pub inspection_id: Uuid,
    pub supervisor_id: Uuid,

    /// pending, approved, rejected or requires_review
    #[schema(example = "pending")]
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    pub inspector_id: Option<Uuid>,

    #[schema(example = "Peugeot")]
    pub vehicle_brand: Option<String>,

    #[schema(example = "308")]
    pub vehicle_model: Option<String>,

    #[schema(example = "AB-123-CD")]
    pub license_plate: Option<String>,

    pub client_name: Option<String>,
    pub franchise_name: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Validation list response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidationListResponse {
    pub items: Vec<ValidationSummaryDto>,
    pub total: usize,
}

/// Checklist line recorded by the inspector
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InspectionDetailDto {
    pub id: Uuid,

    #[schema(example = "Carrosserie")]
    pub section: String,

    #[schema(example = "Pare-brise fissuré")]
    pub item: String,

    /// Inspector verdict
    #[schema(example = "nok")]
    pub status: Option<String>,

    pub comment: Option<String>,
    pub photo_url: Option<String>,
}

/// Supervisor decision on one checklist line
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidationItemDto {
    pub id: Uuid,
    pub validation_id: Uuid,
    pub inspection_detail_id: Uuid,

    #[schema(example = "rejected")]
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Item paired with the checklist line it decides
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidationItemViewDto {
    pub item: ValidationItemDto,
    pub detail: InspectionDetailDto,
}

/// Detail screen payload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidationDetailDto {
    pub validation: ValidationSummaryDto,
    pub items: Vec<ValidationItemViewDto>,
}

/// Reject item request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RejectItemRequest {
    /// Reason shown to the inspector; must not be blank
    #[schema(example = "Photo floue, merci de reprendre le cliché")]
    pub comment: String,
}

/// Approve-all response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApproveAllResponse {
    /// Number of items that moved from pending to approved
    pub approved: u64,
}

/// Outcome of completing a validation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompletionDto {
    pub validation_id: Uuid,
    pub inspection_id: Uuid,

    #[schema(example = "approved")]
    pub validation_status: String,

    #[schema(example = "validated")]
    pub inspection_status: String,

    pub completed_at: DateTime<Utc>,
    pub approved_items: usize,
    pub rejected_items: usize,
}

// ===== Inspection DTOs =====

/// Submit inspection request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SubmitInspectionRequest {
    /// Supervisor who will review the inspection
    pub supervisor_id: Uuid,
}

/// Newly opened validation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SupervisorValidationDto {
    pub id: Uuid,
    pub inspection_id: Uuid,
    pub supervisor_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

// ===== Dashboard DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NavEntryDto {
    #[schema(example = "supervisor_validation")]
    pub capability: String,

    #[schema(example = "/validation-superviseur")]
    pub path: String,

    #[schema(example = "Validation")]
    pub label: String,
}

/// Sidebar entries for the signed-in user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NavigationResponse {
    pub role: String,
    pub items: Vec<NavEntryDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotificationDto {
    pub id: Uuid,

    #[schema(example = "Inspection validée")]
    pub title: String,

    pub content: String,

    #[schema(example = "inspection_validated")]
    pub r#type: String,

    pub franchise_id: Option<Uuid>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotificationListResponse {
    pub items: Vec<NotificationDto>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
}
