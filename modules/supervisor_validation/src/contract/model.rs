//! Contract models for the supervisor validation workflow
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - these are pure domain models.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Raised when a stored or received status string is not a known variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Implements `as_str`, `Display` and `FromStr` over the snake_case wire names
macro_rules! wire_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $name {
            /// Wire representation used in storage and HTTP payloads
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    other => Err(UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

/// Dashboard user role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Commercial,
    FranchiseManager,
    Supervisor,
    Inspector,
}

wire_enum!(Role, "role", {
    Admin => "admin",
    Commercial => "commercial",
    FranchiseManager => "franchise_manager",
    Supervisor => "supervisor",
    Inspector => "inspector",
});

/// Lifecycle of an inspection job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectionStatus {
    Draft,
    Submitted,
    AwaitingValidation,
    Validated,
    Rejected,
    Completed,
}

wire_enum!(InspectionStatus, "inspection status", {
    Draft => "draft",
    Submitted => "submitted",
    AwaitingValidation => "awaiting_validation",
    Validated => "validated",
    Rejected => "rejected",
    Completed => "completed",
});

/// Status of a supervisor's review pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    Pending,
    Approved,
    Rejected,
    RequiresReview,
}

wire_enum!(ValidationStatus, "validation status", {
    Pending => "pending",
    Approved => "approved",
    Rejected => "rejected",
    RequiresReview => "requires_review",
});

impl ValidationStatus {
    /// Approved and rejected validations accept no further decisions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

/// Per-checklist-line decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    Pending,
    Approved,
    Rejected,
}

wire_enum!(ItemStatus, "item status", {
    Pending => "pending",
    Approved => "approved",
    Rejected => "rejected",
});

/// Kind of notification delivered to a dashboard user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    InspectionValidated,
    InspectionRejected,
    ValidationRequested,
}

wire_enum!(NotificationType, "notification type", {
    InspectionValidated => "inspection_validated",
    InspectionRejected => "inspection_rejected",
    ValidationRequested => "validation_requested",
});

/// A screen or action gated by role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Dashboard,
    Franchises,
    Users,
    Inspections,
    Clients,
    Reports,
    Billing,
    Settings,
    SupervisorValidation,
    NewInspection,
    /// Hand an inspection over to a supervisor; not a screen
    SubmitForValidation,
}

wire_enum!(Capability, "capability", {
    Dashboard => "dashboard",
    Franchises => "franchises",
    Users => "users",
    Inspections => "inspections",
    Clients => "clients",
    Reports => "reports",
    Billing => "billing",
    Settings => "settings",
    SupervisorValidation => "supervisor_validation",
    NewInspection => "new_inspection",
    SubmitForValidation => "submit_for_validation",
});

impl Capability {
    /// Dashboard route of the screen, if the capability is a screen
    pub fn route(&self) -> Option<&'static str> {
        match self {
            Self::Dashboard => Some("/dashboard"),
            Self::Franchises => Some("/franchises"),
            Self::Users => Some("/users"),
            Self::Inspections => Some("/inspections"),
            Self::Clients => Some("/clients"),
            Self::Reports => Some("/rapports"),
            Self::Billing => Some("/facturation"),
            Self::Settings => Some("/parametres"),
            Self::SupervisorValidation => Some("/validation-superviseur"),
            Self::NewInspection => Some("/nouvelle-inspection"),
            Self::SubmitForValidation => None,
        }
    }
}

/// One sidebar link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEntry {
    pub capability: Capability,
    pub path: &'static str,
    pub label: &'static str,
}

/// The signed-in dashboard user, as asserted by the identity gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: Uuid,
    pub role: Role,
}

impl CurrentUser {
    pub fn new(id: Uuid, role: Role) -> Self {
        Self { id, role }
    }
}

/// A vehicle inspection job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspection {
    pub id: Uuid,
    pub status: InspectionStatus,
    pub inspector_id: Option<Uuid>,
    pub supervisor_id: Option<Uuid>,
    pub franchise_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One checklist line of an inspection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectionDetail {
    pub id: Uuid,
    pub inspection_id: Uuid,
    pub section: String,
    pub item: String,
    /// Inspector verdict, "ok" or "nok"
    pub status: Option<String>,
    pub comment: Option<String>,
    pub photo_url: Option<String>,
}

/// One supervisor's review pass over an inspection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupervisorValidation {
    pub id: Uuid,
    pub inspection_id: Uuid,
    pub supervisor_id: Uuid,
    pub status: ValidationStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Validation row joined with the inspection context shown in the list screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationSummary {
    pub validation: SupervisorValidation,
    pub inspector_id: Option<Uuid>,
    pub franchise_id: Option<Uuid>,
    pub vehicle_brand: Option<String>,
    pub vehicle_model: Option<String>,
    pub license_plate: Option<String>,
    pub client_name: Option<String>,
    pub franchise_name: Option<String>,
}

impl ValidationSummary {
    /// Case-insensitive match over brand, model, licence plate and franchise name
    pub fn matches_search(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [
            &self.vehicle_brand,
            &self.vehicle_model,
            &self.license_plate,
            &self.franchise_name,
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// A supervisor's decision on one checklist line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationItem {
    pub id: Uuid,
    pub validation_id: Uuid,
    pub inspection_detail_id: Uuid,
    pub status: ItemStatus,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validation item paired with the checklist line it decides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationItemView {
    pub item: ValidationItem,
    pub detail: InspectionDetail,
}

/// Everything the detail screen needs for one validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDetail {
    pub summary: ValidationSummary,
    /// Ordered by (section, item)
    pub items: Vec<ValidationItemView>,
}

/// Which tab of the list screen is requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationTab {
    /// Pending and requires_review
    Pending,
    /// Approved and rejected
    Completed,
}

impl ValidationTab {
    /// Validation statuses listed under the tab
    pub fn statuses(&self) -> &'static [ValidationStatus] {
        match self {
            Self::Pending => &[ValidationStatus::Pending, ValidationStatus::RequiresReview],
            Self::Completed => &[ValidationStatus::Approved, ValidationStatus::Rejected],
        }
    }

    pub fn includes(&self, status: ValidationStatus) -> bool {
        self.statuses().contains(&status)
    }
}

wire_enum!(ValidationTab, "validation tab", {
    Pending => "pending",
    Completed => "completed",
});

/// Filters for the validation list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationListQuery {
    pub tab: Option<ValidationTab>,
    pub search: Option<String>,
}

/// Notification to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub title: String,
    pub content: String,
    pub r#type: NotificationType,
    pub target_user_id: Option<Uuid>,
    pub franchise_id: Option<Uuid>,
}

/// Stored notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub r#type: NotificationType,
    pub target_user_id: Option<Uuid>,
    pub franchise_id: Option<Uuid>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Result of finishing a validation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionOutcome {
    pub validation_id: Uuid,
    pub inspection_id: Uuid,
    pub validation_status: ValidationStatus,
    pub inspection_status: InspectionStatus,
    pub completed_at: DateTime<Utc>,
    pub approved_items: usize,
    pub rejected_items: usize,
}
