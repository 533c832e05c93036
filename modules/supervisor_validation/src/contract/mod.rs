//! Contract layer - public API for inter-module communication
//!
//! This layer contains transport-agnostic models and the native client trait.
//! NO serde derives on models - these are pure domain types.

pub mod client;
pub mod error;
pub mod model;

pub use client::SupervisorValidationApi;
pub use error::ValidationError;
pub use model::{
    Capability, CompletionOutcome, CurrentUser, Inspection, InspectionDetail, InspectionStatus,
    ItemStatus, NavEntry, NewNotification, Notification, NotificationType, Role,
    SupervisorValidation, UnknownVariant, ValidationDetail, ValidationItem, ValidationItemView,
    ValidationListQuery, ValidationStatus, ValidationSummary, ValidationTab,
};
