//! Supervisor Validation Module
//!
//! Supervisors review the checklist of a submitted vehicle inspection line by
//! line, approve or reject each line and complete the pass, which validates or
//! rejects the inspection and notifies its inspector.

// Public exports
pub mod contract;
pub use contract::{
    client::SupervisorValidationApi, error::ValidationError, CompletionOutcome, CurrentUser,
    Role, ValidationDetail, ValidationSummary,
};

pub mod module;
pub use module::SupervisorValidationModule;

pub use api::native::NativeClient;
pub use api::rest::router;
pub use config::Config;
pub use domain::{EventPublisher, NoOpEventPublisher, Service, TracingEventPublisher};
pub use infra::storage::Migrator;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
