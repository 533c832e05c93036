//! Domain layer - business logic and services

pub mod capabilities;
pub mod events;
pub mod repository;
pub mod rules;
pub mod service;

pub use events::{EventPublisher, NoOpEventPublisher, TracingEventPublisher, ValidationEvent};
pub use repository::{InspectionRepository, ValidationRepository};
pub use service::Service;
