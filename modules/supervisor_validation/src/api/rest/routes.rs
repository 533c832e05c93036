//! Route registration

use super::handlers;
use crate::domain::Service;
use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;

/// Register all REST routes on the given router
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    router
        // Validation endpoints
        .route("/validations", get(handlers::list_validations))
        .route("/validations/{id}", get(handlers::open_validation))
        .route(
            "/validations/{id}/approve-all",
            post(handlers::approve_all_pending),
        )
        .route(
            "/validations/{id}/complete",
            post(handlers::complete_validation),
        )
        // Item endpoints
        .route("/validation-items/{id}/approve", post(handlers::approve_item))
        .route("/validation-items/{id}/reject", post(handlers::reject_item))
        // Inspection endpoints
        .route(
            "/inspections/{id}/submit",
            post(handlers::submit_for_validation),
        )
        // Dashboard endpoints
        .route("/me/navigation", get(handlers::navigation))
        .route("/me/notifications", get(handlers::notifications))
        .route("/openapi.json", get(handlers::openapi))
        .route("/health", get(handlers::health))
        .layer(Extension(service))
}

/// Router serving only this module's endpoints
pub fn router(service: Arc<Service>) -> Router {
    register_routes(Router::new(), service)
}
