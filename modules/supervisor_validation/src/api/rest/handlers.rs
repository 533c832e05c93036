//! HTTP request handlers - thin layer that delegates to domain service

use super::{
    auth::AuthUser,
    dto::*,
    error::{map_domain_error, Problem},
    openapi::ApiDoc,
};
use crate::contract::{ValidationListQuery, ValidationTab};
use crate::domain::Service;
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

// ===== Validation Handlers =====

/// Query parameters for listing validations
#[derive(Debug, Deserialize)]
pub struct ListValidationsQuery {
    /// Tab filter: pending or completed
    pub status: Option<String>,
    /// Free-text search over vehicle and franchise
    pub q: Option<String>,
}

/// List validations visible to the signed-in user
pub async fn list_validations(
    Extension(service): Extension<Arc<Service>>,
    AuthUser(user): AuthUser,
    Query(query): Query<ListValidationsQuery>,
) -> Result<Json<ValidationListResponse>, Problem> {
    let tab = query
        .status
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::parse::<ValidationTab>)
        .transpose()
        .map_err(|e| Problem::bad_request(e.to_string()))?;

    let filter = ValidationListQuery {
        tab,
        search: query.q,
    };
    let summaries = service
        .list_validations(&user, &filter)
        .await
        .map_err(map_domain_error)?;

    let items: Vec<ValidationSummaryDto> = summaries.into_iter().map(Into::into).collect();
    let total = items.len();

    Ok(Json(ValidationListResponse { items, total }))
}

/// Open a validation, creating its items on first access
pub async fn open_validation(
    Extension(service): Extension<Arc<Service>>,
    AuthUser(user): AuthUser,
    Path(validation_id): Path<Uuid>,
) -> Result<Json<ValidationDetailDto>, Problem> {
    let detail = service
        .open_validation(&user, validation_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(detail.into()))
}

pub async fn approve_all_pending(
    Extension(service): Extension<Arc<Service>>,
    AuthUser(user): AuthUser,
    Path(validation_id): Path<Uuid>,
) -> Result<Json<ApproveAllResponse>, Problem> {
    let approved = service
        .approve_all_pending(&user, validation_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(ApproveAllResponse { approved }))
}

pub async fn complete_validation(
    Extension(service): Extension<Arc<Service>>,
    AuthUser(user): AuthUser,
    Path(validation_id): Path<Uuid>,
) -> Result<Json<CompletionDto>, Problem> {
    let outcome = service
        .complete_validation(&user, validation_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(outcome.into()))
}

// ===== Item Handlers =====

pub async fn approve_item(
    Extension(service): Extension<Arc<Service>>,
    AuthUser(user): AuthUser,
    Path(item_id): Path<Uuid>,
) -> Result<Json<ValidationItemDto>, Problem> {
    let item = service
        .approve_item(&user, item_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(item.into()))
}

pub async fn reject_item(
    Extension(service): Extension<Arc<Service>>,
    AuthUser(user): AuthUser,
    Path(item_id): Path<Uuid>,
    Json(req): Json<RejectItemRequest>,
) -> Result<Json<ValidationItemDto>, Problem> {
    let item = service
        .reject_item(&user, item_id, &req.comment)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(item.into()))
}

// ===== Inspection Handlers =====

/// Hand an inspection over to a supervisor
pub async fn submit_for_validation(
    Extension(service): Extension<Arc<Service>>,
    AuthUser(user): AuthUser,
    Path(inspection_id): Path<Uuid>,
    Json(req): Json<SubmitInspectionRequest>,
) -> Result<(StatusCode, Json<SupervisorValidationDto>), Problem> {
    let validation = service
        .submit_for_validation(&user, inspection_id, req.supervisor_id)
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(validation.into())))
}

// ===== Dashboard Handlers =====

pub async fn navigation(
    Extension(service): Extension<Arc<Service>>,
    AuthUser(user): AuthUser,
) -> Json<NavigationResponse> {
    let items = service
        .navigation(&user)
        .into_iter()
        .map(Into::into)
        .collect();

    Json(NavigationResponse {
        role: user.role.as_str().to_string(),
        items,
    })
}

pub async fn notifications(
    Extension(service): Extension<Arc<Service>>,
    AuthUser(user): AuthUser,
) -> Result<Json<NotificationListResponse>, Problem> {
    let notifications = service
        .notifications(&user)
        .await
        .map_err(map_domain_error)?;

    let items: Vec<NotificationDto> = notifications.into_iter().map(Into::into).collect();
    let total = items.len();

    Ok(Json(NotificationListResponse { items, total }))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
