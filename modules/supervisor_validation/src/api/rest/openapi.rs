//! OpenAPI document for the REST DTOs

use super::dto::*;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(components(schemas(
    ValidationSummaryDto,
    ValidationListResponse,
    InspectionDetailDto,
    ValidationItemDto,
    ValidationItemViewDto,
    ValidationDetailDto,
    RejectItemRequest,
    ApproveAllResponse,
    CompletionDto,
    SubmitInspectionRequest,
    SupervisorValidationDto,
    NavEntryDto,
    NavigationResponse,
    NotificationDto,
    NotificationListResponse,
    HealthResponse,
)))]
pub struct ApiDoc;
