use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::services::{
        CreateServiceRequest, ServicePage, ServicePayload, UpdateServiceRequest,
    },
    error::AppResult,
    response::ApiResponse,
    routes::params::ServiceListQuery,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_services).post(create_service))
        .route(
            "/{id}",
            get(get_service).patch(update_service).delete(delete_service),
        )
}

#[utoipa::path(
    get,
    path = "/api/services",
    params(
        ("page" = Option<String>, Query, description = "Page number, default 1"),
        ("pageSize" = Option<String>, Query, description = "Page size, default 10, max 100"),
        ("q" = Option<String>, Query, description = "Substring filter on service name"),
        ("category" = Option<String>, Query, description = "Substring filter on category name")
    ),
    responses(
        (status = 200, description = "Catalog services with categories", body = ApiResponse<ServicePage>),
    ),
    tag = "Services"
)]
pub async fn list_services(
    State(state): State<AppState>,
    Query(query): Query<ServiceListQuery>,
) -> AppResult<Json<ApiResponse<ServicePage>>> {
    let page = catalog_service::list_services(&state, query).await?;
    Ok(Json(ApiResponse::new("Services", page)))
}

#[utoipa::path(
    get,
    path = "/api/services/{id}",
    params(("id" = Uuid, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Service with its category", body = ApiResponse<ServicePayload>),
        (status = 404, description = "Not Found"),
    ),
    tag = "Services"
)]
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ServicePayload>>> {
    let service = catalog_service::get_service(&state, id).await?;
    Ok(Json(ApiResponse::new("OK", service)))
}

#[utoipa::path(
    post,
    path = "/api/services",
    request_body = CreateServiceRequest,
    responses(
        (status = 201, description = "Service created", body = ApiResponse<ServicePayload>),
        (status = 400, description = "Missing name or normalPrice"),
        (status = 404, description = "Category not found"),
    ),
    tag = "Services"
)]
pub async fn create_service(
    State(state): State<AppState>,
    Json(payload): Json<CreateServiceRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ServicePayload>>)> {
    let service = catalog_service::create_service(&state, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Service created", service)),
    ))
}

#[utoipa::path(
    patch,
    path = "/api/services/{id}",
    params(("id" = Uuid, Path, description = "Service ID")),
    request_body = UpdateServiceRequest,
    responses(
        (status = 200, description = "Service updated", body = ApiResponse<ServicePayload>),
        (status = 404, description = "Not Found"),
    ),
    tag = "Services"
)]
pub async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateServiceRequest>,
) -> AppResult<Json<ApiResponse<ServicePayload>>> {
    let service = catalog_service::update_service(&state, id, payload).await?;
    Ok(Json(ApiResponse::new("Service updated", service)))
}

#[utoipa::path(
    delete,
    path = "/api/services/{id}",
    params(("id" = Uuid, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Service deleted", body = ApiResponse<serde_json::Value>),
        (status = 400, description = "Service still referenced by cart items"),
        (status = 404, description = "Not Found"),
    ),
    tag = "Services"
)]
pub async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    catalog_service::delete_service(&state, id).await?;
    Ok(Json(ApiResponse::message_only("Service deleted")))
}
