use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{
    dto::{
        application_dto::{
            ApplicationResponse, ApplicationStatusResponse, CreateApplicationRequest,
            UpdateApplicationRequest,
        },
        common_dto::{ApplicationIncludeQuery, IncludeExtraDataType, JobTitleSearchQuery},
    },
    error::Result,
    routes::extra_data,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/v1/applications",
    request_body = CreateApplicationRequest,
    responses(
        (status = 201, description = "Application created", body = Json<ApplicationResponse>),
        (status = 400, description = "Invalid payload or unknown company"),
        (status = 409, description = "ID already exists")
    )
)]
#[axum::debug_handler]
pub async fn create_application(
    State(state): State<AppState>,
    Json(payload): Json<CreateApplicationRequest>,
) -> Result<impl IntoResponse> {
    let application = state
        .application_service
        .create(payload.to_model()?)
        .await?;
    Ok((StatusCode::CREATED, Json(ApplicationResponse::from(application))))
}

#[utoipa::path(
    get,
    path = "/api/v1/applications",
    responses(
        (status = 200, description = "All applications, newest first; null when there are none", body = Json<Vec<ApplicationResponse>>)
    )
)]
#[axum::debug_handler]
pub async fn list_applications(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let applications = state.application_service.get_all().await?;
    Ok(Json(applications.map(|a| {
        a.into_iter()
            .map(ApplicationResponse::from)
            .collect::<Vec<_>>()
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/applications/search",
    params(
        ("job_title" = String, Query, description = "Case-insensitive job title fragment")
    ),
    responses(
        (status = 200, description = "Matching applications by job title", body = Json<Vec<ApplicationResponse>>),
        (status = 400, description = "Empty job title"),
        (status = 404, description = "No application matches")
    )
)]
#[axum::debug_handler]
pub async fn search_applications(
    State(state): State<AppState>,
    Query(query): Query<JobTitleSearchQuery>,
) -> Result<impl IntoResponse> {
    let applications = state
        .application_service
        .get_all_by_job_title(&query.job_title)
        .await?;
    let items: Vec<ApplicationResponse> = applications.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/api/v1/applications/{id}",
    params(
        ("id" = Uuid, Path, description = "Application ID"),
        ("include_persons" = Option<String>, Query, description = "all, ids or none"),
        ("include_events" = Option<String>, Query, description = "all, ids or none")
    ),
    responses(
        (status = 200, description = "Application found, with its current status", body = Json<ApplicationResponse>),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ApplicationIncludeQuery>,
) -> Result<impl IntoResponse> {
    let include_persons =
        IncludeExtraDataType::from_query("include_persons", query.include_persons.as_deref())?;
    let include_events =
        IncludeExtraDataType::from_query("include_events", query.include_events.as_deref())?;

    let application = state.application_service.get_by_id(id).await?;
    let status = state.application_service.current_status(id).await?;

    let mut response = ApplicationResponse::from(application);
    response.current_status = status.map(|s| s.to_string());
    response.persons = extra_data::application_persons(&state, id, include_persons).await?;
    response.events = extra_data::application_events(&state, id, include_events).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/v1/applications/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Type of the most recent event, null without events", body = Json<ApplicationStatusResponse>),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn get_application_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let status = state.application_service.current_status(id).await?;
    Ok(Json(ApplicationStatusResponse::new(id, status)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/applications/{id}",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    request_body = UpdateApplicationRequest,
    responses(
        (status = 204, description = "Application updated"),
        (status = 400, description = "Invalid payload, unknown company or nothing to update")
    )
)]
#[axum::debug_handler]
pub async fn update_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(mut payload): Json<UpdateApplicationRequest>,
) -> Result<impl IntoResponse> {
    payload.id = id;
    state
        .application_service
        .update(payload.to_model()?)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/v1/applications/{id}",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    responses(
        (status = 204, description = "Application deleted"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.application_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
