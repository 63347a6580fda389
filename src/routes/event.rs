use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{
    dto::{
        common_dto::{EventIncludeQuery, IncludeExtraDataType},
        event_dto::{CreateEventRequest, EventResponse, UpdateEventRequest},
    },
    error::Result,
    routes::extra_data,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/v1/events",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = Json<EventResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "ID already exists")
    )
)]
#[axum::debug_handler]
pub async fn create_event(
    State(state): State<AppState>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse> {
    let event = state.event_service.create(payload.to_model()?).await?;
    Ok((StatusCode::CREATED, Json(EventResponse::from(event))))
}

#[utoipa::path(
    get,
    path = "/api/v1/events",
    responses(
        (status = 200, description = "All events, newest first; null when there are none", body = Json<Vec<EventResponse>>)
    )
)]
#[axum::debug_handler]
pub async fn list_events(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let events = state.event_service.get_all().await?;
    Ok(Json(events.map(|e| {
        e.into_iter().map(EventResponse::from).collect::<Vec<_>>()
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/events/{id}",
    params(
        ("id" = Uuid, Path, description = "Event ID"),
        ("include_persons" = Option<String>, Query, description = "all, ids or none")
    ),
    responses(
        (status = 200, description = "Event found", body = Json<EventResponse>),
        (status = 404, description = "Event not found")
    )
)]
#[axum::debug_handler]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<EventIncludeQuery>,
) -> Result<impl IntoResponse> {
    let include_persons =
        IncludeExtraDataType::from_query("include_persons", query.include_persons.as_deref())?;

    let event = state.event_service.get_by_id(id).await?;
    let mut response = EventResponse::from(event);
    response.persons = extra_data::event_persons(&state, id, include_persons).await?;
    Ok(Json(response))
}

#[utoipa::path(
    patch,
    path = "/api/v1/events/{id}",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    request_body = UpdateEventRequest,
    responses(
        (status = 204, description = "Event updated"),
        (status = 400, description = "Invalid payload or nothing to update")
    )
)]
#[axum::debug_handler]
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(mut payload): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse> {
    payload.id = id;
    state.event_service.update(payload.to_model()?).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/v1/events/{id}",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 404, description = "Event not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.event_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
