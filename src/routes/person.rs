use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{
    dto::{
        common_dto::{IncludeExtraDataType, NameSearchQuery, PersonIncludeQuery},
        person_dto::{CreatePersonRequest, PersonResponse, UpdatePersonRequest},
    },
    error::Result,
    routes::extra_data,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/v1/persons",
    request_body = CreatePersonRequest,
    responses(
        (status = 201, description = "Person created", body = Json<PersonResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "ID already exists")
    )
)]
#[axum::debug_handler]
pub async fn create_person(
    State(state): State<AppState>,
    Json(payload): Json<CreatePersonRequest>,
) -> Result<impl IntoResponse> {
    let person = state.person_service.create(payload.to_model()?).await?;
    Ok((StatusCode::CREATED, Json(PersonResponse::from(person))))
}

#[utoipa::path(
    get,
    path = "/api/v1/persons",
    responses(
        (status = 200, description = "All persons, newest first; null when there are none", body = Json<Vec<PersonResponse>>)
    )
)]
#[axum::debug_handler]
pub async fn list_persons(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let persons = state.person_service.get_all().await?;
    Ok(Json(persons.map(|p| {
        p.into_iter().map(PersonResponse::from).collect::<Vec<_>>()
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/persons/search",
    params(
        ("name" = String, Query, description = "Case-insensitive name fragment")
    ),
    responses(
        (status = 200, description = "Matching persons by name", body = Json<Vec<PersonResponse>>),
        (status = 400, description = "Empty name"),
        (status = 404, description = "No person matches")
    )
)]
#[axum::debug_handler]
pub async fn search_persons(
    State(state): State<AppState>,
    Query(query): Query<NameSearchQuery>,
) -> Result<impl IntoResponse> {
    let persons = state.person_service.get_all_by_name(&query.name).await?;
    let items: Vec<PersonResponse> = persons.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/api/v1/persons/{id}",
    params(
        ("id" = Uuid, Path, description = "Person ID"),
        ("include_companies" = Option<String>, Query, description = "all, ids or none")
    ),
    responses(
        (status = 200, description = "Person found", body = Json<PersonResponse>),
        (status = 404, description = "Person not found")
    )
)]
#[axum::debug_handler]
pub async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<PersonIncludeQuery>,
) -> Result<impl IntoResponse> {
    let include_companies =
        IncludeExtraDataType::from_query("include_companies", query.include_companies.as_deref())?;

    let person = state.person_service.get_by_id(id).await?;
    let mut response = PersonResponse::from(person);
    response.companies = extra_data::person_companies(&state, id, include_companies).await?;
    Ok(Json(response))
}

#[utoipa::path(
    patch,
    path = "/api/v1/persons/{id}",
    params(
        ("id" = Uuid, Path, description = "Person ID")
    ),
    request_body = UpdatePersonRequest,
    responses(
        (status = 204, description = "Person updated"),
        (status = 400, description = "Invalid payload or nothing to update")
    )
)]
#[axum::debug_handler]
pub async fn update_person(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(mut payload): Json<UpdatePersonRequest>,
) -> Result<impl IntoResponse> {
    payload.id = id;
    state.person_service.update(payload.to_model()?).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/v1/persons/{id}",
    params(
        ("id" = Uuid, Path, description = "Person ID")
    ),
    responses(
        (status = 204, description = "Person deleted"),
        (status = 404, description = "Person not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_person(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.person_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
