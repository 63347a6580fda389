use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{
    dto::{
        common_dto::{CompanyIncludeQuery, IncludeExtraDataType, NameSearchQuery},
        company_dto::{CompanyResponse, CreateCompanyRequest, UpdateCompanyRequest},
    },
    error::Result,
    routes::extra_data,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/v1/companies",
    request_body = CreateCompanyRequest,
    responses(
        (status = 201, description = "Company created", body = Json<CompanyResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "ID already exists")
    )
)]
#[axum::debug_handler]
pub async fn create_company(
    State(state): State<AppState>,
    Json(payload): Json<CreateCompanyRequest>,
) -> Result<impl IntoResponse> {
    let company = state.company_service.create(payload.to_model()?).await?;
    Ok((StatusCode::CREATED, Json(CompanyResponse::from(company))))
}

#[utoipa::path(
    get,
    path = "/api/v1/companies",
    responses(
        (status = 200, description = "All companies, newest first; null when there are none", body = Json<Vec<CompanyResponse>>)
    )
)]
#[axum::debug_handler]
pub async fn list_companies(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let companies = state.company_service.get_all().await?;
    Ok(Json(companies.map(|c| {
        c.into_iter().map(CompanyResponse::from).collect::<Vec<_>>()
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/companies/search",
    params(
        ("name" = String, Query, description = "Case-insensitive name fragment")
    ),
    responses(
        (status = 200, description = "Matching companies by name", body = Json<Vec<CompanyResponse>>),
        (status = 400, description = "Empty name"),
        (status = 404, description = "No company matches")
    )
)]
#[axum::debug_handler]
pub async fn search_companies(
    State(state): State<AppState>,
    Query(query): Query<NameSearchQuery>,
) -> Result<impl IntoResponse> {
    let companies = state.company_service.get_all_by_name(&query.name).await?;
    let items: Vec<CompanyResponse> = companies.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/api/v1/companies/{id}",
    params(
        ("id" = Uuid, Path, description = "Company ID"),
        ("include_persons" = Option<String>, Query, description = "all, ids or none"),
        ("include_events" = Option<String>, Query, description = "all, ids or none")
    ),
    responses(
        (status = 200, description = "Company found", body = Json<CompanyResponse>),
        (status = 404, description = "Company not found")
    )
)]
#[axum::debug_handler]
pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<CompanyIncludeQuery>,
) -> Result<impl IntoResponse> {
    let include_persons =
        IncludeExtraDataType::from_query("include_persons", query.include_persons.as_deref())?;
    let include_events =
        IncludeExtraDataType::from_query("include_events", query.include_events.as_deref())?;

    let company = state.company_service.get_by_id(id).await?;
    let mut response = CompanyResponse::from(company);
    response.persons = extra_data::company_persons(&state, id, include_persons).await?;
    response.events = extra_data::company_events(&state, id, include_events).await?;
    Ok(Json(response))
}

#[utoipa::path(
    patch,
    path = "/api/v1/companies/{id}",
    params(
        ("id" = Uuid, Path, description = "Company ID")
    ),
    request_body = UpdateCompanyRequest,
    responses(
        (status = 204, description = "Company updated"),
        (status = 400, description = "Invalid payload or nothing to update")
    )
)]
#[axum::debug_handler]
pub async fn update_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(mut payload): Json<UpdateCompanyRequest>,
) -> Result<impl IntoResponse> {
    payload.id = id;
    state.company_service.update(payload.to_model()?).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/v1/companies/{id}",
    params(
        ("id" = Uuid, Path, description = "Company ID")
    ),
    responses(
        (status = 204, description = "Company deleted"),
        (status = 400, description = "Company is still referenced by an application"),
        (status = 404, description = "Company not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.company_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
