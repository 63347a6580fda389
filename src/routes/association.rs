//! Junction endpoints. Every association exposes the same three handlers:
//! `POST` links two records, `GET` lists links (all of them, or those matching
//! the ids in the query), `DELETE` unlinks the pair named in the query.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::post,
    Router,
};

use crate::{
    dto::association_dto::{
        AssociateApplicationEventRequest, AssociateApplicationPersonRequest,
        AssociateCompanyEventRequest, AssociateCompanyPersonRequest, AssociateEventPersonRequest,
        ApplicationEventFilter, ApplicationPersonFilter, CompanyEventFilter, CompanyPersonFilter,
        DeleteApplicationEventRequest, DeleteApplicationPersonRequest, DeleteCompanyEventRequest,
        DeleteCompanyPersonRequest, DeleteEventPersonRequest, EventPersonFilter,
    },
    error::Result,
    AppState,
};

macro_rules! association_routes {
    (
        $module:ident,
        $path:literal,
        $service:ident,
        $associate:ident,
        $delete:ident,
        $filter:ident
    ) => {
        pub mod $module {
            use super::*;

            #[utoipa::path(
                post,
                path = $path,
                request_body = $associate,
                responses(
                    (status = 201, description = "Records linked"),
                    (status = 400, description = "Invalid ids or unknown record"),
                    (status = 409, description = "Records already linked")
                )
            )]
            #[axum::debug_handler]
            pub async fn associate(
                State(state): State<AppState>,
                Json(payload): Json<$associate>,
            ) -> Result<impl IntoResponse> {
                let row = state.$service.associate(payload.to_model()?).await?;
                Ok((StatusCode::CREATED, Json(row)))
            }

            #[utoipa::path(
                get,
                path = $path,
                responses(
                    (status = 200, description = "Links, newest first; null when the table is empty"),
                    (status = 400, description = "Invalid ids")
                )
            )]
            #[axum::debug_handler]
            pub async fn list(
                State(state): State<AppState>,
                Query(filter): Query<$filter>,
            ) -> Result<impl IntoResponse> {
                if filter.is_empty() {
                    return Ok(Json(state.$service.get_all().await?));
                }
                let (left_id, right_id) = filter.ids();
                let rows = state.$service.get_by_id(left_id, right_id).await?;
                Ok(Json(Some(rows)))
            }

            #[utoipa::path(
                delete,
                path = $path,
                responses(
                    (status = 204, description = "Link removed"),
                    (status = 400, description = "Invalid ids"),
                    (status = 404, description = "Records are not linked")
                )
            )]
            #[axum::debug_handler]
            pub async fn remove(
                State(state): State<AppState>,
                Query(payload): Query<$delete>,
            ) -> Result<impl IntoResponse> {
                let (left_id, right_id) = payload.to_model()?;
                state.$service.delete(left_id, right_id).await?;
                Ok(StatusCode::NO_CONTENT)
            }

            pub fn routes() -> Router<AppState> {
                Router::new().route($path, post(associate).get(list).delete(remove))
            }
        }
    };
}

association_routes!(
    company_persons,
    "/api/v1/company-persons",
    company_person_service,
    AssociateCompanyPersonRequest,
    DeleteCompanyPersonRequest,
    CompanyPersonFilter
);

association_routes!(
    company_events,
    "/api/v1/company-events",
    company_event_service,
    AssociateCompanyEventRequest,
    DeleteCompanyEventRequest,
    CompanyEventFilter
);

association_routes!(
    application_persons,
    "/api/v1/application-persons",
    application_person_service,
    AssociateApplicationPersonRequest,
    DeleteApplicationPersonRequest,
    ApplicationPersonFilter
);

association_routes!(
    application_events,
    "/api/v1/application-events",
    application_event_service,
    AssociateApplicationEventRequest,
    DeleteApplicationEventRequest,
    ApplicationEventFilter
);

association_routes!(
    event_persons,
    "/api/v1/event-persons",
    event_person_service,
    AssociateEventPersonRequest,
    DeleteEventPersonRequest,
    EventPersonFilter
);

pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(company_persons::routes())
        .merge(company_events::routes())
        .merge(application_persons::routes())
        .merge(application_events::routes())
        .merge(event_persons::routes())
}
