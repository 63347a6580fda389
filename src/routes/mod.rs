pub mod application;
pub mod association;
pub mod company;
pub mod event;
pub mod extra_data;
pub mod health;
pub mod person;

use std::time::Duration;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::AppState;

pub fn router(state: AppState, request_timeout: Duration) -> Router {
    let api = Router::new()
        .route(
            "/api/v1/companies",
            get(company::list_companies).post(company::create_company),
        )
        .route("/api/v1/companies/search", get(company::search_companies))
        .route(
            "/api/v1/companies/:id",
            get(company::get_company)
                .patch(company::update_company)
                .delete(company::delete_company),
        )
        .route(
            "/api/v1/persons",
            get(person::list_persons).post(person::create_person),
        )
        .route("/api/v1/persons/search", get(person::search_persons))
        .route(
            "/api/v1/persons/:id",
            get(person::get_person)
                .patch(person::update_person)
                .delete(person::delete_person),
        )
        .route(
            "/api/v1/applications",
            get(application::list_applications).post(application::create_application),
        )
        .route(
            "/api/v1/applications/search",
            get(application::search_applications),
        )
        .route(
            "/api/v1/applications/:id",
            get(application::get_application)
                .patch(application::update_application)
                .delete(application::delete_application),
        )
        .route(
            "/api/v1/applications/:id/status",
            get(application::get_application_status),
        )
        .route(
            "/api/v1/events",
            get(event::list_events).post(event::create_event),
        )
        .route(
            "/api/v1/events/:id",
            get(event::get_event)
                .patch(event::update_event)
                .delete(event::delete_event),
        )
        .merge(association::routes());

    Router::new()
        .route("/health", get(health::health))
        .merge(api)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_methods(Any)
                .allow_headers(Any)
                .allow_origin(Any),
        )
        .with_state(state)
}
