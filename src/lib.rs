pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::services::{
    application_service::ApplicationService,
    association_service::{
        ApplicationEventService, ApplicationPersonService, CompanyEventService,
        CompanyPersonService, EventPersonService,
    },
    company_service::CompanyService,
    event_service::EventService,
    person_service::PersonService,
};
use crate::utils::time::Clock;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub company_service: CompanyService,
    pub person_service: PersonService,
    pub application_service: ApplicationService,
    pub event_service: EventService,
    pub company_person_service: CompanyPersonService,
    pub company_event_service: CompanyEventService,
    pub application_person_service: ApplicationPersonService,
    pub application_event_service: ApplicationEventService,
    pub event_person_service: EventPersonService,
}

impl AppState {
    pub fn new(pool: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        Self {
            company_service: CompanyService::new(pool.clone(), clock.clone()),
            person_service: PersonService::new(pool.clone(), clock.clone()),
            application_service: ApplicationService::new(pool.clone(), clock.clone()),
            event_service: EventService::new(pool.clone(), clock.clone()),
            company_person_service: CompanyPersonService::new(pool.clone(), clock.clone()),
            company_event_service: CompanyEventService::new(pool.clone(), clock.clone()),
            application_person_service: ApplicationPersonService::new(pool.clone(), clock.clone()),
            application_event_service: ApplicationEventService::new(pool.clone(), clock.clone()),
            event_person_service: EventPersonService::new(pool.clone(), clock),
            pool,
        }
    }
}
