use std::sync::Arc;

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::application::{current_status, Application, ApplicationUpdate, NewApplication};
use crate::models::event::EventType;
use crate::repositories::application_repository::ApplicationRepository;
use crate::repositories::event_repository::EventRepository;
use crate::services::log_failure;
use crate::utils::time::{stamp, Clock};
use crate::utils::validation::require_non_nil;

#[derive(Clone)]
pub struct ApplicationService {
    repository: ApplicationRepository,
    events: EventRepository,
    clock: Arc<dyn Clock>,
}

impl ApplicationService {
    pub fn new(pool: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository: ApplicationRepository::new(pool.clone(), clock.clone()),
            events: EventRepository::new(pool, clock.clone()),
            clock,
        }
    }

    pub async fn create(&self, mut application: NewApplication) -> Result<Application> {
        application.validate()?;
        application.created_date = Some(stamp(application.created_date, self.clock.as_ref()));

        let application = self
            .repository
            .create(application)
            .await
            .inspect_err(|e| log_failure("create application", e))?;

        tracing::info!(application_id = %application.id, "application created");
        Ok(application)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Application> {
        require_non_nil("id", &id)?;
        self.repository
            .get_by_id(id)
            .await
            .inspect_err(|e| log_failure("get application", e))
    }

    pub async fn get_all_by_job_title(&self, job_title: &str) -> Result<Vec<Application>> {
        if job_title.is_empty() {
            return Err(Error::validation_field("job_title", "cannot be empty"));
        }
        self.repository
            .get_all_by_job_title(job_title)
            .await
            .inspect_err(|e| log_failure("search applications", e))
    }

    pub async fn get_all(&self) -> Result<Option<Vec<Application>>> {
        self.repository
            .get_all()
            .await
            .inspect_err(|e| log_failure("list applications", e))
    }

    pub async fn update(&self, update: ApplicationUpdate) -> Result<()> {
        update.validate()?;
        let id = update.id;
        self.repository
            .update(update)
            .await
            .inspect_err(|e| log_failure("update application", e))?;

        tracing::info!(application_id = %id, "application updated");
        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        require_non_nil("id", &id)?;
        self.repository
            .delete(id)
            .await
            .inspect_err(|e| log_failure("delete application", e))?;

        tracing::info!(application_id = %id, "application deleted");
        Ok(())
    }

    /// The type of the application's most recent event, `None` when no event
    /// has been linked yet.
    pub async fn current_status(&self, id: Uuid) -> Result<Option<EventType>> {
        self.get_by_id(id).await?;
        let events = self
            .events
            .get_all_by_application(id)
            .await
            .inspect_err(|e| log_failure("application status", e))?;
        Ok(current_status(&events))
    }
}
