use std::sync::Arc;

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::event::{Event, EventUpdate, NewEvent};
use crate::repositories::event_repository::EventRepository;
use crate::services::log_failure;
use crate::utils::time::{stamp, Clock};
use crate::utils::validation::require_non_nil;

#[derive(Clone)]
pub struct EventService {
    repository: EventRepository,
    clock: Arc<dyn Clock>,
}

impl EventService {
    pub fn new(pool: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository: EventRepository::new(pool, clock.clone()),
            clock,
        }
    }

    pub async fn create(&self, mut event: NewEvent) -> Result<Event> {
        event.validate()?;
        event.created_date = Some(stamp(event.created_date, self.clock.as_ref()));

        let event = self
            .repository
            .create(event)
            .await
            .inspect_err(|e| log_failure("create event", e))?;

        tracing::info!(event_id = %event.id, event_type = %event.event_type, "event created");
        Ok(event)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Event> {
        require_non_nil("id", &id)?;
        self.repository
            .get_by_id(id)
            .await
            .inspect_err(|e| log_failure("get event", e))
    }

    pub async fn get_all(&self) -> Result<Option<Vec<Event>>> {
        self.repository
            .get_all()
            .await
            .inspect_err(|e| log_failure("list events", e))
    }

    pub async fn update(&self, update: EventUpdate) -> Result<()> {
        update.validate()?;
        let id = update.id;
        self.repository
            .update(update)
            .await
            .inspect_err(|e| log_failure("update event", e))?;

        tracing::info!(event_id = %id, "event updated");
        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        require_non_nil("id", &id)?;
        self.repository
            .delete(id)
            .await
            .inspect_err(|e| log_failure("delete event", e))?;

        tracing::info!(event_id = %id, "event deleted");
        Ok(())
    }
}
