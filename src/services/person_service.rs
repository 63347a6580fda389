use std::sync::Arc;

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::person::{NewPerson, Person, PersonUpdate};
use crate::repositories::person_repository::PersonRepository;
use crate::services::log_failure;
use crate::utils::time::{stamp, Clock};
use crate::utils::validation::require_non_nil;

#[derive(Clone)]
pub struct PersonService {
    repository: PersonRepository,
    clock: Arc<dyn Clock>,
}

impl PersonService {
    pub fn new(pool: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository: PersonRepository::new(pool, clock.clone()),
            clock,
        }
    }

    pub async fn create(&self, mut person: NewPerson) -> Result<Person> {
        person.validate()?;
        person.created_date = Some(stamp(person.created_date, self.clock.as_ref()));

        let person = self
            .repository
            .create(person)
            .await
            .inspect_err(|e| log_failure("create person", e))?;

        tracing::info!(person_id = %person.id, "person created");
        Ok(person)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Person> {
        require_non_nil("id", &id)?;
        self.repository
            .get_by_id(id)
            .await
            .inspect_err(|e| log_failure("get person", e))
    }

    pub async fn get_all_by_name(&self, name: &str) -> Result<Vec<Person>> {
        if name.is_empty() {
            return Err(Error::validation_field("name", "cannot be empty"));
        }
        self.repository
            .get_all_by_name(name)
            .await
            .inspect_err(|e| log_failure("search persons", e))
    }

    pub async fn get_all(&self) -> Result<Option<Vec<Person>>> {
        self.repository
            .get_all()
            .await
            .inspect_err(|e| log_failure("list persons", e))
    }

    pub async fn update(&self, update: PersonUpdate) -> Result<()> {
        update.validate()?;
        let id = update.id;
        self.repository
            .update(update)
            .await
            .inspect_err(|e| log_failure("update person", e))?;

        tracing::info!(person_id = %id, "person updated");
        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        require_non_nil("id", &id)?;
        self.repository
            .delete(id)
            .await
            .inspect_err(|e| log_failure("delete person", e))?;

        tracing::info!(person_id = %id, "person deleted");
        Ok(())
    }
}
