use std::sync::Arc;

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::association::{
    ApplicationEvent, ApplicationPerson, Association, CompanyEvent, CompanyPerson, EventPerson,
    NewAssociation,
};
use crate::repositories::association_repository::AssociationRepository;
use crate::services::log_failure;
use crate::utils::time::{stamp, Clock};
use crate::utils::validation::require_non_nil;

pub type CompanyPersonService = AssociationService<CompanyPerson>;
pub type CompanyEventService = AssociationService<CompanyEvent>;
pub type ApplicationPersonService = AssociationService<ApplicationPerson>;
pub type ApplicationEventService = AssociationService<ApplicationEvent>;
pub type EventPersonService = AssociationService<EventPerson>;

pub struct AssociationService<A> {
    repository: AssociationRepository<A>,
    clock: Arc<dyn Clock>,
}

impl<A> Clone for AssociationService<A> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
            clock: self.clock.clone(),
        }
    }
}

impl<A: Association> AssociationService<A> {
    pub fn new(pool: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository: AssociationRepository::new(pool, clock.clone()),
            clock,
        }
    }

    pub async fn associate(&self, mut link: NewAssociation<A>) -> Result<A> {
        link.validate()?;
        link.created_date = Some(stamp(link.created_date, self.clock.as_ref()));

        let row = self
            .repository
            .associate(link)
            .await
            .inspect_err(|e| log_failure(A::TABLE, e))?;

        tracing::info!(
            table = A::TABLE,
            left_id = %row.left_id(),
            right_id = %row.right_id(),
            "association created"
        );
        Ok(row)
    }

    /// Nil ids count as not supplied; at least one side is required.
    pub async fn get_by_id(&self, left_id: Option<Uuid>, right_id: Option<Uuid>) -> Result<Vec<A>> {
        let left_id = left_id.filter(|id| !id.is_nil());
        let right_id = right_id.filter(|id| !id.is_nil());
        if left_id.is_none() && right_id.is_none() {
            return Err(Error::validation(format!(
                "{} or {} must be supplied",
                A::LEFT.label,
                A::RIGHT.label
            )));
        }

        self.repository
            .get_by_id(left_id, right_id)
            .await
            .inspect_err(|e| log_failure(A::TABLE, e))
    }

    pub async fn get_all(&self) -> Result<Option<Vec<A>>> {
        self.repository
            .get_all()
            .await
            .inspect_err(|e| log_failure(A::TABLE, e))
    }

    pub async fn delete(&self, left_id: Uuid, right_id: Uuid) -> Result<()> {
        require_non_nil(A::LEFT.column, &left_id)?;
        require_non_nil(A::RIGHT.column, &right_id)?;

        self.repository
            .delete(left_id, right_id)
            .await
            .inspect_err(|e| log_failure(A::TABLE, e))?;

        tracing::info!(table = A::TABLE, %left_id, %right_id, "association deleted");
        Ok(())
    }
}
