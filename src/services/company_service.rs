use std::sync::Arc;

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::company::{Company, CompanyUpdate, NewCompany};
use crate::repositories::company_repository::CompanyRepository;
use crate::services::log_failure;
use crate::utils::time::{is_zero_time, stamp, Clock};
use crate::utils::validation::require_non_nil;

#[derive(Clone)]
pub struct CompanyService {
    repository: CompanyRepository,
    clock: Arc<dyn Clock>,
}

impl CompanyService {
    pub fn new(pool: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository: CompanyRepository::new(pool, clock.clone()),
            clock,
        }
    }

    /// Stamps `created_date` when unset. A zero `last_contact` means "at
    /// creation" and is replaced with the effective `created_date`.
    pub async fn create(&self, mut company: NewCompany) -> Result<Company> {
        company.validate()?;

        let created_date = stamp(company.created_date, self.clock.as_ref());
        company.created_date = Some(created_date);
        if company.last_contact.as_ref().is_some_and(is_zero_time) {
            company.last_contact = Some(created_date);
        }

        let company = self
            .repository
            .create(company)
            .await
            .inspect_err(|e| log_failure("create company", e))?;

        tracing::info!(company_id = %company.id, "company created");
        Ok(company)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Company> {
        require_non_nil("id", &id)?;
        self.repository
            .get_by_id(id)
            .await
            .inspect_err(|e| log_failure("get company", e))
    }

    pub async fn get_all_by_name(&self, name: &str) -> Result<Vec<Company>> {
        if name.is_empty() {
            return Err(Error::validation_field("name", "cannot be empty"));
        }
        self.repository
            .get_all_by_name(name)
            .await
            .inspect_err(|e| log_failure("search companies", e))
    }

    pub async fn get_all(&self) -> Result<Option<Vec<Company>>> {
        self.repository
            .get_all()
            .await
            .inspect_err(|e| log_failure("list companies", e))
    }

    pub async fn update(&self, update: CompanyUpdate) -> Result<()> {
        update.validate()?;
        let id = update.id;
        self.repository
            .update(update)
            .await
            .inspect_err(|e| log_failure("update company", e))?;

        tracing::info!(company_id = %id, "company updated");
        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        require_non_nil("id", &id)?;
        self.repository
            .delete(id)
            .await
            .inspect_err(|e| log_failure("delete company", e))?;

        tracing::info!(company_id = %id, "company deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{pool::connect_in_memory, run_migrations};
    use crate::models::company::CompanyType;
    use crate::utils::time::{zero_time, MockClock};
    use chrono::{TimeZone, Utc};

    async fn service(clock: MockClock) -> CompanyService {
        let pool = connect_in_memory().await.unwrap();
        run_migrations(&pool).await.unwrap();
        CompanyService::new(pool, Arc::new(clock))
    }

    #[tokio::test]
    async fn zero_last_contact_becomes_created_date() {
        let now = Utc.with_ymd_and_hms(2025, 4, 2, 10, 0, 0).unwrap();
        let mut clock = MockClock::new();
        clock.expect_now().return_const(now);
        let service = service(clock).await;

        let company = service
            .create(NewCompany {
                id: None,
                name: "Acme AB".into(),
                company_type: CompanyType::Employer,
                notes: None,
                last_contact: Some(zero_time()),
                created_date: None,
            })
            .await
            .unwrap();

        assert_eq!(company.created_date, now);
        assert_eq!(company.last_contact, Some(now));
        assert_eq!(company.updated_date, None);
    }

    #[tokio::test]
    async fn nil_id_lookup_is_rejected_before_the_store() {
        let service = service(MockClock::new()).await;
        let err = service.get_by_id(Uuid::nil()).await.unwrap_err();
        assert_eq!(err.kind(), "validation_error");
    }
}
