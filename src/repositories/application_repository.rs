use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationUpdate, NewApplication};
use crate::models::decode_stored;
use crate::utils::time::Clock;
use crate::utils::validation::escape_like;

const COLUMNS: &str = "id, company_id, recruiter_id, job_title, job_ad_url, country, area, \
    remote_status_type, weekdays_in_office, estimated_cycle_time, estimated_commute_time, \
    application_date, created_date, updated_date";

#[derive(Debug, FromRow)]
struct ApplicationRow {
    id: Uuid,
    company_id: Option<Uuid>,
    recruiter_id: Option<Uuid>,
    job_title: Option<String>,
    job_ad_url: Option<String>,
    country: Option<String>,
    area: Option<String>,
    remote_status_type: Option<String>,
    weekdays_in_office: Option<i32>,
    estimated_cycle_time: Option<i32>,
    estimated_commute_time: Option<i32>,
    application_date: Option<DateTime<Utc>>,
    created_date: DateTime<Utc>,
    updated_date: Option<DateTime<Utc>>,
}

impl TryFrom<ApplicationRow> for Application {
    type Error = Error;

    fn try_from(row: ApplicationRow) -> Result<Self> {
        Ok(Application {
            id: row.id,
            company_id: row.company_id,
            recruiter_id: row.recruiter_id,
            job_title: row.job_title,
            job_ad_url: row.job_ad_url,
            country: row.country,
            area: row.area,
            remote_status_type: decode_stored("remote_status_type", row.remote_status_type)?,
            weekdays_in_office: row.weekdays_in_office,
            estimated_cycle_time: row.estimated_cycle_time,
            estimated_commute_time: row.estimated_commute_time,
            application_date: row.application_date,
            created_date: row.created_date,
            updated_date: row.updated_date,
        })
    }
}

fn into_applications(rows: Vec<ApplicationRow>) -> Result<Vec<Application>> {
    rows.into_iter().map(Application::try_from).collect()
}

#[derive(Clone)]
pub struct ApplicationRepository {
    pool: SqlitePool,
    clock: Arc<dyn Clock>,
}

impl ApplicationRepository {
    pub fn new(pool: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    pub async fn create(&self, application: NewApplication) -> Result<Application> {
        let id = application.id.unwrap_or_else(Uuid::new_v4);
        let created_date = application
            .created_date
            .unwrap_or_else(|| self.clock.now());

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO application (
                id, company_id, recruiter_id, job_title, job_title_folded, job_ad_url,
                country, area, remote_status_type, weekdays_in_office, estimated_cycle_time,
                estimated_commute_time, application_date, created_date, updated_date
            ) VALUES (
                ?, ?, ?, ?, ?, ?,
                ?, ?, ?, ?, ?,
                ?, ?, ?, NULL
            )
            "#,
        )
        .bind(id)
        .bind(application.company_id)
        .bind(application.recruiter_id)
        .bind(&application.job_title)
        .bind(application.job_title.as_deref().map(str::to_lowercase))
        .bind(&application.job_ad_url)
        .bind(&application.country)
        .bind(&application.area)
        .bind(application.remote_status_type.as_str())
        .bind(application.weekdays_in_office)
        .bind(application.estimated_cycle_time)
        .bind(application.estimated_commute_time)
        .bind(application.application_date)
        .bind(created_date)
        .execute(&mut *tx)
        .await
        .map_err(|e| Error::from_insert(e, "ID already exists in database."))?;

        let row = sqlx::query_as::<_, ApplicationRow>(&format!(
            "SELECT {} FROM application WHERE id = ?",
            COLUMNS
        ))
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        row.try_into()
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Application> {
        let row = sqlx::query_as::<_, ApplicationRow>(&format!(
            "SELECT {} FROM application WHERE id = ?",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => row.try_into(),
            None => Err(Error::NotFound(format!("application with ID {}", id))),
        }
    }

    pub async fn get_all_by_job_title(&self, job_title: &str) -> Result<Vec<Application>> {
        let rows = sqlx::query_as::<_, ApplicationRow>(&format!(
            r#"
            SELECT {}
            FROM application
            WHERE job_title_folded LIKE '%' || ? || '%' ESCAPE '\'
            ORDER BY job_title_folded ASC, id ASC
            "#,
            COLUMNS
        ))
        .bind(escape_like(&job_title.to_lowercase()))
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Err(Error::NotFound(format!(
                "no applications with job title matching '{}'",
                job_title
            )));
        }
        into_applications(rows)
    }

    pub async fn get_all(&self) -> Result<Option<Vec<Application>>> {
        let rows = sqlx::query_as::<_, ApplicationRow>(&format!(
            "SELECT {} FROM application ORDER BY created_date DESC, id ASC",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Ok(None);
        }
        into_applications(rows).map(Some)
    }

    pub async fn update(&self, update: ApplicationUpdate) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE application
            SET
                company_id = COALESCE(?, company_id),
                recruiter_id = COALESCE(?, recruiter_id),
                job_title = COALESCE(?, job_title),
                job_title_folded = COALESCE(?, job_title_folded),
                job_ad_url = COALESCE(?, job_ad_url),
                country = COALESCE(?, country),
                area = COALESCE(?, area),
                remote_status_type = COALESCE(?, remote_status_type),
                weekdays_in_office = COALESCE(?, weekdays_in_office),
                estimated_cycle_time = COALESCE(?, estimated_cycle_time),
                estimated_commute_time = COALESCE(?, estimated_commute_time),
                application_date = COALESCE(?, application_date),
                updated_date = ?
            WHERE id = ?
            "#,
        )
        .bind(update.company_id)
        .bind(update.recruiter_id)
        .bind(&update.job_title)
        .bind(update.job_title.as_deref().map(str::to_lowercase))
        .bind(&update.job_ad_url)
        .bind(&update.country)
        .bind(&update.area)
        .bind(update.remote_status_type.map(|t| t.as_str()))
        .bind(update.weekdays_in_office)
        .bind(update.estimated_cycle_time)
        .bind(update.estimated_commute_time)
        .bind(update.application_date)
        .bind(self.clock.now())
        .bind(update.id)
        .execute(&self.pool)
        .await
        .map_err(Error::from_write)?;

        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM application WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::from_delete)?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("application with ID {}", id)));
        }
        Ok(())
    }
}
