use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::company::{Company, CompanyUpdate, NewCompany};
use crate::models::decode_stored;
use crate::utils::time::Clock;
use crate::utils::validation::escape_like;

const COLUMNS: &str = "id, name, company_type, notes, last_contact, created_date, updated_date";

#[derive(Debug, FromRow)]
struct CompanyRow {
    id: Uuid,
    name: String,
    company_type: Option<String>,
    notes: Option<String>,
    last_contact: Option<DateTime<Utc>>,
    created_date: DateTime<Utc>,
    updated_date: Option<DateTime<Utc>>,
}

impl TryFrom<CompanyRow> for Company {
    type Error = Error;

    fn try_from(row: CompanyRow) -> Result<Self> {
        Ok(Company {
            id: row.id,
            name: row.name,
            company_type: decode_stored("company_type", row.company_type)?,
            notes: row.notes,
            last_contact: row.last_contact,
            created_date: row.created_date,
            updated_date: row.updated_date,
        })
    }
}

fn into_companies(rows: Vec<CompanyRow>) -> Result<Vec<Company>> {
    rows.into_iter().map(Company::try_from).collect()
}

#[derive(Clone)]
pub struct CompanyRepository {
    pool: SqlitePool,
    clock: Arc<dyn Clock>,
}

impl CompanyRepository {
    pub fn new(pool: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    pub async fn create(&self, company: NewCompany) -> Result<Company> {
        let id = company.id.unwrap_or_else(Uuid::new_v4);
        let created_date = company.created_date.unwrap_or_else(|| self.clock.now());

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO company (id, name, name_folded, company_type, notes, last_contact, created_date, updated_date)
            VALUES (?, ?, ?, ?, ?, ?, ?, NULL)
            "#,
        )
        .bind(id)
        .bind(&company.name)
        .bind(company.name.to_lowercase())
        .bind(company.company_type.as_str())
        .bind(&company.notes)
        .bind(company.last_contact)
        .bind(created_date)
        .execute(&mut *tx)
        .await
        .map_err(|e| Error::from_insert(e, "ID already exists in database."))?;

        let row = sqlx::query_as::<_, CompanyRow>(&format!(
            "SELECT {} FROM company WHERE id = ?",
            COLUMNS
        ))
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        row.try_into()
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Company> {
        let row = sqlx::query_as::<_, CompanyRow>(&format!(
            "SELECT {} FROM company WHERE id = ?",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => row.try_into(),
            None => Err(Error::NotFound(format!("company with ID {}", id))),
        }
    }

    pub async fn get_all_by_name(&self, name: &str) -> Result<Vec<Company>> {
        let rows = sqlx::query_as::<_, CompanyRow>(&format!(
            r#"
            SELECT {}
            FROM company
            WHERE name_folded LIKE '%' || ? || '%' ESCAPE '\'
            ORDER BY name_folded ASC, id ASC
            "#,
            COLUMNS
        ))
        .bind(escape_like(&name.to_lowercase()))
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Err(Error::NotFound(format!(
                "no companies with name matching '{}'",
                name
            )));
        }
        into_companies(rows)
    }

    /// `None` when the table is empty.
    pub async fn get_all(&self) -> Result<Option<Vec<Company>>> {
        let rows = sqlx::query_as::<_, CompanyRow>(&format!(
            "SELECT {} FROM company ORDER BY created_date DESC, id ASC",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Ok(None);
        }
        into_companies(rows).map(Some)
    }

    /// Applies the non-null fields. Matching no row is not an error.
    pub async fn update(&self, update: CompanyUpdate) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE company
            SET
                name = COALESCE(?, name),
                name_folded = COALESCE(?, name_folded),
                company_type = COALESCE(?, company_type),
                notes = COALESCE(?, notes),
                last_contact = COALESCE(?, last_contact),
                updated_date = ?
            WHERE id = ?
            "#,
        )
        .bind(&update.name)
        .bind(update.name.as_deref().map(str::to_lowercase))
        .bind(update.company_type.map(|t| t.as_str()))
        .bind(&update.notes)
        .bind(update.last_contact)
        .bind(self.clock.now())
        .bind(update.id)
        .execute(&self.pool)
        .await
        .map_err(Error::from_write)?;

        if result.rows_affected() == 0 {
            tracing::debug!(company_id = %update.id, "company update matched no rows");
        }
        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM company WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::from_delete)?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("company with ID {}", id)));
        }
        Ok(())
    }
}
