use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::decode_stored;
use crate::models::person::{NewPerson, Person, PersonUpdate};
use crate::utils::time::Clock;
use crate::utils::validation::escape_like;

const COLUMNS: &str = "id, name, person_type, email, phone, notes, created_date, updated_date";

#[derive(Debug, FromRow)]
struct PersonRow {
    id: Uuid,
    name: String,
    person_type: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    notes: Option<String>,
    created_date: DateTime<Utc>,
    updated_date: Option<DateTime<Utc>>,
}

impl TryFrom<PersonRow> for Person {
    type Error = Error;

    fn try_from(row: PersonRow) -> Result<Self> {
        Ok(Person {
            id: row.id,
            name: row.name,
            person_type: decode_stored("person_type", row.person_type)?,
            email: row.email,
            phone: row.phone,
            notes: row.notes,
            created_date: row.created_date,
            updated_date: row.updated_date,
        })
    }
}

#[derive(Clone)]
pub struct PersonRepository {
    pool: SqlitePool,
    clock: Arc<dyn Clock>,
}

impl PersonRepository {
    pub fn new(pool: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    pub async fn create(&self, person: NewPerson) -> Result<Person> {
        let id = person.id.unwrap_or_else(Uuid::new_v4);
        let created_date = person.created_date.unwrap_or_else(|| self.clock.now());

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO person (id, name, name_folded, person_type, email, phone, notes, created_date, updated_date)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, NULL)
            "#,
        )
        .bind(id)
        .bind(&person.name)
        .bind(person.name.to_lowercase())
        .bind(person.person_type.as_str())
        .bind(&person.email)
        .bind(&person.phone)
        .bind(&person.notes)
        .bind(created_date)
        .execute(&mut *tx)
        .await
        .map_err(|e| Error::from_insert(e, "ID already exists in database."))?;

        let row = sqlx::query_as::<_, PersonRow>(&format!(
            "SELECT {} FROM person WHERE id = ?",
            COLUMNS
        ))
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        row.try_into()
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Person> {
        sqlx::query_as::<_, PersonRow>(&format!("SELECT {} FROM person WHERE id = ?", COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound(format!("person with ID {}", id)))?
            .try_into()
    }

    pub async fn get_all_by_name(&self, name: &str) -> Result<Vec<Person>> {
        let rows = sqlx::query_as::<_, PersonRow>(&format!(
            r#"
            SELECT {}
            FROM person
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
                "no persons with name matching '{}'",
                name
            )));
        }
        rows.into_iter().map(Person::try_from).collect()
    }

    pub async fn get_all(&self) -> Result<Option<Vec<Person>>> {
        let rows = sqlx::query_as::<_, PersonRow>(&format!(
            "SELECT {} FROM person ORDER BY created_date DESC, id ASC",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Ok(None);
        }
        rows.into_iter()
            .map(Person::try_from)
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }

    pub async fn update(&self, update: PersonUpdate) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE person
            SET
                name = COALESCE(?, name),
                name_folded = COALESCE(?, name_folded),
                person_type = COALESCE(?, person_type),
                email = COALESCE(?, email),
                phone = COALESCE(?, phone),
                notes = COALESCE(?, notes),
                updated_date = ?
            WHERE id = ?
            "#,
        )
        .bind(&update.name)
        .bind(update.name.as_deref().map(str::to_lowercase))
        .bind(update.person_type.map(|t| t.as_str()))
        .bind(&update.email)
        .bind(&update.phone)
        .bind(&update.notes)
        .bind(self.clock.now())
        .bind(update.id)
        .execute(&self.pool)
        .await
        .map_err(Error::from_write)?;

        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM person WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::from_delete)?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("person with ID {}", id)));
        }
        Ok(())
    }
}
