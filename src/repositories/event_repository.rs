use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::decode_stored;
use crate::models::event::{Event, EventUpdate, NewEvent};
use crate::utils::time::Clock;

const COLUMNS: &str = "id, event_type, description, notes, event_date, created_date, updated_date";

#[derive(Debug, FromRow)]
struct EventRow {
    id: Uuid,
    event_type: Option<String>,
    description: Option<String>,
    notes: Option<String>,
    event_date: DateTime<Utc>,
    created_date: DateTime<Utc>,
    updated_date: Option<DateTime<Utc>>,
}

impl TryFrom<EventRow> for Event {
    type Error = Error;

    fn try_from(row: EventRow) -> Result<Self> {
        Ok(Event {
            id: row.id,
            event_type: decode_stored("event_type", row.event_type)?,
            description: row.description,
            notes: row.notes,
            event_date: row.event_date,
            created_date: row.created_date,
            updated_date: row.updated_date,
        })
    }
}

#[derive(Clone)]
pub struct EventRepository {
    pool: SqlitePool,
    clock: Arc<dyn Clock>,
}

impl EventRepository {
    pub fn new(pool: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    pub async fn create(&self, event: NewEvent) -> Result<Event> {
        let id = event.id.unwrap_or_else(Uuid::new_v4);
        let created_date = event.created_date.unwrap_or_else(|| self.clock.now());

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO event (id, event_type, description, notes, event_date, created_date, updated_date)
            VALUES (?, ?, ?, ?, ?, ?, NULL)
            "#,
        )
        .bind(id)
        .bind(event.event_type.as_str())
        .bind(&event.description)
        .bind(&event.notes)
        .bind(event.event_date)
        .bind(created_date)
        .execute(&mut *tx)
        .await
        .map_err(|e| Error::from_insert(e, "ID already exists in database."))?;

        let row = sqlx::query_as::<_, EventRow>(&format!("SELECT {} FROM event WHERE id = ?", COLUMNS))
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        row.try_into()
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Event> {
        sqlx::query_as::<_, EventRow>(&format!("SELECT {} FROM event WHERE id = ?", COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound(format!("event with ID {}", id)))?
            .try_into()
    }

    pub async fn get_all(&self) -> Result<Option<Vec<Event>>> {
        let rows = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {} FROM event ORDER BY created_date DESC, id ASC",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Ok(None);
        }
        rows.into_iter()
            .map(Event::try_from)
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }

    /// Events linked to an application, most recent `event_date` first.
    pub async fn get_all_by_application(&self, application_id: Uuid) -> Result<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT e.id, e.event_type, e.description, e.notes, e.event_date, e.created_date, e.updated_date
            FROM event e
            JOIN application_event ae ON ae.event_id = e.id
            WHERE ae.application_id = ?
            ORDER BY e.event_date DESC, e.created_date DESC
            "#,
        )
        .bind(application_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Event::try_from).collect()
    }

    pub async fn update(&self, update: EventUpdate) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE event
            SET
                event_type = COALESCE(?, event_type),
                description = COALESCE(?, description),
                notes = COALESCE(?, notes),
                event_date = COALESCE(?, event_date),
                updated_date = ?
            WHERE id = ?
            "#,
        )
        .bind(update.event_type.map(|t| t.as_str()))
        .bind(&update.description)
        .bind(&update.notes)
        .bind(update.event_date)
        .bind(self.clock.now())
        .bind(update.id)
        .execute(&self.pool)
        .await
        .map_err(Error::from_write)?;

        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM event WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::from_delete)?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("event with ID {}", id)));
        }
        Ok(())
    }
}
