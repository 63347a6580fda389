use std::marker::PhantomData;
use std::sync::Arc;

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::association::{
    ApplicationEvent, ApplicationPerson, Association, CompanyEvent, CompanyPerson, EventPerson,
    NewAssociation,
};
use crate::utils::time::{stamp, Clock};

pub type CompanyPersonRepository = AssociationRepository<CompanyPerson>;
pub type CompanyEventRepository = AssociationRepository<CompanyEvent>;
pub type ApplicationPersonRepository = AssociationRepository<ApplicationPerson>;
pub type ApplicationEventRepository = AssociationRepository<ApplicationEvent>;
pub type EventPersonRepository = AssociationRepository<EventPerson>;

/// Junction table access shared by every association kind.
pub struct AssociationRepository<A> {
    pool: SqlitePool,
    clock: Arc<dyn Clock>,
    kind: PhantomData<fn() -> A>,
}

impl<A> Clone for AssociationRepository<A> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            clock: self.clock.clone(),
            kind: PhantomData,
        }
    }
}

impl<A: Association> AssociationRepository<A> {
    pub fn new(pool: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        Self {
            pool,
            clock,
            kind: PhantomData,
        }
    }

    fn columns() -> String {
        format!("{}, {}, created_date", A::LEFT.column, A::RIGHT.column)
    }

    pub async fn associate(&self, link: NewAssociation<A>) -> Result<A> {
        let created_date = stamp(link.created_date, self.clock.as_ref());

        let mut tx = self.pool.begin().await?;

        sqlx::query(&format!(
            "INSERT INTO {} ({}) VALUES (?, ?, ?)",
            A::TABLE,
            Self::columns()
        ))
        .bind(link.left_id)
        .bind(link.right_id)
        .bind(created_date)
        .execute(&mut *tx)
        .await
        .map_err(|e| Error::from_insert(e, &A::duplicate_message()))?;

        let row = sqlx::query_as::<_, A>(&format!(
            "SELECT {} FROM {} WHERE {} = ? AND {} = ?",
            Self::columns(),
            A::TABLE,
            A::LEFT.column,
            A::RIGHT.column
        ))
        .bind(link.left_id)
        .bind(link.right_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row)
    }

    /// Rows matching every supplied side, newest first.
    pub async fn get_by_id(&self, left_id: Option<Uuid>, right_id: Option<Uuid>) -> Result<Vec<A>> {
        let mut filters = Vec::new();
        if left_id.is_some() {
            filters.push(format!("{} = ?", A::LEFT.column));
        }
        if right_id.is_some() {
            filters.push(format!("{} = ?", A::RIGHT.column));
        }
        if filters.is_empty() {
            return Err(Error::validation(format!(
                "{} or {} must be supplied",
                A::LEFT.label,
                A::RIGHT.label
            )));
        }

        let sql = format!(
            "SELECT {} FROM {} WHERE {} ORDER BY created_date DESC, {} ASC, {} ASC",
            Self::columns(),
            A::TABLE,
            filters.join(" AND "),
            A::LEFT.column,
            A::RIGHT.column
        );

        let mut query = sqlx::query_as::<_, A>(&sql);
        if let Some(id) = left_id {
            query = query.bind(id);
        }
        if let Some(id) = right_id {
            query = query.bind(id);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    /// `None` when the table is empty.
    pub async fn get_all(&self) -> Result<Option<Vec<A>>> {
        let rows = sqlx::query_as::<_, A>(&format!(
            "SELECT {} FROM {} ORDER BY created_date DESC, {} ASC, {} ASC",
            Self::columns(),
            A::TABLE,
            A::LEFT.column,
            A::RIGHT.column
        ))
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Ok(None);
        }
        Ok(Some(rows))
    }

    pub async fn delete(&self, left_id: Uuid, right_id: Uuid) -> Result<()> {
        let result = sqlx::query(&format!(
            "DELETE FROM {} WHERE {} = ? AND {} = ?",
            A::TABLE,
            A::LEFT.column,
            A::RIGHT.column
        ))
        .bind(left_id)
        .bind(right_id)
        .execute(&self.pool)
        .await
        .map_err(Error::from_delete)?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!(
                "{} {} and {} {} not linked in {}",
                A::LEFT.label,
                left_id,
                A::RIGHT.label,
                right_id,
                A::TABLE
            )));
        }
        Ok(())
    }
}
