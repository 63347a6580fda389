use std::fmt::Debug;
use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, FromRow};
use uuid::Uuid;

use crate::error::Result;
use crate::utils::validation::require_non_nil;

/// One side of a junction table.
#[derive(Debug, Clone, Copy)]
pub struct Side {
    /// Column name in the junction table.
    pub column: &'static str,
    /// Label used in caller-facing messages.
    pub label: &'static str,
}

/// A row linking two entities, keyed by `(left, right)`.
pub trait Association:
    Debug + Clone + Send + Sync + Unpin + Serialize + for<'r> FromRow<'r, SqliteRow> + 'static
{
    const TABLE: &'static str;
    const LEFT: Side;
    const RIGHT: Side;

    fn left_id(&self) -> Uuid;
    fn right_id(&self) -> Uuid;

    fn duplicate_message() -> String {
        format!(
            "{} and {} combination already exists in database.",
            Self::LEFT.label,
            Self::RIGHT.label
        )
    }
}

/// Insert model for an association of kind `A`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAssociation<A> {
    pub left_id: Uuid,
    pub right_id: Uuid,
    pub created_date: Option<DateTime<Utc>>,
    kind: PhantomData<fn() -> A>,
}

impl<A: Association> NewAssociation<A> {
    pub fn new(left_id: Uuid, right_id: Uuid, created_date: Option<DateTime<Utc>>) -> Self {
        Self {
            left_id,
            right_id,
            created_date,
            kind: PhantomData,
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_non_nil(A::LEFT.column, &self.left_id)?;
        require_non_nil(A::RIGHT.column, &self.right_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CompanyPerson {
    pub company_id: Uuid,
    pub person_id: Uuid,
    pub created_date: DateTime<Utc>,
}

impl Association for CompanyPerson {
    const TABLE: &'static str = "company_person";
    const LEFT: Side = Side {
        column: "company_id",
        label: "CompanyID",
    };
    const RIGHT: Side = Side {
        column: "person_id",
        label: "PersonID",
    };

    fn left_id(&self) -> Uuid {
        self.company_id
    }

    fn right_id(&self) -> Uuid {
        self.person_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CompanyEvent {
    pub company_id: Uuid,
    pub event_id: Uuid,
    pub created_date: DateTime<Utc>,
}

impl Association for CompanyEvent {
    const TABLE: &'static str = "company_event";
    const LEFT: Side = Side {
        column: "company_id",
        label: "CompanyID",
    };
    const RIGHT: Side = Side {
        column: "event_id",
        label: "EventID",
    };

    fn left_id(&self) -> Uuid {
        self.company_id
    }

    fn right_id(&self) -> Uuid {
        self.event_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ApplicationPerson {
    pub application_id: Uuid,
    pub person_id: Uuid,
    pub created_date: DateTime<Utc>,
}

impl Association for ApplicationPerson {
    const TABLE: &'static str = "application_person";
    const LEFT: Side = Side {
        column: "application_id",
        label: "ApplicationID",
    };
    const RIGHT: Side = Side {
        column: "person_id",
        label: "PersonID",
    };

    fn left_id(&self) -> Uuid {
        self.application_id
    }

    fn right_id(&self) -> Uuid {
        self.person_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ApplicationEvent {
    pub application_id: Uuid,
    pub event_id: Uuid,
    pub created_date: DateTime<Utc>,
}

impl Association for ApplicationEvent {
    const TABLE: &'static str = "application_event";
    const LEFT: Side = Side {
        column: "application_id",
        label: "ApplicationID",
    };
    const RIGHT: Side = Side {
        column: "event_id",
        label: "EventID",
    };

    fn left_id(&self) -> Uuid {
        self.application_id
    }

    fn right_id(&self) -> Uuid {
        self.event_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct EventPerson {
    pub event_id: Uuid,
    pub person_id: Uuid,
    pub created_date: DateTime<Utc>,
}

impl Association for EventPerson {
    const TABLE: &'static str = "event_person";
    const LEFT: Side = Side {
        column: "event_id",
        label: "EventID",
    };
    const RIGHT: Side = Side {
        column: "person_id",
        label: "PersonID",
    };

    fn left_id(&self) -> Uuid {
        self.event_id
    }

    fn right_id(&self) -> Uuid {
        self.person_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_message_names_both_sides() {
        assert_eq!(
            ApplicationEvent::duplicate_message(),
            "ApplicationID and EventID combination already exists in database."
        );
    }

    #[test]
    fn new_association_reports_left_side_first() {
        let link = NewAssociation::<CompanyPerson>::new(Uuid::nil(), Uuid::nil(), None);
        assert_eq!(
            link.validate().unwrap_err(),
            crate::error::Error::validation_field("company_id", "must be a non-nil UUID")
        );
    }
}
