use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::wire_enum;
use crate::error::{Error, Result};
use crate::utils::validation::require_non_nil;

wire_enum! {
    pub enum PersonType as "person type" {
        Ceo => "CEO",
        Cto => "CTO",
        Developer => "developer",
        ExternalRecruiter => "externalRecruiter",
        InternalRecruiter => "internalRecruiter",
        Hr => "HR",
        JobAdvertiser => "jobAdvertiser",
        JobContact => "jobContact",
        Other => "other",
        Unknown => "unknown",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: Uuid,
    pub name: String,
    pub person_type: PersonType,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub created_date: DateTime<Utc>,
    pub updated_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPerson {
    pub id: Option<Uuid>,
    pub name: String,
    pub person_type: PersonType,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub created_date: Option<DateTime<Utc>>,
}

impl NewPerson {
    pub fn validate(&self) -> Result<()> {
        if let Some(id) = &self.id {
            require_non_nil("id", id)?;
        }
        if self.name.is_empty() {
            return Err(Error::validation_field("name", "cannot be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PersonUpdate {
    pub id: Uuid,
    pub name: Option<String>,
    pub person_type: Option<PersonType>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl PersonUpdate {
    pub fn has_changes(&self) -> bool {
        self.name.is_some()
            || self.person_type.is_some()
            || self.email.is_some()
            || self.phone.is_some()
            || self.notes.is_some()
    }

    pub fn validate(&self) -> Result<()> {
        require_non_nil("id", &self.id)?;
        if !self.has_changes() {
            return Err(Error::validation("nothing to update"));
        }
        if self.name.as_deref() == Some("") {
            return Err(Error::validation_field("name", "cannot be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_type_vocabulary_is_exact() {
        let wire: Vec<&str> = PersonType::ALL.iter().map(|t| t.as_str()).collect();
        assert_eq!(
            wire,
            vec![
                "CEO",
                "CTO",
                "developer",
                "externalRecruiter",
                "internalRecruiter",
                "HR",
                "jobAdvertiser",
                "jobContact",
                "other",
                "unknown",
            ]
        );
        for t in PersonType::ALL {
            assert_eq!(serde_json::to_value(t).unwrap(), t.as_str());
        }
        assert!("ceo".parse::<PersonType>().is_err());
        assert!("hr".parse::<PersonType>().is_err());
    }
}
