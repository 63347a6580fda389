use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::wire_enum;
use crate::error::{Error, Result};
use crate::utils::validation::require_non_nil;

wire_enum! {
    pub enum CompanyType as "company type" {
        Employer => "employer",
        Recruiter => "recruiter",
        Consultancy => "consultancy",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub company_type: CompanyType,
    pub notes: Option<String>,
    pub last_contact: Option<DateTime<Utc>>,
    pub created_date: DateTime<Utc>,
    pub updated_date: Option<DateTime<Utc>>,
}

/// Insert model. `id` and `created_date` are filled in by the store and the
/// service respectively when absent.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCompany {
    pub id: Option<Uuid>,
    pub name: String,
    pub company_type: CompanyType,
    pub notes: Option<String>,
    pub last_contact: Option<DateTime<Utc>>,
    pub created_date: Option<DateTime<Utc>>,
}

impl NewCompany {
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

/// Partial update. `None` leaves the column unchanged; there is no way to
/// clear a column through this path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompanyUpdate {
    pub id: Uuid,
    pub name: Option<String>,
    pub company_type: Option<CompanyType>,
    pub notes: Option<String>,
    pub last_contact: Option<DateTime<Utc>>,
}

impl CompanyUpdate {
    pub fn has_changes(&self) -> bool {
        self.name.is_some()
            || self.company_type.is_some()
            || self.notes.is_some()
            || self.last_contact.is_some()
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
    fn company_type_vocabulary_matches_wire_strings() {
        let wire: Vec<&str> = CompanyType::ALL.iter().map(|t| t.as_str()).collect();
        assert_eq!(wire, vec!["employer", "recruiter", "consultancy"]);
        for t in CompanyType::ALL {
            assert_eq!(serde_json::to_value(t).unwrap(), t.as_str());
            assert_eq!(t.as_str().parse::<CompanyType>().unwrap(), *t);
        }
    }

    #[test]
    fn update_with_only_id_has_nothing_to_update() {
        let update = CompanyUpdate {
            id: Uuid::new_v4(),
            ..Default::default()
        };
        assert_eq!(
            update.validate().unwrap_err().to_string(),
            "validation error: nothing to update"
        );
    }

    #[test]
    fn update_rejects_nil_id() {
        let update = CompanyUpdate {
            name: Some("Acme".into()),
            ..Default::default()
        };
        assert!(matches!(update.validate(), Err(Error::Validation { .. })));
    }
}
