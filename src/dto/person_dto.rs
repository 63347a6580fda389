use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::ExtraData;
use crate::dto::company_dto::CompanyResponse;
use crate::error::{Error, Result};
use crate::models::person::{NewPerson, Person, PersonType, PersonUpdate};
use crate::utils::validation::{
    not_nil_uuid, parse_enum, parse_optional_enum, reject_updated_date_on_insert, require_non_nil,
    validate,
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePersonRequest {
    #[validate(custom(function = "not_nil_uuid"))]
    pub id: Option<Uuid>,
    #[serde(default)]
    #[validate(length(min = 1, message = "cannot be empty"))]
    pub name: String,
    #[serde(default)]
    pub person_type: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub created_date: Option<DateTime<Utc>>,
    pub updated_date: Option<DateTime<Utc>>,
}

impl CreatePersonRequest {
    pub fn validate_request(&self) -> Result<()> {
        validate(self)?;
        parse_enum::<PersonType>("person_type", &self.person_type)?;
        reject_updated_date_on_insert(self.updated_date.as_ref())
    }

    pub fn to_model(self) -> Result<NewPerson> {
        self.validate_request()?;
        Ok(NewPerson {
            id: self.id,
            name: self.name,
            person_type: parse_enum("person_type", &self.person_type)?,
            email: self.email,
            phone: self.phone,
            notes: self.notes,
            created_date: self.created_date,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePersonRequest {
    #[serde(default)]
    pub id: Uuid,
    #[validate(length(min = 1, message = "cannot be empty"))]
    pub name: Option<String>,
    pub person_type: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl UpdatePersonRequest {
    fn has_changes(&self) -> bool {
        self.name.is_some()
            || self.person_type.is_some()
            || self.email.is_some()
            || self.phone.is_some()
            || self.notes.is_some()
    }

    pub fn validate_request(&self) -> Result<()> {
        require_non_nil("id", &self.id)?;
        if !self.has_changes() {
            return Err(Error::validation("nothing to update"));
        }
        validate(self)?;
        parse_optional_enum::<PersonType>("person_type", self.person_type.as_deref())?;
        Ok(())
    }

    pub fn to_model(self) -> Result<PersonUpdate> {
        self.validate_request()?;
        Ok(PersonUpdate {
            id: self.id,
            person_type: parse_optional_enum("person_type", self.person_type.as_deref())?,
            name: self.name,
            email: self.email,
            phone: self.phone,
            notes: self.notes,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PersonResponse {
    pub id: Uuid,
    pub name: String,
    pub person_type: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub created_date: DateTime<Utc>,
    pub updated_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub companies: Option<ExtraData<CompanyResponse>>,
}

impl From<Person> for PersonResponse {
    fn from(person: Person) -> Self {
        Self {
            id: person.id,
            name: person.name,
            person_type: person.person_type.to_string(),
            email: person.email,
            phone: person.phone,
            notes: person.notes,
            created_date: person.created_date,
            updated_date: person.updated_date,
            companies: None,
        }
    }
}
