use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::ExtraData;
use crate::dto::event_dto::EventResponse;
use crate::dto::person_dto::PersonResponse;
use crate::error::{Error, Result};
use crate::models::company::{Company, CompanyType, CompanyUpdate, NewCompany};
use crate::utils::validation::{
    not_nil_uuid, parse_enum, parse_optional_enum, reject_updated_date_on_insert, require_non_nil,
    validate,
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCompanyRequest {
    #[validate(custom(function = "not_nil_uuid"))]
    pub id: Option<Uuid>,
    #[serde(default)]
    #[validate(length(min = 1, message = "cannot be empty"))]
    pub name: String,
    #[serde(default)]
    pub company_type: String,
    pub notes: Option<String>,
    pub last_contact: Option<DateTime<Utc>>,
    pub created_date: Option<DateTime<Utc>>,
    pub updated_date: Option<DateTime<Utc>>,
}

impl CreateCompanyRequest {
    pub fn validate_request(&self) -> Result<()> {
        validate(self)?;
        parse_enum::<CompanyType>("company_type", &self.company_type)?;
        reject_updated_date_on_insert(self.updated_date.as_ref())
    }

    pub fn to_model(self) -> Result<NewCompany> {
        self.validate_request()?;
        Ok(NewCompany {
            id: self.id,
            name: self.name,
            company_type: parse_enum("company_type", &self.company_type)?,
            notes: self.notes,
            last_contact: self.last_contact,
            created_date: self.created_date,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateCompanyRequest {
    #[serde(default)]
    pub id: Uuid,
    #[validate(length(min = 1, message = "cannot be empty"))]
    pub name: Option<String>,
    pub company_type: Option<String>,
    pub notes: Option<String>,
    pub last_contact: Option<DateTime<Utc>>,
}

impl UpdateCompanyRequest {
    fn has_changes(&self) -> bool {
        self.name.is_some()
            || self.company_type.is_some()
            || self.notes.is_some()
            || self.last_contact.is_some()
    }

    pub fn validate_request(&self) -> Result<()> {
        require_non_nil("id", &self.id)?;
        if !self.has_changes() {
            return Err(Error::validation("nothing to update"));
        }
        validate(self)?;
        parse_optional_enum::<CompanyType>("company_type", self.company_type.as_deref())?;
        Ok(())
    }

    pub fn to_model(self) -> Result<CompanyUpdate> {
        self.validate_request()?;
        Ok(CompanyUpdate {
            id: self.id,
            company_type: parse_optional_enum("company_type", self.company_type.as_deref())?,
            name: self.name,
            notes: self.notes,
            last_contact: self.last_contact,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanyResponse {
    pub id: Uuid,
    pub name: String,
    pub company_type: String,
    pub notes: Option<String>,
    pub last_contact: Option<DateTime<Utc>>,
    pub created_date: DateTime<Utc>,
    pub updated_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persons: Option<ExtraData<PersonResponse>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<ExtraData<EventResponse>>,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self {
            id: company.id,
            name: company.name,
            company_type: company.company_type.to_string(),
            notes: company.notes,
            last_contact: company.last_contact,
            created_date: company.created_date,
            updated_date: company.updated_date,
            persons: None,
            events: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time::zero_time;

    fn create_request() -> CreateCompanyRequest {
        CreateCompanyRequest {
            id: None,
            name: "Acme AB".into(),
            company_type: "employer".into(),
            notes: None,
            last_contact: None,
            created_date: None,
            updated_date: None,
        }
    }

    #[test]
    fn create_request_converts_enum() {
        let model = create_request().to_model().unwrap();
        assert_eq!(model.company_type, CompanyType::Employer);
        assert_eq!(model.name, "Acme AB");
    }

    #[test]
    fn create_request_rejects_empty_name_and_unknown_type() {
        let mut req = create_request();
        req.name.clear();
        assert_eq!(
            req.validate_request().unwrap_err().to_string(),
            "validation error on field 'name': cannot be empty"
        );

        let mut req = create_request();
        req.company_type = "agency".into();
        assert_eq!(
            req.validate_request().unwrap_err(),
            Error::validation_field("company_type", "unknown company type 'agency'")
        );
    }

    #[test]
    fn create_request_rejects_updated_date() {
        let mut req = create_request();
        req.updated_date = Some(zero_time());
        assert!(req.to_model().is_err());
    }

    #[test]
    fn update_request_with_only_id_has_nothing_to_update() {
        let req = UpdateCompanyRequest {
            id: Uuid::new_v4(),
            ..Default::default()
        };
        assert_eq!(
            req.to_model().unwrap_err().to_string(),
            "validation error: nothing to update"
        );
    }

    #[test]
    fn response_omits_extra_data_when_not_requested() {
        let response = CompanyResponse::from(
            create_request()
                .to_model()
                .map(|m| Company {
                    id: Uuid::new_v4(),
                    name: m.name,
                    company_type: m.company_type,
                    notes: m.notes,
                    last_contact: m.last_contact,
                    created_date: Utc::now(),
                    updated_date: None,
                })
                .unwrap(),
        );
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["company_type"], "employer");
        assert!(json.get("persons").is_none());
        assert!(json["updated_date"].is_null());
    }
}
