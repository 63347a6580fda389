use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::ExtraData;
use crate::dto::event_dto::EventResponse;
use crate::dto::person_dto::PersonResponse;
use crate::error::{Error, Result};
use crate::models::application::{
    check_application_references, Application, ApplicationUpdate, NewApplication,
    RemoteStatusType,
};
use crate::models::event::EventType;
use crate::utils::validation::{
    not_nil_uuid, not_zero_time, parse_enum, parse_optional_enum, reject_updated_date_on_insert,
    require_non_nil, validate,
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateApplicationRequest {
    #[validate(custom(function = "not_nil_uuid"))]
    pub id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub recruiter_id: Option<Uuid>,
    pub job_title: Option<String>,
    pub job_ad_url: Option<String>,
    pub country: Option<String>,
    pub area: Option<String>,
    #[serde(default)]
    pub remote_status_type: String,
    #[validate(range(min = 0, max = 7, message = "must be between 0 and 7"))]
    pub weekdays_in_office: Option<i32>,
    #[validate(range(min = 0, message = "cannot be negative"))]
    pub estimated_cycle_time: Option<i32>,
    #[validate(range(min = 0, message = "cannot be negative"))]
    pub estimated_commute_time: Option<i32>,
    #[validate(custom(function = "not_zero_time"))]
    pub application_date: Option<DateTime<Utc>>,
    pub created_date: Option<DateTime<Utc>>,
    pub updated_date: Option<DateTime<Utc>>,
}

impl CreateApplicationRequest {
    pub fn validate_request(&self) -> Result<()> {
        check_application_references(
            self.company_id.as_ref(),
            self.recruiter_id.as_ref(),
            self.job_title.as_deref(),
            self.job_ad_url.as_deref(),
        )?;
        validate(self)?;
        parse_enum::<RemoteStatusType>("remote_status_type", &self.remote_status_type)?;
        reject_updated_date_on_insert(self.updated_date.as_ref())
    }

    pub fn to_model(self) -> Result<NewApplication> {
        self.validate_request()?;
        Ok(NewApplication {
            id: self.id,
            remote_status_type: parse_enum("remote_status_type", &self.remote_status_type)?,
            company_id: self.company_id.filter(|id| !id.is_nil()),
            recruiter_id: self.recruiter_id.filter(|id| !id.is_nil()),
            job_title: self.job_title,
            job_ad_url: self.job_ad_url,
            country: self.country,
            area: self.area,
            weekdays_in_office: self.weekdays_in_office,
            estimated_cycle_time: self.estimated_cycle_time,
            estimated_commute_time: self.estimated_commute_time,
            application_date: self.application_date,
            created_date: self.created_date,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateApplicationRequest {
    #[serde(default)]
    pub id: Uuid,
    #[validate(custom(function = "not_nil_uuid"))]
    pub company_id: Option<Uuid>,
    #[validate(custom(function = "not_nil_uuid"))]
    pub recruiter_id: Option<Uuid>,
    #[validate(length(min = 1, message = "cannot be empty"))]
    pub job_title: Option<String>,
    #[validate(length(min = 1, message = "cannot be empty"))]
    pub job_ad_url: Option<String>,
    pub country: Option<String>,
    pub area: Option<String>,
    pub remote_status_type: Option<String>,
    #[validate(range(min = 0, max = 7, message = "must be between 0 and 7"))]
    pub weekdays_in_office: Option<i32>,
    #[validate(range(min = 0, message = "cannot be negative"))]
    pub estimated_cycle_time: Option<i32>,
    #[validate(range(min = 0, message = "cannot be negative"))]
    pub estimated_commute_time: Option<i32>,
    #[validate(custom(function = "not_zero_time"))]
    pub application_date: Option<DateTime<Utc>>,
}

impl UpdateApplicationRequest {
    fn has_changes(&self) -> bool {
        self.company_id.is_some()
            || self.recruiter_id.is_some()
            || self.job_title.is_some()
            || self.job_ad_url.is_some()
            || self.country.is_some()
            || self.area.is_some()
            || self.remote_status_type.is_some()
            || self.weekdays_in_office.is_some()
            || self.estimated_cycle_time.is_some()
            || self.estimated_commute_time.is_some()
            || self.application_date.is_some()
    }

    pub fn validate_request(&self) -> Result<()> {
        require_non_nil("id", &self.id)?;
        if !self.has_changes() {
            return Err(Error::validation("nothing to update"));
        }
        validate(self)?;
        parse_optional_enum::<RemoteStatusType>(
            "remote_status_type",
            self.remote_status_type.as_deref(),
        )?;
        Ok(())
    }

    pub fn to_model(self) -> Result<ApplicationUpdate> {
        self.validate_request()?;
        Ok(ApplicationUpdate {
            id: self.id,
            remote_status_type: parse_optional_enum(
                "remote_status_type",
                self.remote_status_type.as_deref(),
            )?,
            company_id: self.company_id,
            recruiter_id: self.recruiter_id,
            job_title: self.job_title,
            job_ad_url: self.job_ad_url,
            country: self.country,
            area: self.area,
            weekdays_in_office: self.weekdays_in_office,
            estimated_cycle_time: self.estimated_cycle_time,
            estimated_commute_time: self.estimated_commute_time,
            application_date: self.application_date,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub company_id: Option<Uuid>,
    pub recruiter_id: Option<Uuid>,
    pub job_title: Option<String>,
    pub job_ad_url: Option<String>,
    pub country: Option<String>,
    pub area: Option<String>,
    pub remote_status_type: String,
    pub weekdays_in_office: Option<i32>,
    pub estimated_cycle_time: Option<i32>,
    pub estimated_commute_time: Option<i32>,
    pub application_date: Option<DateTime<Utc>>,
    pub created_date: DateTime<Utc>,
    pub updated_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persons: Option<ExtraData<PersonResponse>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<ExtraData<EventResponse>>,
}

impl From<Application> for ApplicationResponse {
    fn from(application: Application) -> Self {
        Self {
            id: application.id,
            company_id: application.company_id,
            recruiter_id: application.recruiter_id,
            job_title: application.job_title,
            job_ad_url: application.job_ad_url,
            country: application.country,
            area: application.area,
            remote_status_type: application.remote_status_type.to_string(),
            weekdays_in_office: application.weekdays_in_office,
            estimated_cycle_time: application.estimated_cycle_time,
            estimated_commute_time: application.estimated_commute_time,
            application_date: application.application_date,
            created_date: application.created_date,
            updated_date: application.updated_date,
            current_status: None,
            persons: None,
            events: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationStatusResponse {
    pub application_id: Uuid,
    pub current_status: Option<String>,
}

impl ApplicationStatusResponse {
    pub fn new(application_id: Uuid, status: Option<EventType>) -> Self {
        Self {
            application_id,
            current_status: status.map(|s| s.to_string()),
        }
    }
}
