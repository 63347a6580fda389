use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::event::{Event, EventType};
use super::wire_enum;
use crate::error::{Error, Result};
use crate::utils::validation::{require_non_nil, require_non_zero_time};

wire_enum! {
    pub enum RemoteStatusType as "remote status type" {
        Hybrid => "hybrid",
        Office => "office",
        Remote => "remote",
        Unknown => "unknown",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: Uuid,
    pub company_id: Option<Uuid>,
    pub recruiter_id: Option<Uuid>,
    pub job_title: Option<String>,
    pub job_ad_url: Option<String>,
    pub country: Option<String>,
    pub area: Option<String>,
    pub remote_status_type: RemoteStatusType,
    pub weekdays_in_office: Option<i32>,
    pub estimated_cycle_time: Option<i32>,
    pub estimated_commute_time: Option<i32>,
    pub application_date: Option<DateTime<Utc>>,
    pub created_date: DateTime<Utc>,
    pub updated_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewApplication {
    pub id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub recruiter_id: Option<Uuid>,
    pub job_title: Option<String>,
    pub job_ad_url: Option<String>,
    pub country: Option<String>,
    pub area: Option<String>,
    pub remote_status_type: RemoteStatusType,
    pub weekdays_in_office: Option<i32>,
    pub estimated_cycle_time: Option<i32>,
    pub estimated_commute_time: Option<i32>,
    pub application_date: Option<DateTime<Utc>>,
    pub created_date: Option<DateTime<Utc>>,
}

fn is_blank_id(id: Option<&Uuid>) -> bool {
    id.map_or(true, Uuid::is_nil)
}

fn is_blank_text(text: Option<&str>) -> bool {
    text.map_or(true, str::is_empty)
}

/// Cross-field rules shared by the request converter and the service.
pub fn check_application_references(
    company_id: Option<&Uuid>,
    recruiter_id: Option<&Uuid>,
    job_title: Option<&str>,
    job_ad_url: Option<&str>,
) -> Result<()> {
    if is_blank_id(company_id) && is_blank_id(recruiter_id) {
        return Err(Error::validation(
            "CompanyID and RecruiterID cannot both be empty",
        ));
    }
    if is_blank_text(job_title) && is_blank_text(job_ad_url) {
        return Err(Error::validation("JobTitle and JobAdURL cannot both be empty"));
    }
    Ok(())
}

impl NewApplication {
    pub fn validate(&self) -> Result<()> {
        if let Some(id) = &self.id {
            require_non_nil("id", id)?;
        }
        check_application_references(
            self.company_id.as_ref(),
            self.recruiter_id.as_ref(),
            self.job_title.as_deref(),
            self.job_ad_url.as_deref(),
        )?;
        if let Some(application_date) = &self.application_date {
            require_non_zero_time("application_date", application_date)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ApplicationUpdate {
    pub id: Uuid,
    pub company_id: Option<Uuid>,
    pub recruiter_id: Option<Uuid>,
    pub job_title: Option<String>,
    pub job_ad_url: Option<String>,
    pub country: Option<String>,
    pub area: Option<String>,
    pub remote_status_type: Option<RemoteStatusType>,
    pub weekdays_in_office: Option<i32>,
    pub estimated_cycle_time: Option<i32>,
    pub estimated_commute_time: Option<i32>,
    pub application_date: Option<DateTime<Utc>>,
}

impl ApplicationUpdate {
    pub fn has_changes(&self) -> bool {
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

    pub fn validate(&self) -> Result<()> {
        require_non_nil("id", &self.id)?;
        if !self.has_changes() {
            return Err(Error::validation("nothing to update"));
        }
        if let Some(company_id) = &self.company_id {
            require_non_nil("company_id", company_id)?;
        }
        if let Some(recruiter_id) = &self.recruiter_id {
            require_non_nil("recruiter_id", recruiter_id)?;
        }
        if self.job_title.as_deref() == Some("") {
            return Err(Error::validation_field("job_title", "cannot be empty"));
        }
        if self.job_ad_url.as_deref() == Some("") {
            return Err(Error::validation_field("job_ad_url", "cannot be empty"));
        }
        if let Some(application_date) = &self.application_date {
            require_non_zero_time("application_date", application_date)?;
        }
        Ok(())
    }
}

/// The application's current state: the type of its most recent event by
/// `event_date`, later `created_date` winning ties.
pub fn current_status(events: &[Event]) -> Option<EventType> {
    events
        .iter()
        .max_by(|a, b| {
            a.event_date
                .cmp(&b.event_date)
                .then(a.created_date.cmp(&b.created_date))
        })
        .map(|e| e.event_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(event_type: EventType, day: u32, created_sec: u32) -> Event {
        Event {
            id: Uuid::new_v4(),
            event_type,
            description: None,
            notes: None,
            event_date: Utc.with_ymd_and_hms(2025, 1, day, 0, 0, 0).unwrap(),
            created_date: Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, created_sec).unwrap(),
            updated_date: None,
        }
    }

    fn new_application() -> NewApplication {
        NewApplication {
            id: None,
            company_id: Some(Uuid::new_v4()),
            recruiter_id: None,
            job_title: Some("Dev".into()),
            job_ad_url: None,
            country: None,
            area: None,
            remote_status_type: RemoteStatusType::Office,
            weekdays_in_office: None,
            estimated_cycle_time: None,
            estimated_commute_time: None,
            application_date: None,
            created_date: None,
        }
    }

    #[test]
    fn requires_company_or_recruiter() {
        let mut app = new_application();
        app.company_id = None;
        assert_eq!(
            app.validate().unwrap_err().to_string(),
            "validation error: CompanyID and RecruiterID cannot both be empty"
        );
        app.recruiter_id = Some(Uuid::new_v4());
        assert!(app.validate().is_ok());
    }

    #[test]
    fn requires_title_or_ad_url() {
        let mut app = new_application();
        app.job_title = Some(String::new());
        assert_eq!(
            app.validate().unwrap_err(),
            Error::validation("JobTitle and JobAdURL cannot both be empty")
        );
        app.job_ad_url = Some("https://jobs.example.com/1".into());
        assert!(app.validate().is_ok());
    }

    #[test]
    fn update_rejects_empty_title_or_ad_url() {
        let update = ApplicationUpdate {
            id: Uuid::new_v4(),
            job_title: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            update.validate().unwrap_err(),
            Error::validation_field("job_title", "cannot be empty")
        );

        let update = ApplicationUpdate {
            id: Uuid::new_v4(),
            job_ad_url: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            update.validate().unwrap_err(),
            Error::validation_field("job_ad_url", "cannot be empty")
        );
    }

    #[test]
    fn current_status_follows_latest_event_date() {
        let events = vec![
            event(EventType::InterviewBooked, 5, 0),
            event(EventType::Applied, 1, 10),
        ];
        assert_eq!(current_status(&events), Some(EventType::InterviewBooked));
    }

    #[test]
    fn current_status_breaks_ties_on_created_date() {
        let events = vec![
            event(EventType::Offer, 9, 5),
            event(EventType::Rejected, 9, 1),
        ];
        assert_eq!(current_status(&events), Some(EventType::Offer));
        assert_eq!(current_status(&[]), None);
    }
}
