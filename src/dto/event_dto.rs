use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::ExtraData;
use crate::dto::person_dto::PersonResponse;
use crate::error::{Error, Result};
use crate::models::event::{Event, EventType, EventUpdate, NewEvent};
use crate::utils::time::is_unset;
use crate::utils::validation::{
    not_nil_uuid, not_zero_time, parse_enum, parse_optional_enum, reject_updated_date_on_insert,
    require_non_nil, validate,
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(custom(function = "not_nil_uuid"))]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub event_type: String,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub created_date: Option<DateTime<Utc>>,
    pub updated_date: Option<DateTime<Utc>>,
}

impl CreateEventRequest {
    pub fn validate_request(&self) -> Result<()> {
        validate(self)?;
        parse_enum::<EventType>("event_type", &self.event_type)?;
        if is_unset(self.event_date.as_ref()) {
            return Err(Error::validation_field("event_date", "cannot be the zero time"));
        }
        reject_updated_date_on_insert(self.updated_date.as_ref())
    }

    pub fn to_model(self) -> Result<NewEvent> {
        self.validate_request()?;
        let event_date = self
            .event_date
            .ok_or_else(|| Error::validation_field("event_date", "cannot be the zero time"))?;
        Ok(NewEvent {
            id: self.id,
            event_type: parse_enum("event_type", &self.event_type)?,
            description: self.description,
            notes: self.notes,
            event_date,
            created_date: self.created_date,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateEventRequest {
    #[serde(default)]
    pub id: Uuid,
    pub event_type: Option<String>,
    #[validate(length(min = 1, message = "cannot be empty"))]
    pub description: Option<String>,
    #[validate(length(min = 1, message = "cannot be empty"))]
    pub notes: Option<String>,
    #[validate(custom(function = "not_zero_time"))]
    pub event_date: Option<DateTime<Utc>>,
}

impl UpdateEventRequest {
    fn has_changes(&self) -> bool {
        self.event_type.is_some()
            || self.description.is_some()
            || self.notes.is_some()
            || self.event_date.is_some()
    }

    pub fn validate_request(&self) -> Result<()> {
        require_non_nil("id", &self.id)?;
        if !self.has_changes() {
            return Err(Error::validation("nothing to update"));
        }
        validate(self)?;
        parse_optional_enum::<EventType>("event_type", self.event_type.as_deref())?;
        Ok(())
    }

    pub fn to_model(self) -> Result<EventUpdate> {
        self.validate_request()?;
        Ok(EventUpdate {
            id: self.id,
            event_type: parse_optional_enum("event_type", self.event_type.as_deref())?,
            description: self.description,
            notes: self.notes,
            event_date: self.event_date,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EventResponse {
    pub id: Uuid,
    pub event_type: String,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub event_date: DateTime<Utc>,
    pub created_date: DateTime<Utc>,
    pub updated_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persons: Option<ExtraData<PersonResponse>>,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            event_type: event.event_type.to_string(),
            description: event.description,
            notes: event.notes,
            event_date: event.event_date,
            created_date: event.created_date,
            updated_date: event.updated_date,
            persons: None,
        }
    }
}
