use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::wire_enum;
use crate::error::{Error, Result};
use crate::utils::validation::{require_non_nil, require_non_zero_time};

wire_enum! {
    /// Milestones recordable against an application. The most recent one is
    /// the application's current state; any order of events is accepted.
    pub enum EventType as "event type" {
        Applied => "applied",
        CallBooked => "callBooked",
        CallCompleted => "callCompleted",
        CodeTestCompleted => "codeTestCompleted",
        CodeTestReceived => "codeTestReceived",
        InterviewBooked => "interviewBooked",
        InterviewCompleted => "interviewCompleted",
        Paused => "paused",
        Offer => "offer",
        Other => "other",
        RecruiterInterviewBooked => "recruiterInterviewBooked",
        RecruiterInterviewCompleted => "recruiterInterviewCompleted",
        Rejected => "rejected",
        Signed => "signed",
        Withdrew => "withdrew",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub event_type: EventType,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub event_date: DateTime<Utc>,
    pub created_date: DateTime<Utc>,
    pub updated_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub id: Option<Uuid>,
    pub event_type: EventType,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub event_date: DateTime<Utc>,
    pub created_date: Option<DateTime<Utc>>,
}

impl NewEvent {
    pub fn validate(&self) -> Result<()> {
        if let Some(id) = &self.id {
            require_non_nil("id", id)?;
        }
        require_non_zero_time("event_date", &self.event_date)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventUpdate {
    pub id: Uuid,
    pub event_type: Option<EventType>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
}

impl EventUpdate {
    pub fn has_changes(&self) -> bool {
        self.event_type.is_some()
            || self.description.is_some()
            || self.notes.is_some()
            || self.event_date.is_some()
    }

    pub fn validate(&self) -> Result<()> {
        require_non_nil("id", &self.id)?;
        if !self.has_changes() {
            return Err(Error::validation("nothing to update"));
        }
        if self.description.as_deref() == Some("") {
            return Err(Error::validation_field("description", "cannot be empty"));
        }
        if self.notes.as_deref() == Some("") {
            return Err(Error::validation_field("notes", "cannot be empty"));
        }
        if let Some(event_date) = &self.event_date {
            require_non_zero_time("event_date", event_date)?;
        }
        Ok(())
    }
}
