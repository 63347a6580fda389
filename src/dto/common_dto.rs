use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::models::wire_enum;
use crate::utils::validation::parse_optional_enum;

wire_enum! {
    /// How much associated data a response carries.
    pub enum IncludeExtraDataType as "include extra data type" {
        All => "all",
        Ids => "ids",
        None => "none",
    }
}

impl IncludeExtraDataType {
    /// Parses an `include_*` query parameter. Absent means [`IncludeExtraDataType::None`].
    pub fn from_query(field: &str, value: Option<&str>) -> Result<Self> {
        Ok(parse_optional_enum(field, value)?.unwrap_or(IncludeExtraDataType::None))
    }
}

/// Associated records attached to a response: full objects or ids only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExtraData<T> {
    All(Vec<T>),
    Ids(Vec<Uuid>),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NameSearchQuery {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobTitleSearchQuery {
    #[serde(default)]
    pub job_title: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyIncludeQuery {
    pub include_persons: Option<String>,
    pub include_events: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonIncludeQuery {
    pub include_companies: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationIncludeQuery {
    pub include_persons: Option<String>,
    pub include_events: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventIncludeQuery {
    pub include_persons: Option<String>,
}
