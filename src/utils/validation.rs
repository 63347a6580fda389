use std::borrow::Cow;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::error::{Error, Result};
use crate::models::UnknownVariant;
use crate::utils::time::is_zero_time;

pub fn validate<T: Validate>(val: &T) -> Result<()> {
    val.validate().map_err(Error::from)
}

pub fn require_non_nil(field: &str, id: &Uuid) -> Result<()> {
    if id.is_nil() {
        return Err(Error::validation_field(field, "must be a non-nil UUID"));
    }
    Ok(())
}

pub fn require_non_zero_time(field: &str, dt: &DateTime<Utc>) -> Result<()> {
    if is_zero_time(dt) {
        return Err(Error::validation_field(field, "cannot be the zero time"));
    }
    Ok(())
}

/// Parses a wire enum string. Empty and unknown strings are caller errors.
pub fn parse_enum<T>(field: &str, value: &str) -> Result<T>
where
    T: FromStr<Err = UnknownVariant>,
{
    if value.is_empty() {
        return Err(Error::validation_field(field, "cannot be empty"));
    }
    value
        .parse()
        .map_err(|e: UnknownVariant| Error::validation_field(field, e.to_string()))
}

pub fn parse_optional_enum<T>(field: &str, value: Option<&str>) -> Result<Option<T>>
where
    T: FromStr<Err = UnknownVariant>,
{
    value.map(|v| parse_enum(field, v)).transpose()
}

pub fn reject_updated_date_on_insert(updated_date: Option<&DateTime<Utc>>) -> Result<()> {
    if updated_date.is_some() {
        return Err(Error::validation_field(
            "updated_date",
            "must be empty on insert",
        ));
    }
    Ok(())
}

fn rule(code: &'static str, message: &'static str) -> validator::ValidationError {
    let mut err = validator::ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

pub fn not_nil_uuid(id: &Uuid) -> std::result::Result<(), validator::ValidationError> {
    if id.is_nil() {
        return Err(rule("nil_uuid", "must be a non-nil UUID"));
    }
    Ok(())
}

pub fn not_zero_time(dt: &DateTime<Utc>) -> std::result::Result<(), validator::ValidationError> {
    if is_zero_time(dt) {
        return Err(rule("zero_time", "cannot be the zero time"));
    }
    Ok(())
}

/// Escapes `LIKE` wildcards so a search fragment matches literally (used with `ESCAPE '\'`).
pub fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
