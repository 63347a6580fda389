use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use sqlx::error::DatabaseError as _;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("{}", render_validation(.field.as_deref(), .message))]
    Validation {
        field: Option<String>,
        message: String,
    },

    #[error("error: object not found: {0}")]
    NotFound(String),

    #[error("conflict error on insert: {0}")]
    Conflict(String),

    #[error("internal service error: {0}")]
    Internal(String),

    #[error("configuration error: {0}")]
    Config(String),
}

fn render_validation(field: Option<&str>, message: &str) -> String {
    match field {
        Some(field) => format!("validation error on field '{}': {}", field, message),
        None => format!("validation error: {}", message),
    }
}

pub const FOREIGN_KEY_MISSING: &str = "Foreign key does not exist";

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    pub fn validation_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Error::Validation { .. } => "validation_error",
            Error::NotFound(_) => "not_found",
            Error::Conflict(_) => "conflict",
            Error::Internal(_) | Error::Config(_) => "internal_error",
        }
    }

    /// Classifies a failed INSERT. Unique and primary-key violations become
    /// [`Error::Conflict`] with `conflict_detail`, missing referents become a
    /// validation error, anything else is internal.
    pub fn from_insert(err: sqlx::Error, conflict_detail: &str) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return Error::Conflict(conflict_detail.to_string());
            }
            if db_err.is_foreign_key_violation() {
                return Error::validation(FOREIGN_KEY_MISSING);
            }
        }
        Error::Internal(err.to_string())
    }

    pub fn from_write(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_foreign_key_violation() {
                return Error::validation(FOREIGN_KEY_MISSING);
            }
        }
        Error::Internal(err.to_string())
    }

    pub fn from_delete(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_foreign_key_violation() {
                return Error::validation("record is still referenced by other records");
            }
        }
        Error::Internal(err.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            Error::Validation { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::Internal(_) | Error::Config(_) => {
                tracing::error!(error = %self, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.kind(), "message": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound("Resource not found".to_string()),
            other => Error::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for Error {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Error::Internal(format!("migration failed: {}", err))
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        for (field, field_errors) in fields {
            if let Some(first) = field_errors.first() {
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| first.code.to_string());
                return Error::validation_field(field.to_string(), message);
            }
        }

        Error::validation(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_canonical_messages() {
        assert_eq!(
            Error::validation("nothing to update").to_string(),
            "validation error: nothing to update"
        );
        assert_eq!(
            Error::validation_field("Name", "cannot be empty").to_string(),
            "validation error on field 'Name': cannot be empty"
        );
        assert_eq!(
            Error::NotFound("company 42".into()).to_string(),
            "error: object not found: company 42"
        );
        assert_eq!(
            Error::Conflict("ApplicationID and EventID combination already exists in database.".into())
                .to_string(),
            "conflict error on insert: ApplicationID and EventID combination already exists in database."
        );
        assert_eq!(
            Error::Internal("boom".into()).to_string(),
            "internal service error: boom"
        );
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err: Error = sqlx::Error::RowNotFound.into();
        assert_eq!(err.kind(), "not_found");
    }
}
