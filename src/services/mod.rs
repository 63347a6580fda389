pub mod application_service;
pub mod association_service;
pub mod company_service;
pub mod event_service;
pub mod person_service;

use crate::error::Error;

/// Logs a failed service call at a level matching its kind.
pub(crate) fn log_failure(operation: &str, err: &Error) {
    match err {
        Error::Internal(_) | Error::Config(_) => {
            tracing::error!(operation, error = %err, "service call failed")
        }
        Error::NotFound(_) => tracing::debug!(operation, error = %err, "service call failed"),
        Error::Validation { .. } | Error::Conflict(_) => {
            tracing::warn!(operation, error = %err, "service call failed")
        }
    }
}
