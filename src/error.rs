//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::models::response::ErrorResponseDto;

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Domain faults**: `AlreadyExists` and `NotFound`, raised by the domain services
/// - **Request errors**: `Validation` and `InvalidRequest`
/// - **Infrastructure errors**: `Database` and `Internal`
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (e.g., connection error, query error).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A record already exists for the owner key.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("{0}")]
    AlreadyExists(String),

    /// Lookup by owner key or record identifier found nothing.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("{resource} not found with the given input data {field} : '{value}'")]
    NotFound {
        resource: &'static str,
        field: &'static str,
        value: String,
    },

    /// Request body or query parameters failed validation.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("Validation failed: {}", validation_summary(.0))]
    Validation(#[from] ValidationErrors),

    /// Request was well-formed but breaks a domain rule.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("{0}")]
    InvalidRequest(String),

    /// Unexpected failure that is not the caller's fault.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(resource: &'static str, field: &'static str, value: impl ToString) -> Self {
        Self::NotFound {
            resource,
            field,
            value: value.to_string(),
        }
    }

    /// Translate a unique-constraint violation into `AlreadyExists`.
    ///
    /// Any other sqlx error is kept as `Database`.
    pub fn from_insert(err: sqlx::Error, conflict: impl FnOnce() -> String) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => Self::AlreadyExists(conflict()),
            _ => Self::Database(err),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::AlreadyExists(_)
            | AppError::Validation(_)
            | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Unreadable or incomplete JSON body.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

/// Missing or malformed query string.
impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

/// `HttpStatus`-style name for a status code, e.g. `NOT_FOUND`.
pub fn status_name(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("UNKNOWN")
        .to_uppercase()
        .replace([' ', '-'], "_")
}

/// Flatten validator output into sorted `field: message` lines.
fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut out = Vec::new();
    collect_messages("", errors, &mut out);
    out.sort();
    out
}

fn validation_summary(errors: &ValidationErrors) -> String {
    validation_messages(errors).join("; ")
}

fn collect_messages(prefix: &str, errors: &ValidationErrors, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let name: &str = field;
        let path = if prefix.is_empty() {
            camel_case(name)
        } else {
            format!("{prefix}.{}", camel_case(name))
        };

        match kind {
            ValidationErrorsKind::Field(list) => {
                for error in list {
                    let message = error.message.as_deref().unwrap_or(&*error.code);
                    out.push(format!("{path}: {message}"));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_messages(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_messages(&format!("{path}[{index}]"), inner, out);
                }
            }
        }
    }
}

/// Validator reports Rust field names; clients see camelCase.
fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for c in name.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "apiPath": "uri=/api/cards/fetch",
///   "errorCode": "NOT_FOUND",
///   "errorMessage": "Card not found with the given input data mobileNumber : '9876543210'",
///   "errorTime": "2025-12-20T10:00:00Z"
/// }
/// ```
///
/// `apiPath` is left empty here and filled in by
/// [`crate::middleware::api_path::attach_api_path`], which sees the request URI.
/// The body is also stored in the response extensions for that purpose.
///
/// # Status Code Mapping
///
/// - `AlreadyExists`, `Validation`, `InvalidRequest` → 400 Bad Request
/// - `NotFound` → 404 Not Found
/// - `Database`, `Internal` → 500 Internal Server Error (hides details from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                "An internal error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                "An internal error occurred".to_string()
            }
            AppError::Validation(errors) => validation_summary(errors),
            other => other.to_string(),
        };

        let body = ErrorResponseDto {
            api_path: String::new(),
            error_code: status_name(status),
            error_message: message,
            error_time: Utc::now(),
        };

        let mut response = (status, Json(body.clone())).into_response();
        response.extensions_mut().insert(body);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use validator::Validate;

    use crate::models::{
        account::{AccountsDto, CustomerDto},
        request::MobileNumberParams,
    };

    #[test]
    fn not_found_message_names_the_lookup() {
        let err = AppError::not_found("Loan", "mobileNumber", "9876543210");

        assert_eq!(
            err.to_string(),
            "Loan not found with the given input data mobileNumber : '9876543210'"
        );
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn already_exists_is_a_bad_request() {
        let err = AppError::AlreadyExists("Card already registered".into());

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn status_names_match_http_status_enum_style() {
        assert_eq!(status_name(StatusCode::NOT_FOUND), "NOT_FOUND");
        assert_eq!(status_name(StatusCode::EXPECTATION_FAILED), "EXPECTATION_FAILED");
        assert_eq!(
            status_name(StatusCode::INTERNAL_SERVER_ERROR),
            "INTERNAL_SERVER_ERROR"
        );
    }

    #[test]
    fn validation_messages_use_wire_field_names() {
        let params = MobileNumberParams {
            mobile_number: "12345".into(),
        };
        let err = AppError::from(params.validate().unwrap_err());

        assert_eq!(
            err.to_string(),
            "Validation failed: mobileNumber: Mobile number must be a 10-digit number."
        );
    }

    #[test]
    fn validation_summary_is_sorted_and_follows_nested_fields() {
        let dto = CustomerDto {
            name: "Jo".into(),
            email: "jane@example.com".into(),
            mobile_number: "9876543210".into(),
            accounts_dto: Some(AccountsDto {
                account_number: 42,
                account_type: "Savings".into(),
                branch_address: "1 High Street".into(),
            }),
        };

        let errors = dto.validate().unwrap_err();

        assert_eq!(
            validation_summary(&errors),
            "accountsDto.accountNumber: Account number must be a 10-digit number.; \
             name: Name must be between 5 and 30 characters."
        );
    }

    #[test]
    fn camel_case_converts_snake_case() {
        assert_eq!(camel_case("accounts_dto"), "accountsDto");
        assert_eq!(camel_case("name"), "name");
    }
}
