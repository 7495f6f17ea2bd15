//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, query params)
//! 2. Validates it and calls the matching domain service
//! 3. Returns HTTP response (JSON, status code)

use axum::{Json, http::StatusCode};

use crate::models::response::{
    MESSAGE_200, MESSAGE_417_DELETE, MESSAGE_417_UPDATE, ResponseDto, STATUS_200, STATUS_417,
};

/// Accounts service endpoints
pub mod accounts;
/// Cards service endpoints
pub mod cards;
/// Aggregated customer view
pub mod customers;
pub mod health;
/// Build and contact information endpoints
pub mod info;
/// Loans service endpoints
pub mod loans;

/// 200 when the update went through, 417 Expectation Failed otherwise.
pub(crate) fn updated_response(updated: bool) -> (StatusCode, Json<ResponseDto>) {
    if updated {
        (
            StatusCode::OK,
            Json(ResponseDto::new(STATUS_200, MESSAGE_200)),
        )
    } else {
        (
            StatusCode::EXPECTATION_FAILED,
            Json(ResponseDto::new(STATUS_417, MESSAGE_417_UPDATE)),
        )
    }
}

/// 200 when the delete went through, 417 Expectation Failed otherwise.
pub(crate) fn deleted_response(deleted: bool) -> (StatusCode, Json<ResponseDto>) {
    if deleted {
        (
            StatusCode::OK,
            Json(ResponseDto::new(STATUS_200, MESSAGE_200)),
        )
    } else {
        (
            StatusCode::EXPECTATION_FAILED,
            Json(ResponseDto::new(STATUS_417, MESSAGE_417_DELETE)),
        )
    }
}
