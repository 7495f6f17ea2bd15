//! Accounts HTTP handlers.
//!
//! This module implements the account-related API endpoints:
//! - POST /api/accounts/create - Register a customer and open a savings account
//! - GET /api/accounts/fetch?mobileNumber= - Get customer with account
//! - PUT /api/accounts/update - Update customer and account details
//! - DELETE /api/accounts/delete?mobileNumber= - Delete customer and account

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use validator::Validate;

use crate::{
    error::AppError,
    extractors::{AppJson, AppQuery},
    models::{
        account::CustomerDto,
        request::MobileNumberParams,
        response::{ResponseDto, STATUS_201},
    },
    state::AppState,
};

use super::{deleted_response, updated_response};

/// Create a new customer and account.
///
/// # Request Body
///
/// ```json
/// {
///   "name": "John Doe",
///   "email": "john@example.com",
///   "mobileNumber": "9876543210"
/// }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: `{"statusCode": "201", "statusMessage": "Account created successfully"}`
/// - **Error (400)**: Validation failure, or the mobile number is already registered
/// - **Error (500)**: Database error
pub async fn create_account(
    State(state): State<AppState>,
    AppJson(request): AppJson<CustomerDto>,
) -> Result<(StatusCode, Json<ResponseDto>), AppError> {
    request.validate()?;

    state.accounts.create_account(&request).await?;

    Ok((
        StatusCode::CREATED,
        Json(ResponseDto::new(STATUS_201, "Account created successfully")),
    ))
}

/// Get a customer and account by mobile number.
///
/// # Response
///
/// - **Success (200 OK)**: Returns `CustomerDto` with `accountsDto` populated
/// - **Error (404)**: Customer or account not found
pub async fn fetch_account(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<MobileNumberParams>,
) -> Result<Json<CustomerDto>, AppError> {
    params.validate()?;

    let customer = state.accounts.fetch_account(&params.mobile_number).await?;

    Ok(Json(customer))
}

/// Update customer and account details.
///
/// # Response
///
/// - **Success (200 OK)**: Updated
/// - **417 Expectation Failed**: Body has no `accountsDto` section
/// - **Error (404)**: Unknown account number
pub async fn update_account(
    State(state): State<AppState>,
    AppJson(request): AppJson<CustomerDto>,
) -> Result<(StatusCode, Json<ResponseDto>), AppError> {
    request.validate()?;

    let updated = state.accounts.update_account(&request).await?;

    Ok(updated_response(updated))
}

/// Delete customer and account by mobile number.
pub async fn delete_account(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<MobileNumberParams>,
) -> Result<(StatusCode, Json<ResponseDto>), AppError> {
    params.validate()?;

    let deleted = state.accounts.delete_account(&params.mobile_number).await?;

    Ok(deleted_response(deleted))
}
