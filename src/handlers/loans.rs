//! Loans HTTP handlers.
//!
//! - POST /api/loans/create?mobileNumber= - Open a default loan
//! - GET /api/loans/fetch?mobileNumber= - Get the loan held by a mobile number
//! - PUT /api/loans/update - Update loan details
//! - DELETE /api/loans/delete?mobileNumber= - Delete the loan

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
        loan::LoansDto,
        request::MobileNumberParams,
        response::{ResponseDto, STATUS_201},
    },
    state::AppState,
};

use super::{deleted_response, updated_response};

/// Create a loan.
///
/// # Response
///
/// - **201 Created**: `{"statusCode": "201", "statusMessage": "Loan created successfully"}`
/// - **400**: Invalid mobile number, or a loan already exists for it
pub async fn create_loan(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<MobileNumberParams>,
) -> Result<(StatusCode, Json<ResponseDto>), AppError> {
    params.validate()?;

    state.loans.create_loan(&params.mobile_number).await?;

    Ok((
        StatusCode::CREATED,
        Json(ResponseDto::new(STATUS_201, "Loan created successfully")),
    ))
}

/// Fetch the loan held by a mobile number.
///
/// - **200 OK**: the loan
/// - **404**: no loan for the mobile number
pub async fn fetch_loan(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<MobileNumberParams>,
) -> Result<Json<LoansDto>, AppError> {
    params.validate()?;

    let loan = state.loans.fetch_loan(&params.mobile_number).await?;

    Ok(Json(loan))
}

/// Update a loan, addressed by `loanNumber` in the body.
///
/// - **200 OK**: updated
/// - **404**: unknown loan number
pub async fn update_loan(
    State(state): State<AppState>,
    AppJson(request): AppJson<LoansDto>,
) -> Result<(StatusCode, Json<ResponseDto>), AppError> {
    request.validate()?;

    let updated = state.loans.update_loan(request).await?;

    Ok(updated_response(updated))
}

pub async fn delete_loan(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<MobileNumberParams>,
) -> Result<(StatusCode, Json<ResponseDto>), AppError> {
    params.validate()?;

    let deleted = state.loans.delete_loan(&params.mobile_number).await?;

    Ok(deleted_response(deleted))
}
