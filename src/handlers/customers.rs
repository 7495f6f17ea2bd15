//! Aggregated customer view.
//!
//! `GET /api/accounts/fetchCustomerDetails?mobileNumber=` merges the account,
//! card and loan held by one mobile number.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppError,
    extractors::AppQuery,
    models::{request::MobileNumberParams, response::CustomerDetailsDto},
    state::AppState,
};

/// Header carrying the request correlation id.
pub const CORRELATION_ID_HEADER: &str = "eazybank-correlation-id";

/// Fetch customer details.
///
/// The correlation id is read from the `eazybank-correlation-id` header, or
/// generated when the caller sent none, and echoed on the response.
///
/// # Response
///
/// - **Success (200 OK)**: `CustomerDetailsDto`
/// - **Error (404)**: No customer or account for the mobile number
pub async fn fetch_customer_details(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppQuery(params): AppQuery<MobileNumberParams>,
) -> Result<(HeaderMap, Json<CustomerDetailsDto>), AppError> {
    params.validate()?;

    let correlation_id = headers
        .get(CORRELATION_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let details = state
        .customers
        .fetch_customer_details(&params.mobile_number, &correlation_id)
        .await?;

    let mut response_headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&correlation_id) {
        response_headers.insert(CORRELATION_ID_HEADER, value);
    }

    Ok((response_headers, Json(details)))
}
