//! Cards HTTP handlers.
//!
//! - POST /api/cards/create?mobileNumber= - Issue a default card
//! - GET /api/cards/fetch?mobileNumber= - Get the card held by a mobile number
//! - PUT /api/cards/update - Update card details
//! - DELETE /api/cards/delete?mobileNumber= - Delete the card

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
        card::CardsDto,
        request::MobileNumberParams,
        response::{ResponseDto, STATUS_201},
    },
    state::AppState,
};

use super::{deleted_response, updated_response};

/// Create a card.
///
/// # Response
///
/// - **201 Created**: `{"statusCode": "201", "statusMessage": "Card created successfully"}`
/// - **400**: Invalid mobile number, or a card already exists for it
pub async fn create_card(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<MobileNumberParams>,
) -> Result<(StatusCode, Json<ResponseDto>), AppError> {
    params.validate()?;

    state.cards.create_card(&params.mobile_number).await?;

    Ok((
        StatusCode::CREATED,
        Json(ResponseDto::new(STATUS_201, "Card created successfully")),
    ))
}

/// Fetch the card held by a mobile number.
///
/// - **200 OK**: the card
/// - **404**: no card for the mobile number
pub async fn fetch_card(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<MobileNumberParams>,
) -> Result<Json<CardsDto>, AppError> {
    params.validate()?;

    let card = state.cards.fetch_card(&params.mobile_number).await?;

    Ok(Json(card))
}

/// Update a card, addressed by `cardNumber` in the body.
///
/// - **200 OK**: updated
/// - **404**: unknown card number
pub async fn update_card(
    State(state): State<AppState>,
    AppJson(request): AppJson<CardsDto>,
) -> Result<(StatusCode, Json<ResponseDto>), AppError> {
    request.validate()?;

    let updated = state.cards.update_card(request).await?;

    Ok(updated_response(updated))
}

pub async fn delete_card(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<MobileNumberParams>,
) -> Result<(StatusCode, Json<ResponseDto>), AppError> {
    params.validate()?;

    let deleted = state.cards.delete_card(&params.mobile_number).await?;

    Ok(deleted_response(deleted))
}
