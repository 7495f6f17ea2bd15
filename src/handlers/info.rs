//! Build and contact information, exposed under every service prefix.

use axum::{Json, extract::State};

use crate::{models::response::ContactInfoDto, state::AppState};

/// Configured build version as plain text.
pub async fn build_info(State(state): State<AppState>) -> String {
    state.config.build_version.clone()
}

pub async fn accounts_contact_info(State(state): State<AppState>) -> Json<ContactInfoDto> {
    Json(state.config.contact_info("Accounts"))
}

pub async fn cards_contact_info(State(state): State<AppState>) -> Json<ContactInfoDto> {
    Json(state.config.contact_info("Cards"))
}

pub async fn loans_contact_info(State(state): State<AppState>) -> Json<ContactInfoDto> {
    Json(state.config.contact_info("Loans"))
}
