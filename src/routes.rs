//! HTTP router.
//!
//! Each service is mounted under its own prefix with the same set of
//! operations:
//!
//! | Method | Path                    |
//! |--------|-------------------------|
//! | POST   | `/api/{svc}/create`     |
//! | GET    | `/api/{svc}/fetch`      |
//! | PUT    | `/api/{svc}/update`     |
//! | DELETE | `/api/{svc}/delete`     |
//! | GET    | `/api/{svc}/build-info` |
//! | GET    | `/api/{svc}/contact-info` |
//!
//! Accounts also accepts `POST /api/accounts` for create, and serves the
//! aggregated `GET /api/accounts/fetchCustomerDetails`.

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::{
    handlers::{accounts, cards, customers, health, info, loans},
    middleware::api_path::attach_api_path,
    state::AppState,
};

fn accounts_routes() -> Router<AppState> {
    Router::new()
        // Create is also served on the bare prefix for older clients
        .route("/", post(accounts::create_account))
        .route("/create", post(accounts::create_account))
        .route("/fetch", get(accounts::fetch_account))
        .route("/update", put(accounts::update_account))
        .route("/delete", delete(accounts::delete_account))
        .route("/fetchCustomerDetails", get(customers::fetch_customer_details))
        .route("/build-info", get(info::build_info))
        .route("/contact-info", get(info::accounts_contact_info))
}

fn cards_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(cards::create_card))
        .route("/fetch", get(cards::fetch_card))
        .route("/update", put(cards::update_card))
        .route("/delete", delete(cards::delete_card))
        .route("/build-info", get(info::build_info))
        .route("/contact-info", get(info::cards_contact_info))
}

fn loans_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(loans::create_loan))
        .route("/fetch", get(loans::fetch_loan))
        .route("/update", put(loans::update_loan))
        .route("/delete", delete(loans::delete_loan))
        .route("/build-info", get(info::build_info))
        .route("/contact-info", get(info::loans_contact_info))
}

/// Build the full application router around `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/accounts", accounts_routes())
        .nest("/api/cards", cards_routes())
        .nest("/api/loans", loans_routes())
        // Error bodies learn their request path here
        .layer(axum_middleware::from_fn(attach_api_path))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
