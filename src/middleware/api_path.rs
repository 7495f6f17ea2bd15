//! Fills in the `apiPath` field of error responses.
//!
//! [`AppError`](crate::error::AppError) renders its body without knowing which
//! request failed and leaves a copy of the body in the response extensions.
//! This middleware sees the request URI, so it re-renders that body with
//! `apiPath` set.

use axum::{
    Json,
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::models::response::ErrorResponseDto;

pub async fn attach_api_path(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let Some(body) = response.extensions().get::<ErrorResponseDto>().cloned() else {
        return response;
    };

    let status = response.status();
    let body = ErrorResponseDto {
        api_path: format!("uri={path}"),
        ..body
    };

    (status, Json(body)).into_response()
}
