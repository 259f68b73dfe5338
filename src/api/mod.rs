//! REST API module.
//!
//! Contains all API routes and handlers following the saloon client contract.

mod saloons;
mod setup;

pub use saloons::*;
pub use setup::*;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::Saloon;

/// Success response carrying its own status code.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub status: StatusCode,
    pub body: T,
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// Create a 200 response.
pub fn success<T: Serialize>(body: T) -> ApiResult<T> {
    Ok(ApiResponse {
        status: StatusCode::OK,
        body,
    })
}

/// Create a 201 response.
pub fn created<T: Serialize>(body: T) -> ApiResult<T> {
    Ok(ApiResponse {
        status: StatusCode::CREATED,
        body,
    })
}

/// Body holding only a human-readable message.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

/// Listing body: the records, or a message when there are none.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SaloonList {
    Saloons(Vec<Saloon>),
    Empty(MessageBody),
}

impl SaloonList {
    fn new(saloons: Vec<Saloon>, empty_message: &'static str) -> Self {
        if saloons.is_empty() {
            SaloonList::Empty(MessageBody {
                message: empty_message,
            })
        } else {
            SaloonList::Saloons(saloons)
        }
    }
}

/// Unwrap a JSON body, reporting an unreadable body as a validation error.
fn json_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    message: &'static str,
) -> Result<T, AppError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            tracing::debug!("Rejected request body: {}", rejection.body_text());
            Err(AppError::Validation {
                message,
                field: "body",
            })
        }
    }
}
