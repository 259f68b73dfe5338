//! Saloon account endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Serialize;

use super::{created, json_body, success, ApiResult, MessageBody, SaloonList};
use crate::errors::{messages, AppError};
use crate::models::{CreateSaloonRequest, LoginRequest, Saloon, UpdateSaloonRequest};
use crate::AppState;

/// Body of a successful `POST /createSaloon`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedSaloon {
    pub message: &'static str,
    pub new_saloon: Saloon,
}

/// Body of a successful `POST /loginSaloon`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginSuccess {
    pub message: &'static str,
    pub saloon_id: String,
    pub saloon_name: String,
    pub status: String,
}

/// POST /createSaloon - Register a new saloon.
pub async fn create_saloon(
    State(state): State<AppState>,
    payload: Result<Json<CreateSaloonRequest>, JsonRejection>,
) -> ApiResult<CreatedSaloon> {
    let new_saloon = json_body(payload, messages::ALL_FIELDS_REQUIRED)?.validate()?;
    let saloon = state.store.create(new_saloon).await?;

    created(CreatedSaloon {
        message: "Saloon created successfully!",
        new_saloon: saloon,
    })
}

/// GET /viewAllSaloons - List every saloon.
pub async fn view_all_saloons(State(state): State<AppState>) -> ApiResult<SaloonList> {
    let saloons = state.store.list_all().await;
    success(SaloonList::new(saloons, "No saloons found."))
}

/// PUT /editSaloon/:id - Replace a saloon's account fields.
pub async fn edit_saloon(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateSaloonRequest>, JsonRejection>,
) -> ApiResult<MessageBody> {
    let update = json_body(payload, messages::ALL_FIELDS_REQUIRED)?.validate()?;
    state.store.update(&id, update).await?;

    success(MessageBody {
        message: "Saloon updated successfully!",
    })
}

/// POST /loginSaloon - Check an email/password pair.
pub async fn login_saloon(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<LoginSuccess> {
    let (email, password) = json_body(payload, messages::LOGIN_FIELDS_REQUIRED)?.validate()?;

    let Some(saloon) = state.store.find_by_credentials(&email, &password).await else {
        tracing::info!("Rejected login attempt");
        return Err(AppError::InvalidCredentials);
    };

    success(LoginSuccess {
        message: "Login successful.",
        saloon_id: saloon.saloon_id,
        saloon_name: saloon.saloon_name,
        status: saloon.status,
    })
}

/// GET /getSaloonData/:saloonId - Get a single saloon.
pub async fn get_saloon_data(
    State(state): State<AppState>,
    Path(saloon_id): Path<String>,
) -> ApiResult<Saloon> {
    match state.store.find_by_id(&saloon_id).await {
        Some(saloon) => success(saloon),
        None => Err(AppError::NotFound(saloon_id)),
    }
}
