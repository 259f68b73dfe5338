//! Saloon setup endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use super::{json_body, success, ApiResult, MessageBody, SaloonList};
use crate::errors::messages;
use crate::models::SaloonSetupRequest;
use crate::AppState;

/// POST /createSaloonSetup - Attach location and opening hours to a saloon.
pub async fn create_saloon_setup(
    State(state): State<AppState>,
    payload: Result<Json<SaloonSetupRequest>, JsonRejection>,
) -> ApiResult<MessageBody> {
    let (saloon_id, setup) = json_body(payload, messages::ALL_FIELDS_REQUIRED)?.validate()?;
    state.store.attach_setup(&saloon_id, setup).await?;

    success(MessageBody {
        message: "Saloon setup data added successfully!",
    })
}

/// GET /viewAllSaloonsData - List every saloon including setup data.
pub async fn view_all_saloons_data(State(state): State<AppState>) -> ApiResult<SaloonList> {
    let saloons = state.store.list_all().await;
    success(SaloonList::new(saloons, "No saloons data found."))
}
