use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::ApiError,
    handlers::consultation_dtos::{ConsultationResponse, CreateConsultationRequest},
    AppState,
};

pub async fn create_consultation(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateConsultationRequest>,
) -> Result<(StatusCode, Json<ConsultationResponse>), ApiError> {
    let new_consultation = req.into_new_consultation(
        Uuid::new_v4().to_string(),
        Utc::now().timestamp(),
    )?;

    let consultation = state.consultation_repository.create(new_consultation)?;
    info!(
        "New consultation {} for service {}",
        consultation.id, consultation.service_selection
    );

    Ok((StatusCode::CREATED, Json(consultation.into())))
}
