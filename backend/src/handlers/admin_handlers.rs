use std::sync::Arc;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use tracing::info;

use crate::{
    error::ApiError,
    handlers::consultation_dtos::{ConsultationResponse, ListConsultationsQuery, UpdateStatusRequest},
    AppState,
};

pub async fn list_consultations(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListConsultationsQuery>,
) -> Result<Json<Vec<ConsultationResponse>>, ApiError> {
    let consultations = state
        .consultation_repository
        .list(query.status.as_deref())?;

    Ok(Json(consultations.into_iter().map(Into::into).collect()))
}

pub async fn update_consultation_status(
    State(state): State<Arc<AppState>>,
    Path(consultation_id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<ConsultationResponse>, ApiError> {
    let status = req.validated_status()?;

    let updated = state
        .consultation_repository
        .update_status(&consultation_id, status, Utc::now().timestamp())?;
    if !updated {
        return Err(ApiError::NotFound(format!("No consultation with id {}", consultation_id)));
    }
    info!("Consultation {} moved to {}", consultation_id, status);

    let consultation = state
        .consultation_repository
        .find_by_id(&consultation_id)?
        .ok_or_else(|| ApiError::NotFound(format!("No consultation with id {}", consultation_id)))?;
    Ok(Json(consultation.into()))
}
