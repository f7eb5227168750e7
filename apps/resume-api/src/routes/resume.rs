use axum::extract::{Multipart, State};
use axum::http::HeaderMap;
use axum::Json;
use tracing::info;

use crate::analysis::analyze_resume_against_job_url;
use crate::auth::bearer_token;
use crate::errors::AppError;
use crate::models::resume::{AnalysisRequest, AnalysisReport, UploadResponse};
use crate::state::AppState;
use crate::storage;

/// POST /resume/upload
///
/// Accepts one multipart PDF under the `file` field and stores it for
/// later analysis.
pub async fn handle_upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let user_id = state.verifier.verify(bearer_token(&headers)?).await?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("File has no name.".to_string()))?;
        if !filename.to_lowercase().ends_with(".pdf") {
            return Err(AppError::Validation(
                "Only PDF files are allowed.".to_string(),
            ));
        }

        let contents = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;

        let file_id =
            storage::upload_resume(&state.s3, &state.config.s3_bucket, contents).await?;
        info!("resume {file_id} uploaded by user {user_id}");

        return Ok(Json(UploadResponse {
            file_id,
            message: "Resume uploaded successfully. Ready for analysis.".to_string(),
        }));
    }

    Err(AppError::Validation(
        "Multipart field 'file' is required.".to_string(),
    ))
}

/// POST /resume/analyze
///
/// Scores a previously uploaded résumé against a job posting URL.
pub async fn handle_analyze(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<AnalysisRequest>,
) -> Result<Json<AnalysisReport>, AppError> {
    let user_id = state.verifier.verify(bearer_token(&headers)?).await?;
    info!("analysis of {} requested by user {user_id}", req.file_id);

    let report = analyze_resume_against_job_url(&state, req.file_id, &req.job_url).await?;
    Ok(Json(report))
}
