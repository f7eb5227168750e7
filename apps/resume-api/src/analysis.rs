//! End-to-end résumé analysis pipeline.

use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::AnalysisReport;
use crate::state::AppState;
use crate::storage;

/// Runs the full pipeline for one uploaded résumé against one job URL:
/// download → text extraction → job scrape → LLM analysis.
///
/// A stage that produces no usable text short-circuits with a 400; the
/// model is never called with an empty document.
pub async fn analyze_resume_against_job_url(
    state: &AppState,
    file_id: Uuid,
    job_url: &str,
) -> Result<AnalysisReport, AppError> {
    info!("extracting resume text for {file_id}");
    let pdf = storage::download_resume(&state.s3, &state.config.s3_bucket, file_id).await?;
    let resume_text = state.docparse.extract_text(pdf).await?;
    if resume_text.is_empty() {
        return Err(AppError::Validation(
            "Failed to extract meaningful content from resume PDF.".to_string(),
        ));
    }

    info!("scraping job posting: {job_url}");
    let job_text = state.crawler.scrape(job_url).await?;
    if job_text.is_empty() {
        return Err(AppError::Validation(
            "Failed to extract content from job posting URL.".to_string(),
        ));
    }

    info!("generating analysis report");
    let report = state.llm.generate_analysis(&resume_text, &job_text).await?;
    info!("analysis complete, match score {:.1}%", report.match_score);
    Ok(report)
}
