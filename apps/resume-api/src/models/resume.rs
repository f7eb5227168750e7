use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response for a successful résumé upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub file_id: Uuid,
    pub message: String,
}

/// Request body for `POST /resume/analyze`.
#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    /// Id returned by `/resume/upload`.
    pub file_id: Uuid,
    /// URL of the job posting to score the résumé against.
    pub job_url: String,
}

/// Keyword coverage of the résumé against the posting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordAnalysis {
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
}

/// One job requirement with the résumé evidence found for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceMatchItem {
    pub job_requirement: String,
    pub resume_evidence: String,
    pub is_match: bool,
}

/// Structured analysis produced by the LLM — the exact JSON schema the
/// model is prompted to emit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Overall percentage match, 0–100.
    pub match_score: f64,
    pub summary: String,
    pub keyword_analysis: KeywordAnalysis,
    pub experience_match: Vec<ExperienceMatchItem>,
    pub suggestions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_report_deserializes_full_schema() {
        let json = r#"{
            "match_score": 85.5,
            "summary": "Strong backend candidate for the platform role.",
            "keyword_analysis": {
                "matched_keywords": ["Python", "AWS"],
                "missing_keywords": ["Docker", "Kubernetes"]
            },
            "experience_match": [
                {
                    "job_requirement": "3+ years of Python development experience",
                    "resume_evidence": "5 years at Acme building Python services",
                    "is_match": true
                }
            ],
            "suggestions": [
                "Add Docker and containerization experience to your skills section"
            ]
        }"#;

        let report: AnalysisReport = serde_json::from_str(json).unwrap();
        assert!((report.match_score - 85.5).abs() < f64::EPSILON);
        assert_eq!(report.keyword_analysis.matched_keywords.len(), 2);
        assert_eq!(report.keyword_analysis.missing_keywords[0], "Docker");
        assert_eq!(report.experience_match.len(), 1);
        assert!(report.experience_match[0].is_match);
        assert_eq!(report.suggestions.len(), 1);
    }

    #[test]
    fn test_analysis_request_requires_uuid() {
        let ok: Result<AnalysisRequest, _> = serde_json::from_str(
            r#"{"file_id": "b0f0f6d4-3e1e-4f1f-9d43-0f4f0b9d1a2b", "job_url": "https://example.com/job"}"#,
        );
        assert!(ok.is_ok());

        let bad: Result<AnalysisRequest, _> =
            serde_json::from_str(r#"{"file_id": "not-a-uuid", "job_url": "x"}"#);
        assert!(bad.is_err());
    }
}
