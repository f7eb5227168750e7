// Prompt constants for the analysis model.

/// System prompt — pins the reviewer persona and forbids non-JSON output.
pub const ANALYSIS_SYSTEM: &str =
    "You are a senior HR professional and career advisor with 15+ years of \
    experience in resume review and talent acquisition, including ATS \
    optimization and industry-specific requirements. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Analysis prompt template body; job and résumé text are appended.
const ANALYSIS_INSTRUCTIONS: &str = r#"Extract the job's requirements from the scraped posting below and score the candidate's resume against them.

Workflow:
1. Identify the job title, required skills, experience and education requirements, and preferred qualifications from the posting.
2. Compute an overall match score (0-100) weighing technical skill alignment, experience relevance, education match, and keyword presence.
3. List the posting's keywords found in the resume and the important ones missing from it.
4. For each concrete requirement, quote the resume evidence that supports it (or "Not mentioned").
5. Give specific, actionable suggestions for improving the resume against this posting.

Return a JSON object with this EXACT schema (no extra fields):
{
  "match_score": 85.5,
  "summary": "Brief 2-3 sentence professional assessment including the extracted job title",
  "keyword_analysis": {
    "matched_keywords": ["Python", "Machine Learning", "AWS"],
    "missing_keywords": ["Docker", "Kubernetes", "CI/CD"]
  },
  "experience_match": [
    {
      "job_requirement": "3+ years of Python development experience",
      "resume_evidence": "Specific evidence from resume or 'Not mentioned'",
      "is_match": true
    }
  ],
  "suggestions": [
    "Add Docker and containerization experience to your skills section"
  ]
}

Base the analysis only on the provided content and be honest and constructive."#;

/// Builds the full analysis prompt for one résumé / job pair.
pub fn analysis_prompt(resume_text: &str, job_text: &str) -> String {
    format!(
        "{ANALYSIS_INSTRUCTIONS}\n\n\
         SCRAPED JOB POSTING CONTENT:\n{job_text}\n\n\
         CANDIDATE RESUME CONTENT:\n{resume_text}\n"
    )
}
