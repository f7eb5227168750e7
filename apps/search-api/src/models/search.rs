use serde::{Deserialize, Serialize};

/// Entity types the search provider can filter on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchCategory {
    #[default]
    #[serde(rename = "linkedin profile")]
    LinkedinProfile,
    #[serde(rename = "company")]
    Company,
}

impl SearchCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchCategory::LinkedinProfile => "linkedin profile",
            SearchCategory::Company => "company",
        }
    }
}

/// Request body for `POST /search/profiles`.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub category: SearchCategory,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    10
}

/// One raw hit as returned by the search provider: a handful of flat fields
/// plus an unstructured markdown-flavored text blob. Missing provider fields
/// deserialize to empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub text: String,
}

/// A single entry in a person's work history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkExperienceItem {
    pub title: String,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Not extracted at item level; kept for wire compatibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// A single entry in a person's education history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationItem {
    pub degree: String,
    pub field_of_study: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
}

/// Structured profile produced from one [`RawRecord`].
///
/// Flat fields are copied verbatim (empty string when the provider omitted
/// them); the remaining fields are heuristic extractions and may be absent
/// or empty when the text does not match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonProfile {
    pub id: String,
    pub url: String,
    pub title: String,
    pub author: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub work_experience: Vec<WorkExperienceItem>,
    pub education: Vec<EducationItem>,
    pub skills: Vec<String>,
}

/// Metadata about one search operation.
#[derive(Debug, Clone, Serialize)]
pub struct SearchMetadata {
    pub total_results: usize,
    pub search_time_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enhanced_query: Option<String>,
}

/// Response body for `POST /search/profiles`.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<PersonProfile>,
    pub metadata: SearchMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_fills_defaults() {
        let req: SearchRequest = serde_json::from_str(r#"{"query": "rust engineers"}"#).unwrap();
        assert_eq!(req.category, SearchCategory::LinkedinProfile);
        assert_eq!(req.limit, 10);
    }

    #[test]
    fn test_search_category_accepts_provider_spelling() {
        let cat: SearchCategory = serde_json::from_str(r#""linkedin profile""#).unwrap();
        assert_eq!(cat, SearchCategory::LinkedinProfile);
        let cat: SearchCategory = serde_json::from_str(r#""company""#).unwrap();
        assert_eq!(cat, SearchCategory::Company);
    }

    #[test]
    fn test_raw_record_tolerates_missing_fields() {
        let record: RawRecord = serde_json::from_str(r#"{"id": "abc"}"#).unwrap();
        assert_eq!(record.id, "abc");
        assert_eq!(record.url, "");
        assert_eq!(record.text, "");
    }

    #[test]
    fn test_profile_serialization_omits_absent_fields() {
        let profile = PersonProfile {
            id: "1".to_string(),
            url: "https://example.com".to_string(),
            title: String::new(),
            author: String::new(),
            image: String::new(),
            location: None,
            summary: None,
            work_experience: vec![],
            education: vec![],
            skills: vec![],
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("location").is_none());
        assert!(json.get("summary").is_none());
        // Container fields are always present, empty or not.
        assert!(json.get("work_experience").unwrap().as_array().unwrap().is_empty());
        assert!(json.get("skills").unwrap().as_array().unwrap().is_empty());
    }

    #[test]
    fn test_work_item_serialization_omits_absent_duration() {
        let item = WorkExperienceItem {
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            duration: None,
            location: None,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("duration").is_none());
        assert!(json.get("location").is_none());
    }
}
