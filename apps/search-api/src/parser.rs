//! Profile text parser — converts raw search-provider records into
//! structured [`PersonProfile`]s.
//!
//! The provider returns profile pages as loosely structured, crawler-produced
//! markdown with no formal grammar. Each extractor below keys off one
//! heuristic section marker and degrades to an absent/empty value when the
//! marker is missing or the segment is malformed: partial profile data is
//! more useful to callers than rejecting the whole record. Segments that
//! cannot be parsed are dropped individually, never the record.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::search::{EducationItem, PersonProfile, RawRecord, WorkExperienceItem};

/// Bracketed location tags the crawler emits, e.g. `[se]` or `[US]`.
static LOCATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[(se|us|other)\]").expect("valid location regex"));

/// `skills: [Python, Rust, ...]` — first occurrence, any case.
static SKILLS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)skills: \[(.*?)\]").expect("valid skills regex"));

/// Marker opening each work-history / education entry.
const ENTRY_MARKER: &str = "- ###";

/// Header opening the free-text summary section.
const SUMMARY_MARKER: &str = "## About me\n";

/// Characters stripped from the ends of company and institution names.
const BRACKET_TRIM: &[char] = &[' ', '[', ']'];

/// Converts one raw record into a structured profile.
///
/// Pure and infallible: flat fields are copied verbatim and every extractor
/// runs independently over `text`, so a malformed blob yields a sparse
/// profile rather than an error.
pub fn parse_record(raw: &RawRecord) -> PersonProfile {
    PersonProfile {
        id: raw.id.clone(),
        url: raw.url.clone(),
        title: raw.title.clone(),
        author: raw.author.clone(),
        image: raw.image.clone(),
        location: extract_location(&raw.text),
        summary: extract_summary(&raw.text),
        work_experience: extract_work_experience(&raw.text),
        education: extract_education(&raw.text),
        skills: extract_skills(&raw.text),
    }
}

/// First bracketed location tag, brackets included. Later tags are ignored.
fn extract_location(text: &str) -> Option<String> {
    LOCATION_RE.find(text).map(|m| m.as_str().to_string())
}

/// Free text between the `## About me` header and the next `##` header
/// (or end of text), trimmed.
///
/// A present-but-empty section yields `None`, same as a missing header;
/// callers cannot distinguish the two. See DESIGN.md before changing this.
fn extract_summary(text: &str) -> Option<String> {
    let (_, after) = text.split_once(SUMMARY_MARKER)?;
    let body = after.split_once("##").map_or(after, |(before, _)| before);
    let body = body.trim();
    if body.is_empty() {
        None
    } else {
        Some(body.to_string())
    }
}

/// Work-history entries. Text before the first `- ###` marker is discarded;
/// each remaining segment is parsed independently and dropped if malformed.
fn extract_work_experience(text: &str) -> Vec<WorkExperienceItem> {
    text.split(ENTRY_MARKER)
        .skip(1)
        .filter_map(parse_work_segment)
        .collect()
}

/// Parses one work segment of the shape `<title> at <company>\n<duration>`.
///
/// The split happens at the first occurrence of the literal `"at"`, even
/// mid-word (historical behavior, see DESIGN.md); segments without it are
/// skipped. The duration is whatever follows the first newline, absent when
/// the segment is a single line.
fn parse_work_segment(segment: &str) -> Option<WorkExperienceItem> {
    let (title, rest) = segment.split_once("at")?;
    let rest = rest.trim();
    let (company, duration) = match rest.split_once('\n') {
        Some((company, duration)) => (company, Some(duration.to_string())),
        None => (rest, None),
    };
    Some(WorkExperienceItem {
        title: title.trim().to_string(),
        company: company.trim_matches(BRACKET_TRIM).to_string(),
        duration,
        location: None,
    })
}

/// Education entries. Segments are re-split from the full text; a segment
/// qualifies when it mentions `Education` or `degree` (any case), and every
/// `<degree> || <field> at <institution>` line inside it contributes one
/// entry. Lines without the `||` delimiter are skipped.
fn extract_education(text: &str) -> Vec<EducationItem> {
    text.split(ENTRY_MARKER)
        .filter(|segment| segment.contains("Education") || segment.to_lowercase().contains("degree"))
        .flat_map(|segment| segment.split('\n'))
        .filter_map(parse_education_line)
        .collect()
}

/// Parses one `<degree> || <field> at <institution>` line.
fn parse_education_line(line: &str) -> Option<EducationItem> {
    let (degree, rest) = line.split_once("||")?;
    let degree = degree.trim();
    // Lines may arrive as markdown bullets; the leading dash is not part of
    // the degree name.
    let degree = degree.strip_prefix("- ").unwrap_or(degree);
    let rest = rest.trim();
    let (field, institution) = match rest.split_once(" at ") {
        Some((field, institution)) => (
            field,
            Some(institution.trim_matches(BRACKET_TRIM).to_string()),
        ),
        None => (rest, None),
    };
    Some(EducationItem {
        degree: degree.to_string(),
        field_of_study: field.trim().to_string(),
        institution,
    })
}

/// Skills from the first `skills: [a, b, c]` pattern. Always a list — an
/// absent pattern yields an empty one, never `None`.
fn extract_skills(text: &str) -> Vec<String> {
    match SKILLS_RE.captures(text) {
        Some(caps) => caps[1]
            .split(", ")
            .map(str::trim)
            .filter(|skill| !skill.is_empty())
            .map(String::from)
            .collect(),
        None => Vec::new(),
    }
}
