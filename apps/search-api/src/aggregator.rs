//! Batch aggregation over the profile parser.
//!
//! One provider batch in, one response out. Parsing is per-record and
//! order-preserving; the parser never drops a record, so `total_results`
//! always equals the input count.

use crate::models::search::{PersonProfile, RawRecord, SearchMetadata, SearchResponse};
use crate::parser::parse_record;

/// Parses every raw record in input order and assembles the response
/// envelope. `enhanced_query` is echoed into the metadata when the query
/// was rewritten; `search_time_ms` is measured by the caller around the
/// full search span.
pub fn aggregate(
    records: &[RawRecord],
    enhanced_query: Option<String>,
    search_time_ms: f64,
) -> SearchResponse {
    let results: Vec<PersonProfile> = records.iter().map(parse_record).collect();
    let metadata = SearchMetadata {
        total_results: results.len(),
        search_time_ms,
        enhanced_query,
    };
    SearchResponse { results, metadata }
}
