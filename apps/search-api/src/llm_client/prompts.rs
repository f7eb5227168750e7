/// System prompt for query enhancement — output must be the query alone.
pub const ENHANCE_SYSTEM: &str =
    "You are a search strategist for a professional networking tool. \
    Rewrite user queries so a neural semantic-search engine returns the \
    best matches. Output ONLY the rewritten query string, with no quotes, \
    no explanations, and no surrounding text.";

/// Builds the enhancement prompt for one search request.
pub fn enhancement_prompt(query: &str, category: &str, limit: u32) -> String {
    format!(
        "Refine this search query for a professional networking search.\n\
         Original: {query}\n\
         Category: {category} (focus on professional data such as profiles and companies).\n\
         Limit results to: {limit}\n\
         \n\
         Make the query semantic, fold in relevant qualifiers the user implied \
         (location, seniority, industry, company stage), and keep it a single line."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_request_fields() {
        let prompt = enhancement_prompt("rust devs", "linkedin profile", 25);
        assert!(prompt.contains("rust devs"));
        assert!(prompt.contains("linkedin profile"));
        assert!(prompt.contains("25"));
    }
}
