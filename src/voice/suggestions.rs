use crate::MAX_VOICE_SUGGESTIONS;

/// Fixed suggestion pool shown under the voice search box.
pub const CANNED_SUGGESTIONS: [&str; 10] = [
    "Find AI writing tools",
    "Show me free chatbots",
    "Search for image generators rated above 4",
    "Find video editing tools under $20",
    "Look for coding assistants",
    "Show me productivity tools sort by rating",
    "Find design tools in category graphics",
    "Search for transcription tools",
    "Show me marketing tools rated above 3",
    "Find data analysis tools",
];

/// Returns up to [`MAX_VOICE_SUGGESTIONS`] suggestion strings. When previous
/// queries exist, two follow-ups derived from the most recent one come first,
/// then the canned pool. Deterministic for a given input.
pub fn generate_suggestions(previous_queries: &[String]) -> Vec<String> {
    let mut suggestions = Vec::with_capacity(MAX_VOICE_SUGGESTIONS + 2);

    if let Some(last) = previous_queries.last() {
        suggestions.push(format!("Search for more like \"{last}\""));
        suggestions.push(format!("Find alternatives to \"{last}\""));
    }

    suggestions.extend(CANNED_SUGGESTIONS.iter().map(|s| (*s).to_string()));
    suggestions.truncate(MAX_VOICE_SUGGESTIONS);
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_history_returns_canned_pool() {
        let suggestions = generate_suggestions(&[]);
        assert_eq!(suggestions.len(), 10);
        assert_eq!(suggestions[0], CANNED_SUGGESTIONS[0]);
    }

    #[test]
    fn test_history_prepends_follow_ups() {
        let history = vec!["image tools".to_string(), "chatbots".to_string()];
        let suggestions = generate_suggestions(&history);
        assert_eq!(suggestions[0], "Search for more like \"chatbots\"");
        assert_eq!(suggestions[1], "Find alternatives to \"chatbots\"");
        assert_eq!(suggestions[2], CANNED_SUGGESTIONS[0]);
    }

    #[test]
    fn test_bounded_to_ten() {
        assert!(generate_suggestions(&[]).len() <= 10);
        let history: Vec<String> = (0..50).map(|i| format!("query {i}")).collect();
        assert!(generate_suggestions(&history).len() <= 10);
    }

    #[test]
    fn test_deterministic() {
        let history = vec!["chatbots".to_string()];
        assert_eq!(generate_suggestions(&history), generate_suggestions(&history));
    }
}
