use quizforge_core::QuizSession;

/// Compute filtered indices from the session list, applying an optional search.
///
/// Matches against title and topic, case-insensitive.
pub fn filtered_indices(sessions: &[QuizSession], search_query: &str) -> Vec<usize> {
    let query_lower = search_query.to_lowercase();
    sessions
        .iter()
        .enumerate()
        .filter(|(_, s)| {
            search_query.is_empty()
                || s.title.to_lowercase().contains(&query_lower)
                || s.topic.to_lowercase().contains(&query_lower)
        })
        .map(|(i, _)| i)
        .collect()
}

/// Average percentage score across all sessions. `None` when there are none.
pub fn average_pct(sessions: &[QuizSession]) -> Option<u32> {
    if sessions.is_empty() {
        return None;
    }
    let sum: u32 = sessions.iter().map(|s| s.percentage()).sum();
    Some(sum / sessions.len() as u32)
}
