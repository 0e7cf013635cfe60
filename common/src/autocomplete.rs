//! Landmark name autocomplete
//!
//! Filtering is a case-insensitive substring match over the known names.
//! A query with no matches turns into a "create new landmark" offer.

/// What the landmark picker should show under the search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestion {
    /// Nothing to show (empty query, or a landmark is already selected).
    Hidden,
    /// Known names matching the query, in their original order.
    Dropdown(Vec<String>),
    /// No known name matches; offer the trimmed query as a new landmark.
    CreateNew(String),
}

/// Known names containing `query` as a case-insensitive substring.
///
/// A blank query yields an empty list so no dropdown is shown.
///
/// # Examples
/// ```
/// use geogenie_common::filter_landmarks;
///
/// let known = vec!["Charminar".to_string(), "Char Dham".to_string(), "Hampi".to_string()];
/// assert_eq!(filter_landmarks(&known, "char"), vec!["Charminar", "Char Dham"]);
/// assert!(filter_landmarks(&known, "   ").is_empty());
/// ```
pub fn filter_landmarks(known: &[String], query: &str) -> Vec<String> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    known
        .iter()
        .filter(|name| name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Decide what the picker offers for the current search state.
pub fn suggest(filtered: &[String], query: &str, has_selection: bool) -> Suggestion {
    if has_selection {
        return Suggestion::Hidden;
    }
    if !filtered.is_empty() {
        return Suggestion::Dropdown(filtered.to_vec());
    }

    let trimmed = query.trim();
    if trimmed.is_empty() {
        Suggestion::Hidden
    } else {
        Suggestion::CreateNew(trimmed.to_string())
    }
}
