//! Landmark name presentation
//!
//! The recognizer returns folder-style identifiers (`golden_temple`,
//! `iskcon-temple`). These helpers turn them into display names.

use lazy_static::lazy_static;
use regex::Regex;

pub const UNKNOWN_PLACE: &str = "Unknown Place";

lazy_static! {
    static ref SEPARATORS: Regex = Regex::new(r"[_-]+").unwrap();
    static ref WORD: Regex = Regex::new(r"[A-Za-z0-9_]+").unwrap();
    static ref ACRONYMS: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"(?i)\bIskcon\b").unwrap(), "ISKCON"),
        (Regex::new(r"(?i)\bIit\b").unwrap(), "IIT"),
        (Regex::new(r"(?i)\bIiisc\b").unwrap(), "IISc"),
    ];
}

/// Turn a raw place identifier into a display name.
///
/// # Examples
/// ```
/// use geogenie_common::beautify_name;
///
/// assert_eq!(beautify_name("golden_temple"), "Golden Temple");
/// assert_eq!(beautify_name("iskcon--temple_bangalore"), "ISKCON Temple Bangalore");
/// assert_eq!(beautify_name(""), "Unknown Place");
/// ```
pub fn beautify_name(raw: &str) -> String {
    if raw.is_empty() {
        return UNKNOWN_PLACE.to_string();
    }

    let spaced = SEPARATORS.replace_all(raw, " ");
    let trimmed = spaced.trim();

    let capitalized = WORD.replace_all(trimmed, |caps: &regex::Captures| {
        let word = &caps[0];
        let mut chars = word.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        }
    });

    // Only the first occurrence of each acronym is fixed up.
    ACRONYMS
        .iter()
        .fold(capitalized.into_owned(), |name, (pattern, replacement)| {
            pattern.replace(&name, *replacement).into_owned()
        })
}

/// Whether a recognizer place name is the no-match sentinel.
pub fn is_unknown(raw: &str) -> bool {
    let lower = raw.to_lowercase();
    lower == "unknown" || lower == "unknown_place"
}

/// Render a 0.0-1.0 confidence fraction as a percentage with one decimal.
pub fn format_confidence(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beautify_separators() {
        assert_eq!(beautify_name("charminar"), "Charminar");
        assert_eq!(beautify_name("gateway_of-india"), "Gateway Of India");
        assert_eq!(beautify_name("__qutub__minar__"), "Qutub Minar");
    }

    #[test]
    fn test_beautify_keeps_rest_of_word() {
        assert_eq!(beautify_name("mcLeod_ganj"), "McLeod Ganj");
    }

    #[test]
    fn test_beautify_acronyms() {
        assert_eq!(beautify_name("iit_bombay"), "IIT Bombay");
        assert_eq!(beautify_name("iiisc_campus"), "IISc Campus");
        assert_eq!(beautify_name("sai_baba_temple"), "Sai Baba Temple");
    }

    #[test]
    fn test_beautify_acronym_first_occurrence_only() {
        assert_eq!(beautify_name("iit_iit"), "IIT Iit");
    }

    #[test]
    fn test_is_unknown() {
        assert!(is_unknown("unknown"));
        assert!(is_unknown("Unknown_Place"));
        assert!(is_unknown("UNKNOWN"));
        assert!(!is_unknown("unknown place"));
        assert!(!is_unknown("charminar"));
    }

    #[test]
    fn test_format_confidence() {
        assert_eq!(format_confidence(0.8734), "87.3%");
        assert_eq!(format_confidence(1.0), "100.0%");
        assert_eq!(format_confidence(0.0), "0.0%");
    }
}
