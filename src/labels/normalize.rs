use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NUMERIC_DATE: Regex =
        Regex::new(r"\b[0-9]{1,4}[-\s./][0-9]{1,2}[-\s./][0-9]{1,4}\b")
            .expect("date regex should compile");
    static ref BARE_YEAR: Regex = Regex::new(r"\b[0-9]{4}\b").expect("year regex should compile");
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").expect("whitespace regex should compile");
}

/// Clean a raw folder name into a caption fragment.
///
/// Parentheses, numeric dates and bare years are removed, separators become single spaces.
/// Returns an empty string when nothing usable is left or when the remainder is one of
/// `noise_words` (compared case-insensitively; the list is expected lowercased).
pub fn normalize_folder_name(raw: &str, noise_words: &[String]) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '(' | ')'))
        .map(|c| if matches!(c, '_' | '|') { ' ' } else { c })
        .collect();

    let cleaned = NUMERIC_DATE.replace_all(&cleaned, "");
    let cleaned = BARE_YEAR.replace_all(&cleaned, "");
    let cleaned = cleaned.replace('-', " ");
    let cleaned = WHITESPACE_RUN.replace_all(&cleaned, " ");
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        return String::new();
    }
    let lowered = cleaned.to_lowercase();
    if noise_words.iter().any(|word| *word == lowered) {
        return String::new();
    }
    cleaned.to_string()
}

/// Uppercase the first character and leave the rest untouched.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
