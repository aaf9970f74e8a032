// File: ./src/engine/normalize.rs
use crate::config::RuleSet;

/// Trim the raw transcript and strip at most one leading conversational
/// interjection ("okay", "hey", "um", ...). The result is the cleaned input
/// that every recognizer and segment offset refers to.
pub fn normalize_input(raw: &str, rules: &RuleSet) -> String {
    let trimmed = raw.trim();
    if let Some((first, rest)) = split_first_word(trimmed)
        && rules.is_interjection(first)
    {
        return rest.trim_start().to_string();
    }
    trimmed.to_string()
}

// A lone interjection with nothing after it is kept: the strip only applies
// when the word is followed by more speech.
fn split_first_word(s: &str) -> Option<(&str, &str)> {
    let end = s.find(char::is_whitespace)?;
    Some((&s[..end], &s[end..]))
}
