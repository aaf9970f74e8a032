// Turns a raw segment substring into presentable task text.
//
// The rules run as a fixed pipeline; order matters and is deliberate:
// the time phrase is removed before lead-in stripping because prepositions
// usually sit right next to it ("...call mom at 5pm and..." leaves a
// dangling "and" only once "at 5pm" is gone). Leading and trailing strips
// repeat until stable so chained connectors ("and then ...") disappear
// entirely.
use crate::config::RuleSet;

pub fn clean_segment_text(raw: &str, time_text: &str, rules: &RuleSet) -> String {
    let mut s = remove_time_text(raw, time_text);
    s = trim_edge_punctuation(&s).to_string();
    s = strip_leading_stop_words(&s, &rules.leading_strips).to_string();
    s = strip_trailing_stop_words(&s, &rules.trailing_strips).to_string();
    s = collapse_whitespace(&s);
    s = capitalize_first(&s);
    if s.chars().count() < 2 {
        return rules.fallback_text.clone();
    }
    s
}

/// Replace every case-insensitive occurrence of the recognized time phrase
/// with a single space. The phrase can sit anywhere in the segment, not just
/// at an edge.
fn remove_time_text(raw: &str, time_text: &str) -> String {
    if time_text.is_empty() {
        return raw.to_string();
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some((from, to)) = find_ignore_case(rest, time_text) {
        out.push_str(&rest[..from]);
        out.push(' ');
        rest = &rest[to..];
    }
    out.push_str(rest);
    out
}

/// First case-insensitive occurrence of `needle`, as byte offsets into
/// `haystack`. Comparison is per-char so multi-byte input cannot corrupt
/// offsets.
fn find_ignore_case(haystack: &str, needle: &str) -> Option<(usize, usize)> {
    let needle: Vec<char> = needle.chars().collect();
    for (start, _) in haystack.char_indices() {
        let mut matched = 0;
        for (off, c) in haystack[start..].char_indices() {
            if !chars_eq_ignore_case(c, needle[matched]) {
                break;
            }
            matched += 1;
            if matched == needle.len() {
                return Some((start, start + off + c.len_utf8()));
            }
        }
    }
    None
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

fn trim_edge_punctuation(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || matches!(c, ',' | '.' | '-' | ':' | ';'))
}

fn strip_leading_stop_words<'a>(s: &'a str, stops: &[String]) -> &'a str {
    let mut out = s;
    loop {
        let mut best: Option<&str> = None;
        for phrase in stops {
            if let Some(rest) = strip_phrase_prefix(out, phrase)
                && best.is_none_or(|b| rest.len() < b.len())
            {
                best = Some(rest);
            }
        }
        match best {
            Some(rest) => out = rest,
            None => return out,
        }
    }
}

/// Strips `phrase` off the front of `s` when it is a whole-word,
/// case-insensitive prefix followed by whitespace.
fn strip_phrase_prefix<'a>(s: &'a str, phrase: &str) -> Option<&'a str> {
    let n = phrase.len();
    if s.len() <= n || !s.is_char_boundary(n) {
        return None;
    }
    if !s[..n].eq_ignore_ascii_case(phrase) {
        return None;
    }
    let rest = &s[n..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim_start())
}

fn strip_trailing_stop_words<'a>(s: &'a str, stops: &[String]) -> &'a str {
    let mut out = s;
    loop {
        let mut best: Option<&str> = None;
        for phrase in stops {
            if let Some(rest) = strip_phrase_suffix(out, phrase)
                && best.is_none_or(|b| rest.len() < b.len())
            {
                best = Some(rest);
            }
        }
        match best {
            Some(rest) => out = rest,
            None => return out,
        }
    }
}

/// Strips `phrase` off the end of `s` when it is a whole-word,
/// case-insensitive suffix preceded by whitespace.
fn strip_phrase_suffix<'a>(s: &'a str, phrase: &str) -> Option<&'a str> {
    let n = phrase.len();
    if s.len() <= n {
        return None;
    }
    let cut = s.len() - n;
    if !s.is_char_boundary(cut) || !s[cut..].eq_ignore_ascii_case(phrase) {
        return None;
    }
    let rest = &s[..cut];
    if !rest.ends_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim_end())
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
