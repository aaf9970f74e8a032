// File: ./src/recognizer/natural.rs
// Built-in recognizer for the date/time expressions that show up in dictated
// reminders: clock times ("5pm", "17:30"), day words ("tomorrow", "tonight"),
// time-of-day words ("morning", "noon"), weekday names with optional
// "next"/"this", relative offsets ("in 30 minutes", "in an hour"), and ISO
// dates. Month names, ordinals, and ranges are out of scope; the trait seam
// exists so a heavier recognizer can be swapped in.
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::recognizer::{RecognizedTimeSpan, TimeRecognizer};

#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalTimeRecognizer;

impl NaturalTimeRecognizer {
    pub fn new() -> Self {
        Self
    }
}

impl TimeRecognizer for NaturalTimeRecognizer {
    fn recognize(&self, text: &str, reference: NaiveDateTime) -> Vec<RecognizedTimeSpan> {
        let words = tokenize(text);
        let mut spans = Vec::new();
        let mut i = 0;
        while i < words.len() {
            if let Some(m) = match_at(text, &words, i, reference) {
                let start = words[i].start;
                let end = words[i + m.consumed - 1].end;
                spans.push(RecognizedTimeSpan {
                    start,
                    text: text[start..end].to_string(),
                    resolved: m.resolved,
                });
                i += m.consumed;
            } else {
                i += 1;
            }
        }
        spans
    }
}

fn noon() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).unwrap()
}

/// A whitespace-delimited word with leading/trailing punctuation trimmed off,
/// so "3pm." or "(tomorrow" still match while the punctuation stays outside
/// the span (sentence boundaries depend on it staying there).
struct Word {
    start: usize,
    end: usize,
    lower: String,
}

fn tokenize(text: &str) -> Vec<Word> {
    let mut words = Vec::new();
    let mut chunk_start: Option<usize> = None;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = chunk_start.take() {
                push_word(text, s, i, &mut words);
            }
        } else if chunk_start.is_none() {
            chunk_start = Some(i);
        }
    }
    if let Some(s) = chunk_start {
        push_word(text, s, text.len(), &mut words);
    }
    words
}

fn push_word(text: &str, start: usize, end: usize, out: &mut Vec<Word>) {
    let chunk = &text[start..end];
    let Some((lead, _)) = chunk.char_indices().find(|(_, c)| c.is_alphanumeric()) else {
        return; // pure punctuation, e.g. a lone dash
    };
    let (trail, tc) = chunk
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_alphanumeric())
        .unwrap();
    let s = start + lead;
    let e = start + trail + tc.len_utf8();
    out.push(Word {
        start: s,
        end: e,
        lower: text[s..e].to_lowercase(),
    });
}

/// True when nothing but whitespace separates the two words in the input.
/// Punctuation between words ("tomorrow, morning") blocks phrase combination.
fn joined(text: &str, a: &Word, b: &Word) -> bool {
    text[a.end..b.start].chars().all(|c| c.is_whitespace())
}

struct Match {
    consumed: usize,
    resolved: NaiveDateTime,
}

fn match_at(text: &str, words: &[Word], i: usize, reference: NaiveDateTime) -> Option<Match> {
    // 1. Relative offsets: "in 30 minutes", "in two hours", "in an hour"
    if words[i].lower == "in"
        && i + 2 < words.len()
        && joined(text, &words[i], &words[i + 1])
        && joined(text, &words[i + 1], &words[i + 2])
        && let Some(n) = parse_english_number(&words[i + 1].lower)
        && let Some(delta) = parse_unit(&words[i + 2].lower, n)
    {
        return Some(Match {
            consumed: 3,
            resolved: reference + delta,
        });
    }

    // 2. Optional preposition folded into the match ("at 5pm", "on friday")
    let prep = matches!(words[i].lower.as_str(), "at" | "on" | "by")
        && i + 1 < words.len()
        && joined(text, &words[i], &words[i + 1]);
    let base = if prep { i + 1 } else { i };

    let phrase = match_time_phrase(text, words, base, reference)?;
    Some(Match {
        consumed: phrase.consumed + (base - i),
        resolved: phrase.resolved,
    })
}

fn match_time_phrase(
    text: &str,
    words: &[Word],
    j: usize,
    reference: NaiveDateTime,
) -> Option<Match> {
    let word = &words[j].lower;

    // "next friday [at 3pm]", "next week", "this friday", "this morning"
    if (word == "next" || word == "this")
        && j + 1 < words.len()
        && joined(text, &words[j], &words[j + 1])
    {
        let strictly_next = word == "next";
        let follower = &words[j + 1].lower;

        if let Some(wd) = parse_weekday(follower) {
            let (extra, time) = match_time_suffix(text, words, j + 2).unwrap_or((0, noon()));
            return Some(Match {
                consumed: 2 + extra,
                resolved: resolve_weekday(reference, wd, time, strictly_next),
            });
        }
        if strictly_next {
            let days = match follower.as_str() {
                "week" => 7,
                "month" => 30,
                "year" => 365,
                _ => 0,
            };
            if days > 0 {
                let (extra, time) = match_time_suffix(text, words, j + 2).unwrap_or((0, noon()));
                let date = reference.date() + Duration::days(days);
                return Some(Match {
                    consumed: 2 + extra,
                    resolved: date.and_time(time),
                });
            }
        } else if let Some(t) = parse_time_of_day(follower) {
            // "this morning" resolves on the reference day as spoken, even
            // when that instant has already passed.
            return Some(Match {
                consumed: 2,
                resolved: reference.date().and_time(t),
            });
        }
        return None;
    }

    // "friday", "friday at 3pm", "friday morning"
    if let Some(wd) = parse_weekday(word) {
        let (extra, time) = match_time_suffix(text, words, j + 1).unwrap_or((0, noon()));
        return Some(Match {
            consumed: 1 + extra,
            resolved: resolve_weekday(reference, wd, time, false),
        });
    }

    // "today", "tomorrow [morning]", "tonight [at 10pm]"
    if let Some((date, default_time)) = parse_day_word(word, reference) {
        let (extra, time) = match_time_suffix(text, words, j + 1).unwrap_or((0, default_time));
        return Some(Match {
            consumed: 1 + extra,
            resolved: date.and_time(time),
        });
    }

    // "5pm", "5:30pm", "17:30", "noon"
    if let Some(t) = parse_clock(word) {
        return Some(Match {
            consumed: 1,
            resolved: resolve_clock(reference, t),
        });
    }

    // "2024-01-15 [at 9am]"
    if let Ok(date) = NaiveDate::parse_from_str(word, "%Y-%m-%d") {
        let (extra, time) = match_time_suffix(text, words, j + 1).unwrap_or((0, noon()));
        return Some(Match {
            consumed: 1 + extra,
            resolved: date.and_time(time),
        });
    }

    None
}

/// Lookahead for a time attached to a date phrase: "at 3pm", "3pm", "morning".
fn match_time_suffix(text: &str, words: &[Word], k: usize) -> Option<(usize, NaiveTime)> {
    if k >= words.len() || !joined(text, &words[k - 1], &words[k]) {
        return None;
    }
    if words[k].lower == "at"
        && k + 1 < words.len()
        && joined(text, &words[k], &words[k + 1])
        && let Some(t) = parse_clock(&words[k + 1].lower)
    {
        return Some((2, t));
    }
    if let Some(t) = parse_clock(&words[k].lower) {
        return Some((1, t));
    }
    if let Some(t) = parse_time_of_day(&words[k].lower) {
        return Some((1, t));
    }
    None
}

// --- TIME / DATE WORD PARSERS ---

fn parse_clock(lower: &str) -> Option<NaiveTime> {
    match lower {
        "noon" => return NaiveTime::from_hms_opt(12, 0, 0),
        "midnight" => return NaiveTime::from_hms_opt(0, 0, 0),
        _ => {}
    }

    // Helper for 12h
    let parse_12h = |s: &str, is_pm: bool| -> Option<NaiveTime> {
        let (h, m) = if let Some((h_str, m_str)) = s.split_once(':') {
            (h_str.parse::<u32>().ok()?, m_str.parse::<u32>().ok()?)
        } else {
            (s.parse::<u32>().ok()?, 0)
        };
        if !(1..=12).contains(&h) || m > 59 {
            return None;
        }
        let h_24 = if h == 12 {
            if is_pm { 12 } else { 0 }
        } else if is_pm {
            h + 12
        } else {
            h
        };
        NaiveTime::from_hms_opt(h_24, m, 0)
    };

    if let Some(stripped) = lower.strip_suffix("am") {
        return parse_12h(stripped, false);
    }
    if let Some(stripped) = lower.strip_suffix("pm") {
        return parse_12h(stripped, true);
    }

    if let Some((h_str, m_str)) = lower.split_once(':') {
        let h = h_str.parse::<u32>().ok()?;
        let m = m_str.parse::<u32>().ok()?;
        return NaiveTime::from_hms_opt(h, m, 0);
    }

    None
}

fn parse_time_of_day(lower: &str) -> Option<NaiveTime> {
    let (h, m) = match lower {
        "morning" => (9, 0),
        "noon" => (12, 0),
        "afternoon" => (15, 0),
        "evening" => (18, 0),
        "night" => (20, 0),
        "midnight" => (0, 0),
        _ => return None,
    };
    NaiveTime::from_hms_opt(h, m, 0)
}

fn parse_day_word(lower: &str, reference: NaiveDateTime) -> Option<(NaiveDate, NaiveTime)> {
    match lower {
        "today" => Some((reference.date(), noon())),
        "tomorrow" => Some((reference.date() + Duration::days(1), noon())),
        "tonight" => Some((reference.date(), NaiveTime::from_hms_opt(20, 0, 0).unwrap())),
        _ => None,
    }
}

// Full names only: transcription output spells weekdays out, and short forms
// collide with ordinary words ("sat", "sun").
fn parse_weekday(lower: &str) -> Option<Weekday> {
    match lower {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

fn parse_english_number(s: &str) -> Option<i64> {
    match s {
        "a" | "an" | "one" => Some(1),
        "two" => Some(2),
        "three" => Some(3),
        "four" => Some(4),
        "five" => Some(5),
        "six" => Some(6),
        "seven" => Some(7),
        "eight" => Some(8),
        "nine" => Some(9),
        "ten" => Some(10),
        "eleven" => Some(11),
        "twelve" => Some(12),
        _ => s.parse::<i64>().ok().filter(|n| *n >= 0),
    }
}

fn parse_unit(lower: &str, n: i64) -> Option<Duration> {
    match lower {
        "minute" | "minutes" | "min" | "mins" => Some(Duration::minutes(n)),
        "hour" | "hours" | "hr" | "hrs" => Some(Duration::hours(n)),
        "day" | "days" => Some(Duration::days(n)),
        "week" | "weeks" | "wk" | "wks" => Some(Duration::weeks(n)),
        _ => None,
    }
}

// --- FORWARD-BIAS RESOLUTION ---

/// A bare clock time lands on the reference day, or the next day when that
/// instant is already in the past.
fn resolve_clock(reference: NaiveDateTime, t: NaiveTime) -> NaiveDateTime {
    let dt = reference.date().and_time(t);
    if dt < reference { dt + Duration::days(1) } else { dt }
}

/// A weekday resolves to its next occurrence at or after the reference
/// instant; with `strictly_next` ("next friday") today never qualifies.
fn resolve_weekday(
    reference: NaiveDateTime,
    wd: Weekday,
    time: NaiveTime,
    strictly_next: bool,
) -> NaiveDateTime {
    let mut date = reference.date();
    if strictly_next {
        date += Duration::days(1);
    }
    while date.weekday() != wd {
        date += Duration::days(1);
    }
    let mut dt = date.and_time(time);
    if dt < reference {
        dt += Duration::days(7);
    }
    dt
}
