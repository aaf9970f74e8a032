// Partitions the cleaned input into one segment per recognized time span.
//
// Boundaries between consecutive spans are decided by examining the gap text
// strictly between the end of one time expression and the start of the next,
// with a fixed precedence:
//
//   1. a connector word surrounded by whitespace ("and", "then", "after
//      that") — the segment ends where the connector begins, so the
//      connector lands in the next segment's discard zone;
//   2. sentence punctuation (. ! ?) followed by whitespace — the segment
//      ends just after the punctuation mark;
//   3. otherwise the gap is absorbed into the current segment, which ends
//      exactly where the next time expression starts.
//
// Connectors outrank sentence ends: users enumerating tasks ("...at 5pm and
// then call Bob tomorrow") mark the boundary explicitly.
use log::debug;

use crate::config::RuleSet;
use crate::engine::span::Span;
use crate::recognizer::RecognizedTimeSpan;

/// The character range of cleaned input attributed to one time expression.
pub struct Segment {
    pub time: RecognizedTimeSpan,
    pub range: Span,
}

/// Spans must be validated (in-bounds, sorted, non-overlapping) before this
/// is called; `validate_spans` guarantees that.
pub fn segment_input(text: &str, spans: Vec<RecognizedTimeSpan>, rules: &RuleSet) -> Vec<Segment> {
    let mut ends = Vec::with_capacity(spans.len());
    for i in 0..spans.len() {
        let time_range = Span::new(spans[i].start, spans[i].end());
        let end = if i + 1 == spans.len() {
            text.len()
        } else {
            let next = Span::new(spans[i + 1].start, spans[i + 1].end());
            let gap = time_range.gap_to(next);
            boundary_in_gap(gap.slice(text), rules)
                .map(|off| gap.start + off)
                .unwrap_or(gap.end)
        };
        ends.push(end);
    }

    let mut segments = Vec::with_capacity(spans.len());
    let mut start = 0;
    for (time, end) in spans.into_iter().zip(ends) {
        segments.push(Segment {
            time,
            range: Span::new(start, end),
        });
        start = end;
    }
    segments
}

fn boundary_in_gap(gap: &str, rules: &RuleSet) -> Option<usize> {
    if let Some(off) = find_connector(gap, &rules.connectors) {
        debug!("segment boundary at connector (gap offset {})", off);
        return Some(off);
    }
    if let Some(off) = find_sentence_break(gap) {
        debug!("segment boundary at sentence end (gap offset {})", off);
        return Some(off);
    }
    None
}

/// Offset of the earliest connector word/phrase that sits between whitespace
/// on both sides of the gap.
fn find_connector(gap: &str, connectors: &[String]) -> Option<usize> {
    let words = gap_words(gap);
    for wi in 0..words.len() {
        for phrase in connectors {
            let parts: Vec<&str> = phrase.split_whitespace().collect();
            if parts.is_empty() || wi + parts.len() > words.len() {
                continue;
            }
            let matches = parts
                .iter()
                .enumerate()
                .all(|(k, p)| words[wi + k].1.eq_ignore_ascii_case(p));
            if !matches {
                continue;
            }
            let (first_off, _) = words[wi];
            let (last_off, last_word) = words[wi + parts.len() - 1];
            let surrounded = first_off > 0 && last_off + last_word.len() < gap.len();
            if surrounded {
                return Some(first_off);
            }
        }
    }
    None
}

/// Offset just past the first `.`/`!`/`?` that is followed by whitespace.
fn find_sentence_break(gap: &str) -> Option<usize> {
    let mut chars = gap.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?')
            && let Some(&(_, next)) = chars.peek()
            && next.is_whitespace()
        {
            return Some(i + c.len_utf8());
        }
    }
    None
}

fn gap_words(gap: &str) -> Vec<(usize, &str)> {
    let mut words = Vec::new();
    let mut start: Option<usize> = None;
    for (i, c) in gap.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                words.push((s, &gap[s..i]));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        words.push((s, &gap[s..]));
    }
    words
}
