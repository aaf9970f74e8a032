// Recognizer seam: the segmentation engine consumes date/time spans through
// the `TimeRecognizer` trait so the concrete recognizer can be swapped or
// stubbed in tests. `validate_spans` enforces the parts of the contract the
// engine cannot afford to trust: offsets in bounds and on char boundaries,
// matched text actually present at its offset, spans non-overlapping.
// Merely-unsorted output is repaired in place rather than rejected.
pub mod natural;

use chrono::NaiveDateTime;
use thiserror::Error;

pub use natural::NaturalTimeRecognizer;

/// One date/time expression found in the cleaned input.
///
/// `start` is a byte offset into the cleaned input and must lie on a char
/// boundary; `text` is the exact matched substring at that offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizedTimeSpan {
    pub start: usize,
    pub text: String,
    /// Absolute wall-clock instant, resolved with forward bias: ambiguous
    /// expressions ("friday", "5pm") resolve to the next occurrence at or
    /// after the reference instant, never the past.
    pub resolved: NaiveDateTime,
}

impl RecognizedTimeSpan {
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

pub trait TimeRecognizer {
    /// Scan `text` for date/time expressions, resolving relative ones against
    /// `reference`. Multi-word phrases ("next friday at 3pm") must come back
    /// as a single combined span. Spans must not overlap and should be
    /// ordered by `start` (the engine re-sorts unordered output).
    fn recognize(&self, text: &str, reference: NaiveDateTime) -> Vec<RecognizedTimeSpan>;
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum RecognizerError {
    #[error("time span at byte {start} (len {len}) falls outside the input text")]
    OutOfBounds { start: usize, len: usize },
    #[error("time span at byte {start} has empty matched text")]
    EmptyMatch { start: usize },
    #[error("time span at byte {start} does not match the input text at that offset")]
    Mismatch { start: usize },
    #[error("time spans at bytes {first} and {second} overlap")]
    Overlap { first: usize, second: usize },
}

/// Check recognizer output against `text` and repair what is cheap to repair.
///
/// Unsorted-but-wellformed spans are sorted in place; anything the engine
/// could not index safely is rejected so segmentation never slices out of
/// range.
pub fn validate_spans(
    spans: &mut [RecognizedTimeSpan],
    text: &str,
) -> Result<(), RecognizerError> {
    for span in spans.iter() {
        if span.text.is_empty() {
            return Err(RecognizerError::EmptyMatch { start: span.start });
        }
        let end = span.start.checked_add(span.text.len());
        let in_bounds = end.is_some_and(|e| e <= text.len())
            && text.is_char_boundary(span.start)
            && text.is_char_boundary(span.end());
        if !in_bounds {
            return Err(RecognizerError::OutOfBounds {
                start: span.start,
                len: span.text.len(),
            });
        }
        if text[span.start..span.end()] != span.text {
            return Err(RecognizerError::Mismatch { start: span.start });
        }
    }

    if !spans.is_sorted_by_key(|s| s.start) {
        log::debug!("recognizer returned unsorted spans; re-sorting");
        spans.sort_by_key(|s| s.start);
    }

    for pair in spans.windows(2) {
        if pair[0].end() > pair[1].start {
            return Err(RecognizerError::Overlap {
                first: pair[0].start,
                second: pair[1].start,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(start: usize, text: &str) -> RecognizedTimeSpan {
        RecognizedTimeSpan {
            start,
            text: text.to_string(),
            resolved: NaiveDate::from_ymd_opt(2024, 1, 10)
                .unwrap()
                .and_hms_opt(17, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_wellformed_spans_pass() {
        let text = "call mom at 5pm and stretch tomorrow";
        let mut spans = vec![at(9, "at 5pm"), at(28, "tomorrow")];
        assert!(validate_spans(&mut spans, text).is_ok());
    }

    #[test]
    fn test_unsorted_spans_are_repaired() {
        let text = "call mom at 5pm and stretch tomorrow";
        let mut spans = vec![at(28, "tomorrow"), at(9, "at 5pm")];
        assert!(validate_spans(&mut spans, text).is_ok());
        assert_eq!(spans[0].start, 9);
        assert_eq!(spans[1].start, 28);
    }

    #[test]
    fn test_out_of_bounds_is_rejected() {
        let text = "short";
        let mut spans = vec![at(3, "long span text")];
        assert_eq!(
            validate_spans(&mut spans, text),
            Err(RecognizerError::OutOfBounds { start: 3, len: 14 })
        );
    }

    #[test]
    fn test_non_char_boundary_is_rejected() {
        // 'é' is two bytes; offset 1 splits it.
        let text = "été at 5pm";
        let mut spans = vec![at(1, "t")];
        assert!(matches!(
            validate_spans(&mut spans, text),
            Err(RecognizerError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_mismatched_text_is_rejected() {
        let text = "call mom at 5pm";
        let mut spans = vec![at(9, "at 6pm")];
        assert_eq!(
            validate_spans(&mut spans, text),
            Err(RecognizerError::Mismatch { start: 9 })
        );
    }

    #[test]
    fn test_overlap_is_rejected() {
        let text = "friday at 3pm sharp";
        let mut spans = vec![at(0, "friday at 3pm"), at(7, "at 3pm")];
        assert_eq!(
            validate_spans(&mut spans, text),
            Err(RecognizerError::Overlap {
                first: 0,
                second: 7
            })
        );
    }
}
