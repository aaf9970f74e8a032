// File: ./src/engine/mod.rs
pub mod clean;
pub mod normalize;
pub mod segment;
pub mod span;

use chrono::{Local, NaiveDateTime};
use log::debug;
use std::collections::HashSet;

use crate::config::RuleSet;
use crate::engine::clean::clean_segment_text;
use crate::engine::normalize::normalize_input;
use crate::engine::segment::segment_input;
use crate::model::ExtractedTask;
use crate::recognizer::{
    NaturalTimeRecognizer, RecognizerError, TimeRecognizer, validate_spans,
};

/// Turns raw transcripts into deduplicated task records.
///
/// Stateless between calls: the extractor owns only its recognizer and rule
/// tables, so a single instance can serve concurrent callers.
pub struct TaskExtractor {
    recognizer: Box<dyn TimeRecognizer + Send + Sync>,
    rules: RuleSet,
}

impl Default for TaskExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskExtractor {
    /// Built-in recognizer with the default rule tables.
    pub fn new() -> Self {
        Self::with_rules(RuleSet::defaults().clone())
    }

    pub fn with_rules(rules: RuleSet) -> Self {
        Self {
            recognizer: Box::new(NaturalTimeRecognizer::new()),
            rules,
        }
    }

    /// Swap in another recognizer implementation (or a test stub).
    pub fn with_recognizer(
        recognizer: Box<dyn TimeRecognizer + Send + Sync>,
        rules: RuleSet,
    ) -> Self {
        Self { recognizer, rules }
    }

    /// Extract tasks resolving relative times against the wall clock.
    /// Callers that need reproducible output should use [`extract_at`]
    /// with a fixed reference instant instead.
    ///
    /// [`extract_at`]: TaskExtractor::extract_at
    pub fn extract(&self, raw: &str) -> Result<Vec<ExtractedTask>, RecognizerError> {
        self.extract_at(raw, Local::now().naive_local())
    }

    /// Extract tasks from `raw`, resolving relative time expressions against
    /// `reference`. Total over all inputs; the only error is recognizer
    /// output the engine cannot index safely.
    pub fn extract_at(
        &self,
        raw: &str,
        reference: NaiveDateTime,
    ) -> Result<Vec<ExtractedTask>, RecognizerError> {
        let cleaned = normalize_input(raw, &self.rules);
        let mut spans = self.recognizer.recognize(&cleaned, reference);
        validate_spans(&mut spans, &cleaned)?;

        // No time expression anywhere: the whole input is one untimed task.
        if spans.is_empty() {
            let text = clean_segment_text(&cleaned, "", &self.rules);
            return Ok(vec![ExtractedTask::untimed(text)]);
        }

        debug!("{} time span(s) recognized", spans.len());

        let mut tasks = Vec::with_capacity(spans.len());
        for seg in segment_input(&cleaned, spans, &self.rules) {
            let text = clean_segment_text(seg.range.slice(&cleaned), &seg.time.text, &self.rules);
            tasks.push(ExtractedTask::timed(text, seg.time.resolved, seg.time.text));
        }

        Ok(dedup_tasks(tasks))
    }
}

/// Drop tasks the user cannot tell apart: same text (case-insensitive) and
/// same reminder instant. First occurrence wins, order is preserved.
fn dedup_tasks(tasks: Vec<ExtractedTask>) -> Vec<ExtractedTask> {
    let mut seen: HashSet<(String, Option<NaiveDateTime>)> = HashSet::new();
    tasks
        .into_iter()
        .filter(|t| seen.insert((t.text.to_lowercase(), t.reminder_time)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn instant(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 10)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_dedup_case_insensitive_same_time() {
        let tasks = vec![
            ExtractedTask::timed("Call mom".into(), instant(17), "at 5pm".into()),
            ExtractedTask::timed("call MOM".into(), instant(17), "at 5pm".into()),
        ];
        let out = dedup_tasks(tasks);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "Call mom"); // first occurrence wins
    }

    #[test]
    fn test_same_text_different_time_survives() {
        let tasks = vec![
            ExtractedTask::timed("Call mom".into(), instant(17), "at 5pm".into()),
            ExtractedTask::timed("Call mom".into(), instant(18), "at 6pm".into()),
        ];
        assert_eq!(dedup_tasks(tasks).len(), 2);
    }

    #[test]
    fn test_untimed_tasks_dedup_together() {
        let tasks = vec![
            ExtractedTask::untimed("Buy milk".into()),
            ExtractedTask::untimed("buy milk".into()),
            ExtractedTask::untimed("Buy bread".into()),
        ];
        let out = dedup_tasks(tasks);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].text, "Buy milk");
        assert_eq!(out[1].text, "Buy bread");
    }
}
