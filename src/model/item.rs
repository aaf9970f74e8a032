// File: ./src/model/item.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One task extracted from a transcript.
///
/// `reminder_time` and `original_time_text` are paired: both are `Some` when a
/// time expression was recognized for this task, both `None` otherwise. The
/// constructors below are the only way this crate builds tasks, which keeps
/// that pairing intact.
///
/// `reminder_time` is a timezone-naive local wall-clock instant; it serializes
/// to ISO-8601 (`2024-01-10T17:00:00`) via chrono's serde support.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ExtractedTask {
    pub text: String,
    pub reminder_time: Option<NaiveDateTime>,
    pub original_time_text: Option<String>,
}

impl ExtractedTask {
    pub fn timed(text: String, reminder_time: NaiveDateTime, original_time_text: String) -> Self {
        Self {
            text,
            reminder_time: Some(reminder_time),
            original_time_text: Some(original_time_text),
        }
    }

    pub fn untimed(text: String) -> Self {
        Self {
            text,
            reminder_time: None,
            original_time_text: None,
        }
    }

    pub fn has_reminder(&self) -> bool {
        self.reminder_time.is_some()
    }
}
