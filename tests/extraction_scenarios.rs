// End-to-end extraction scenarios against the built-in recognizer.
// Reference instant is fixed at 2024-01-10T09:00:00 (a Wednesday) so every
// relative expression resolves deterministically.
use chrono::{NaiveDate, NaiveDateTime};
use voxtask::engine::TaskExtractor;
use voxtask::model::ExtractedTask;

fn reference() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 10)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, 0)
        .unwrap()
}

fn extract(input: &str) -> Vec<ExtractedTask> {
    TaskExtractor::new().extract_at(input, reference()).unwrap()
}

#[test]
fn test_two_tasks_split_on_connector() {
    let tasks = extract("call mom at 5pm and then pick up groceries tomorrow morning");

    assert_eq!(tasks.len(), 2);

    assert_eq!(tasks[0].text, "Call mom");
    assert_eq!(tasks[0].reminder_time, Some(dt(2024, 1, 10, 17, 0)));
    assert_eq!(tasks[0].original_time_text.as_deref(), Some("at 5pm"));

    assert_eq!(tasks[1].text, "Pick up groceries");
    assert_eq!(tasks[1].reminder_time, Some(dt(2024, 1, 11, 9, 0)));
    assert_eq!(
        tasks[1].original_time_text.as_deref(),
        Some("tomorrow morning")
    );
}

#[test]
fn test_no_time_expression_yields_single_untimed_task() {
    let tasks = extract("buy milk");

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].text, "Buy milk");
    assert_eq!(tasks[0].reminder_time, None);
    assert_eq!(tasks[0].original_time_text, None);
}

#[test]
fn test_whitespace_input_falls_back() {
    let tasks = extract("   ");

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].text, "Task scheduled");
    assert_eq!(tasks[0].reminder_time, None);
    assert_eq!(tasks[0].original_time_text, None);
}

#[test]
fn test_verbatim_repeat_is_deduplicated() {
    let tasks = extract("meeting friday at 3pm. meeting friday at 3pm.");

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].text, "Meeting");
    // Friday after Wednesday 2024-01-10 is 2024-01-12.
    assert_eq!(tasks[0].reminder_time, Some(dt(2024, 1, 12, 15, 0)));
}

#[test]
fn test_leading_interjection_is_stripped() {
    let tasks = extract("hey remind me to stretch at 5pm");

    assert_eq!(tasks.len(), 1);
    // "hey" goes; "remind me to" is not in the lead-in tables and stays.
    assert_eq!(tasks[0].text, "Remind me to stretch");
    assert_eq!(tasks[0].reminder_time, Some(dt(2024, 1, 10, 17, 0)));
    assert_eq!(tasks[0].original_time_text.as_deref(), Some("at 5pm"));
}

#[test]
fn test_totality_always_at_least_one_task() {
    for input in [
        "",
        "   ",
        "no dates here at all",
        "and",
        "...",
        "héllo wörld",
        "call mom at 5pm",
    ] {
        let tasks = extract(input);
        assert!(!tasks.is_empty(), "empty result for {:?}", input);
    }
}

#[test]
fn test_time_fields_are_paired() {
    for input in [
        "buy milk",
        "   ",
        "call mom at 5pm and then stretch tomorrow morning",
        "meeting friday at 3pm. lunch at noon",
    ] {
        for task in extract(input) {
            assert_eq!(
                task.reminder_time.is_none(),
                task.original_time_text.is_none(),
                "unpaired time fields for {:?}",
                input
            );
        }
    }
}

#[test]
fn test_tasks_keep_transcript_order() {
    let tasks = extract("water plants tonight and then call dad tomorrow and also pay rent friday");

    assert_eq!(tasks.len(), 3);
    assert_eq!(tasks[0].text, "Water plants");
    assert_eq!(tasks[1].text, "Call dad");
    assert_eq!(tasks[2].text, "Pay rent");

    assert_eq!(tasks[0].reminder_time, Some(dt(2024, 1, 10, 20, 0)));
    assert_eq!(tasks[1].reminder_time, Some(dt(2024, 1, 11, 12, 0)));
    assert_eq!(tasks[2].reminder_time, Some(dt(2024, 1, 12, 12, 0)));
}

#[test]
fn test_sentence_boundary_splits_tasks() {
    let tasks = extract("dentist appointment friday at 3pm. buy stamps tomorrow");

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].text, "Dentist appointment");
    assert_eq!(tasks[1].text, "Buy stamps");
}

#[test]
fn test_time_phrase_only_segment_uses_fallback() {
    let tasks = extract("at 5pm");

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].text, "Task scheduled");
    assert_eq!(tasks[0].reminder_time, Some(dt(2024, 1, 10, 17, 0)));
    assert_eq!(tasks[0].original_time_text.as_deref(), Some("at 5pm"));
}

#[test]
fn test_json_output_shape() {
    let tasks = extract("call mom at 5pm");
    let json = serde_json::to_string(&tasks).unwrap();
    assert!(json.contains("\"text\":\"Call mom\""));
    assert!(json.contains("\"reminder_time\":\"2024-01-10T17:00:00\""));
    assert!(json.contains("\"original_time_text\":\"at 5pm\""));
}

#[test]
fn test_deterministic_for_fixed_reference() {
    let input = "call mom at 5pm and then stretch tomorrow morning";
    let first = extract(input);
    let second = extract(input);
    assert_eq!(first, second);
}
