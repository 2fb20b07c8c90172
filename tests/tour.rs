//! The walkthrough end to end against the bundled sample data.

mod common;

use common::fires_path;
use spark_primer::{EngineError, SessionConfig, Tour};

fn run(names: &[&str]) -> String {
    let mut tour = Tour::new(SessionConfig::default(), fires_path());
    let mut out = Vec::new();
    tour.run_only(names, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn full_tour_runs_every_step() {
    let mut tour = Tour::new(SessionConfig::default(), fires_path());
    let mut out = Vec::new();
    let summary = tour.run_all(&mut out).unwrap();
    assert_eq!(summary.ran.len(), Tour::list().len());
    assert!(summary.skipped.is_empty());
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("== 1. Start a session [session] =="));
    assert!(text.contains("[stop] =="));
}

#[test]
fn literal_step_prints_table_and_schema() {
    let text = run(&["literal"]);
    assert!(text.contains("|color|count|number|valid|"), "{text}");
    assert!(text.contains(" |-- valid: boolean (nullable = true)"), "{text}");
}

#[test]
fn type_error_step_catches_and_recovers() {
    let text = run(&["column-type-error"]);
    assert!(text.contains("type error: 'Column' object is not displayable"), "{text}");
    assert!(text.contains("selecting it first works"), "{text}");
    assert!(text.contains("|color|"), "{text}");
}

#[test]
fn group_by_step_explains_before_showing() {
    let text = run(&["group-by"]);
    let plan = text.find("pending plan").unwrap();
    let table = text.find("|color|avg(number)|").unwrap();
    assert!(plan < table);
    assert!(text.contains("|  red|        1.5|"), "{text}");
}

#[test]
fn month_aggregate_is_in_calendar_order() {
    let text = run(&["fires-aggregate"]);
    let pos = |m: &str| text.find(&format!("|  {m}|")).unwrap_or(usize::MAX);
    assert!(pos("mar") < pos("apr"), "{text}");
    assert!(pos("apr") < pos("jul"), "{text}");
    assert!(pos("aug") < pos("sep"), "{text}");
    assert!(pos("sep") < pos("oct"), "{text}");
    assert!(text.contains("fires by day of week"));
    assert!(!text.contains("month_number"), "{text}");
}

#[test]
fn describe_and_correlation_steps() {
    let text = run(&["fires-describe", "fires-correlation"]);
    assert!(text.contains("|summary|"), "{text}");
    assert!(text.contains("corr(temp, area) = "), "{text}");
}

#[test]
fn local_compare_agrees() {
    let text = run(&["local-compare"]);
    assert!(text.contains("agree: true"), "{text}");
    assert!(text.contains("shape: ("), "{text}");
}

#[test]
fn stop_step_shows_stopped_session_failing() {
    let text = run(&["session", "stop"]);
    assert!(text.contains("get_or_create returns the running session: true"));
    assert!(text.contains("using it now fails: user error:"), "{text}");
}

#[test]
fn missing_data_skips_fire_steps() {
    let mut tour = Tour::new(SessionConfig::default(), "nowhere/forestfires.csv");
    let mut out = Vec::new();
    let summary = tour.run_all(&mut out).unwrap();
    assert_eq!(
        summary.skipped,
        vec![
            "fires-load",
            "fires-describe",
            "fires-aggregate",
            "fires-correlation",
            "local-compare"
        ]
    );
    assert_eq!(summary.ran.len(), 7);
}

#[test]
fn unknown_step_name() {
    let mut tour = Tour::new(SessionConfig::default(), fires_path());
    let err = tour.run_only(&["session", "bogus"], &mut Vec::new()).unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));
}
