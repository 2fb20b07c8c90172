//! Session creation, reuse, configuration and stop.

mod common;

use serde_json::json;
use spark_primer::config::{CASE_SENSITIVE_KEY, SHOW_ROWS_KEY};
use spark_primer::{EngineError, SessionConfig, SparkSession};

#[test]
fn get_or_create_reuses_running_session() {
    let first = SparkSession::builder()
        .app_name("lifecycle")
        .master("local[2]")
        .get_or_create();
    let second = SparkSession::builder()
        .app_name("other-name")
        .config("spark.custom.key", "1")
        .get_or_create();
    assert_eq!(first.id(), second.id());
    assert_eq!(second.app_name(), "lifecycle");
    assert_eq!(second.master(), "local[2]");
    assert_eq!(first.get_conf("spark.custom.key").as_deref(), Some("1"));
    assert_eq!(SparkSession::active().map(|s| s.id()), Some(first.id()));
    first.stop();
}

#[test]
fn stop_makes_later_calls_fail() {
    let spark = common::spark();
    let df = spark
        .create_dataframe(vec![vec![json!(1)]], &["x"])
        .unwrap();
    assert_eq!(df.count().unwrap(), 1);

    spark.stop();
    assert!(spark.is_stopped());
    let err = spark
        .create_dataframe(vec![vec![json!(1)]], &["x"])
        .unwrap_err();
    assert!(err.to_string().contains("has been stopped"));
    let engine: EngineError = err.into();
    assert!(matches!(engine, EngineError::User(_)));
    assert!(spark.read_csv(common::fires_path()).is_err());
}

#[test]
fn stop_is_idempotent_and_clears_active() {
    let spark = common::spark();
    let clone = spark.clone();
    spark.stop();
    clone.stop();
    assert!(clone.is_stopped());
    assert!(SparkSession::active().is_none());

    let fresh = common::spark();
    assert_ne!(fresh.id(), spark.id());
    assert!(!fresh.is_stopped());
    fresh.stop();
}

#[test]
fn session_from_config() {
    let config = SessionConfig {
        app_name: "configured".to_string(),
        case_sensitive: true,
        show_rows: 2,
        ..SessionConfig::default()
    };
    let spark = SparkSession::from_config(&config);
    assert_eq!(spark.app_name(), "configured");
    assert!(spark.is_case_sensitive());
    assert_eq!(spark.get_conf(CASE_SENSITIVE_KEY).as_deref(), Some("true"));
    assert_eq!(spark.get_conf(SHOW_ROWS_KEY).as_deref(), Some("2"));

    let df = spark_primer::tour::literal_dataset(&spark).unwrap();
    assert!(df.select(&["COLOR"]).is_err());
    let shown = df.show_string(None, true).unwrap();
    assert!(shown.ends_with("only showing top 2 rows\n"), "{shown}");
    spark.stop();
}

#[test]
fn config_from_lookup() {
    let config = SessionConfig::from_lookup(|key| match key {
        "APP_NAME" => Some("from-env".to_string()),
        "SHOW_ROWS" => Some("7".to_string()),
        "CASE_SENSITIVE" => Some("yes".to_string()),
        "TRUNCATE" => Some("not-a-bool".to_string()),
        _ => None,
    });
    assert_eq!(config.app_name, "from-env");
    assert_eq!(config.show_rows, 7);
    assert!(config.case_sensitive);
    assert!(config.truncate);
}
