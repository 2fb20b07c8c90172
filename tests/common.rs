//! Shared helpers for integration tests (SparkSession and DataFrame setup).
#![allow(dead_code)]

use std::path::PathBuf;

use spark_primer::fires::DEFAULT_DATA_PATH;
use spark_primer::{DataFrame, SparkSession};

/// Create a SparkSession with a descriptive app name for tests.
pub fn spark() -> SparkSession {
    SparkSession::builder()
        .app_name("spark_primer_tests")
        .get_or_create()
}

/// The five-row (color, count, number, valid) dataset from the tour.
pub fn literal_df() -> DataFrame {
    spark_primer::tour::literal_dataset(&spark()).unwrap()
}

/// Bundled forest-fire sample, independent of the working directory.
pub fn fires_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_DATA_PATH)
}

/// Sorted string values of one column.
pub fn strings(df: &DataFrame, column: &str) -> Vec<String> {
    let mut v: Vec<String> = df
        .collect_as_json_rows()
        .unwrap()
        .iter()
        .map(|r| r[column].as_str().unwrap().to_string())
        .collect();
    v.sort();
    v
}
