//! Grouping, aggregation and ordering.

mod common;

use common::literal_df;
use serde_json::json;
use spark_primer::{asc, avg, col, count, count_all, desc, max, sum};

#[test]
fn avg_per_group_one_row_per_key() {
    let out = literal_df().group_by(&["color"]).unwrap().avg("number").unwrap();
    assert_eq!(out.columns().unwrap(), vec!["color", "avg(number)"]);
    let rows = out.collect_as_json_rows().unwrap();
    assert_eq!(rows.len(), 3);
    let got: Vec<(String, f64)> = rows
        .iter()
        .map(|r| {
            (
                r["color"].as_str().unwrap().to_string(),
                r["avg(number)"].as_f64().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        got,
        vec![
            ("blue".to_string(), 6.0),
            ("green".to_string(), 7.0),
            ("red".to_string(), 1.5),
        ]
    );
}

#[test]
fn aggregation_is_deferred_until_an_action() {
    let grouped = literal_df().group_by(&["color"]).unwrap();
    assert_eq!(grouped.grouping_columns(), ["color".to_string()]);
    let pending = grouped.avg("number").unwrap();
    let plan = pending.explain().unwrap();
    assert!(!plan.is_empty());
    assert!(plan.contains("color"), "{plan}");
    assert_eq!(pending.count().unwrap(), 3);
}

#[test]
fn count_per_group() {
    let out = literal_df().group_by(&["color"]).unwrap().count().unwrap();
    let rows = out.collect_as_json_rows().unwrap();
    let counts: Vec<i64> = rows.iter().map(|r| r["count"].as_i64().unwrap()).collect();
    assert_eq!(counts, vec![2, 1, 2]);
}

#[test]
fn several_aggregations_at_once() {
    let out = literal_df()
        .group_by(&["valid"])
        .unwrap()
        .agg(&[
            sum(&col("count")),
            max(&col("number")),
            count(&col("color")),
            count_all(),
            avg(&col("number")),
        ])
        .unwrap();
    assert_eq!(
        out.columns().unwrap(),
        vec![
            "valid",
            "sum(count)",
            "max(number)",
            "count(color)",
            "count",
            "avg(number)"
        ]
    );
    let rows = out.collect_as_json_rows().unwrap();
    // false sorts before true
    assert_eq!(rows[0]["valid"], json!(false));
    assert_eq!(rows[0]["sum(count)"], json!(6));
    assert_eq!(rows[1]["max(number)"], json!(9));
    assert_eq!(rows[1]["count"], json!(3));
}

#[test]
fn numeric_aggregate_on_string_column_fails() {
    let err = literal_df()
        .group_by(&["valid"])
        .unwrap()
        .sum("color")
        .unwrap_err();
    assert!(err.to_string().contains("not numeric"), "{err}");
}

#[test]
fn group_by_unknown_column_fails_before_any_action() {
    assert!(literal_df().group_by(&["shade"]).is_err());
}

#[test]
fn empty_agg_list_is_rejected() {
    let grouped = literal_df().group_by(&["color"]).unwrap();
    assert!(grouped.agg(&[]).is_err());
}

#[test]
fn order_by_desc_then_asc() {
    let out = literal_df()
        .order_by(&[desc("color"), asc("number")])
        .unwrap();
    let rows = out.collect_as_json_rows().unwrap();
    let order: Vec<(String, i64)> = rows
        .iter()
        .map(|r| {
            (
                r["color"].as_str().unwrap().to_string(),
                r["number"].as_i64().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        order,
        vec![
            ("red".to_string(), 1),
            ("red".to_string(), 2),
            ("green".to_string(), 7),
            ("blue".to_string(), 3),
            ("blue".to_string(), 9),
        ]
    );
}

#[test]
fn order_by_resolves_case_insensitively() {
    let out = literal_df().order_by(&[desc("NUMBER")]).unwrap();
    let first = &out.head(1).unwrap()[0];
    assert_eq!(first["number"], json!(9));
}

#[test]
fn agg_resolves_names_case_insensitively() {
    let out = literal_df()
        .group_by(&["color"])
        .unwrap()
        .agg(&[avg(&col("NUMBER"))])
        .unwrap();
    let rows = out.collect_as_json_rows().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2]["avg(NUMBER)"].as_f64(), Some(1.5));
}

#[test]
fn empty_grouping_aggregates_whole_frame() {
    let out = literal_df().group_by(&[]).unwrap().sum("count").unwrap();
    let rows = out.collect_as_json_rows().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["sum(count)"], json!(15));
}
