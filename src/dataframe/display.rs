//! Spark-style table rendering for `show`.

use polars::prelude::{AnyValue, DataFrame as PlDataFrame, IdxSize, PolarsError};

use super::DataFrame;

const TRUNCATE_WIDTH: usize = 20;
const MIN_CELL_WIDTH: usize = 3;

pub(crate) fn idx(n: usize) -> IdxSize {
    IdxSize::try_from(n).unwrap_or(IdxSize::MAX)
}

pub(crate) fn show_string(df: &DataFrame, n: usize, truncate: bool) -> Result<String, PolarsError> {
    // one extra row tells us whether the footer is needed
    let fetched = df.lf.clone().limit(idx(n.saturating_add(1))).collect()?;
    let has_more = fetched.height() > n;
    let shown = fetched.head(Some(n));
    Ok(render(&shown, has_more, n, truncate))
}

fn render(df: &PlDataFrame, has_more: bool, n: usize, truncate: bool) -> String {
    let header: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| fit(s.as_str(), truncate))
        .collect();
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let row = df
            .get_columns()
            .iter()
            .map(|c| {
                let cell = c.get(i).map(|av| format_cell(&av)).unwrap_or_default();
                fit(&cell, truncate)
            })
            .collect();
        rows.push(row);
    }

    let widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(j, h)| {
            rows.iter()
                .map(|r| r[j].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
                .max(MIN_CELL_WIDTH)
        })
        .collect();

    let sep: String = widths
        .iter()
        .fold(String::from("+"), |mut acc, w| {
            acc.push_str(&"-".repeat(*w));
            acc.push('+');
            acc
        });

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&line(&header, &widths, truncate));
    out.push_str(&sep);
    out.push('\n');
    for r in &rows {
        out.push_str(&line(r, &widths, truncate));
    }
    out.push_str(&sep);
    out.push('\n');
    if has_more {
        let noun = if n == 1 { "row" } else { "rows" };
        out.push_str(&format!("only showing top {n} {noun}\n"));
    }
    out
}

/// Truncating tables right-align cells; full-width tables left-align them.
fn line(cells: &[String], widths: &[usize], right_align: bool) -> String {
    let mut s = String::from("|");
    for (cell, w) in cells.iter().zip(widths) {
        let pad = w.saturating_sub(cell.chars().count());
        if right_align {
            s.push_str(&" ".repeat(pad));
            s.push_str(cell);
        } else {
            s.push_str(cell);
            s.push_str(&" ".repeat(pad));
        }
        s.push('|');
    }
    s.push('\n');
    s
}

fn fit(cell: &str, truncate: bool) -> String {
    if truncate && cell.chars().count() > TRUNCATE_WIDTH {
        let head: String = cell.chars().take(TRUNCATE_WIDTH - 3).collect();
        format!("{head}...")
    } else {
        cell.to_string()
    }
}

/// Format a value the way Spark prints it: `null`, `true`, `1.0`, `86.2`.
pub(crate) fn format_cell(av: &AnyValue<'_>) -> String {
    match av {
        AnyValue::Null => "null".to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Float64(f) => format_double(*f),
        AnyValue::Float32(f) => format_double(f64::from(*f)),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        other => other.to_string(),
    }
}

pub(crate) fn format_double(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f.is_infinite() {
        if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{f:.1}")
    } else {
        f.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::df;

    #[test]
    fn renders_spark_layout() {
        let pl = df![
            "color" => &["red", "blue"],
            "count" => &[1i64, 2],
        ]
        .unwrap();
        let out = render(&pl, false, 20, true);
        assert_eq!(
            out,
            "+-----+-----+\n|color|count|\n+-----+-----+\n|  red|    1|\n| blue|    2|\n+-----+-----+\n"
        );
    }

    #[test]
    fn footer_and_left_alignment() {
        let pl = df!["x" => &["a"]].unwrap();
        let out = render(&pl, true, 1, false);
        assert_eq!(out, "+---+\n|x  |\n+---+\n|a  |\n+---+\nonly showing top 1 row\n");
    }

    #[test]
    fn truncates_long_cells() {
        assert_eq!(fit("abcdefghijklmnopqrstuvwxyz", true), "abcdefghijklmnopq...");
        assert_eq!(fit("abcdefghijklmnopqrstuvwxyz", false).len(), 26);
    }

    #[test]
    fn doubles_print_like_spark() {
        assert_eq!(format_double(1.0), "1.0");
        assert_eq!(format_double(86.2), "86.2");
        assert_eq!(format_double(f64::NAN), "NaN");
        assert_eq!(format_cell(&AnyValue::Null), "null");
    }
}
