//! The forest-fire observations used in the second half of the tour.
//!
//! One row per fire: grid position in the park (`X`, `Y`), `month` and `day`
//! of week, the FWI indices (`FFMC`, `DMC`, `DC`, `ISI`), weather (`temp`,
//! `RH`, `wind`, `rain`) and the burned `area` in hectares.

use std::path::Path;

use polars::prelude::{lit, when, DataType as PlDataType, PolarsError};

use crate::column::Column;
use crate::dataframe::DataFrame;
use crate::session::SparkSession;

/// Columns in file order.
pub const FIRE_COLUMNS: [&str; 13] = [
    "X", "Y", "month", "day", "FFMC", "DMC", "DC", "ISI", "temp", "RH", "wind", "rain", "area",
];

/// Weather and outcome columns summarized by the tour.
pub const WEATHER_COLUMNS: [&str; 5] = ["temp", "RH", "wind", "rain", "area"];

pub const DEFAULT_DATA_PATH: &str = "data/forestfires.csv";

pub const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// 1-based calendar position of a three-letter month abbreviation.
pub fn month_index(month: &str) -> Option<usize> {
    MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(month))
        .map(|i| i + 1)
}

/// Calendar number (1-12) of a lower-case month-name column, usable as a sort key.
/// Unrecognized names get 13 so they sort after December.
pub fn month_number(month: &Column) -> Column {
    let name = month.expr().clone();
    let is = |i: usize| name.clone().eq(lit(MONTHS[i]));
    let mut chain = when(is(0)).then(lit(1i64)).when(is(1)).then(lit(2i64));
    for i in 2..MONTHS.len() {
        chain = chain.when(is(i)).then(lit(i as i64 + 1));
    }
    let expr = chain.otherwise(lit(13i64)).cast(PlDataType::Int64);
    Column::from_expr(expr, Some(format!("month_number({})", month.name())))
}

/// Load the fire observations with a header row and inferred types,
/// checking that every expected column is present.
pub fn load(spark: &SparkSession, path: impl AsRef<Path>) -> Result<DataFrame, PolarsError> {
    let df = spark
        .read()
        .option("header", "true")
        .option("inferSchema", "true")
        .csv(path)?;
    let present = df.columns()?;
    let missing: Vec<&str> = FIRE_COLUMNS
        .iter()
        .copied()
        .filter(|c| !present.iter().any(|p| p == c))
        .collect();
    if !missing.is_empty() {
        return Err(PolarsError::ColumnNotFound(
            format!(
                "fire data is missing column(s) [{}]; found [{}]",
                missing.join(", "),
                present.join(", ")
            )
            .into(),
        ));
    }
    Ok(df)
}
