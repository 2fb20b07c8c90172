//! Eager, in-memory DataFrames: the conventional-library side of the comparison.
//!
//! [`LocalFrame`] wraps an eager Polars `DataFrame`. Every call runs immediately
//! and returns its result; there is no session and no deferred plan. The tour
//! answers the same questions with both APIs so the two styles can be compared.

use std::path::Path;

use polars::prelude::{
    col, len, CsvReadOptions, DataFrame as PlDataFrame, DataType as PlDataType, IntoLazy,
    PolarsError, SerReader, SortMultipleOptions,
};

use crate::dataframe::DataFrame;

/// An eager in-memory table.
#[derive(Debug, Clone)]
pub struct LocalFrame {
    df: PlDataFrame,
}

impl LocalFrame {
    pub fn new(df: PlDataFrame) -> Self {
        LocalFrame { df }
    }

    /// Read a whole CSV file into memory (header row, inferred types).
    pub fn read_csv(path: impl AsRef<Path>) -> Result<Self, PolarsError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(100))
            .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))?
            .finish()?;
        Ok(LocalFrame { df })
    }

    /// Materialize a Spark-style DataFrame (PySpark `toPandas`).
    pub fn from_spark(df: &DataFrame) -> Result<Self, PolarsError> {
        Ok(LocalFrame { df: df.collect()? })
    }

    pub fn inner(&self) -> &PlDataFrame {
        &self.df
    }

    pub fn into_inner(self) -> PlDataFrame {
        self.df
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        self.df.shape()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Column names with Polars dtype names (`i64`, `f64`, `str`).
    pub fn dtypes(&self) -> Vec<(String, String)> {
        self.df
            .get_columns()
            .iter()
            .map(|c| (c.name().to_string(), c.dtype().to_string()))
            .collect()
    }

    /// First n rows rendered with Polars' own table formatting.
    pub fn head(&self, n: usize) -> String {
        format!("{}", self.df.head(Some(n)))
    }

    /// Mean of `value` per distinct `key`, sorted by key. Output columns: key, value.
    pub fn group_mean(&self, key: &str, value: &str) -> Result<PlDataFrame, PolarsError> {
        self.df
            .clone()
            .lazy()
            .group_by([col(key)])
            .agg([col(value).cast(PlDataType::Float64).mean()])
            .sort_by_exprs([col(key)], SortMultipleOptions::default())
            .collect()
    }

    /// Pearson correlation between two numeric columns over rows where both are present.
    pub fn corr(&self, a: &str, b: &str) -> Result<f64, PolarsError> {
        let s1 = self.df.column(a)?.cast(&PlDataType::Float64)?;
        let s2 = self.df.column(b)?.cast(&PlDataType::Float64)?;
        let x = s1.as_materialized_series().f64()?;
        let y = s2.as_materialized_series().f64()?;
        let pairs: Vec<(f64, f64)> = x
            .into_iter()
            .zip(y.into_iter())
            .filter_map(|(p, q)| Some((p?, q?)))
            .collect();
        Ok(crate::dataframe::pearson(&pairs))
    }

    /// Occurrences of each distinct value, most frequent first (ties by value).
    pub fn value_counts(&self, column: &str) -> Result<PlDataFrame, PolarsError> {
        self.df
            .clone()
            .lazy()
            .group_by([col(column)])
            .agg([len().alias("count")])
            .sort_by_exprs(
                [col("count"), col(column)],
                SortMultipleOptions::default().with_order_descending_multi([true, false]),
            )
            .collect()
    }
}
