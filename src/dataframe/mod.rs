//! DataFrame module: main tabular type and submodules for transformations,
//! aggregations, stats and table rendering.
//!
//! A [`DataFrame`] wraps a Polars `LazyFrame`. Transformations extend the plan;
//! actions (`show`, `count`, `collect`, statistics) execute it.

mod aggregations;
mod display;
mod stats;
mod transformations;

pub use aggregations::GroupedData;
pub use stats::DataFrameStat;
pub(crate) use stats::pearson;

use std::collections::HashMap;

use polars::prelude::{
    len, AnyValue, DataFrame as PlDataFrame, DataType as PlDataType, Expr, IntoLazy, LazyFrame,
    PolarsError, SchemaRef,
};
use serde_json::Value as JsonValue;

use crate::column::Column;
use crate::config::DEFAULT_SHOW_ROWS;
use crate::functions::SortOrder;
use crate::local::LocalFrame;
use crate::schema::StructType;

/// Per-frame settings inherited from the session that created it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FrameOptions {
    /// When false (default), column names are matched case-insensitively (PySpark behavior).
    pub case_sensitive: bool,
    pub show_rows: usize,
    pub truncate: bool,
}

impl Default for FrameOptions {
    fn default() -> Self {
        FrameOptions {
            case_sensitive: false,
            show_rows: DEFAULT_SHOW_ROWS,
            truncate: true,
        }
    }
}

/// DataFrame - main tabular data structure.
/// Thin wrapper around a Polars `LazyFrame`.
#[derive(Clone)]
pub struct DataFrame {
    pub(crate) lf: LazyFrame,
    pub(crate) options: FrameOptions,
}

impl std::fmt::Debug for DataFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataFrame")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl DataFrame {
    pub(crate) fn from_lazy(lf: LazyFrame, options: FrameOptions) -> Self {
        DataFrame { lf, options }
    }

    /// Create a new DataFrame from a Polars DataFrame (case-insensitive column matching by default).
    pub fn from_polars(df: PlDataFrame) -> Self {
        DataFrame::from_lazy(df.lazy(), FrameOptions::default())
    }

    pub(crate) fn derive(&self, lf: LazyFrame) -> DataFrame {
        DataFrame::from_lazy(lf, self.options)
    }

    pub(crate) fn derive_from_polars(&self, pl: PlDataFrame) -> DataFrame {
        DataFrame::from_lazy(pl.lazy(), self.options)
    }

    pub(crate) fn polars_schema(&self) -> Result<SchemaRef, PolarsError> {
        self.lf.clone().collect_schema()
    }

    /// Resolve a logical column name to the actual column name in the schema.
    /// When case_sensitive is false, matches case-insensitively.
    pub fn resolve_column_name(&self, name: &str) -> Result<String, PolarsError> {
        let schema = self.polars_schema()?;
        let names: Vec<&str> = schema.iter_names().map(|n| n.as_str()).collect();
        resolve_in(&names, name, self.options.case_sensitive)
    }

    /// Rewrite every column reference inside `expr` to the schema's spelling.
    /// Unknown names fail with the list of available columns.
    pub fn resolve_expr(&self, expr: Expr) -> Result<Expr, PolarsError> {
        let schema = self.polars_schema()?;
        let names: Vec<&str> = schema.iter_names().map(|n| n.as_str()).collect();
        let case_sensitive = self.options.case_sensitive;
        expr.try_map_expr(|e| match e {
            Expr::Column(name) => {
                resolve_in(&names, name.as_str(), case_sensitive).map(|r| Expr::Column(r.into()))
            }
            other => Ok(other),
        })
    }

    pub(crate) fn resolve_all(&self, names: &[&str]) -> Result<Vec<String>, PolarsError> {
        names.iter().map(|c| self.resolve_column_name(c)).collect()
    }

    /// Get the schema of the DataFrame
    pub fn schema(&self) -> Result<StructType, PolarsError> {
        Ok(StructType::from_polars_schema(&*self.polars_schema()?))
    }

    /// Return schema as tree string. PySpark printSchema (returns string; print to stdout if needed).
    pub fn print_schema(&self) -> Result<String, PolarsError> {
        Ok(self.schema()?.tree_string())
    }

    /// Get column names
    pub fn columns(&self) -> Result<Vec<String>, PolarsError> {
        Ok(self
            .polars_schema()?
            .iter_names()
            .map(|s| s.to_string())
            .collect())
    }

    /// Column names and Spark type names. PySpark dtypes.
    pub fn dtypes(&self) -> Result<Vec<(String, String)>, PolarsError> {
        Ok(self
            .schema()?
            .fields()
            .iter()
            .map(|f| (f.name.clone(), f.data_type.simple_string()))
            .collect())
    }

    /// Get a column reference by name (for building expressions).
    /// Respects case sensitivity: when false, "Temp" resolves to column "temp" if present.
    pub fn column(&self, name: &str) -> Result<Column, PolarsError> {
        Ok(Column::new(self.resolve_column_name(name)?))
    }

    /// Optimized logical plan of the pending transformations. PySpark explain.
    pub fn explain(&self) -> Result<String, PolarsError> {
        self.lf.describe_optimized_plan()
    }

    /// Select columns by name (returns a new DataFrame).
    pub fn select(&self, cols: &[&str]) -> Result<DataFrame, PolarsError> {
        transformations::select(self, cols)
    }

    /// Select column expressions, e.g. `df.select_columns(&[col("temp"), col("area")])`.
    pub fn select_columns(&self, cols: &[Column]) -> Result<DataFrame, PolarsError> {
        transformations::select_columns(self, cols)
    }

    /// Filter rows with a Boolean column expression.
    pub fn filter(&self, condition: &Column) -> Result<DataFrame, PolarsError> {
        transformations::filter(self, condition)
    }

    /// Alias for [`filter`](Self::filter). PySpark where.
    pub fn where_(&self, condition: &Column) -> Result<DataFrame, PolarsError> {
        self.filter(condition)
    }

    /// Add or replace a column.
    pub fn with_column(&self, column_name: &str, col: &Column) -> Result<DataFrame, PolarsError> {
        transformations::with_column(self, column_name, col)
    }

    /// Rename a column (old_name -> new_name), keeping its position.
    pub fn with_column_renamed(
        &self,
        old_name: &str,
        new_name: &str,
    ) -> Result<DataFrame, PolarsError> {
        transformations::with_column_renamed(self, old_name, new_name)
    }

    /// Drop one or more columns.
    pub fn drop(&self, columns: &[&str]) -> Result<DataFrame, PolarsError> {
        transformations::drop(self, columns)
    }

    /// Order by sort expressions (see [`asc`](crate::functions::asc) / [`desc`](crate::functions::desc)).
    pub fn order_by(&self, orders: &[SortOrder]) -> Result<DataFrame, PolarsError> {
        transformations::order_by(self, orders)
    }

    /// Limit: keep the first n rows.
    pub fn limit(&self, n: usize) -> DataFrame {
        transformations::limit(self, n)
    }

    /// Drop duplicate rows, keeping first occurrences in order.
    pub fn distinct(&self) -> Result<DataFrame, PolarsError> {
        transformations::distinct(self)
    }

    /// Group by columns (returns GroupedData for aggregation).
    pub fn group_by(&self, column_names: &[&str]) -> Result<GroupedData, PolarsError> {
        let resolved = self.resolve_all(column_names)?;
        Ok(GroupedData::new(self.clone(), resolved))
    }

    /// Count the number of rows (action - triggers execution)
    pub fn count(&self) -> Result<usize, PolarsError> {
        let out = self.lf.clone().select([len().alias("count")]).collect()?;
        let n = out
            .column("count")?
            .get(0)?
            .extract::<usize>()
            .ok_or_else(|| PolarsError::ComputeError("count: unexpected result".into()))?;
        Ok(n)
    }

    /// Collect the DataFrame (action - triggers execution)
    pub fn collect(&self) -> Result<PlDataFrame, PolarsError> {
        self.lf.clone().collect()
    }

    /// Collect as rows of column-name -> JSON value.
    pub fn collect_as_json_rows(&self) -> Result<Vec<HashMap<String, JsonValue>>, PolarsError> {
        rows_as_json(&self.collect()?)
    }

    /// First n rows as JSON rows. PySpark head(n).
    pub fn head(&self, n: usize) -> Result<Vec<HashMap<String, JsonValue>>, PolarsError> {
        rows_as_json(&self.lf.clone().limit(display::idx(n)).collect()?)
    }

    /// Render the first n rows (session default when None) as a Spark-style table.
    pub fn show_string(&self, n: Option<usize>, truncate: bool) -> Result<String, PolarsError> {
        display::show_string(self, n.unwrap_or(self.options.show_rows), truncate)
    }

    /// Print the first n rows (session default when None).
    pub fn show(&self, n: Option<usize>) -> Result<(), PolarsError> {
        print!("{}", self.show_string(n, self.options.truncate)?);
        Ok(())
    }

    /// Summary statistics (count, mean, stddev, min, max). Empty `cols` means every numeric column.
    pub fn describe(&self, cols: &[&str]) -> Result<DataFrame, PolarsError> {
        stats::describe(self, cols)
    }

    /// Statistical helper. PySpark df.stat.corr / .cov.
    pub fn stat(&self) -> DataFrameStat<'_> {
        DataFrameStat { df: self }
    }

    /// Materialize into an eager frame for the in-memory comparison library. PySpark toPandas.
    pub fn to_local(&self) -> Result<LocalFrame, PolarsError> {
        LocalFrame::from_spark(self)
    }

    pub(crate) fn column_dtype(&self, name: &str) -> Result<PlDataType, PolarsError> {
        let resolved = self.resolve_column_name(name)?;
        let schema = self.polars_schema()?;
        schema
            .get(resolved.as_str())
            .cloned()
            .ok_or_else(|| PolarsError::ColumnNotFound(resolved.into()))
    }
}

fn resolve_in(names: &[&str], name: &str, case_sensitive: bool) -> Result<String, PolarsError> {
    let found = if case_sensitive {
        names.iter().find(|n| **n == name)
    } else {
        names.iter().find(|n| n.eq_ignore_ascii_case(name))
    };
    found.map(|n| n.to_string()).ok_or_else(|| {
        PolarsError::ColumnNotFound(
            format!(
                "Column '{}' not found. Available columns: [{}]. Check spelling and case sensitivity (spark.sql.caseSensitive).",
                name,
                names.join(", ")
            )
            .into(),
        )
    })
}

fn rows_as_json(df: &PlDataFrame) -> Result<Vec<HashMap<String, JsonValue>>, PolarsError> {
    let names = df.get_column_names();
    let mut rows = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let mut row = HashMap::with_capacity(names.len());
        for (name, column) in names.iter().zip(df.get_columns()) {
            row.insert(name.to_string(), any_value_to_json(column.get(i)?));
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Convert Polars AnyValue to serde_json::Value.
fn any_value_to_json(av: AnyValue<'_>) -> JsonValue {
    match av {
        AnyValue::Null => JsonValue::Null,
        AnyValue::Boolean(b) => JsonValue::Bool(b),
        AnyValue::Int8(i) => JsonValue::from(i),
        AnyValue::Int16(i) => JsonValue::from(i),
        AnyValue::Int32(i) => JsonValue::from(i),
        AnyValue::Int64(i) => JsonValue::from(i),
        AnyValue::UInt8(u) => JsonValue::from(u),
        AnyValue::UInt16(u) => JsonValue::from(u),
        AnyValue::UInt32(u) => JsonValue::from(u),
        AnyValue::UInt64(u) => JsonValue::from(u),
        AnyValue::Float32(f) => serde_json::Number::from_f64(f64::from(f))
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        AnyValue::Float64(f) => serde_json::Number::from_f64(f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        AnyValue::String(s) => JsonValue::String(s.to_string()),
        AnyValue::StringOwned(s) => JsonValue::String(s.to_string()),
        other => JsonValue::String(other.to_string()),
    }
}
