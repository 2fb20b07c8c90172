//! SparkSession: entry point for building DataFrames from literal rows and files.

mod builder;
mod reader;

pub use builder::SparkSessionBuilder;
pub use reader::DataFrameReader;

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use log::{debug, info};
use polars::prelude::{
    Column as PlColumn, DataFrame as PlDataFrame, IntoLazy, NamedFrom, PolarsError, Series,
};
use serde_json::Value as JsonValue;

use crate::config::{
    parse_bool, SessionConfig, APP_NAME_KEY, CASE_SENSITIVE_KEY, DEFAULT_APP_NAME,
    DEFAULT_MASTER, DEFAULT_SHOW_ROWS, MASTER_KEY, SHOW_ROWS_KEY, TRUNCATE_KEY,
};
use crate::dataframe::{DataFrame, FrameOptions};
use crate::schema::{DataType, StructType};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static ACTIVE_SESSION: RefCell<Option<SparkSession>> = const { RefCell::new(None) };
}

pub(crate) fn active_session() -> Option<SparkSession> {
    ACTIVE_SESSION.with(|cell| cell.borrow().clone())
}

pub(crate) fn set_active_session(session: Option<SparkSession>) {
    ACTIVE_SESSION.with(|cell| *cell.borrow_mut() = session);
}

struct SessionInner {
    id: u64,
    config: RwLock<HashMap<String, String>>,
    stopped: AtomicBool,
}

/// Main entry point for creating DataFrames.
/// Similar to PySpark's SparkSession but using Polars as the backend.
///
/// Clones share state: stopping one handle stops them all.
#[derive(Clone)]
pub struct SparkSession {
    inner: Arc<SessionInner>,
}

impl SparkSession {
    pub fn new(
        app_name: Option<String>,
        master: Option<String>,
        config: HashMap<String, String>,
    ) -> Self {
        let mut merged = config;
        merged.insert(
            APP_NAME_KEY.to_string(),
            app_name.unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
        );
        merged.insert(
            MASTER_KEY.to_string(),
            master.unwrap_or_else(|| DEFAULT_MASTER.to_string()),
        );
        let session = SparkSession {
            inner: Arc::new(SessionInner {
                id: NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed),
                config: RwLock::new(merged),
                stopped: AtomicBool::new(false),
            }),
        };
        info!(
            "created SparkSession #{} app={} master={}",
            session.id(),
            session.app_name(),
            session.master()
        );
        session
    }

    pub fn builder() -> SparkSessionBuilder {
        SparkSessionBuilder::new()
    }

    /// Create a session from a [`SessionConfig`] (e.g. `SessionConfig::from_env()`).
    pub fn from_config(config: &SessionConfig) -> Self {
        SparkSession::builder().with_config(config).get_or_create()
    }

    /// The session registered on this thread by `get_or_create`, if it is still running.
    pub fn active() -> Option<SparkSession> {
        active_session().filter(|s| !s.is_stopped())
    }

    pub fn id(&self) -> u64 {
        self.inner.id
    }

    fn conf_value(&self, key: &str) -> Option<String> {
        self.inner
            .config
            .read()
            .ok()
            .and_then(|c| c.get(key).cloned())
    }

    pub fn app_name(&self) -> String {
        self.conf_value(APP_NAME_KEY)
            .unwrap_or_else(|| DEFAULT_APP_NAME.to_string())
    }

    pub fn master(&self) -> String {
        self.conf_value(MASTER_KEY)
            .unwrap_or_else(|| DEFAULT_MASTER.to_string())
    }

    /// Snapshot of the session config map.
    pub fn conf(&self) -> HashMap<String, String> {
        self.inner
            .config
            .read()
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    /// Look up a single config value.
    pub fn get_conf(&self, key: &str) -> Option<String> {
        self.conf_value(key)
    }

    pub(crate) fn merge_config(&self, config: &HashMap<String, String>) {
        if let Ok(mut c) = self.inner.config.write() {
            for (k, v) in config {
                c.insert(k.clone(), v.clone());
            }
        }
    }

    /// Whether column names are matched case-sensitively (`spark.sql.caseSensitive`).
    pub fn is_case_sensitive(&self) -> bool {
        self.conf_value(CASE_SENSITIVE_KEY)
            .as_deref()
            .and_then(parse_bool)
            .unwrap_or(false)
    }

    pub(crate) fn frame_options(&self) -> FrameOptions {
        FrameOptions {
            case_sensitive: self.is_case_sensitive(),
            show_rows: self
                .conf_value(SHOW_ROWS_KEY)
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SHOW_ROWS),
            truncate: self
                .conf_value(TRUNCATE_KEY)
                .as_deref()
                .and_then(parse_bool)
                .unwrap_or(true),
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.inner.stopped.load(Ordering::SeqCst)
    }

    pub(crate) fn ensure_active(&self) -> Result<(), PolarsError> {
        if self.is_stopped() {
            return Err(PolarsError::InvalidOperation(
                format!(
                    "SparkSession #{} ({}) has been stopped; create a new session with SparkSession::builder().get_or_create()",
                    self.id(),
                    self.app_name()
                )
                .into(),
            ));
        }
        Ok(())
    }

    /// Create a DataFrame from literal rows.
    ///
    /// Each inner vec is one row in column order. Column types are inferred from the
    /// values: integers become `long`, floats `double`, booleans `boolean`, strings
    /// `string`. A column mixing integers and floats widens to `double`; a column
    /// with only nulls is `string`. Integers beyond the `long` range are rejected.
    ///
    /// # Example
    /// ```
    /// use serde_json::json;
    /// use spark_primer::SparkSession;
    ///
    /// let spark = SparkSession::builder().app_name("doc").get_or_create();
    /// let df = spark
    ///     .create_dataframe(
    ///         vec![vec![json!("red"), json!(1)], vec![json!("blue"), json!(2)]],
    ///         &["color", "count"],
    ///     )
    ///     .unwrap();
    /// assert_eq!(df.count().unwrap(), 2);
    /// ```
    pub fn create_dataframe(
        &self,
        rows: Vec<Vec<JsonValue>>,
        columns: &[&str],
    ) -> Result<DataFrame, PolarsError> {
        self.ensure_active()?;
        check_row_widths(&rows, columns.len())?;
        let mut pl_columns: Vec<PlColumn> = Vec::with_capacity(columns.len());
        for (idx, name) in columns.iter().enumerate() {
            let values: Vec<&JsonValue> = rows.iter().map(|r| &r[idx]).collect();
            let dtype = infer_column_type(name, &values)?;
            pl_columns.push(build_column(name, &dtype, &values)?);
        }
        let pl = PlDataFrame::new(pl_columns)?;
        debug!(
            "create_dataframe: {} rows x {} columns",
            pl.height(),
            pl.width()
        );
        Ok(DataFrame::from_lazy(pl.lazy(), self.frame_options()))
    }

    /// Create a DataFrame from literal rows with an explicit schema.
    /// Values are converted to the declared types (non-convertible values become null).
    pub fn create_dataframe_with_schema(
        &self,
        rows: Vec<Vec<JsonValue>>,
        schema: &StructType,
    ) -> Result<DataFrame, PolarsError> {
        self.ensure_active()?;
        check_row_widths(&rows, schema.fields().len())?;
        let mut pl_columns: Vec<PlColumn> = Vec::with_capacity(schema.fields().len());
        for (idx, field) in schema.fields().iter().enumerate() {
            let values: Vec<&JsonValue> = rows.iter().map(|r| &r[idx]).collect();
            let column = build_column(&field.name, &field.data_type, &values)?;
            if !field.nullable && column.null_count() > 0 {
                return Err(PolarsError::SchemaMismatch(
                    format!(
                        "field '{}' is not nullable but {} row(s) have no value",
                        field.name,
                        column.null_count()
                    )
                    .into(),
                ));
            }
            pl_columns.push(column);
        }
        let pl = PlDataFrame::new(pl_columns)?;
        Ok(DataFrame::from_lazy(pl.lazy(), self.frame_options()))
    }

    /// Create a DataFrame from a Polars DataFrame
    pub fn create_dataframe_from_polars(&self, df: PlDataFrame) -> Result<DataFrame, PolarsError> {
        self.ensure_active()?;
        Ok(DataFrame::from_lazy(df.lazy(), self.frame_options()))
    }

    /// Get a DataFrameReader for reading files
    pub fn read(&self) -> DataFrameReader {
        DataFrameReader::new(self.clone())
    }

    /// Read a CSV file with a header row, inferring column types.
    pub fn read_csv(&self, path: impl AsRef<std::path::Path>) -> Result<DataFrame, PolarsError> {
        self.read()
            .option("header", "true")
            .option("inferSchema", "true")
            .csv(path)
    }

    /// Stop the session. Later calls that build DataFrames fail; calling `stop` again is a no-op.
    pub fn stop(&self) {
        if self.inner.stopped.swap(true, Ordering::SeqCst) {
            return;
        }
        if active_session().is_some_and(|s| s.id() == self.id()) {
            set_active_session(None);
        }
        info!("stopped SparkSession #{} app={}", self.id(), self.app_name());
    }
}

impl Default for SparkSession {
    fn default() -> Self {
        Self::builder().get_or_create()
    }
}

fn check_row_widths(rows: &[Vec<JsonValue>], width: usize) -> Result<(), PolarsError> {
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
        return Err(PolarsError::ShapeMismatch(
            format!(
                "row {} has {} value(s) but {} column(s) were given",
                i,
                row.len(),
                width
            )
            .into(),
        ));
    }
    Ok(())
}

/// Infer the Spark type of a column of literal values.
fn infer_column_type(name: &str, values: &[&JsonValue]) -> Result<DataType, PolarsError> {
    let mut inferred: Option<DataType> = None;
    for v in values {
        let t = match v {
            JsonValue::Null => continue,
            JsonValue::Bool(_) => DataType::Boolean,
            JsonValue::Number(n) if n.is_i64() => DataType::Long,
            JsonValue::Number(n) if n.is_u64() => {
                return Err(PolarsError::SchemaMismatch(
                    format!("column '{name}': value {n} does not fit in type long").into(),
                ))
            }
            JsonValue::Number(_) => DataType::Double,
            JsonValue::String(_) => DataType::String,
            JsonValue::Array(_) | JsonValue::Object(_) => {
                return Err(PolarsError::SchemaMismatch(
                    format!("column '{name}': nested values are not supported").into(),
                ))
            }
        };
        inferred = Some(match (inferred, t) {
            (None, t) => t,
            (Some(a), b) if a == b => a,
            (Some(DataType::Long), DataType::Double) | (Some(DataType::Double), DataType::Long) => {
                DataType::Double
            }
            (Some(a), b) => {
                return Err(PolarsError::SchemaMismatch(
                    format!(
                        "column '{}': cannot merge types {} and {}",
                        name,
                        a.simple_string(),
                        b.simple_string()
                    )
                    .into(),
                ))
            }
        });
    }
    Ok(inferred.unwrap_or(DataType::String))
}

fn build_column(
    name: &str,
    dtype: &DataType,
    values: &[&JsonValue],
) -> Result<PlColumn, PolarsError> {
    let series = match dtype {
        DataType::Long => {
            let v: Vec<Option<i64>> = values.iter().map(|v| v.as_i64()).collect();
            Series::new(name.into(), v)
        }
        DataType::Integer => {
            let v: Vec<Option<i32>> = values
                .iter()
                .map(|v| v.as_i64().and_then(|n| i32::try_from(n).ok()))
                .collect();
            Series::new(name.into(), v)
        }
        DataType::Double => {
            let v: Vec<Option<f64>> = values.iter().map(|v| v.as_f64()).collect();
            Series::new(name.into(), v)
        }
        DataType::Boolean => {
            let v: Vec<Option<bool>> = values.iter().map(|v| v.as_bool()).collect();
            Series::new(name.into(), v)
        }
        DataType::String => {
            let v: Vec<Option<String>> = values
                .iter()
                .map(|v| match v {
                    JsonValue::Null => None,
                    JsonValue::String(s) => Some(s.clone()),
                    other => Some(other.to_string()),
                })
                .collect();
            Series::new(name.into(), v)
        }
        other => {
            let v: Vec<Option<String>> = values
                .iter()
                .map(|v| v.as_str().map(str::to_string))
                .collect();
            Series::new(name.into(), v).cast(&other.to_polars())?
        }
    };
    Ok(series.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn infer_widens_int_and_float() {
        let a = json!(1);
        let b = json!(2.5);
        let n = JsonValue::Null;
        let t = infer_column_type("x", &[&a, &n, &b]).unwrap();
        assert_eq!(t, DataType::Double);
    }

    #[test]
    fn infer_all_null_is_string() {
        let n = JsonValue::Null;
        assert_eq!(infer_column_type("x", &[&n, &n]).unwrap(), DataType::String);
    }

    #[test]
    fn infer_rejects_mixed_string_and_number() {
        let a = json!("red");
        let b = json!(3);
        let err = infer_column_type("color", &[&a, &b]).unwrap_err();
        assert!(err.to_string().contains("cannot merge types string and long"));
    }

    #[test]
    fn infer_rejects_integers_beyond_long() {
        let a = json!(u64::MAX);
        let b = json!(1);
        let err = infer_column_type("big", &[&a, &b]).unwrap_err();
        assert!(err.to_string().contains("does not fit in type long"));
    }

    #[test]
    fn row_width_mismatch() {
        let rows = vec![vec![json!(1), json!(2)], vec![json!(3)]];
        let err = check_row_widths(&rows, 2).unwrap_err();
        assert!(err.to_string().contains("row 1 has 1 value(s)"));
    }
}
