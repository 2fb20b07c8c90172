//! DataFrameReader for reading CSV files.

use std::collections::HashMap;
use std::path::Path;

use log::{debug, info};
use polars::prelude::{LazyCsvReader, LazyFileListReader, NullValues, PolarsError};

use crate::config::parse_bool;
use crate::dataframe::DataFrame;

use super::SparkSession;

const DEFAULT_INFER_SCHEMA_LENGTH: usize = 100;

/// DataFrameReader for reading files.
/// Similar to PySpark's DataFrameReader with option/options/format/load.
pub struct DataFrameReader {
    session: SparkSession,
    options: HashMap<String, String>,
    format: Option<String>,
}

impl DataFrameReader {
    pub fn new(session: SparkSession) -> Self {
        DataFrameReader {
            session,
            options: HashMap::new(),
            format: None,
        }
    }

    /// Add a single option (PySpark: option(key, value)). Returns self for chaining.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Add multiple options (PySpark: options(**kwargs)). Returns self for chaining.
    pub fn options(mut self, opts: impl IntoIterator<Item = (String, String)>) -> Self {
        for (k, v) in opts {
            self.options.insert(k, v);
        }
        self
    }

    /// Set the format for load() (PySpark: format("csv")).
    pub fn format(mut self, fmt: impl Into<String>) -> Self {
        self.format = Some(fmt.into());
        self
    }

    /// Load data from path using format (or infer from extension) and options.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<DataFrame, PolarsError> {
        let path = path.as_ref();
        let fmt = self.format.clone().or_else(|| {
            path.extension()
                .and_then(|e| e.to_str())
                .map(|s| s.to_lowercase())
        });
        match fmt.as_deref() {
            Some("csv") => self.csv(path),
            Some(other) => Err(PolarsError::InvalidOperation(
                format!("load: unsupported format '{other}'; only 'csv' is available").into(),
            )),
            None => Err(PolarsError::InvalidOperation(
                format!(
                    "load: could not infer format for path '{}'. Use format(\"csv\") before load.",
                    path.display()
                )
                .into(),
            )),
        }
    }

    fn flag(&self, key: &str) -> Option<bool> {
        self.options.get(key).and_then(|v| parse_bool(v))
    }

    fn apply_csv_options(&self, reader: LazyCsvReader) -> Result<LazyCsvReader, PolarsError> {
        let mut r = reader
            .with_has_header(self.flag("header").unwrap_or(true))
            .with_infer_schema_length(Some(DEFAULT_INFER_SCHEMA_LENGTH));
        match self.flag("inferSchema") {
            // inferSchema=false: every column is read as string
            Some(false) => r = r.with_infer_schema_length(Some(0)),
            _ => {
                if let Some(v) = self.options.get("inferSchemaLength") {
                    let n = v.parse::<usize>().map_err(|_| {
                        PolarsError::InvalidOperation(
                            format!("inferSchemaLength must be a non-negative integer, got '{v}'")
                                .into(),
                        )
                    })?;
                    r = r.with_infer_schema_length(Some(n));
                }
            }
        }
        if let Some(sep) = self.options.get("sep") {
            match sep.as_bytes() {
                [b] => r = r.with_separator(*b),
                _ => {
                    return Err(PolarsError::InvalidOperation(
                        format!("sep must be a single byte, got '{sep}'").into(),
                    ))
                }
            }
        }
        if let Some(null_val) = self.options.get("nullValue") {
            r = r.with_null_values(Some(NullValues::AllColumnsSingle(
                null_val.as_str().into(),
            )));
        }
        Ok(r)
    }

    /// Read a CSV file. Defaults: header row present, types inferred from the first 100 rows.
    ///
    /// The schema is resolved immediately (so a missing file or malformed header fails
    /// here); the rows themselves are read when an action runs.
    pub fn csv(&self, path: impl AsRef<Path>) -> Result<DataFrame, PolarsError> {
        self.session.ensure_active()?;
        let path = path.as_ref();
        let path_display = path.display();
        if !path.exists() {
            return Err(PolarsError::from(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Path does not exist: {path_display}"),
            )));
        }
        let reader = self.apply_csv_options(LazyCsvReader::new(path))?;
        let path_str = path_display.to_string();
        let mut lf = reader.finish().map_err(|e| with_path(e, &path_str))?;
        let schema = lf.collect_schema().map_err(|e| with_path(e, &path_str))?;
        debug!("csv({path_display}) options={:?}", self.options);
        info!(
            "read csv {} with {} column(s)",
            path_display,
            schema.len()
        );
        Ok(DataFrame::from_lazy(lf, self.session.frame_options()))
    }
}

/// Prefix the message with the file being read, keeping the error variant.
fn with_path(e: PolarsError, path: &str) -> PolarsError {
    e.wrap_msg(|msg| format!("read csv({path}): {msg}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn path_context_keeps_io_variant() {
        let io = PolarsError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "permission denied",
        ));
        let wrapped = with_path(io, "data/fires.csv");
        assert!(matches!(wrapped, PolarsError::IO { .. }));
        let engine: EngineError = wrapped.into();
        assert!(matches!(engine, EngineError::Io(_)));
    }

    #[test]
    fn path_context_keeps_schema_variant() {
        let wrapped = with_path(PolarsError::SchemaMismatch("bad header".into()), "x.csv");
        assert!(matches!(wrapped, PolarsError::SchemaMismatch(_)));
        assert!(wrapped.to_string().contains("read csv(x.csv): bad header"));
    }
}
