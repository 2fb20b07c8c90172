//! DataFrame statistical methods: stat (cov, corr, corr_matrix) and describe.
//! PySpark: df.stat.cov("a", "b"), df.stat.corr("a", "b"), df.describe(...).

use super::display::format_cell;
use super::DataFrame;
use polars::prelude::{
    col, Column as PlColumn, DataFrame as PlDataFrame, DataType as PlDataType, Expr, NamedFrom,
    PolarsError, Series,
};

/// Helper for DataFrame statistical methods (PySpark-style df.stat.cov/corr).
pub struct DataFrameStat<'a> {
    pub(crate) df: &'a DataFrame,
}

impl<'a> DataFrameStat<'a> {
    /// Pairs of values where both sides are non-null, as f64.
    fn pairs(&self, col1: &str, col2: &str) -> Result<Vec<(f64, f64)>, PolarsError> {
        for c in [col1, col2] {
            let dtype = self.df.column_dtype(c)?;
            if !dtype.is_primitive_numeric() {
                return Err(PolarsError::InvalidOperation(
                    format!("column '{c}' must be numeric for correlation/covariance, got {dtype}")
                        .into(),
                ));
            }
        }
        let c1 = self.df.resolve_column_name(col1)?;
        let c2 = self.df.resolve_column_name(col2)?;
        let pl = self
            .df
            .lf
            .clone()
            .select([
                col(c1.as_str()).cast(PlDataType::Float64).alias("a"),
                col(c2.as_str()).cast(PlDataType::Float64).alias("b"),
            ])
            .collect()?;
        let a = pl.column("a")?.as_materialized_series().f64()?;
        let b = pl.column("b")?.as_materialized_series().f64()?;
        Ok(a.into_iter()
            .zip(b.into_iter())
            .filter_map(|(x, y)| Some((x?, y?)))
            .collect())
    }

    /// Sample covariance between two columns. PySpark stat.cov (ddof = 1).
    /// Fewer than two complete pairs yields NaN.
    pub fn cov(&self, col1: &str, col2: &str) -> Result<f64, PolarsError> {
        let pairs = self.pairs(col1, col2)?;
        Ok(sample_cov(&pairs))
    }

    /// Pearson correlation between two columns. PySpark stat.corr.
    /// Fewer than two complete pairs, or a constant column, yields NaN.
    pub fn corr(&self, col1: &str, col2: &str) -> Result<f64, PolarsError> {
        let pairs = self.pairs(col1, col2)?;
        Ok(pearson(&pairs))
    }

    /// Pairwise Pearson correlations: a `column` label followed by one double column per input.
    pub fn corr_matrix(&self, cols: &[&str]) -> Result<DataFrame, PolarsError> {
        if cols.is_empty() {
            return Err(PolarsError::InvalidOperation(
                "corr_matrix: at least one column is required".into(),
            ));
        }
        let names = self.df.resolve_all(cols)?;
        let mut columns: Vec<PlColumn> = vec![Series::new("column".into(), names.clone()).into()];
        for other in &names {
            let mut values = Vec::with_capacity(names.len());
            for row in &names {
                values.push(self.corr(row, other)?);
            }
            columns.push(Series::new(other.as_str().into(), values).into());
        }
        Ok(self.df.derive_from_polars(PlDataFrame::new(columns)?))
    }
}

pub(crate) fn sample_cov(pairs: &[(f64, f64)]) -> f64 {
    let n = pairs.len();
    if n < 2 {
        return f64::NAN;
    }
    let (mean_a, mean_b) = means(pairs);
    let s: f64 = pairs.iter().map(|(x, y)| (x - mean_a) * (y - mean_b)).sum();
    s / (n as f64 - 1.0)
}

pub(crate) fn pearson(pairs: &[(f64, f64)]) -> f64 {
    if pairs.len() < 2 {
        return f64::NAN;
    }
    let (mean_a, mean_b) = means(pairs);
    let mut sab = 0.0_f64;
    let mut saa = 0.0_f64;
    let mut sbb = 0.0_f64;
    for (x, y) in pairs {
        let dx = x - mean_a;
        let dy = y - mean_b;
        sab += dx * dy;
        saa += dx * dx;
        sbb += dy * dy;
    }
    if saa == 0.0 || sbb == 0.0 {
        return f64::NAN;
    }
    sab / (saa.sqrt() * sbb.sqrt())
}

fn means(pairs: &[(f64, f64)]) -> (f64, f64) {
    let n = pairs.len() as f64;
    let (sa, sb) = pairs
        .iter()
        .fold((0.0, 0.0), |(sa, sb), (x, y)| (sa + x, sb + y));
    (sa / n, sb / n)
}

const SUMMARY_STATS: [&str; 5] = ["count", "mean", "stddev", "min", "max"];

/// Summary statistics as strings, one row per statistic (PySpark describe).
pub(crate) fn describe(df: &DataFrame, cols: &[&str]) -> Result<DataFrame, PolarsError> {
    let schema = df.polars_schema()?;
    let targets: Vec<String> = if cols.is_empty() {
        schema
            .iter()
            .filter(|(_, dtype)| dtype.is_primitive_numeric())
            .map(|(name, _)| name.to_string())
            .collect()
    } else {
        df.resolve_all(cols)?
    };

    let mut exprs: Vec<Expr> = Vec::with_capacity(targets.len() * SUMMARY_STATS.len());
    for name in &targets {
        let c = col(name.as_str());
        let as_f64 = c.clone().cast(PlDataType::Float64);
        let numeric = schema
            .get(name.as_str())
            .map(|d| d.is_primitive_numeric())
            .unwrap_or(false);
        exprs.push(c.clone().count().alias(format!("count__{name}")));
        if numeric {
            exprs.push(as_f64.clone().mean().alias(format!("mean__{name}")));
            exprs.push(as_f64.std(1).alias(format!("stddev__{name}")));
        } else {
            // Spark reports null mean/stddev for non-numeric columns
            exprs.push(
                polars::prelude::lit(polars::prelude::NULL)
                    .cast(PlDataType::Float64)
                    .alias(format!("mean__{name}")),
            );
            exprs.push(
                polars::prelude::lit(polars::prelude::NULL)
                    .cast(PlDataType::Float64)
                    .alias(format!("stddev__{name}")),
            );
        }
        exprs.push(c.clone().min().alias(format!("min__{name}")));
        exprs.push(c.max().alias(format!("max__{name}")));
    }

    let mut columns: Vec<PlColumn> = vec![Series::new(
        "summary".into(),
        SUMMARY_STATS.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
    )
    .into()];
    if !targets.is_empty() {
        let stats = df.lf.clone().select(exprs).collect()?;
        for name in &targets {
            let mut values: Vec<Option<String>> = Vec::with_capacity(SUMMARY_STATS.len());
            for stat in SUMMARY_STATS {
                let av = stats.column(&format!("{stat}__{name}"))?.get(0)?;
                values.push(if av.is_null() {
                    None
                } else {
                    Some(format_cell(&av))
                });
            }
            columns.push(Series::new(name.as_str().into(), values).into());
        }
    }
    Ok(df.derive_from_polars(PlDataFrame::new(columns)?))
}
