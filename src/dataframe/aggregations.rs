//! GroupBy and aggregation operations.

use super::DataFrame;
use crate::column::Column;
use crate::functions;
use polars::prelude::{col, Expr, PolarsError, SortMultipleOptions};

/// GroupedData - represents a DataFrame grouped by certain columns.
/// Similar to PySpark's GroupedData. Nothing runs until an action is called on
/// the DataFrame returned by an aggregation.
pub struct GroupedData {
    source: DataFrame,
    grouping_cols: Vec<String>,
}

impl GroupedData {
    pub(super) fn new(source: DataFrame, grouping_cols: Vec<String>) -> Self {
        GroupedData {
            source,
            grouping_cols,
        }
    }

    pub fn grouping_columns(&self) -> &[String] {
        &self.grouping_cols
    }

    /// Group, aggregate, then order by the keys so repeated runs print identically.
    /// Output columns: grouping columns first, then aggregates. With no grouping
    /// columns the aggregates run over the whole frame and yield one row.
    fn finish(&self, aggs: Vec<Expr>) -> DataFrame {
        if self.grouping_cols.is_empty() {
            return self.source.derive(self.source.lf.clone().select(aggs));
        }
        let keys: Vec<Expr> = self
            .grouping_cols
            .iter()
            .map(|c| col(c.as_str()))
            .collect();
        let lf = self
            .source
            .lf
            .clone()
            .group_by(keys.clone())
            .agg(aggs)
            .sort_by_exprs(keys, SortMultipleOptions::default());
        self.source.derive(lf)
    }

    fn single(
        &self,
        column: &str,
        build: fn(&Column) -> Column,
    ) -> Result<DataFrame, PolarsError> {
        let resolved = self.source.resolve_column_name(column)?;
        let agg = build(&Column::new(resolved));
        Ok(self.finish(vec![agg.into_expr()]))
    }

    fn numeric(
        &self,
        column: &str,
        op: &str,
        build: fn(&Column) -> Column,
    ) -> Result<DataFrame, PolarsError> {
        let dtype = self.source.column_dtype(column)?;
        if !dtype.is_primitive_numeric() {
            return Err(PolarsError::InvalidOperation(
                format!("{op}: column '{column}' is not numeric ({dtype})").into(),
            ));
        }
        self.single(column, build)
    }

    /// Count rows in each group
    pub fn count(&self) -> Result<DataFrame, PolarsError> {
        Ok(self.finish(vec![functions::count_all().into_expr()]))
    }

    /// Average (mean) of a numeric column in each group, named `avg(column)`
    pub fn avg(&self, column: &str) -> Result<DataFrame, PolarsError> {
        self.numeric(column, "avg", functions::avg)
    }

    /// Mean of a numeric column in each group, named `mean(column)`
    pub fn mean(&self, column: &str) -> Result<DataFrame, PolarsError> {
        self.numeric(column, "mean", functions::mean)
    }

    /// Sum a numeric column in each group
    pub fn sum(&self, column: &str) -> Result<DataFrame, PolarsError> {
        self.numeric(column, "sum", functions::sum)
    }

    /// Minimum value of a column in each group
    pub fn min(&self, column: &str) -> Result<DataFrame, PolarsError> {
        self.single(column, functions::min)
    }

    /// Maximum value of a column in each group
    pub fn max(&self, column: &str) -> Result<DataFrame, PolarsError> {
        self.single(column, functions::max)
    }

    /// Several aggregations at once, e.g. `agg(&[avg(&col("area")), max(&col("temp"))])`.
    pub fn agg(&self, aggregations: &[Column]) -> Result<DataFrame, PolarsError> {
        if aggregations.is_empty() {
            return Err(PolarsError::InvalidOperation(
                "agg: at least one aggregation is required".into(),
            ));
        }
        let exprs = aggregations
            .iter()
            .map(|c| self.source.resolve_expr(c.expr().clone()))
            .collect::<Result<Vec<Expr>, PolarsError>>()?;
        let out = self.finish(exprs);
        out.polars_schema()?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use polars::prelude::df;

    use crate::dataframe::DataFrame;
    use crate::functions::{avg, col, count_all};

    fn frame() -> DataFrame {
        DataFrame::from_polars(
            df![
                "k" => &["a", "b", "a"],
                "v" => &[1i64, 2, 3],
            ]
            .unwrap(),
        )
    }

    #[test]
    fn no_keys_is_a_global_aggregate() {
        let out = frame().group_by(&[]).unwrap().avg("v").unwrap();
        let rows = out.collect_as_json_rows().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["avg(v)"].as_f64(), Some(2.0));

        let counted = frame().group_by(&[]).unwrap().count().unwrap();
        assert_eq!(counted.columns().unwrap(), vec!["count"]);
        assert_eq!(counted.head(1).unwrap()[0]["count"].as_i64(), Some(3));
    }

    #[test]
    fn agg_resolves_names_inside_expressions() {
        let out = frame()
            .group_by(&["K"])
            .unwrap()
            .agg(&[avg(&col("V")), count_all()])
            .unwrap();
        let rows = out.collect_as_json_rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["k"].as_str(), Some("a"));
        assert_eq!(rows[0]["avg(V)"].as_f64(), Some(2.0));
    }

    #[test]
    fn agg_unknown_name_lists_columns() {
        let err = frame()
            .group_by(&["k"])
            .unwrap()
            .agg(&[avg(&col("w"))])
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Column 'w' not found"), "{msg}");
        assert!(msg.contains("[k, v]"), "{msg}");
    }
}
