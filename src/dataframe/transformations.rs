//! DataFrame transformation operations: select, filter, with_column, rename, drop,
//! order_by, limit, distinct. Each returns a new DataFrame with an extended plan.

use super::{display, DataFrame};
use crate::column::Column;
use crate::functions::SortOrder;
use crate::schema::DataType;
use polars::prelude::{col, DataType as PlDataType, Expr, PolarsError, SortMultipleOptions};

/// Select columns by name. Names are resolved according to case sensitivity.
pub fn select(df: &DataFrame, cols: &[&str]) -> Result<DataFrame, PolarsError> {
    let exprs: Vec<Expr> = df
        .resolve_all(cols)?
        .iter()
        .map(|name| col(name.as_str()))
        .collect();
    Ok(df.derive(df.lf.clone().select(exprs)))
}

/// Select column expressions. Column references inside them are resolved by name first.
pub fn select_columns(df: &DataFrame, cols: &[Column]) -> Result<DataFrame, PolarsError> {
    let exprs = cols
        .iter()
        .map(|c| df.resolve_expr(c.expr().clone()))
        .collect::<Result<Vec<Expr>, PolarsError>>()?;
    let out = df.derive(df.lf.clone().select(exprs));
    out.polars_schema()?;
    Ok(out)
}

/// Filter rows. The predicate must evaluate to Boolean.
pub fn filter(df: &DataFrame, condition: &Column) -> Result<DataFrame, PolarsError> {
    let predicate = df.resolve_expr(condition.expr().clone())?;
    let probe = df
        .lf
        .clone()
        .select([predicate.clone().alias("__predicate")])
        .collect_schema()?;
    if let Some(dtype) = probe.get("__predicate") {
        if *dtype != PlDataType::Boolean {
            return Err(PolarsError::InvalidOperation(
                format!(
                    "filter predicate must be Boolean, got {} for expression {}",
                    DataType::from_polars(dtype).simple_string(),
                    condition.name()
                )
                .into(),
            ));
        }
    }
    Ok(df.derive(df.lf.clone().filter(predicate)))
}

/// Add or replace a column using an expression.
pub fn with_column(
    df: &DataFrame,
    column_name: &str,
    column: &Column,
) -> Result<DataFrame, PolarsError> {
    // replacing an existing column keeps its original spelling
    let target = df
        .resolve_column_name(column_name)
        .unwrap_or_else(|_| column_name.to_string());
    let expr = df.resolve_expr(column.expr().clone())?;
    let out = df.derive(df.lf.clone().with_column(expr.alias(target.as_str())));
    out.polars_schema()?;
    Ok(out)
}

/// Rename a column, keeping its position.
pub fn with_column_renamed(
    df: &DataFrame,
    old_name: &str,
    new_name: &str,
) -> Result<DataFrame, PolarsError> {
    let old = df.resolve_column_name(old_name)?;
    let exprs: Vec<Expr> = df
        .columns()?
        .iter()
        .map(|name| {
            if *name == old {
                col(name.as_str()).alias(new_name)
            } else {
                col(name.as_str())
            }
        })
        .collect();
    Ok(df.derive(df.lf.clone().select(exprs)))
}

/// Drop columns. Unknown names are ignored, as in PySpark.
pub fn drop(df: &DataFrame, columns: &[&str]) -> Result<DataFrame, PolarsError> {
    let to_drop: Vec<String> = columns
        .iter()
        .filter_map(|c| df.resolve_column_name(c).ok())
        .collect();
    let keep: Vec<Expr> = df
        .columns()?
        .iter()
        .filter(|name| !to_drop.contains(name))
        .map(|name| col(name.as_str()))
        .collect();
    Ok(df.derive(df.lf.clone().select(keep)))
}

/// Sort by one or more columns. Ties keep their input order.
pub fn order_by(df: &DataFrame, orders: &[SortOrder]) -> Result<DataFrame, PolarsError> {
    if orders.is_empty() {
        return Ok(df.clone());
    }
    let mut exprs = Vec::with_capacity(orders.len());
    let mut descending = Vec::with_capacity(orders.len());
    for o in orders {
        exprs.push(col(df.resolve_column_name(&o.column)?.as_str()));
        descending.push(o.descending);
    }
    let options = SortMultipleOptions::default()
        .with_order_descending_multi(descending)
        .with_maintain_order(true);
    Ok(df.derive(df.lf.clone().sort_by_exprs(exprs, options)))
}

/// Keep the first n rows.
pub fn limit(df: &DataFrame, n: usize) -> DataFrame {
    df.derive(df.lf.clone().limit(display::idx(n)))
}

/// Drop duplicate rows, keeping the first occurrence of each.
pub fn distinct(df: &DataFrame) -> Result<DataFrame, PolarsError> {
    let keys: Vec<Expr> = df
        .columns()?
        .iter()
        .map(|name| col(name.as_str()))
        .collect();
    let empty: Vec<Expr> = Vec::new();
    Ok(df.derive(df.lf.clone().group_by_stable(keys).agg(empty)))
}
