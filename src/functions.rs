use crate::column::Column;
use polars::prelude::{len, lit, DataType, Expr};

/// Get a column by name
pub fn col(name: &str) -> Column {
    Column::new(name)
}

/// Create a literal column from a value
pub fn lit_i64(value: i64) -> Column {
    Column::literal(lit(value), value.to_string())
}

pub fn lit_f64(value: f64) -> Column {
    Column::literal(lit(value), value.to_string())
}

pub fn lit_bool(value: bool) -> Column {
    Column::literal(lit(value), value.to_string())
}

pub fn lit_str(value: &str) -> Column {
    Column::literal(lit(value), value.to_string())
}

fn aggregate(func: &str, input: &Column, expr: Expr) -> Column {
    let name = format!("{}({})", func, input.name());
    Column::from_expr(expr.alias(name.as_str()), Some(name))
}

/// Count of non-null values (Spark `count(col)`)
pub fn count(col: &Column) -> Column {
    aggregate(
        "count",
        col,
        col.expr().clone().count().cast(DataType::Int64),
    )
}

/// Count of rows in the group (Spark `count(*)`)
pub fn count_all() -> Column {
    Column::from_expr(
        len().cast(DataType::Int64).alias("count"),
        Some("count".to_string()),
    )
}

/// Sum aggregation
pub fn sum(col: &Column) -> Column {
    aggregate("sum", col, col.expr().clone().sum())
}

/// Average aggregation
pub fn avg(col: &Column) -> Column {
    aggregate("avg", col, col.expr().clone().mean())
}

/// Mean aggregation (alias of `avg`, named like Spark's `mean`)
pub fn mean(col: &Column) -> Column {
    aggregate("mean", col, col.expr().clone().mean())
}

/// Maximum aggregation
pub fn max(col: &Column) -> Column {
    aggregate("max", col, col.expr().clone().max())
}

/// Minimum aggregation
pub fn min(col: &Column) -> Column {
    aggregate("min", col, col.expr().clone().min())
}

/// Standard deviation (sample) aggregation (Spark stddev / stddev_samp)
pub fn stddev(col: &Column) -> Column {
    aggregate("stddev", col, col.expr().clone().std(1))
}

/// Sort direction for `order_by`.
#[derive(Debug, Clone)]
pub struct SortOrder {
    pub(crate) column: String,
    pub(crate) descending: bool,
}

impl SortOrder {
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn is_descending(&self) -> bool {
        self.descending
    }
}

/// Ascending sort on a column
pub fn asc(name: &str) -> SortOrder {
    SortOrder {
        column: name.to_string(),
        descending: false,
    }
}

/// Descending sort on a column
pub fn desc(name: &str) -> SortOrder {
    SortOrder {
        column: name.to_string(),
        descending: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_names() {
        assert_eq!(avg(&col("number")).name(), "avg(number)");
        assert_eq!(count(&col("color")).name(), "count(color)");
        assert_eq!(count_all().name(), "count");
        assert_eq!(stddev(&col("temp")).name(), "stddev(temp)");
    }

    #[test]
    fn literal_names() {
        assert_eq!(lit_i64(3).name(), "3");
        assert_eq!(lit_bool(true).name(), "true");
        assert_eq!(lit_str("mar").name(), "mar");
    }

    #[test]
    fn sort_orders() {
        assert!(desc("area").is_descending());
        assert!(!asc("month").is_descending());
        assert_eq!(asc("month").column(), "month");
    }
}
