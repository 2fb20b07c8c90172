use polars::prelude::{lit, DataType, Expr, NULL};

use crate::error::EngineError;

/// Column - represents a column in a DataFrame, used for building expressions.
/// Thin wrapper around Polars `Expr` with a Spark-style display name.
///
/// A `Column` is an unevaluated expression, not data: it cannot be shown or
/// counted on its own. Select it into a DataFrame first.
#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    expr: Expr,
}

impl Column {
    /// Create a new Column from a column name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Column {
            expr: polars::prelude::col(name.as_str()),
            name,
        }
    }

    /// Create a Column from a Polars Expr
    pub fn from_expr(expr: Expr, name: Option<String>) -> Self {
        Column {
            name: name.unwrap_or_else(|| "<expr>".to_string()),
            expr,
        }
    }

    pub(crate) fn literal(expr: Expr, display: String) -> Self {
        Column {
            name: display,
            expr,
        }
    }

    /// Get the underlying Polars Expr
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Convert to Polars Expr (consumes self)
    pub fn into_expr(self) -> Expr {
        self.expr
    }

    /// Spark-style display name, e.g. `(count > 1)` or `avg(number)`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Alias the column
    pub fn alias(&self, name: &str) -> Column {
        Column {
            name: name.to_string(),
            expr: self.expr.clone().alias(name),
        }
    }

    fn binary(&self, other: &Column, op: &str, expr: Expr) -> Column {
        Column {
            name: format!("({} {} {})", self.name, op, other.name),
            expr,
        }
    }

    pub fn gt(&self, other: &Column) -> Column {
        self.binary(other, ">", self.expr.clone().gt(other.expr.clone()))
    }

    pub fn ge(&self, other: &Column) -> Column {
        self.binary(other, ">=", self.expr.clone().gt_eq(other.expr.clone()))
    }

    pub fn lt(&self, other: &Column) -> Column {
        self.binary(other, "<", self.expr.clone().lt(other.expr.clone()))
    }

    pub fn le(&self, other: &Column) -> Column {
        self.binary(other, "<=", self.expr.clone().lt_eq(other.expr.clone()))
    }

    pub fn eq(&self, other: &Column) -> Column {
        self.binary(other, "=", self.expr.clone().eq(other.expr.clone()))
    }

    pub fn ne(&self, other: &Column) -> Column {
        self.binary(other, "!=", self.expr.clone().neq(other.expr.clone()))
    }

    /// Boolean AND (Spark `&`)
    pub fn and(&self, other: &Column) -> Column {
        self.binary(other, "AND", self.expr.clone().and(other.expr.clone()))
    }

    /// Boolean OR (Spark `|`)
    pub fn or(&self, other: &Column) -> Column {
        self.binary(other, "OR", self.expr.clone().or(other.expr.clone()))
    }

    /// Boolean NOT (Spark `~`)
    #[allow(clippy::should_implement_trait)]
    pub fn not(&self) -> Column {
        Column {
            name: format!("(NOT {})", self.name),
            expr: self.expr.clone().not(),
        }
    }

    pub fn add(&self, other: &Column) -> Column {
        self.binary(other, "+", self.expr.clone() + other.expr.clone())
    }

    pub fn subtract(&self, other: &Column) -> Column {
        self.binary(other, "-", self.expr.clone() - other.expr.clone())
    }

    pub fn multiply(&self, other: &Column) -> Column {
        self.binary(other, "*", self.expr.clone() * other.expr.clone())
    }

    /// True division; integer operands produce a double like Spark's `/`.
    pub fn divide(&self, other: &Column) -> Column {
        let num = self.expr.clone().cast(DataType::Float64);
        let den = other.expr.clone().cast(DataType::Float64);
        self.binary(other, "/", num / den)
    }

    pub fn is_null(&self) -> Column {
        Column {
            name: format!("({} IS NULL)", self.name),
            expr: self.expr.clone().is_null(),
        }
    }

    pub fn is_not_null(&self) -> Column {
        Column {
            name: format!("({} IS NOT NULL)", self.name),
            expr: self.expr.clone().is_not_null(),
        }
    }

    /// Replace nulls with a fallback value.
    pub fn fill_null(&self, value: &Column) -> Column {
        Column {
            name: format!("coalesce({}, {})", self.name, value.name),
            expr: self.expr.clone().fill_null(value.expr.clone()),
        }
    }

    /// Columns cannot be displayed: they hold an expression, not rows.
    /// Always returns [`EngineError::Type`]; use `df.select(...).show(..)` instead.
    pub fn show(&self) -> Result<(), EngineError> {
        Err(EngineError::Type(format!(
            "'Column' object is not displayable: `{}` is an expression, not a DataFrame. \
             Select it first, e.g. df.select([\"{}\"]).show(None)",
            self.name, self.name
        )))
    }

    /// A null literal column.
    pub fn null() -> Column {
        Column::literal(lit(NULL), "NULL".to_string())
    }
}

impl From<&str> for Column {
    fn from(name: &str) -> Self {
        Column::new(name)
    }
}
