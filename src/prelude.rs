//! One-stop prelude for application code.
//!
//! Use `use spark_primer::prelude::*` to get the most common types and functions.
//! For the full API, see the crate root and [`crate::functions`].

pub use crate::column::Column;
pub use crate::config::SessionConfig;
pub use crate::dataframe::{DataFrame, GroupedData};
pub use crate::error::EngineError;
pub use crate::functions::{
    asc, avg, col, count, count_all, desc, lit_bool, lit_f64, lit_i64, lit_str, max, mean, min,
    stddev, sum, SortOrder,
};
pub use crate::local::LocalFrame;
pub use crate::schema::{DataType, StructField, StructType};
pub use crate::session::{DataFrameReader, SparkSession, SparkSessionBuilder};
