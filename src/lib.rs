//! spark-primer: a guided tour of a Spark-style DataFrame API next to an
//! eager in-memory DataFrame library.
//!
//! The Spark-style side ([`SparkSession`], [`DataFrame`], [`Column`]) builds
//! lazy Polars plans that run only when an action such as `show` or `count`
//! is called. The comparison side ([`LocalFrame`]) executes every call
//! immediately. The [`tour`] module walks through both with a small literal
//! dataset and the forest-fire observations.
//!
//! # Example
//! ```
//! use spark_primer::prelude::*;
//!
//! let spark = SparkSession::builder().app_name("demo").get_or_create();
//! let df = spark_primer::tour::literal_dataset(&spark).unwrap();
//! let busy = df.filter(&col("count").gt(&lit_i64(1))).unwrap();
//! assert_eq!(busy.count().unwrap(), 4);
//! spark.stop();
//! ```

pub mod column;
pub mod config;
pub mod dataframe;
pub mod error;
pub mod fires;
pub mod functions;
pub mod local;
pub mod prelude;
pub mod schema;
pub mod session;
pub mod tour;

pub use column::Column;
pub use config::SessionConfig;
pub use dataframe::{DataFrame, DataFrameStat, GroupedData};
pub use error::EngineError;
pub use functions::*;
pub use local::LocalFrame;
pub use schema::{schema_from_json, DataType, StructField, StructType};
pub use session::{DataFrameReader, SparkSession, SparkSessionBuilder};
pub use tour::{Step, Tour, TourSummary};
