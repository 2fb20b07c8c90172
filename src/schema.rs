use polars::prelude::{DataType as PlDataType, Field, Schema, TimeUnit};
use serde::{Deserialize, Serialize};

/// Spark SQL data types surfaced by `print_schema` and `dtypes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataType {
    String,
    Integer,
    Long,
    Double,
    Boolean,
    Date,
    Timestamp,
    Array(Box<DataType>),
}

impl DataType {
    /// Spark's simple string for the type (`long`, `array<string>`, ...).
    pub fn simple_string(&self) -> String {
        match self {
            DataType::String => "string".to_string(),
            DataType::Integer => "integer".to_string(),
            DataType::Long => "long".to_string(),
            DataType::Double => "double".to_string(),
            DataType::Boolean => "boolean".to_string(),
            DataType::Date => "date".to_string(),
            DataType::Timestamp => "timestamp".to_string(),
            DataType::Array(inner) => format!("array<{}>", inner.simple_string()),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            DataType::Integer | DataType::Long | DataType::Double
        )
    }

    pub(crate) fn from_polars(dtype: &PlDataType) -> Self {
        match dtype {
            PlDataType::String => DataType::String,
            PlDataType::Int8 | PlDataType::Int16 | PlDataType::Int32 => DataType::Integer,
            PlDataType::Int64
            | PlDataType::UInt8
            | PlDataType::UInt16
            | PlDataType::UInt32
            | PlDataType::UInt64 => DataType::Long,
            PlDataType::Float32 | PlDataType::Float64 => DataType::Double,
            PlDataType::Boolean => DataType::Boolean,
            PlDataType::Date => DataType::Date,
            PlDataType::Datetime(_, _) => DataType::Timestamp,
            PlDataType::List(inner) => DataType::Array(Box::new(DataType::from_polars(inner))),
            _ => DataType::String,
        }
    }

    pub(crate) fn to_polars(&self) -> PlDataType {
        match self {
            DataType::String => PlDataType::String,
            DataType::Integer => PlDataType::Int32,
            DataType::Long => PlDataType::Int64,
            DataType::Double => PlDataType::Float64,
            DataType::Boolean => PlDataType::Boolean,
            DataType::Date => PlDataType::Date,
            DataType::Timestamp => PlDataType::Datetime(TimeUnit::Microseconds, None),
            DataType::Array(inner) => PlDataType::List(Box::new(inner.to_polars())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructField {
    pub name: String,
    pub data_type: DataType,
    pub nullable: bool,
}

impl StructField {
    pub fn new(name: impl Into<String>, data_type: DataType, nullable: bool) -> Self {
        StructField {
            name: name.into(),
            data_type,
            nullable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructType {
    fields: Vec<StructField>,
}

impl StructType {
    pub fn new(fields: Vec<StructField>) -> Self {
        StructType { fields }
    }

    pub fn from_polars_schema(schema: &Schema) -> Self {
        let fields = schema
            .iter()
            .map(|(name, dtype)| StructField {
                name: name.to_string(),
                data_type: DataType::from_polars(dtype),
                // Polars does not track nullability per field; Spark infers nullable columns.
                nullable: true,
            })
            .collect();
        StructType { fields }
    }

    pub fn to_polars_schema(&self) -> Schema {
        self.fields
            .iter()
            .map(|f| Field::new(f.name.as_str().into(), f.data_type.to_polars()))
            .collect()
    }

    pub fn fields(&self) -> &[StructField] {
        &self.fields
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn field(&self, name: &str) -> Option<&StructField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Render the schema the way `printSchema` does:
    ///
    /// ```text
    /// root
    ///  |-- color: string (nullable = true)
    /// ```
    pub fn tree_string(&self) -> String {
        let mut out = String::from("root\n");
        for f in &self.fields {
            out.push_str(&format!(
                " |-- {}: {} (nullable = {})\n",
                f.name,
                f.data_type.simple_string(),
                f.nullable
            ));
        }
        out
    }

    /// Serialize the schema to a JSON string (fields with name, data_type, nullable).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Parse a schema previously produced by [`StructType::to_json`].
pub fn schema_from_json(json: &str) -> Result<StructType, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_struct_type_from_polars_schema() {
        let polars_schema = Schema::from_iter(vec![
            Field::new("color".into(), PlDataType::String),
            Field::new("count".into(), PlDataType::Int64),
            Field::new("X".into(), PlDataType::Int32),
            Field::new("temp".into(), PlDataType::Float64),
            Field::new("valid".into(), PlDataType::Boolean),
        ]);
        let st = StructType::from_polars_schema(&polars_schema);
        let types: Vec<String> = st
            .fields()
            .iter()
            .map(|f| f.data_type.simple_string())
            .collect();
        assert_eq!(types, vec!["string", "long", "integer", "double", "boolean"]);
        assert!(st.fields().iter().all(|f| f.nullable));
    }

    #[test]
    fn test_tree_string() {
        let st = StructType::new(vec![
            StructField::new("color", DataType::String, true),
            StructField::new("count", DataType::Long, true),
        ]);
        assert_eq!(
            st.tree_string(),
            "root\n |-- color: string (nullable = true)\n |-- count: long (nullable = true)\n"
        );
    }

    #[test]
    fn test_array_simple_string() {
        let t = DataType::Array(Box::new(DataType::Double));
        assert_eq!(t.simple_string(), "array<double>");
        assert!(!t.is_numeric());
        assert!(DataType::Long.is_numeric());
    }

    #[test]
    fn test_to_polars_schema() {
        let st = StructType::new(vec![
            StructField::new("id", DataType::Long, false),
            StructField::new("score", DataType::Double, true),
        ]);
        let pl = st.to_polars_schema();
        assert_eq!(pl.len(), 2);
        assert_eq!(pl.get("id"), Some(&PlDataType::Int64));
        assert_eq!(pl.get("score"), Some(&PlDataType::Float64));
    }

    #[test]
    fn test_schema_json() {
        let st = StructType::new(vec![StructField::new("area", DataType::Double, true)]);
        let json = st.to_json().unwrap();
        assert!(json.contains("\"name\":\"area\""));
        let back = schema_from_json(&json).unwrap();
        assert_eq!(back, st);
        assert_eq!(back.field("area").map(|f| f.nullable), Some(true));
    }
}
