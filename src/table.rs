// In-memory JSON-array-of-records table
use crate::model::{AnalysisError, Result};
use crate::utils::parse_date;
use chrono::NaiveDate;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Resource label used in error messages (usually the file path).
    pub name: String,
    pub rows: Vec<Map<String, Value>>,
}

impl Table {
    pub fn new(name: impl Into<String>, rows: Vec<Map<String, Value>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Parses a JSON array of objects.
    pub fn from_json(name: &str, text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| AnalysisError::data(name, format!("invalid JSON: {}", e)))?;
        let Value::Array(items) = value else {
            return Err(AnalysisError::data(name, "expected a JSON array of records"));
        };

        let mut rows = Vec::with_capacity(items.len());
        for (i, item) in items.into_iter().enumerate() {
            match item {
                Value::Object(map) => rows.push(map),
                other => {
                    return Err(AnalysisError::data(
                        name,
                        format!("row {} is not an object: {}", i, other),
                    ));
                }
            }
        }
        Ok(Self::new(name, rows))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_f64(&self, column: &str) -> Result<Vec<f64>> {
        self.column(column, |v| v.as_f64())
    }

    /// Integer column; floats are accepted when they carry no fractional part.
    pub fn column_i64(&self, column: &str) -> Result<Vec<i64>> {
        self.column(column, |v| {
            v.as_i64().or_else(|| {
                v.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            })
        })
    }

    pub fn column_dates(&self, column: &str) -> Result<Vec<NaiveDate>> {
        self.column(column, parse_date)
    }

    fn column<T>(&self, column: &str, convert: impl Fn(&Value) -> Option<T>) -> Result<Vec<T>> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let cell = row.get(column).ok_or_else(|| {
                    AnalysisError::data(&self.name, format!("missing column '{}' in row {}", column, i))
                })?;
                convert(cell).ok_or_else(|| {
                    AnalysisError::data(
                        &self.name,
                        format!("malformed value {} in column '{}' at row {}", cell, column, i),
                    )
                })
            })
            .collect()
    }
}
