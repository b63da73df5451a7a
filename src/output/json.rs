//! JSON output format

use std::io::Write;

use anyhow::Result;
use indexmap::IndexMap;
use serde::Serialize;
use termcolor::WriteColor;

use crate::model::{ColumnType, Scalar};

use super::{ColumnSelection, OutputFormatter};

/// JSON output formatter
pub struct JsonOutput {
    pretty: bool,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonColumn {
    #[serde(rename = "type")]
    column_type: Option<ColumnType>,
    values: Vec<serde_json::Value>,
}

/// Missing sentinels become `null`
fn scalar_to_json(value: Scalar<'_>) -> serde_json::Value {
    if value.is_missing() {
        return serde_json::Value::Null;
    }
    match value {
        Scalar::Integer(i) => serde_json::json!(i),
        Scalar::Float(f) => serde_json::json!(f),
        Scalar::Text(s) => serde_json::Value::String(s.to_string()),
    }
}

impl OutputFormatter for JsonOutput {
    fn render(&self, columns: &ColumnSelection<'_>, writer: &mut dyn WriteColor) -> Result<()> {
        // keyed in declaration order
        let output: IndexMap<&str, JsonColumn> = columns
            .iter()
            .map(|(name, column)| {
                let json = JsonColumn {
                    column_type: column.column_type(),
                    values: column.iter().map(scalar_to_json).collect(),
                };
                (*name, json)
            })
            .collect();

        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, &output)?;
        } else {
            serde_json::to_writer(&mut *writer, &output)?;
        }
        writeln!(writer)?;

        Ok(())
    }
}
