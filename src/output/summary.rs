//! Per-column summary output

use std::io::Write;

use anyhow::Result;
use termcolor::WriteColor;

use super::{ColumnSelection, OutputFormatter};

/// One line per column: name, type, length, capacity and missing count
pub struct SummaryOutput;

impl SummaryOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SummaryOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for SummaryOutput {
    fn render(&self, columns: &ColumnSelection<'_>, writer: &mut dyn WriteColor) -> Result<()> {
        let name_width = columns
            .iter()
            .map(|(name, _)| name.chars().count())
            .max()
            .unwrap_or(0)
            .max("column".len());

        writeln!(
            writer,
            "{:name_width$}  {:7}  {:>8}  {:>8}  {:>7}",
            "column",
            "type",
            "size",
            "capacity",
            "missing",
            name_width = name_width
        )?;
        for (name, column) in columns {
            let column_type = column
                .column_type()
                .map(|t| t.to_string())
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                writer,
                "{:name_width$}  {:7}  {:>8}  {:>8}  {:>7}",
                name,
                column_type,
                column.len(),
                column.capacity(),
                column.missing_count(),
                name_width = name_width
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ColumnType, Matrix};
    use termcolor::NoColor;

    #[test]
    fn test_summary_lines() {
        let mut matrix = Matrix::new(2).unwrap();
        matrix.declare_column("id").unwrap();
        matrix.bind_type(0, ColumnType::Integer, 4).unwrap();
        matrix.append(0, 7i64).unwrap();
        matrix.append(0, i64::MIN).unwrap();

        let columns: Vec<_> = matrix.iter().collect();
        let mut out = NoColor::new(Vec::new());
        SummaryOutput::new().render(&columns, &mut out).unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "column  type         size  capacity  missing");
        assert_eq!(lines[1], "id      integer         2         4        1");
    }
}
