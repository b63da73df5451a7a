//! Aligned table output with a colored header

use std::io::Write;

use anyhow::Result;
use termcolor::{Color, ColorSpec, WriteColor};

use super::{ColumnSelection, OutputFormatter};

/// Box-drawn table, one printed row per ingested row
pub struct TerminalOutput {
    header_color: Color,
}

impl TerminalOutput {
    pub fn new() -> Self {
        Self {
            header_color: Color::Cyan,
        }
    }

    fn write_border(
        &self,
        writer: &mut dyn WriteColor,
        widths: &[usize],
        (left, mid, right): (char, char, char),
    ) -> Result<()> {
        let mut line = String::new();
        line.push(left);
        for (i, width) in widths.iter().enumerate() {
            line.push_str(&"─".repeat(*width + 2));
            if i < widths.len() - 1 {
                line.push(mid);
            }
        }
        line.push(right);
        writeln!(writer, "{}", line)?;
        Ok(())
    }

    fn write_header(
        &self,
        writer: &mut dyn WriteColor,
        headers: &[String],
        widths: &[usize],
    ) -> Result<()> {
        write!(writer, "│")?;
        for (cell, width) in headers.iter().zip(widths) {
            write!(writer, " ")?;
            writer.set_color(ColorSpec::new().set_fg(Some(self.header_color)).set_bold(true))?;
            write!(writer, "{:width$}", cell, width = *width)?;
            writer.reset()?;
            write!(writer, " │")?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TerminalOutput {
    fn render(&self, columns: &ColumnSelection<'_>, writer: &mut dyn WriteColor) -> Result<()> {
        if columns.is_empty() {
            writeln!(writer, "No columns.")?;
            return Ok(());
        }

        let headers: Vec<String> = columns
            .iter()
            .map(|(name, column)| match column.column_type() {
                Some(ty) => format!("{} ({})", name, ty),
                None => name.to_string(),
            })
            .collect();
        let row_count = columns.iter().map(|(_, c)| c.len()).max().unwrap_or(0);
        let rows: Vec<Vec<String>> = (0..row_count)
            .map(|i| {
                columns
                    .iter()
                    .map(|(_, c)| c.get(i).map(|v| v.display().into_owned()).unwrap_or_default())
                    .collect()
            })
            .collect();

        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        self.write_border(writer, &widths, ('┌', '┬', '┐'))?;
        self.write_header(writer, &headers, &widths)?;
        self.write_border(writer, &widths, ('├', '┼', '┤'))?;
        for row in &rows {
            write!(writer, "│")?;
            for (cell, width) in row.iter().zip(&widths) {
                write!(writer, " {:width$} │", cell, width = *width)?;
            }
            writeln!(writer)?;
        }
        self.write_border(writer, &widths, ('└', '┴', '┘'))?;
        writeln!(writer, "{} rows × {} columns", row_count, columns.len())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ColumnType, Matrix};
    use termcolor::NoColor;

    #[test]
    fn test_renders_sentinels_as_null() {
        let mut matrix = Matrix::new(4).unwrap();
        matrix.declare_column("id").unwrap();
        matrix.declare_column("name").unwrap();
        matrix.bind_type(0, ColumnType::Integer, 4).unwrap();
        matrix.bind_type(1, ColumnType::Text, 4).unwrap();
        matrix.append(0, 1i64).unwrap();
        matrix.append(1, "alice").unwrap();
        matrix.append(0, i64::MIN).unwrap();
        matrix.append(1, "bob").unwrap();

        let columns: Vec<_> = matrix.iter().collect();
        let mut out = NoColor::new(Vec::new());
        TerminalOutput::new().render(&columns, &mut out).unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();

        assert!(text.contains("│ id (integer) │ name (text) │"));
        assert!(text.contains("│ NULL         │ bob         │"));
        assert!(text.contains("2 rows × 2 columns"));
    }
}
