//! Sequential line source over any buffered reader

use std::io::{self, BufRead, Read};

use crate::error::{IngestError, IngestResult};

use super::{Line, LineSource};

/// Reads lines one at a time into a reused buffer.
///
/// `\n` and `\r\n` terminators are stripped. A line longer than `max_line_length` bytes is an
/// error rather than being truncated.
pub struct LineReader<R> {
    reader: R,
    buffer: Vec<u8>,
    line_number: usize,
    max_line_length: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R, max_line_length: usize) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            line_number: 0,
            max_line_length,
        }
    }
}

impl<R: BufRead> LineSource for LineReader<R> {
    fn next_line(&mut self) -> IngestResult<Option<Line<'_>>> {
        self.buffer.clear();
        // terminator plus one byte is enough to tell an over-long line apart
        let limit = (self.max_line_length as u64).saturating_add(3);
        let read = (&mut self.reader)
            .take(limit)
            .read_until(b'\n', &mut self.buffer)?;
        if read == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        let mut end = self.buffer.len();
        if self.buffer[..end].ends_with(b"\n") {
            end -= 1;
        }
        if self.buffer[..end].ends_with(b"\r") {
            end -= 1;
        }
        if end > self.max_line_length {
            return Err(IngestError::LineTooLong {
                line: self.line_number,
                limit: self.max_line_length,
            });
        }

        let text = std::str::from_utf8(&self.buffer[..end]).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("line {} is not valid UTF-8: {}", self.line_number, e),
            )
        })?;
        Ok(Some(Line {
            number: self.line_number,
            text,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str, max: usize) -> Vec<(usize, String)> {
        let mut reader = LineReader::new(input.as_bytes(), max);
        let mut out = Vec::new();
        while let Some(line) = reader.next_line().unwrap() {
            out.push((line.number, line.text.to_string()));
        }
        out
    }

    #[test]
    fn test_strips_terminators() {
        let lines = collect("a,b\r\n1,2\n3,4", 100);
        assert_eq!(
            lines,
            vec![
                (1, "a,b".to_string()),
                (2, "1,2".to_string()),
                (3, "3,4".to_string())
            ]
        );
    }

    #[test]
    fn test_end_of_input_is_distinct() {
        let mut reader = LineReader::new("".as_bytes(), 10);
        assert!(reader.next_line().unwrap().is_none());
        assert!(reader.next_line().unwrap().is_none());
    }

    #[test]
    fn test_line_at_limit_is_accepted() {
        let lines = collect("abcd\r\nxy\n", 4);
        assert_eq!(lines[0].1, "abcd");
        assert_eq!(lines[1].1, "xy");
    }

    #[test]
    fn test_line_over_limit_is_an_error() {
        let mut reader = LineReader::new("ok\nabcdefgh\n".as_bytes(), 4);
        assert!(reader.next_line().unwrap().is_some());
        let err = reader.next_line().unwrap_err();
        assert!(matches!(err, IngestError::LineTooLong { line: 2, limit: 4 }));
    }

    #[test]
    fn test_unbounded_limit_does_not_overflow() {
        let lines = collect("a\n1\n", usize::MAX);
        assert_eq!(lines, vec![(1, "a".to_string()), (2, "1".to_string())]);
    }

    #[test]
    fn test_invalid_utf8_is_io_error() {
        let bytes: &[u8] = b"a,\xff\n";
        let mut reader = LineReader::new(bytes, 100);
        assert!(matches!(reader.next_line(), Err(IngestError::Io(_))));
    }
}
