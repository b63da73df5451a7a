//! Delimiter splitting with an explicit cursor.
//!
//! There is no quoting or escaping: a delimiter inside a value always splits it. A line with
//! `n` delimiters yields `n + 1` fields, so empty fields (including a trailing one) are kept.

/// Position of the next unread field in a line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    offset: usize,
    exhausted: bool,
}

impl Cursor {
    /// Cursor at the start of a line
    pub fn start() -> Self {
        Self::default()
    }

    /// Byte offset of the next field
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

/// Read the field at `cursor`, returning it with the cursor for the following field.
///
/// Returns `None` once every field of `line` has been produced.
pub fn next_field(line: &str, delimiter: char, cursor: Cursor) -> Option<(&str, Cursor)> {
    if cursor.exhausted {
        return None;
    }
    let rest = line.get(cursor.offset..)?;
    match rest.find(delimiter) {
        Some(end) => {
            let next = Cursor {
                offset: cursor.offset + end + delimiter.len_utf8(),
                exhausted: false,
            };
            Some((&rest[..end], next))
        }
        None => {
            let next = Cursor {
                offset: line.len(),
                exhausted: true,
            };
            Some((rest, next))
        }
    }
}

/// Iterator over the fields of one line
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    line: &'a str,
    delimiter: char,
    cursor: Cursor,
}

impl<'a> Iterator for Fields<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let (field, next) = next_field(self.line, self.delimiter, self.cursor)?;
        self.cursor = next;
        Some(field)
    }
}

/// Split `line` on `delimiter`
pub fn split_fields(line: &str, delimiter: char) -> Fields<'_> {
    Fields {
        line,
        delimiter,
        cursor: Cursor::start(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(line: &str) -> Vec<&str> {
        split_fields(line, ',').collect()
    }

    #[test]
    fn test_split_basic() {
        assert_eq!(split("id,score,name"), vec!["id", "score", "name"]);
        assert_eq!(split("single"), vec!["single"]);
    }

    #[test]
    fn test_split_keeps_empty_fields() {
        assert_eq!(split(",,bob"), vec!["", "", "bob"]);
        assert_eq!(split("a,"), vec!["a", ""]);
        assert_eq!(split(""), vec![""]);
        assert_eq!(split(","), vec!["", ""]);
    }

    #[test]
    fn test_no_quoting() {
        assert_eq!(split("\"a,b\",c"), vec!["\"a", "b\"", "c"]);
    }

    #[test]
    fn test_cursor_is_explicit_and_reentrant() {
        let line = "x,y";
        let (first, after_first) = next_field(line, ',', Cursor::start()).unwrap();
        assert_eq!(first, "x");
        assert_eq!(after_first.offset(), 2);

        // interleaving a different line does not disturb the first cursor
        let (other, _) = next_field("p;q", ';', Cursor::start()).unwrap();
        assert_eq!(other, "p");

        let (second, done) = next_field(line, ',', after_first).unwrap();
        assert_eq!(second, "y");
        assert!(done.is_exhausted());
        assert_eq!(next_field(line, ',', done), None);

        // replaying a saved cursor yields the same field again
        assert_eq!(next_field(line, ',', after_first).unwrap().0, "y");
    }

    #[test]
    fn test_multibyte_delimiter() {
        let fields: Vec<_> = split_fields("a→b→", '→').collect();
        assert_eq!(fields, vec!["a", "b", ""]);
    }
}
