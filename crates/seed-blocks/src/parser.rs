//! Block location and row parsing.
//!
//! [`locate`] finds the first region of a document matching a
//! [`BlockPattern`]; [`parse_rows`] turns that region's body into keyed rows.
//!
//! Scanning is quote and comment aware: a `;` inside `'...'` or after `--`
//! never closes a block, and `''` inside a quoted value is a literal quote.

use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::pattern::{BlockPattern, Row, RowKey, RowPattern};

/// A block found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedBlock<'a> {
    /// Byte range of the whole block, header through terminator.
    pub span: Range<usize>,
    /// Row text between the header and the end of the block.
    pub body: &'a str,
}

/// One `UPDATE` statement, keyword through closing `;`. The quoted value may
/// span lines.
static ASSIGNMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^UPDATE\s+[\w.]+\s+SET\s+\w+\s*=\s*'((?:[^']|'')*)'\s+WHERE\s+id\s*=\s*(\d+)\s*;$",
    )
    .expect("Invalid assignment regex")
});

/// Finds the block described by `pattern`.
///
/// Only the **first** occurrence is considered; later duplicates of the same
/// block are left alone. `Ok(None)` means the block is absent, which is
/// distinct from a block that is present with an empty body.
///
/// For insert blocks the span runs through the closing `;` and any `--`
/// comment on the same line, so that replacing the span also replaces the
/// final row's label.
///
/// # Errors
///
/// Returns [`Error::Unterminated`] when the block header is present but its
/// terminator is not.
///
/// # Example
/// ```
/// use seed_blocks::{BlockPattern, locate};
///
/// let doc = "-- seed\nINSERT INTO t (id, url) VALUES\n(1, 'a;b');\n-- tail\n";
/// let block = locate(doc, &BlockPattern::insert("t", ["id", "url"])).unwrap().unwrap();
/// assert_eq!(block.body, "(1, 'a;b');");
/// assert_eq!(&doc[block.span.end..], "\n-- tail\n");
/// ```
pub fn locate<'a>(document: &'a str, pattern: &BlockPattern) -> Result<Option<LocatedBlock<'a>>> {
    match pattern {
        BlockPattern::Insert { table, columns } => {
            locate_insert(document, pattern, table, columns.as_deref())
        }
        BlockPattern::Update {
            begin_marker,
            end_marker,
            ..
        } => locate_between(document, pattern, begin_marker, end_marker),
    }
}

fn insert_header_regex(table: &str, columns: Option<&[String]>) -> Result<Regex> {
    let columns = match columns {
        Some(columns) => columns
            .iter()
            .map(|c| regex::escape(c))
            .collect::<Vec<_>>()
            .join(r"\s*,\s*"),
        None => r"[^)]*".to_string(),
    };
    let pattern = format!(
        r"INSERT INTO\s+{}\s*\(\s*{}\s*\)\s*VALUES[ \t]*(?:\r?\n)?",
        regex::escape(table),
        columns
    );
    Ok(Regex::new(&pattern)?)
}

fn locate_insert<'a>(
    document: &'a str,
    pattern: &BlockPattern,
    table: &str,
    columns: Option<&[String]>,
) -> Result<Option<LocatedBlock<'a>>> {
    let header = insert_header_regex(table, columns)?;
    let Some(found) = header.find(document) else {
        return Ok(None);
    };

    let body_start = found.end();
    let terminator = find_terminator(document, body_start).ok_or_else(|| Error::Unterminated {
        block: pattern.to_string(),
    })?;
    let end = extend_over_comment(document, terminator + 1);

    Ok(Some(LocatedBlock {
        span: found.start()..end,
        body: &document[body_start..end],
    }))
}

fn locate_between<'a>(
    document: &'a str,
    pattern: &BlockPattern,
    begin: &str,
    end: &str,
) -> Result<Option<LocatedBlock<'a>>> {
    if begin.is_empty() || end.is_empty() {
        return Err(Error::InvalidPattern {
            block: pattern.to_string(),
            reason: "begin and end markers must not be empty".into(),
        });
    }

    let Some(start) = find_marker_line(document, 0, begin) else {
        return Ok(None);
    };
    let after_begin = start + begin.len();
    let body_start = after_begin + line_break_len(&document[after_begin..]);

    let end_start =
        find_marker_line(document, body_start, end).ok_or_else(|| Error::Unterminated {
            block: pattern.to_string(),
        })?;

    let raw_body = &document[body_start..end_start];
    let body = raw_body
        .strip_suffix('\n')
        .map(|b| b.strip_suffix('\r').unwrap_or(b))
        .unwrap_or(raw_body);

    Ok(Some(LocatedBlock {
        span: start..end_start + end.len(),
        body,
    }))
}

fn line_break_len(text: &str) -> usize {
    if text.starts_with("\r\n") {
        2
    } else if text.starts_with('\n') {
        1
    } else {
        0
    }
}

#[derive(Clone, Copy)]
enum Scan {
    Code,
    Quoted,
    Comment,
}

/// Byte offset of the first `;` at or after `from` that is outside quotes
/// and comments.
fn find_terminator(text: &str, from: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut state = Scan::Code;
    let mut i = from;

    while i < bytes.len() {
        let b = bytes[i];
        match state {
            Scan::Code => match b {
                b'\'' => state = Scan::Quoted,
                b'-' if bytes.get(i + 1) == Some(&b'-') => {
                    state = Scan::Comment;
                    i += 1;
                }
                b';' => return Some(i),
                _ => {}
            },
            Scan::Quoted => {
                if b == b'\'' {
                    if bytes.get(i + 1) == Some(&b'\'') {
                        i += 1;
                    } else {
                        state = Scan::Code;
                    }
                }
            }
            Scan::Comment => {
                if b == b'\n' {
                    state = Scan::Code;
                }
            }
        }
        i += 1;
    }

    None
}

/// Byte offset of the first line at or after `from` that starts with
/// `marker`, leading spaces and tabs allowed. Lines that begin inside a
/// quoted value or after a `--` comment on the same line never match.
fn find_marker_line(text: &str, from: usize, marker: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut state = Scan::Code;
    let mut line_start = true;
    let mut i = from;

    while i < bytes.len() {
        let b = bytes[i];
        if line_start && matches!(state, Scan::Code) {
            if matches!(b, b' ' | b'\t') {
                i += 1;
                continue;
            }
            if bytes[i..].starts_with(marker.as_bytes()) {
                return Some(i);
            }
            line_start = false;
        }

        match state {
            Scan::Code => match b {
                b'\'' => state = Scan::Quoted,
                b'-' if bytes.get(i + 1) == Some(&b'-') => {
                    state = Scan::Comment;
                    i += 1;
                }
                b'\n' => line_start = true,
                _ => {}
            },
            Scan::Quoted => {
                if b == b'\'' {
                    if bytes.get(i + 1) == Some(&b'\'') {
                        i += 1;
                    } else {
                        state = Scan::Code;
                    }
                }
            }
            Scan::Comment => {
                if b == b'\n' {
                    state = Scan::Code;
                    line_start = true;
                }
            }
        }
        i += 1;
    }

    None
}

/// Extends `pos` over a `-- comment` that follows on the same line.
fn extend_over_comment(text: &str, pos: usize) -> usize {
    let rest = &text[pos..];
    let trimmed = rest.trim_start_matches([' ', '\t']);
    if !trimmed.starts_with("--") {
        return pos;
    }

    let comment_start = pos + (rest.len() - trimmed.len());
    let line_end = text[comment_start..]
        .find('\n')
        .map_or(text.len(), |n| comment_start + n);

    // The CR of a CRLF ending belongs to the surrounding text
    if text[..line_end].ends_with('\r') {
        line_end - 1
    } else {
        line_end
    }
}

/// Parses a block body into rows keyed by their leading identifier.
///
/// Rows come back in ascending key order. When the same key appears more
/// than once, the **last** occurrence wins.
///
/// # Errors
///
/// Returns [`Error::MalformedRow`] for a row whose key is not an integer,
/// whose value column is missing or unquoted, or whose tuple or string is
/// never closed.
///
/// # Example
/// ```
/// use seed_blocks::{RowPattern, parse_rows};
///
/// let rows = parse_rows(
///     "(1, 'a'), -- first\n(1, 'b'); -- again",
///     RowPattern::Tuple { value_column: 1 },
/// ).unwrap();
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[&1].value, "b");
/// assert_eq!(rows[&1].label, "again");
/// ```
pub fn parse_rows(body: &str, pattern: RowPattern) -> Result<BTreeMap<RowKey, Row>> {
    match pattern {
        RowPattern::Tuple { value_column } => parse_tuples(body, value_column),
        RowPattern::Assignment => parse_assignments(body),
    }
}

enum Field {
    Quoted(String),
    Bare(String),
}

fn parse_tuples(body: &str, value_column: usize) -> Result<BTreeMap<RowKey, Row>> {
    let bytes = body.as_bytes();
    let mut rows = BTreeMap::new();
    let mut pos = 0;

    loop {
        pos = skip_trivia(body, pos);
        if pos >= bytes.len() || bytes[pos] == b';' {
            break;
        }
        if bytes[pos] != b'(' {
            let found = body[pos..].chars().next().unwrap_or_default();
            return Err(Error::malformed(pos, format!("expected `(`, found `{found}`")));
        }

        let (fields, after_tuple) = parse_tuple(body, pos)?;
        let tail = parse_row_tail(body, after_tuple);
        let row = tuple_row(fields, value_column, tail.label, pos)?;
        if let Some(previous) = rows.insert(row.key, row) {
            tracing::debug!(key = previous.key, "Duplicate row key, keeping later row");
        }

        pos = tail.next;
        match tail.separator {
            Some(b';') => break,
            Some(_) => {}
            None => {
                let rest = skip_trivia(body, pos);
                if rest < bytes.len() {
                    return Err(Error::malformed(rest, "expected `,` or `;` after row"));
                }
                break;
            }
        }
    }

    Ok(rows)
}

/// Skips whitespace and whole-line `--` comments.
fn skip_trivia(body: &str, mut pos: usize) -> usize {
    let bytes = body.as_bytes();
    loop {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if body[pos..].starts_with("--") {
            pos = body[pos..].find('\n').map_or(bytes.len(), |n| pos + n + 1);
        } else {
            return pos;
        }
    }
}

fn parse_tuple(body: &str, open: usize) -> Result<(Vec<Field>, usize)> {
    let bytes = body.as_bytes();
    let mut fields = Vec::new();
    let mut field_start = open + 1;
    let mut quoted: Option<String> = None;
    let mut depth = 0usize;
    let mut i = open + 1;

    while i < bytes.len() {
        match bytes[i] {
            b'\'' => {
                let (text, close) = read_quoted(body, i)?;
                quoted = Some(text);
                i = close + 1;
                continue;
            }
            b'(' => depth += 1,
            b')' if depth > 0 => depth -= 1,
            b',' | b')' if depth == 0 => {
                fields.push(match quoted.take() {
                    Some(text) => Field::Quoted(text),
                    None => Field::Bare(body[field_start..i].trim().to_string()),
                });
                if bytes[i] == b')' {
                    return Ok((fields, i + 1));
                }
                field_start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }

    Err(Error::malformed(open, "unterminated row tuple"))
}

/// Reads the quoted string opening at `open`, returning its unescaped text
/// and the offset of the closing quote.
fn read_quoted(body: &str, open: usize) -> Result<(String, usize)> {
    let bytes = body.as_bytes();
    let mut i = open + 1;

    while i < bytes.len() {
        if bytes[i] == b'\'' {
            if bytes.get(i + 1) == Some(&b'\'') {
                i += 2;
                continue;
            }
            return Ok((body[open + 1..i].replace("''", "'"), i));
        }
        i += 1;
    }

    Err(Error::malformed(open, "unterminated quoted string"))
}

struct RowTail {
    label: String,
    separator: Option<u8>,
    next: usize,
}

fn skip_inline_space(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && matches!(bytes[pos], b' ' | b'\t') {
        pos += 1;
    }
    pos
}

/// Reads the `,`/`;` after a tuple and the label comment on the same line.
fn parse_row_tail(body: &str, pos: usize) -> RowTail {
    let bytes = body.as_bytes();
    let mut next = skip_inline_space(bytes, pos);

    let separator = match bytes.get(next) {
        Some(&sep @ (b',' | b';')) => {
            next += 1;
            Some(sep)
        }
        _ => None,
    };

    let (label, next) = trailing_label(body, next);

    RowTail {
        label,
        separator,
        next,
    }
}

/// Reads a `-- label` comment starting on the same line as `pos`. Returns
/// the trimmed label and the offset of the end of that line; without a
/// comment the label is empty and `pos` is returned unchanged.
fn trailing_label(body: &str, pos: usize) -> (String, usize) {
    let comment = skip_inline_space(body.as_bytes(), pos);
    if !body[comment..].starts_with("--") {
        return (String::new(), pos);
    }

    let line_end = body[comment..]
        .find('\n')
        .map_or(body.len(), |n| comment + n);
    (body[comment + 2..line_end].trim().to_string(), line_end)
}

fn tuple_row(fields: Vec<Field>, value_column: usize, label: String, offset: usize) -> Result<Row> {
    let key = match fields.first() {
        Some(Field::Bare(raw)) => raw
            .parse::<RowKey>()
            .map_err(|_| Error::malformed(offset, format!("row key `{raw}` is not an integer")))?,
        _ => return Err(Error::malformed(offset, "row key must be an unquoted integer")),
    };

    let value = match fields.into_iter().nth(value_column) {
        Some(Field::Quoted(value)) => value,
        Some(Field::Bare(raw)) => {
            return Err(Error::malformed(
                offset,
                format!("column {value_column} is not a quoted string: `{raw}`"),
            ));
        }
        None => {
            return Err(Error::malformed(
                offset,
                format!("row has no column {value_column}"),
            ));
        }
    };

    Ok(Row { key, value, label })
}

fn parse_assignments(body: &str) -> Result<BTreeMap<RowKey, Row>> {
    let mut rows = BTreeMap::new();
    let mut pos = 0;

    loop {
        pos = skip_trivia(body, pos);
        if pos >= body.len() {
            break;
        }

        let Some(end) = find_terminator(body, pos) else {
            return Err(Error::malformed(pos, "statement is not terminated by `;`"));
        };
        let statement = &body[pos..=end];
        let caps = ASSIGNMENT_REGEX.captures(statement).ok_or_else(|| {
            let first_line = statement.lines().next().unwrap_or_default().trim();
            Error::malformed(pos, format!("expected UPDATE statement, found `{first_line}`"))
        })?;
        let key = caps[2].parse::<RowKey>().map_err(|_| {
            Error::malformed(pos, format!("row key `{}` is out of range", &caps[2]))
        })?;
        let (label, next) = trailing_label(body, end + 1);

        let row = Row {
            key,
            value: caps[1].replace("''", "'"),
            label,
        };
        if let Some(previous) = rows.insert(row.key, row) {
            tracing::debug!(key = previous.key, "Duplicate row key, keeping later row");
        }
        pos = next;
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INSERT: &str = "INSERT INTO t (id, url) VALUES\n";

    fn tuple() -> RowPattern {
        RowPattern::Tuple { value_column: 1 }
    }

    #[test]
    fn test_find_terminator_skips_quoted_semicolon() {
        let text = "(1, 'a;b'), (2, 'c');";
        assert_eq!(find_terminator(text, 0), Some(text.len() - 1));
    }

    #[test]
    fn test_find_terminator_skips_comment_semicolon() {
        let text = "(1, 'a'), -- x; y\n(2, 'b');";
        assert_eq!(find_terminator(text, 0), Some(text.len() - 1));
    }

    #[test]
    fn test_find_terminator_handles_doubled_quote() {
        let text = "(1, 'it''s; fine');";
        assert_eq!(find_terminator(text, 0), Some(text.len() - 1));
    }

    #[test]
    fn test_extend_over_comment_stops_before_crlf() {
        let text = "x; -- label\r\nnext";
        assert_eq!(extend_over_comment(text, 2), "x; -- label".len());
    }

    #[test]
    fn test_locate_absent_is_none() {
        let pattern = BlockPattern::insert("t", ["id", "url"]);
        assert!(locate("SELECT 1;", &pattern).unwrap().is_none());
    }

    #[test]
    fn test_locate_unterminated_is_error() {
        let pattern = BlockPattern::insert("t", ["id", "url"]);
        let doc = format!("{INSERT}(1, 'a')");
        assert!(matches!(
            locate(&doc, &pattern),
            Err(Error::Unterminated { .. })
        ));
    }

    #[test]
    fn test_parse_tuple_unescapes_quotes() {
        let rows = parse_rows("(7, 'O''Brien''s');", tuple()).unwrap();
        assert_eq!(rows[&7].value, "O'Brien's");
    }

    #[test]
    fn test_parse_tuple_nested_parens_in_other_columns() {
        let rows = parse_rows("(3, 'Hotel', NOW(), (1 + 2));", tuple()).unwrap();
        assert_eq!(rows[&3].value, "Hotel");
    }

    #[test]
    fn test_parse_missing_separator_is_error() {
        let err = parse_rows("(1, 'a') (2, 'b');", tuple()).unwrap_err();
        assert!(matches!(err, Error::MalformedRow { .. }));
    }

    #[test]
    fn test_parse_assignment_rejects_garbage_line() {
        let err = parse_rows("DELETE FROM destinations;", RowPattern::Assignment).unwrap_err();
        assert!(err.to_string().contains("expected UPDATE statement"));
    }
}
