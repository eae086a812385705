//! Block rendering and splicing.
//!
//! [`render`] produces the text of a block from rows; [`splice`] puts that
//! text into a document, either over the existing block or after an anchor
//! block when the target does not exist yet.

use crate::error::{Error, Result};
use crate::parser::locate;
use crate::pattern::{BlockPattern, Row};

/// Doubles quotes so the value survives a round trip through the parser.
fn escape_value(value: &str) -> String {
    value.replace('\'', "''")
}

/// Labels live in a line comment, so they must stay on one line.
fn flatten_label(label: &str) -> String {
    label.replace(['\r', '\n'], " ").trim().to_string()
}

fn label_suffix(label: &str) -> String {
    let label = flatten_label(label);
    if label.is_empty() {
        String::new()
    } else {
        format!(" -- {label}")
    }
}

/// Renders rows into the block's textual convention.
///
/// Rows are written in the order given; callers are responsible for passing
/// them in ascending key order.
///
/// # Errors
///
/// Returns [`Error::NotRenderable`] for an insert pattern without an exact
/// two-column list, or for an insert block with no rows (SQL has no empty
/// `VALUES` list).
///
/// # Example
/// ```
/// use seed_blocks::{BlockPattern, Row, render};
///
/// let pattern = BlockPattern::insert("attraction_images", ["attraction_id", "image_url"]);
/// let rows = [Row::new(1, "https://old.example/eiffel.jpg", "Eiffel Tower")];
/// assert_eq!(
///     render(&rows, &pattern).unwrap(),
///     "INSERT INTO attraction_images (attraction_id, image_url) VALUES\n\
///      (1, 'https://old.example/eiffel.jpg'); -- Eiffel Tower"
/// );
/// ```
pub fn render(rows: &[Row], pattern: &BlockPattern) -> Result<String> {
    match pattern {
        BlockPattern::Insert { table, columns } => {
            let columns = match columns.as_deref() {
                Some(columns @ [_, _]) => columns.join(", "),
                _ => {
                    return Err(Error::NotRenderable {
                        block: pattern.to_string(),
                        reason: "insert blocks need exactly a key column and a value column"
                            .into(),
                    });
                }
            };
            if rows.is_empty() {
                return Err(Error::NotRenderable {
                    block: pattern.to_string(),
                    reason: "no rows to write".into(),
                });
            }

            let mut lines = Vec::with_capacity(rows.len() + 1);
            lines.push(format!("INSERT INTO {table} ({columns}) VALUES"));
            for (idx, row) in rows.iter().enumerate() {
                let separator = if idx + 1 < rows.len() { "," } else { ";" };
                lines.push(format!(
                    "({}, '{}'){}{}",
                    row.key,
                    escape_value(&row.value),
                    separator,
                    label_suffix(&row.label)
                ));
            }
            Ok(lines.join("\n"))
        }
        BlockPattern::Update {
            table,
            column,
            begin_marker,
            end_marker,
        } => {
            let mut lines = Vec::with_capacity(rows.len() + 2);
            lines.push(begin_marker.clone());
            for row in rows {
                lines.push(format!(
                    "UPDATE {table} SET {column} = '{}' WHERE id = {};{}",
                    escape_value(&row.value),
                    row.key,
                    label_suffix(&row.label)
                ));
            }
            lines.push(end_marker.clone());
            Ok(lines.join("\n"))
        }
    }
}

/// Writes `new_block` into `document`.
///
/// - If `target` is present, exactly its span is replaced and every byte
///   outside it is kept.
/// - If `target` is absent and `anchor` is found, the block is inserted right
///   after the anchor, separated by a blank line.
/// - Otherwise nothing is guessed and an error is returned.
///
/// `new_block` is inserted as-is; it is not re-parsed.
///
/// # Errors
///
/// Returns [`Error::BlockNotFound`] when the target is absent and no anchor
/// was given, [`Error::AnchorNotFound`] when the anchor is missing too, and
/// any locate error for malformed blocks.
pub fn splice(
    document: &str,
    target: &BlockPattern,
    new_block: &str,
    anchor: Option<&BlockPattern>,
) -> Result<String> {
    if let Some(existing) = locate(document, target)? {
        tracing::debug!(block = %target, start = existing.span.start, end = existing.span.end, "Replacing block");
        return Ok(replace_span(document, existing.span, new_block));
    }

    let Some(anchor) = anchor else {
        return Err(Error::BlockNotFound {
            block: target.to_string(),
        });
    };
    let anchor_block = locate(document, anchor)?.ok_or_else(|| Error::AnchorNotFound {
        block: anchor.to_string(),
    })?;

    let insert_at = anchor_block.span.end;
    tracing::debug!(block = %target, anchor = %anchor, at = insert_at, "Inserting block after anchor");

    let mut out = String::with_capacity(document.len() + new_block.len() + 2);
    out.push_str(&document[..insert_at]);
    out.push_str("\n\n");
    out.push_str(new_block);
    out.push_str(&document[insert_at..]);
    Ok(out)
}

fn replace_span(document: &str, span: std::ops::Range<usize>, text: &str) -> String {
    let mut out = String::with_capacity(document.len() - span.len() + text.len());
    out.push_str(&document[..span.start]);
    out.push_str(text);
    out.push_str(&document[span.end..]);
    out
}
