//! Block and row patterns

use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric entity identifier leading every row.
pub type RowKey = u64;

/// One parsed or rendered row of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub key: RowKey,
    /// The quoted payload, unescaped.
    pub value: String,
    /// Trailing `-- comment` text. Informational only.
    pub label: String,
}

impl Row {
    pub fn new(key: RowKey, value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Structural matcher for one labeled region of a seed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockPattern {
    /// `INSERT INTO <table> (<columns>) VALUES ...;`
    ///
    /// With `columns: None` any column list matches; such a pattern can be
    /// located and parsed but not rendered.
    Insert {
        table: String,
        #[serde(default)]
        columns: Option<Vec<String>>,
    },
    /// A run of `UPDATE <table> SET <column> = '...' WHERE id = N;` lines
    /// between two marker comments.
    Update {
        table: String,
        column: String,
        begin_marker: String,
        end_marker: String,
    },
}

impl BlockPattern {
    pub fn insert<S: Into<String>>(table: impl Into<String>, columns: impl IntoIterator<Item = S>) -> Self {
        Self::Insert {
            table: table.into(),
            columns: Some(columns.into_iter().map(Into::into).collect()),
        }
    }

    /// Insert block matched regardless of its column list.
    pub fn insert_any(table: impl Into<String>) -> Self {
        Self::Insert {
            table: table.into(),
            columns: None,
        }
    }

    pub fn update(
        table: impl Into<String>,
        column: impl Into<String>,
        begin_marker: impl Into<String>,
        end_marker: impl Into<String>,
    ) -> Self {
        Self::Update {
            table: table.into(),
            column: column.into(),
            begin_marker: begin_marker.into(),
            end_marker: end_marker.into(),
        }
    }

    /// Row grammar used inside this block.
    pub fn row_pattern(&self) -> RowPattern {
        match self {
            Self::Insert { .. } => RowPattern::Tuple { value_column: 1 },
            Self::Update { .. } => RowPattern::Assignment,
        }
    }
}

impl fmt::Display for BlockPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert { table, .. } => write!(f, "INSERT INTO {table}"),
            Self::Update { table, column, .. } => write!(f, "UPDATE {table}.{column}"),
        }
    }
}

/// How to pull `(key, value, label)` out of a block body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowPattern {
    /// Parenthesised tuples. Column 0 is the key; `value_column` must hold a
    /// quoted string.
    Tuple { value_column: usize },
    /// `UPDATE ... SET col = 'value' WHERE id = key;` statements, each
    /// optionally followed by a label comment on its closing line.
    Assignment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_pattern_follows_block_kind() {
        let insert = BlockPattern::insert("hotel_images", ["hotel_id", "image_url"]);
        let update = BlockPattern::update("destinations", "image_url", "-- begin", "-- end");

        assert_eq!(insert.row_pattern(), RowPattern::Tuple { value_column: 1 });
        assert_eq!(update.row_pattern(), RowPattern::Assignment);
    }

    #[test]
    fn test_display_names_the_relation() {
        assert_eq!(
            BlockPattern::insert_any("hotels").to_string(),
            "INSERT INTO hotels"
        );
        assert_eq!(
            BlockPattern::update("destinations", "image_url", "a", "b").to_string(),
            "UPDATE destinations.image_url"
        );
    }
}
