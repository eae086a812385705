//! Block handling for SQL seed documents.
//!
//! A seed document is free-form SQL text that contains a few structured
//! regions this crate knows how to find and rewrite. Two block shapes exist:
//!
//! ## Insert blocks
//!
//! ```text
//! INSERT INTO attraction_images (attraction_id, image_url) VALUES
//! (1, 'https://example.org/a.jpg'), -- Eiffel Tower
//! (2, 'https://example.org/b.jpg'); -- Louvre
//! ```
//!
//! ## Update blocks
//!
//! ```text
//! -- Destination image updates (Wikipedia)
//! UPDATE destinations SET image_url = 'https://example.org/p.jpg' WHERE id = 1; -- Paris
//! -- End destination image updates
//! ```
//!
//! The [`parser`] module locates a block and parses its rows, the [`writer`]
//! module renders rows back into the same convention and splices the result
//! into the document. Quoted values use SQL escaping: a doubled quote is a
//! literal quote.

pub mod error;
pub mod parser;
pub mod pattern;
pub mod writer;

pub use error::{Error, Result};
pub use parser::{LocatedBlock, locate, parse_rows};
pub use pattern::{BlockPattern, Row, RowKey, RowPattern};
pub use writer::{render, splice};
