//! [`TestDocument`] builder for seed file scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Small seed document with every block the built-in jobs touch, except the
/// destination image updates (so the first run inserts them).
pub const SAMPLE_SEED: &str = "\
-- Sample seed data

INSERT INTO destinations (id, name, country, rating) VALUES
(1, 'Paris', 'France', 4.8),
(2, 'Tokyo', 'Japan', 4.7),
(26, 'Kashmir', 'India', 4.6);

INSERT INTO hotels (id, destination_id, name, price_per_night) VALUES
(1, 1, 'Hotel Le Meurice', 450.00),
(2, 2, 'Park Hyatt Tokyo', 600.00),
(3, 26, 'The Khyber Himalayan Resort', 300.00);

INSERT INTO attraction_images (attraction_id, image_url) VALUES
(1, 'https://old.example/eiffel.jpg'), -- Eiffel Tower
(2, 'https://old.example/louvre.jpg'); -- Louvre

INSERT INTO hotel_images (hotel_id, image_url) VALUES
(1, 'https://old.example/meurice.jpg'), -- Hotel Le Meurice
(2, 'https://old.example/hyatt.jpg'); -- Park Hyatt Tokyo

-- End of seed data
";

/// A seed document written to a temporary directory.
///
/// # Example
///
/// ```rust,no_run
/// use seed_test_utils::TestDocument;
///
/// let doc = TestDocument::sample();
/// doc.assert_contains("INSERT INTO hotels");
/// ```
pub struct TestDocument {
    temp_dir: TempDir,
    path: PathBuf,
}

impl TestDocument {
    /// Write `content` as `data.sql` in a fresh temporary directory.
    pub fn new(content: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.sql");
        fs::write(&path, content).unwrap();
        Self { temp_dir, path }
    }

    /// Document holding [`SAMPLE_SEED`].
    pub fn sample() -> Self {
        Self::new(SAMPLE_SEED)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write another file next to the document and return its path.
    pub fn write_sibling(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// Current content of the document on disk.
    pub fn content(&self) -> String {
        fs::read_to_string(&self.path).unwrap()
    }

    /// # Panics
    /// Panics if the document does not contain `needle`.
    pub fn assert_contains(&self, needle: &str) {
        let content = self.content();
        assert!(
            content.contains(needle),
            "Expected document to contain {needle:?}, got:\n{content}"
        );
    }

    /// # Panics
    /// Panics if the document on disk differs from `expected`.
    pub fn assert_unchanged(&self, expected: &str) {
        assert_eq!(self.content(), expected, "Document was modified");
    }
}
