//! Integration tests for rendering and splicing.

use pretty_assertions::assert_eq;
use seed_blocks::{BlockPattern, Error, Row, RowPattern, locate, parse_rows, render, splice};

fn attraction_images() -> BlockPattern {
    BlockPattern::insert("attraction_images", ["attraction_id", "image_url"])
}

fn destination_updates() -> BlockPattern {
    BlockPattern::update(
        "destinations",
        "image_url",
        "-- Destination image updates (Wikipedia)",
        "-- End destination image updates",
    )
}

#[test]
fn test_render_insert_block() {
    let rows = [
        Row::new(1, "https://img.example/eiffel.jpg", "Eiffel Tower"),
        Row::new(2, "https://img.example/louvre.jpg", "Louvre"),
        Row::new(3, "https://en.wikipedia.org/wiki/Sens%C5%8D-ji", ""),
    ];

    insta::assert_snapshot!(render(&rows, &attraction_images()).unwrap(), @r###"
    INSERT INTO attraction_images (attraction_id, image_url) VALUES
    (1, 'https://img.example/eiffel.jpg'), -- Eiffel Tower
    (2, 'https://img.example/louvre.jpg'), -- Louvre
    (3, 'https://en.wikipedia.org/wiki/Sens%C5%8D-ji');
    "###);
}

#[test]
fn test_render_update_block() {
    let rows = [
        Row::new(1, "https://img.example/paris.jpg", "Paris"),
        Row::new(26, "https://img.example/pahalgam.jpg", "Kashmir"),
    ];

    insta::assert_snapshot!(render(&rows, &destination_updates()).unwrap(), @r###"
    -- Destination image updates (Wikipedia)
    UPDATE destinations SET image_url = 'https://img.example/paris.jpg' WHERE id = 1; -- Paris
    UPDATE destinations SET image_url = 'https://img.example/pahalgam.jpg' WHERE id = 26; -- Kashmir
    -- End destination image updates
    "###);
}

#[test]
fn test_render_single_row_matches_documented_shape() {
    let rows = [Row::new(1, "https://old.example/eiffel.jpg", "Eiffel Tower")];

    assert_eq!(
        render(&rows, &attraction_images()).unwrap(),
        "INSERT INTO attraction_images (attraction_id, image_url) VALUES\n(1, 'https://old.example/eiffel.jpg'); -- Eiffel Tower"
    );
}

#[test]
fn test_render_then_parse_keeps_rows() {
    let rows = vec![
        Row::new(4, "https://img.example/it's.jpg", "Tokyo Skytree"),
        Row::new(9, "https://img.example/a;b.jpg", "Gateway of India"),
    ];

    for pattern in [attraction_images(), destination_updates()] {
        let text = render(&rows, &pattern).unwrap();
        let block = locate(&text, &pattern).unwrap().unwrap();
        let parsed = parse_rows(block.body, pattern.row_pattern()).unwrap();

        assert_eq!(block.span, 0..text.len());
        assert_eq!(parsed.into_values().collect::<Vec<_>>(), rows);
    }
}

#[test]
fn test_splice_replaces_only_target_span() {
    let doc = "\
-- header
INSERT INTO attraction_images (attraction_id, image_url) VALUES
(1, 'old'); -- Old Label
INSERT INTO other (id) VALUES (1);
";
    let block = render(&[Row::new(1, "new", "New Label")], &attraction_images()).unwrap();

    let out = splice(doc, &attraction_images(), &block, None).unwrap();

    assert_eq!(
        out,
        "\
-- header
INSERT INTO attraction_images (attraction_id, image_url) VALUES
(1, 'new'); -- New Label
INSERT INTO other (id) VALUES (1);
"
    );
}

#[test]
fn test_splice_is_idempotent_on_own_output() {
    let doc = "before\nINSERT INTO attraction_images (attraction_id, image_url) VALUES\n(1, 'a'); -- A\nafter\n";
    let block = render(&[Row::new(1, "b", "B")], &attraction_images()).unwrap();

    let once = splice(doc, &attraction_images(), &block, None).unwrap();
    let twice = splice(&once, &attraction_images(), &block, None).unwrap();

    assert_eq!(once, twice);
    assert_eq!(once.matches("-- B").count(), 1);
}

#[test]
fn test_splice_inserts_after_anchor() {
    let doc = "\
INSERT INTO destinations (id, name) VALUES
(1, 'Paris');
-- more seed data
";
    let block = render(&[Row::new(1, "u", "Paris")], &destination_updates()).unwrap();
    let anchor = BlockPattern::insert_any("destinations");

    let out = splice(doc, &destination_updates(), &block, Some(&anchor)).unwrap();

    assert_eq!(
        out,
        "\
INSERT INTO destinations (id, name) VALUES
(1, 'Paris');

-- Destination image updates (Wikipedia)
UPDATE destinations SET image_url = 'u' WHERE id = 1; -- Paris
-- End destination image updates
-- more seed data
"
    );
}

#[test]
fn test_splice_prefers_existing_target_over_anchor() {
    let doc = "\
INSERT INTO destinations (id, name) VALUES
(1, 'Paris');

-- Destination image updates (Wikipedia)
UPDATE destinations SET image_url = 'old' WHERE id = 1; -- Paris
-- End destination image updates
";
    let block = render(&[Row::new(1, "new", "Paris")], &destination_updates()).unwrap();
    let anchor = BlockPattern::insert_any("destinations");

    let out = splice(doc, &destination_updates(), &block, Some(&anchor)).unwrap();

    assert_eq!(out.matches("-- Destination image updates").count(), 1);
    assert!(out.contains("'new' WHERE id = 1"));
    assert!(!out.contains("'old'"));
}

#[test]
fn test_splice_missing_anchor_fails() {
    let block = render(&[Row::new(1, "u", "")], &destination_updates()).unwrap();
    let anchor = BlockPattern::insert_any("destinations");

    let err = splice("SELECT 1;", &destination_updates(), &block, Some(&anchor)).unwrap_err();

    assert!(matches!(err, Error::AnchorNotFound { .. }));
}

#[test]
fn test_splice_does_not_validate_new_block() {
    let doc = "INSERT INTO attraction_images (attraction_id, image_url) VALUES\n(1, 'a');";

    let out = splice(doc, &attraction_images(), "not sql at all", None).unwrap();

    assert_eq!(out, "not sql at all");
    assert!(parse_rows(&out, RowPattern::Tuple { value_column: 1 }).is_err());
}
