//! Integration tests for block location and row parsing.

use pretty_assertions::assert_eq;
use rstest::rstest;
use seed_blocks::{BlockPattern, Error, Row, RowPattern, locate, parse_rows};

const SEED: &str = "\
-- Seed data
INSERT INTO destinations (id, name, country, image_url) VALUES
(1, 'Paris', 'France', NULL),
(2, 'Côte d''Azur', 'France', NULL); -- trailing note

INSERT INTO attraction_images (attraction_id, image_url) VALUES
(1, 'https://img.example/eiffel.jpg'), -- Eiffel Tower
-- Asia
(3, 'https://img.example/senso;ji.jpg'); -- Sensō-ji

SELECT 1;
";

fn attraction_images() -> BlockPattern {
    BlockPattern::insert("attraction_images", ["attraction_id", "image_url"])
}

#[test]
fn test_locate_insert_block_body_and_span() {
    let block = locate(SEED, &attraction_images()).unwrap().unwrap();

    assert!(SEED[block.span.clone()].starts_with("INSERT INTO attraction_images"));
    assert!(SEED[block.span.clone()].ends_with("; -- Sensō-ji"));
    assert_eq!(&SEED[block.span.end..], "\n\nSELECT 1;\n");
    assert!(block.body.starts_with("(1, "));
}

#[test]
fn test_locate_does_not_stop_at_quoted_semicolon() {
    let block = locate(SEED, &attraction_images()).unwrap().unwrap();
    let rows = parse_rows(block.body, RowPattern::Tuple { value_column: 1 }).unwrap();

    assert_eq!(rows[&3].value, "https://img.example/senso;ji.jpg");
}

#[test]
fn test_locate_any_columns_matches_long_header() {
    let block = locate(SEED, &BlockPattern::insert_any("destinations"))
        .unwrap()
        .unwrap();
    let rows = parse_rows(block.body, RowPattern::Tuple { value_column: 1 }).unwrap();

    assert_eq!(rows[&1].value, "Paris");
    assert_eq!(rows[&2].value, "Côte d'Azur");
    assert_eq!(rows[&2].label, "trailing note");
}

#[test]
fn test_locate_exact_columns_rejects_other_header() {
    let pattern = BlockPattern::insert("destinations", ["id", "image_url"]);
    assert!(locate(SEED, &pattern).unwrap().is_none());
}

#[test]
fn test_locate_first_occurrence_only() {
    let doc = "\
INSERT INTO t (id, url) VALUES
(1, 'first');
INSERT INTO t (id, url) VALUES
(1, 'second');
";
    let block = locate(doc, &BlockPattern::insert("t", ["id", "url"]))
        .unwrap()
        .unwrap();

    assert_eq!(block.span.start, 0);
    assert_eq!(block.body, "(1, 'first');");
}

#[test]
fn test_locate_empty_update_body_is_present() {
    let pattern = BlockPattern::update("destinations", "image_url", "-- begin", "-- end");
    let doc = "x\n-- begin\n-- end\ny";

    let block = locate(doc, &pattern).unwrap().unwrap();

    assert_eq!(block.body, "");
    assert_eq!(&doc[block.span], "-- begin\n-- end");
}

#[test]
fn test_locate_update_without_end_marker_is_error() {
    let pattern = BlockPattern::update("destinations", "image_url", "-- begin", "-- end");
    let err = locate("-- begin\nUPDATE destinations SET image_url = 'a' WHERE id = 1;", &pattern)
        .unwrap_err();

    assert!(matches!(err, Error::Unterminated { .. }));
}

#[test]
fn test_locate_update_ignores_end_marker_inside_value() {
    let pattern = BlockPattern::update("destinations", "image_url", "-- begin", "-- end");
    let doc = "\
-- begin
UPDATE destinations SET image_url = 'x
-- end y' WHERE id = 1; -- x
-- end
tail";

    let block = locate(doc, &pattern).unwrap().unwrap();
    let rows = parse_rows(block.body, pattern.row_pattern()).unwrap();

    assert_eq!(&doc[block.span.end..], "\ntail");
    assert_eq!(rows[&1], Row::new(1, "x\n-- end y", "x"));
}

#[test]
fn test_locate_update_begin_marker_inside_value_is_not_a_block() {
    let pattern = BlockPattern::update("destinations", "image_url", "-- begin", "-- end");
    let doc = "INSERT INTO notes (id, body) VALUES\n(1, 'see\n-- begin');\n";

    assert!(locate(doc, &pattern).unwrap().is_none());
}

#[test]
fn test_locate_update_end_marker_after_text_on_line_is_ignored() {
    let pattern = BlockPattern::update("destinations", "image_url", "-- begin", "-- end");
    let doc = "-- begin\nUPDATE destinations SET image_url = 'a' WHERE id = 1; -- end\n-- end";

    let block = locate(doc, &pattern).unwrap().unwrap();

    assert_eq!(block.span.end, doc.len());
    assert_eq!(parse_rows(block.body, pattern.row_pattern()).unwrap()[&1].label, "end");
}

#[test]
fn test_parse_assignment_value_spanning_lines() {
    let body = "\
UPDATE destinations SET image_url = 'a
b' WHERE id = 1; -- first
-- between
UPDATE destinations SET image_url = 'c;d' WHERE id = 2;";

    let rows = parse_rows(body, RowPattern::Assignment).unwrap();

    assert_eq!(
        rows.into_values().collect::<Vec<_>>(),
        vec![Row::new(1, "a\nb", "first"), Row::new(2, "c;d", "")]
    );
}

#[rstest]
#[case::unterminated("UPDATE destinations SET image_url = 'a' WHERE id = 1", "not terminated")]
#[case::trailing_text(
    "UPDATE destinations SET image_url = 'a' WHERE id = 1; oops",
    "not terminated"
)]
#[case::other_statement("DELETE FROM destinations;", "expected UPDATE statement")]
#[case::huge_key(
    "UPDATE destinations SET image_url = 'a' WHERE id = 99999999999999999999;",
    "out of range"
)]
fn test_parse_assignments_malformed(#[case] body: &str, #[case] message: &str) {
    let err = parse_rows(body, RowPattern::Assignment).unwrap_err();

    assert!(matches!(err, Error::MalformedRow { .. }));
    assert!(
        err.to_string().contains(message),
        "expected `{message}` in `{err}`"
    );
}

#[test]
fn test_parse_rows_last_write_wins() {
    let rows = parse_rows(
        "(2, 'b'),\n(1, 'a'),\n(2, 'c');",
        RowPattern::Tuple { value_column: 1 },
    )
    .unwrap();

    let values: Vec<_> = rows.values().map(|r| (r.key, r.value.as_str())).collect();
    assert_eq!(values, vec![(1, "a"), (2, "c")]);
}

#[test]
fn test_parse_assignment_rows_with_labels() {
    let body = "\
UPDATE destinations SET image_url = 'https://img.example/paris.jpg' WHERE id = 1; -- Paris
UPDATE destinations SET image_url = 'https://img.example/o''hare.jpg' WHERE id = 2;";

    let rows = parse_rows(body, RowPattern::Assignment).unwrap();

    assert_eq!(
        rows.into_values().collect::<Vec<_>>(),
        vec![
            Row::new(1, "https://img.example/paris.jpg", "Paris"),
            Row::new(2, "https://img.example/o'hare.jpg", ""),
        ]
    );
}

#[rstest]
#[case::quoted_key("('1', 'a');", "unquoted integer")]
#[case::text_key("(abc, 'a');", "not an integer")]
#[case::bare_value("(1, NULL);", "not a quoted string")]
#[case::missing_column("(1);", "no column 1")]
#[case::open_tuple("(1, 'a'", "unterminated row tuple")]
#[case::open_string("(1, 'a);", "unterminated quoted string")]
#[case::stray_text("nonsense;", "expected `(`")]
fn test_parse_rows_malformed(#[case] body: &str, #[case] message: &str) {
    let err = parse_rows(body, RowPattern::Tuple { value_column: 1 }).unwrap_err();

    assert!(matches!(err, Error::MalformedRow { .. }));
    assert!(
        err.to_string().contains(message),
        "expected `{message}` in `{err}`"
    );
}

#[test]
fn test_parse_rows_empty_body() {
    let rows = parse_rows("", RowPattern::Tuple { value_column: 1 }).unwrap();
    assert!(rows.is_empty());
}
