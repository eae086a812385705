use pretty_assertions::assert_eq;
use rstest::rstest;
use seed_providers::unsplash::{SearchPayload, crop_url, first_raw_url};
use seed_providers::wikipedia::{SummaryPayload, pick_image};

#[rstest]
#[case::thumbnail_first(
    r#"{"title":"Eiffel Tower","thumbnail":{"source":"https://upload.example/thumb.jpg","width":320},
        "originalimage":{"source":"https://upload.example/full.jpg"}}"#,
    Some("https://upload.example/thumb.jpg")
)]
#[case::original_when_no_thumbnail(
    r#"{"originalimage":{"source":"https://upload.example/full.jpg"}}"#,
    Some("https://upload.example/full.jpg")
)]
#[case::blank_thumbnail_skipped(
    r#"{"thumbnail":{"source":"  "},"originalimage":{"source":"https://upload.example/full.jpg"}}"#,
    Some("https://upload.example/full.jpg")
)]
#[case::null_images(r#"{"thumbnail":null,"originalimage":null}"#, None)]
#[case::disambiguation_page(r#"{"type":"disambiguation","title":"Galle"}"#, None)]
fn test_pick_image(#[case] json: &str, #[case] expected: Option<&str>) {
    let payload: SummaryPayload = serde_json::from_str(json).unwrap();
    assert_eq!(pick_image(&payload).as_deref(), expected);
}

#[rstest]
#[case::first_result(
    r#"{"total":2,"results":[{"id":"a","urls":{"raw":"https://images.unsplash.com/photo-a?ixid=1","full":"x"}},
        {"id":"b","urls":{"raw":"https://images.unsplash.com/photo-b"}}]}"#,
    Some("https://images.unsplash.com/photo-a?ixid=1&auto=format&fit=crop&w=1200&q=80")
)]
#[case::no_results(r#"{"total":0,"results":[]}"#, None)]
#[case::missing_raw(r#"{"results":[{"id":"a","urls":{"full":"x"}}]}"#, None)]
fn test_first_search_result(#[case] json: &str, #[case] expected: Option<&str>) {
    let payload: SearchPayload = serde_json::from_str(json).unwrap();
    assert_eq!(first_raw_url(&payload).map(crop_url).as_deref(), expected);
}
