//! Fixture-driven tests over a realistic captured feed body.

use feedtrim::prelude::*;
use serde_json::Value;

static FEED_HOME: &str = include_str!("fixtures/feed_home.json");

fn config(min: u64) -> Config {
    ConfigBuilder::new().min_popularity(min).build().unwrap()
}

#[test]
fn test_home_feed_filtered_body_snapshot() {
    let hook = ResponseHook::new(config(5000));
    let outcome = hook.process_str(FEED_HOME);

    assert_eq!(outcome.dropped, 2);
    assert_eq!(outcome.candidate_lists, 1);

    let body = outcome.action.body().expect("fixture body must rewrite");
    insta::assert_snapshot!(body, @r#"{"code":0,"message":"0","ttl":1,"data":{"refresh_type":4,"items":[{"title":"rhythm game finals","uri":"bilibili://video/222","stat":{"view":8700,"like":431,"danmaku":77},"owner":{"name":"arcade"}},{"title":"live banner","uri":"bilibili://live/333","card_type":"banner"},{"title":"threshold cut","uri":"bilibili://video/555","stat":{"view":5000,"like":200},"owner":{"name":"edge"}},{"title":"trending documentary","uri":"bilibili://video/666","stat":{"view":999999,"like":54321,"danmaku":9000},"owner":{"name":"docs"}}],"side_tags":["recommend","hot","following"]}}"#);
}

#[test]
fn test_home_feed_structure_survives_filtering() {
    let hook = ResponseHook::new(config(5000));
    let outcome = hook.process_str(FEED_HOME);

    let filtered: Value =
        serde_json::from_str(outcome.action.body().unwrap()).expect("valid JSON out");
    let original: Value = serde_json::from_str(FEED_HOME).unwrap();

    // Everything outside the candidate list is preserved exactly
    assert_eq!(filtered["code"], original["code"]);
    assert_eq!(filtered["message"], original["message"]);
    assert_eq!(filtered["ttl"], original["ttl"]);
    assert_eq!(filtered["data"]["refresh_type"], original["data"]["refresh_type"]);
    assert_eq!(filtered["data"]["side_tags"], original["data"]["side_tags"]);

    // The item without a stat block survives on the conservative path
    let titles: Vec<&str> = filtered["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["title"].as_str().unwrap())
        .collect();
    assert!(titles.contains(&"live banner"));
    assert!(!titles.contains(&"city walk vlog"));
}

#[tokio::test]
async fn test_pipeline_processes_fixture_lines() {
    let compact = serde_json::to_string(&serde_json::from_str::<Value>(FEED_HOME).unwrap())
        .unwrap();
    let lines = vec![compact, "PK\u{3}\u{4}zip-looking garbage".to_string()];

    let pipeline = ResponsePipeline::new(config(5000));
    let outcomes: Vec<_> = pipeline.process_lines(lines.into_iter()).collect().await;

    assert_eq!(outcomes.len(), 2);

    let feed = outcomes[0].as_ref().unwrap();
    assert!(!feed.passthrough);
    assert_eq!(feed.dropped, 2);

    let junk = outcomes[1].as_ref().unwrap();
    assert!(junk.passthrough);
    assert_eq!(junk.body, "PK\u{3}\u{4}zip-looking garbage");
    assert_eq!(junk.dropped, 0);
}

#[tokio::test]
async fn test_pipeline_passes_binary_capture_files_through() {
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("feed.json");
    std::fs::write(&json_path, FEED_HOME).unwrap();
    let binary_path = dir.path().join("frame.bin");
    std::fs::write(&binary_path, [0xffu8, 0xfe, 0x00, 0x42]).unwrap();

    let pipeline = ResponsePipeline::new(config(5000));
    let outcomes: Vec<_> = pipeline
        .process_files(vec![json_path, binary_path])
        .collect()
        .await;

    assert_eq!(outcomes.len(), 2);
    assert!(!outcomes[0].as_ref().unwrap().passthrough);
    assert!(outcomes[1].as_ref().unwrap().passthrough);
}
