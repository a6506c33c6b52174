use crate::e2e::helpers;

use helpers::fakes::FakeTtsRepository;
use helpers::{DiskTestContext, TestContext};
use hyper::StatusCode;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_play_audio_inline(ctx: &TestContext) {

    let converted = ctx.client.convert_text("Hello", "fr").await.unwrap();
    converted.assert_status(StatusCode::CREATED);

    let response = ctx.client.get(&converted.str_field("play_url")).await.unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "audio/mpeg")
        .assert_header("content-disposition", "inline");
    assert_eq!(response.body_bytes, FakeTtsRepository::audio_for("Bonjour", "fr"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_download_audio_as_attachment(ctx: &TestContext) {

    let converted = ctx.client.convert_text("Hello", "fr").await.unwrap();
    let audio_id = converted.str_field("audio_id");

    let response = ctx
        .client
        .get(&format!("/download/{}", audio_id))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "audio/mpeg")
        .assert_header(
            "content-disposition",
            &format!("attachment; filename=\"{}\"", audio_id),
        );
    assert_eq!(response.body_bytes, FakeTtsRepository::audio_for("Bonjour", "fr"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_same_bytes_for_play_and_download(ctx: &TestContext) {

    let converted = ctx.client.convert_text("Good morning", "es").await.unwrap();

    let played = ctx.client.get(&converted.str_field("play_url")).await.unwrap();
    let downloaded = ctx.client.get(&converted.str_field("download_url")).await.unwrap();

    assert_eq!(played.body_bytes, downloaded.body_bytes);
    assert_eq!(
        played.header("content-length"),
        Some(&played.body_bytes.len().to_string())
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_unknown_audio(ctx: &TestContext) {

    let response = ctx
        .client
        .get("/play/9b2f4c6e-3a1d-4e8f-9c7b-2d5e6f7a8b9c.mp3")
        .await
        .unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_code("not_found")
        .assert_error_message("Audio file not found.");

    let response = ctx
        .client
        .get("/download/9b2f4c6e-3a1d-4e8f-9c7b-2d5e6f7a8b9c.mp3")
        .await
        .unwrap();

    response.assert_status(StatusCode::NOT_FOUND);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_malformed_audio_id(ctx: &TestContext) {

    for path in ["/play/not-an-id", "/download/..%2FCargo.toml", "/play/notes.txt"] {
        let response = ctx.client.get(path).await.unwrap();
        response
            .assert_status(StatusCode::NOT_FOUND)
            .assert_header_exists("x-request-id");
    }
}

#[test_context(DiskTestContext)]
#[tokio::test]
async fn it_should_store_audio_on_disk(ctx: &DiskTestContext) {

    let converted = ctx.client.convert_text("Hello", "fr").await.unwrap();
    converted.assert_status(StatusCode::CREATED);
    let audio_id = converted.str_field("audio_id");

    let stored = std::fs::read(ctx.storage_dir.path().join("uploads").join(&audio_id)).unwrap();
    assert_eq!(stored, FakeTtsRepository::audio_for("Bonjour", "fr"));

    let response = ctx.client.get(&format!("/play/{}", audio_id)).await.unwrap();
    response.assert_status(StatusCode::OK);
    assert_eq!(response.body_bytes, stored);
}

#[test_context(DiskTestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_missing_file_on_disk(ctx: &DiskTestContext) {

    let converted = ctx.client.convert_text("Hello", "fr").await.unwrap();
    let audio_id = converted.str_field("audio_id");

    std::fs::remove_file(ctx.storage_dir.path().join("uploads").join(&audio_id)).unwrap();

    let response = ctx.client.get(&format!("/download/{}", audio_id)).await.unwrap();
    response.assert_status(StatusCode::NOT_FOUND);
}
