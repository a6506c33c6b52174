use crate::e2e::helpers;

use helpers::api_client::FilePart;
use helpers::fakes::FakeTtsRepository;
use helpers::{TestContext, TEST_MAX_UPLOAD_BYTES};
use hyper::StatusCode;
use test_context::test_context;

const FRENCH_TEXT: &str =
    "Bonjour tout le monde, comment allez-vous aujourd'hui ? Je suis très content de vous voir.";

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_convert_typed_text(ctx: &TestContext) {

    let response = ctx.client.convert_text("Hello", "fr").await.unwrap();

    response.assert_status(StatusCode::CREATED);

    let audio_id = response.str_field("audio_id");
    assert!(audio_id.ends_with(".mp3"));
    assert_eq!(response.str_field("message"), "Conversion successful.");
    assert_eq!(response.str_field("language"), "fr");
    assert_eq!(response.str_field("language_name"), "french");
    assert_eq!(response.str_field("play_url"), format!("/play/{}", audio_id));
    assert_eq!(response.str_field("download_url"), format!("/download/{}", audio_id));
    assert!(response.body.as_ref().unwrap().get("created_at").is_some());

    // Typed text is never run through detection
    assert!(response.body.as_ref().unwrap().get("detected_language").is_none());

    assert_eq!(
        *ctx.tts.calls.lock(),
        vec![("Bonjour".to_string(), "fr".to_string())]
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_translate_from_auto_source(ctx: &TestContext) {

    ctx.client.convert_text("Good morning", "es").await.unwrap()
        .assert_status(StatusCode::CREATED);

    assert_eq!(
        *ctx.translator.calls.lock(),
        vec![("Good morning".to_string(), "auto".to_string(), "es".to_string())]
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_detect_language_of_uploaded_text(ctx: &TestContext) {

    let response = ctx
        .client
        .post_multipart(
            "/api/convert",
            &[("language", "en")],
            Some(FilePart {
                file_name: "greeting.txt",
                content: FRENCH_TEXT.as_bytes(),
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::CREATED);

    let detected = response
        .body
        .as_ref()
        .and_then(|b| b.get("detected_language"))
        .expect("Missing detected_language");
    assert_eq!(detected.get("code").and_then(|v| v.as_str()), Some("fr"));
    assert_eq!(detected.get("name").and_then(|v| v.as_str()), Some("french"));

    // Speech is produced from the translated text, in the target language
    let expected_text = format!("[en] {}", FRENCH_TEXT);
    assert_eq!(
        *ctx.tts.calls.lock(),
        vec![(expected_text, "en".to_string())]
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_prefer_upload_over_typed_text(ctx: &TestContext) {

    let response = ctx
        .client
        .post_multipart(
            "/api/convert",
            &[("text", "Hello"), ("language", "en")],
            Some(FilePart {
                file_name: "greeting.txt",
                content: FRENCH_TEXT.as_bytes(),
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::CREATED);
    assert_eq!(ctx.translator.calls.lock()[0].0, FRENCH_TEXT);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_ignore_empty_file_field(ctx: &TestContext) {

    let response = ctx
        .client
        .post_multipart(
            "/api/convert",
            &[("text", "Hello"), ("language", "fr")],
            Some(FilePart {
                file_name: "",
                content: b"",
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::CREATED);
    assert!(response.body.as_ref().unwrap().get("detected_language").is_none());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_normalize_target_language(ctx: &TestContext) {

    let response = ctx.client.convert_text("Hello", " FR ").await.unwrap();

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.str_field("language"), "fr");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_request_without_input(ctx: &TestContext) {

    let response = ctx
        .client
        .post_multipart("/api/convert", &[], None)
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_code("input_error")
        .assert_error_message("Please provide text or upload a file and select a language.");
    assert_eq!(ctx.translator.call_count(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_text_without_language(ctx: &TestContext) {

    let response = ctx
        .client
        .post_multipart("/api/convert", &[("text", "Hello")], None)
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_code("input_error");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_unknown_language_without_calling_services(ctx: &TestContext) {

    let response = ctx.client.convert_text("Hello", "xx").await.unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_code("input_error")
        .assert_error_message("Invalid destination language selected");
    assert_eq!(ctx.translator.call_count(), 0);
    assert_eq!(ctx.tts.call_count(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_auto_as_destination(ctx: &TestContext) {

    let response = ctx.client.convert_text("Hello", "auto").await.unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("No destination language selected");
    assert_eq!(ctx.translator.call_count(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_detection_failure_for_empty_upload(ctx: &TestContext) {

    let response = ctx
        .client
        .post_multipart(
            "/api/convert",
            &[("language", "en")],
            Some(FilePart {
                file_name: "empty.txt",
                content: b"",
            }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY)
        .assert_error_code("detection_error")
        .assert_error_message("Could not detect language.");
    assert_eq!(ctx.translator.call_count(), 0);
    assert_eq!(ctx.tts.call_count(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_detection_failure_for_one_word_upload(ctx: &TestContext) {

    let response = ctx
        .client
        .post_multipart(
            "/api/convert",
            &[("language", "fr")],
            Some(FilePart {
                file_name: "word.txt",
                content: b"Hello",
            }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY)
        .assert_error_code("detection_error");
    assert_eq!(ctx.translator.call_count(), 0);
    assert_eq!(ctx.tts.call_count(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_non_text_upload(ctx: &TestContext) {

    let response = ctx
        .client
        .post_multipart(
            "/api/convert",
            &[("language", "en")],
            Some(FilePart {
                file_name: "slides.pdf",
                content: b"%PDF-1.7",
            }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Only plain-text (.txt) uploads are supported.");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_text_over_limit(ctx: &TestContext) {

    let long_text = "a".repeat(5001);

    let response = ctx.client.convert_text(&long_text, "fr").await.unwrap();

    response
        .assert_status(StatusCode::PAYLOAD_TOO_LARGE)
        .assert_error_code("input_error");
    assert_eq!(ctx.translator.call_count(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_upload_over_body_limit(ctx: &TestContext) {

    let content = vec![b'a'; TEST_MAX_UPLOAD_BYTES + 1];

    let response = ctx
        .client
        .post_multipart(
            "/api/convert",
            &[("language", "en")],
            Some(FilePart {
                file_name: "big.txt",
                content: &content,
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(ctx.translator.call_count(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_translation_failure_with_cause(ctx: &TestContext) {

    ctx.translator.fail_with("quota exceeded");

    let response = ctx.client.convert_text("Hello", "fr").await.unwrap();

    response
        .assert_status(StatusCode::BAD_GATEWAY)
        .assert_error_code("translation_error")
        .assert_error_message("Translation failed: quota exceeded");
    assert_eq!(ctx.tts.call_count(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_synthesis_failure(ctx: &TestContext) {

    ctx.tts.fail_with("voice unavailable");

    let response = ctx.client.convert_text("Hello", "fr").await.unwrap();

    response
        .assert_status(StatusCode::BAD_GATEWAY)
        .assert_error_code("synthesis_error")
        .assert_error_message("voice unavailable");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_issue_distinct_ids_for_identical_requests(ctx: &TestContext) {

    let first = ctx.client.convert_text("Hello", "fr").await.unwrap();
    let second = ctx.client.convert_text("Hello", "fr").await.unwrap();

    first.assert_status(StatusCode::CREATED);
    second.assert_status(StatusCode::CREATED);
    assert_ne!(first.str_field("audio_id"), second.str_field("audio_id"));

    for response in [&first, &second] {
        let audio = ctx.client.get(&response.str_field("play_url")).await.unwrap();
        audio.assert_status(StatusCode::OK);
        assert_eq!(audio.body_bytes, FakeTtsRepository::audio_for("Bonjour", "fr"));
    }
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_handle_concurrent_conversions(ctx: &TestContext) {

    let mut futures = Vec::new();
    for i in 0..8 {
        let client = ctx.client.clone();
        futures.push(async move { client.convert_text(&format!("Message {}", i), "de").await });
    }

    let results = futures::future::join_all(futures).await;

    let mut ids = std::collections::HashSet::new();
    for result in results {
        let response = result.unwrap();
        response.assert_status(StatusCode::CREATED);
        ids.insert(response.str_field("audio_id"));
    }
    assert_eq!(ids.len(), 8);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_include_request_id_in_conversion_responses(ctx: &TestContext) {

    let success = ctx.client.convert_text("Hello", "fr").await.unwrap();
    success.assert_header_exists("x-request-id");

    let failure = ctx.client.convert_text("Hello", "xx").await.unwrap();
    failure.assert_header_exists("x-request-id");
}
