use crate::e2e::helpers;

use base64::Engine;
use farmer_advisory::domain::tts::LanguageCode;
use helpers::{MultipartForm, TestContext, JPEG_BYTES};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::io::Cursor;
use test_context::test_context;

fn audio_bytes(body: &Value) -> Vec<u8> {
    let encoded = body
        .get("audioContent")
        .and_then(|v| v.as_str())
        .expect("audioContent should be a base64 string");
    base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .expect("audioContent should be valid base64")
}

fn wav_frames(bytes: &[u8]) -> u32 {
    hound::WavReader::new(Cursor::new(bytes))
        .expect("audio should be a WAV file")
        .duration()
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_answer_a_text_question_with_audio(ctx: &TestContext) {
    ctx.llm
        .reply_with("Spray neem oil in the evening. Repeat after a week.");

    let form = MultipartForm::new()
        .text("text", "My tomato leaves have white spots")
        .text("language", "hi");
    let response = ctx.client.post_form("/predict", form).await.unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();

    assert_eq!(
        body.get("analysis").and_then(|v| v.as_str()),
        Some("Spray neem oil in the evening. Repeat after a week.")
    );
    assert_eq!(
        body.get("audioMimeType").and_then(|v| v.as_str()),
        Some("audio/wav")
    );

    let audio = audio_bytes(body);
    assert_eq!(&audio[..4], b"RIFF");
    assert_eq!(wav_frames(&audio), 3_200);

    // One speech call per sentence, in the selected language
    assert_eq!(
        ctx.tts.calls(),
        vec![
            ("Spray neem oil in the evening.".to_string(), LanguageCode::Hindi),
            ("Repeat after a week.".to_string(), LanguageCode::Hindi),
        ]
    );

    let prompts = ctx.llm.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].prompt.contains("My tomato leaves have white spots"));
    assert!(prompts[0].prompt.contains("Respond ONLY in the Hindi language"));
    assert_eq!(prompts[0].image_mime_type, None);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_ask_for_input_when_the_query_is_empty(ctx: &TestContext) {
    let form = MultipartForm::new().text("text", "   ").text("language", "en");
    let response = ctx.client.post_form("/predict", form).await.unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();

    assert_eq!(
        body.get("analysis").and_then(|v| v.as_str()),
        Some("Please ask a question or upload an image.")
    );
    assert_eq!(body.get("audioContent"), Some(&Value::Null));
    assert!(ctx.llm.prompts().is_empty());
    assert!(ctx.tts.calls().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_analyze_an_uploaded_image_without_text(ctx: &TestContext) {
    ctx.llm.reply_with("This is early blight on a potato leaf.");

    let form = MultipartForm::new()
        .text("language", "te")
        .file("file", "leaf.jpg", "image/jpeg", JPEG_BYTES);
    let response = ctx.client.post_form("/predict", form).await.unwrap();

    response.assert_status(StatusCode::OK);

    let prompts = ctx.llm.prompts();
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].image_mime_type, Some("image/jpeg"));
    assert!(prompts[0].prompt.contains("Please analyze this image."));
    assert!(prompts[0].prompt.contains("Telugu"));

    assert_eq!(
        ctx.tts.calls(),
        vec![(
            "This is early blight on a potato leaf.".to_string(),
            LanguageCode::Telugu
        )]
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_ignore_an_empty_file_part(ctx: &TestContext) {
    let form = MultipartForm::new()
        .text("text", "When should I sow wheat?")
        .file("file", "", "application/octet-stream", b"");
    let response = ctx.client.post_form("/predict", form).await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(ctx.llm.prompts()[0].image_mime_type, None);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_files_that_are_not_images(ctx: &TestContext) {
    let form = MultipartForm::new()
        .text("text", "What is this?")
        .file("file", "notes.txt", "text/plain", b"just some notes");
    let response = ctx.client.post_form("/predict", form).await.unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Unsupported image format");
    assert!(ctx.llm.prompts().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_uploads_over_the_size_limit(ctx: &TestContext) {
    let mut oversized = JPEG_BYTES.to_vec();
    oversized.resize(80 * 1024, 0);

    let form = MultipartForm::new().file("file", "big.jpg", "image/jpeg", &oversized);
    let response = ctx.client.post_form("/predict", form).await.unwrap();

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    assert!(ctx.llm.prompts().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_model_failures(ctx: &TestContext) {
    ctx.llm.fail_with("quota exceeded");

    let form = MultipartForm::new().text("text", "How much urea per acre?");
    let response = ctx.client.post_form("/predict", form).await.unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_error_message("quota exceeded");
    assert!(ctx.tts.calls().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_text_without_audio_when_speech_fails(ctx: &TestContext) {
    ctx.llm.reply_with("Irrigate twice a week. Avoid waterlogging.");
    ctx.tts.fail_everything();

    let form = MultipartForm::new().text("text", "How often should I water cotton?");
    let response = ctx.client.post_form("/predict", form).await.unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();

    assert_eq!(
        body.get("analysis").and_then(|v| v.as_str()),
        Some("Irrigate twice a week. Avoid waterlogging.")
    );
    assert_eq!(body.get("audioContent"), Some(&Value::Null));
    assert!(body.get("audioMimeType").is_none());
    assert_eq!(ctx.tts.calls().len(), 2);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_skip_chunks_the_speech_endpoint_rejects(ctx: &TestContext) {
    ctx.llm.reply_with("First tip. Second tip.");
    ctx.tts.fail_on("First tip.");

    let form = MultipartForm::new().text("text", "Give me two tips");
    let response = ctx.client.post_form("/predict", form).await.unwrap();

    response.assert_status(StatusCode::OK);
    let audio = audio_bytes(response.body.as_ref().unwrap());

    // Only the second sentence made it into the audio
    assert_eq!(wav_frames(&audio), 1_600);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_split_long_sentences_at_commas(ctx: &TestContext) {
    let long_sentence = "Mix neem oil with water, spray it on both sides of the leaves, \
        repeat every seven days during the wet season, keep the spray away from flowers \
        when bees are active, and wash your hands after handling the mixture.";
    ctx.llm.reply_with(long_sentence);

    let form = MultipartForm::new().text("text", "How do I use neem oil?");
    let response = ctx.client.post_form("/predict", form).await.unwrap();

    response.assert_status(StatusCode::OK);

    let calls = ctx.tts.calls();
    assert!(calls.len() >= 2, "expected the sentence to be split: {calls:?}");
    for (chunk, _) in &calls {
        assert!(chunk.chars().count() <= 180, "chunk too long: {chunk}");
    }

    let spoken: String = calls.iter().map(|(c, _)| c.as_str()).collect::<Vec<_>>().join(" ");
    assert_eq!(
        spoken.split_whitespace().collect::<Vec<_>>(),
        long_sentence.split_whitespace().collect::<Vec<_>>()
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fall_back_to_english_for_unknown_languages(ctx: &TestContext) {
    let form = MultipartForm::new()
        .text("text", "Best time to plant rice?")
        .text("language", "fr");
    let response = ctx.client.post_form("/predict", form).await.unwrap();

    response.assert_status(StatusCode::OK);
    assert!(ctx.llm.prompts()[0].prompt.contains("English"));
    assert!(ctx
        .tts
        .calls()
        .iter()
        .all(|(_, language)| *language == LanguageCode::English));
}
