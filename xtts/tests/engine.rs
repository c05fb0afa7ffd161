use httpmock::{Method::GET, MockServer};
use std::path::Path;
use xtts::{verify_voice_sample, EngineError, SpeechModel, XttsEngine};

#[tokio::test]
async fn synthesize_sends_required_params() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/tts")
                .query_param("text", "hello")
                .query_param("speaker_wav", "/voices/me.wav")
                .query_param("language_id", "en")
                .query_param("style_wav", "");
            then.status(200).body("RIFFdata");
        })
        .await;

    let engine = XttsEngine::connect(server.base_url());
    let audio = engine
        .synthesize("hello", Path::new("/voices/me.wav"), "en")
        .await
        .unwrap();
    assert_eq!(audio, b"RIFFdata");
    assert!(!engine.owns_process());
    mock.assert_async().await;
}

#[tokio::test]
async fn engine_failure_surfaces_status_and_detail() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/tts");
            then.status(500).body("cuda out of memory");
        })
        .await;

    let engine = XttsEngine::connect(server.base_url());
    let err = engine
        .synthesize("hi", Path::new("/voices/me.wav"), "en")
        .await
        .unwrap_err();
    match err {
        EngineError::Synthesis { status, detail } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(detail, "cuda out of memory");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_voice_sample_is_fatal() {
    let path = std::env::temp_dir().join("definitely-not-a-voice-sample.wav");
    let err = verify_voice_sample(&path).unwrap_err();
    assert!(matches!(err, EngineError::MissingVoiceSample(_)));
    assert!(err.to_string().contains("voice sample not found"));
}

#[test]
fn present_voice_sample_passes() {
    let path = std::env::temp_dir().join("xtts-test-voice-sample.wav");
    std::fs::write(&path, b"RIFF").unwrap();
    verify_voice_sample(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
}
