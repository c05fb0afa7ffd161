//! HTTP front-end for voice-cloning speech synthesis.
//!
//! A single `POST /synthesize` endpoint forwards the request text to the
//! speech model and returns the rendered WAV bytes. Synthesis calls are
//! serialized: the engine handles one utterance at a time, so concurrent
//! requests wait their turn instead of interleaving.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};
use xtts::SpeechModel;

/// State shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn SpeechModel>,
    /// Reference voice sample the model clones on every request.
    pub speaker_wav: Arc<PathBuf>,
    /// Language code handed to the model.
    pub language: String,
    /// At most one synthesis call is in flight at a time.
    pub synthesis_gate: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(
        model: Arc<dyn SpeechModel>,
        speaker_wav: PathBuf,
        language: impl Into<String>,
    ) -> Self {
        Self {
            model,
            speaker_wav: Arc::new(speaker_wav),
            language: language.into(),
            synthesis_gate: Arc::new(Mutex::new(())),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

fn missing_text() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            error: "No text provided in JSON body",
        }),
    )
        .into_response()
}

async fn index() -> &'static str {
    "Voice-cloning TTS server is running. POST JSON to /synthesize."
}

/// Synthesize speech for the `text` field of the JSON body.
///
/// The body is parsed by hand so malformed JSON and a missing `text` key
/// both get the fixed 400 payload. Engine failures are logged locally and
/// surface only as a generic 500.
pub async fn synthesize(State(state): State<AppState>, body: Bytes) -> Response {
    let Ok(data) = serde_json::from_slice::<serde_json::Value>(&body) else {
        return missing_text();
    };
    let Some(text) = data.get("text").and_then(|t| t.as_str()) else {
        return missing_text();
    };

    info!(%text, "synthesizing with cloned voice");
    let _in_flight = state.synthesis_gate.lock().await;
    match state
        .model
        .synthesize(text, &state.speaker_wav, &state.language)
        .await
    {
        Ok(audio) => ([(header::CONTENT_TYPE, "audio/wav")], audio).into_response(),
        Err(e) => {
            error!(%e, "synthesis failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "Failed to generate audio",
                }),
            )
                .into_response()
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/synthesize", post(synthesize))
        .with_state(state)
}
