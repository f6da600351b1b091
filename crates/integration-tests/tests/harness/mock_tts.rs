//! Mock TTS backend server for integration tests
//!
//! Serves the Google `text:synthesize` and `ElevenLabs` streaming endpoints
//! under `/v1`, answering each request with one MP3 frame derived from the
//! request text.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use base64::Engine as _;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use super::audio::frame_for;

/// Key the mock accepts
pub const API_KEY: &str = "test-key";

/// Bytes per streamed chunk from the `ElevenLabs` endpoint
const STREAM_CHUNK: usize = 100;

/// Mock TTS backend that records every request
pub struct MockTts {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockTtsState>,
}

#[derive(Default)]
struct MockTtsState {
    request_count: AtomicU32,
    /// Fail this many requests before succeeding
    fail_first: AtomicU32,
    /// Fail every request from this zero-based request index on
    fail_from: Option<u32>,
    texts: Mutex<Vec<String>>,
    voices: Mutex<Vec<String>>,
    arrivals: Mutex<Vec<Instant>>,
}

impl MockTts {
    /// Start the mock server, returning immediately
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(MockTtsState::default()).await
    }

    /// Start a mock server that fails the first `n` requests with 503
    pub async fn start_failing(n: u32) -> anyhow::Result<Self> {
        Self::start_inner(MockTtsState {
            fail_first: AtomicU32::new(n),
            ..MockTtsState::default()
        })
        .await
    }

    /// Start a mock server that answers 503 from request `index` onward
    pub async fn start_failing_from(index: u32) -> anyhow::Result<Self> {
        Self::start_inner(MockTtsState {
            fail_from: Some(index),
            ..MockTtsState::default()
        })
        .await
    }

    async fn start_inner(state: MockTtsState) -> anyhow::Result<Self> {
        let state = Arc::new(state);

        // `text:synthesize` is matched as a parameter so the colon stays literal
        let app = Router::new()
            .route("/v1/{action}", routing::post(handle_google))
            .route("/v1/text-to-speech/{voice_id}/stream", routing::post(handle_elevenlabs))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as a provider
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Number of synthesis requests received, failed ones included
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }

    /// Text of every request in arrival order
    pub fn texts(&self) -> Vec<String> {
        self.state.texts.lock().unwrap().clone()
    }

    /// Voice of every request in arrival order
    pub fn voices(&self) -> Vec<String> {
        self.state.voices.lock().unwrap().clone()
    }

    /// Arrival time of every request
    pub fn arrivals(&self) -> Vec<Instant> {
        self.state.arrivals.lock().unwrap().clone()
    }
}

impl Drop for MockTts {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

impl MockTtsState {
    /// Record a request and decide whether it should fail
    fn admit(&self, text: &str, voice: &str) -> Result<(), Response> {
        let index = self.request_count.fetch_add(1, Ordering::Relaxed);
        self.texts.lock().unwrap().push(text.to_owned());
        self.voices.lock().unwrap().push(voice.to_owned());
        self.arrivals.lock().unwrap().push(Instant::now());

        let remaining = self.fail_first.load(Ordering::Relaxed);
        if remaining > 0 {
            self.fail_first.fetch_sub(1, Ordering::Relaxed);
            return Err(unavailable(index));
        }

        if self.fail_from.is_some_and(|from| index >= from) {
            return Err(unavailable(index));
        }

        Ok(())
    }
}

fn unavailable(index: u32) -> Response {
    (StatusCode::SERVICE_UNAVAILABLE, format!("backend overloaded on request {index}")).into_response()
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, "invalid api key").into_response()
}

fn has_key(headers: &HeaderMap, name: &str) -> bool {
    headers.get(name).and_then(|v| v.to_str().ok()) == Some(API_KEY)
}

// -- Google --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleRequest {
    input: GoogleInput,
    voice: GoogleVoice,
    audio_config: GoogleAudioConfig,
}

#[derive(Debug, Deserialize)]
struct GoogleInput {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleVoice {
    name: String,
    #[allow(dead_code)]
    language_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleAudioConfig {
    audio_encoding: String,
}

async fn handle_google(
    State(state): State<Arc<MockTtsState>>,
    Path(action): Path<String>,
    headers: HeaderMap,
    Json(req): Json<GoogleRequest>,
) -> Response {
    if action != "text:synthesize" {
        return StatusCode::NOT_FOUND.into_response();
    }
    if !has_key(&headers, "x-goog-api-key") {
        return unauthorized();
    }
    if req.audio_config.audio_encoding != "MP3" {
        return (StatusCode::BAD_REQUEST, "mock only encodes MP3").into_response();
    }
    if let Err(response) = state.admit(&req.input.text, &req.voice.name) {
        return response;
    }

    let audio = base64::engine::general_purpose::STANDARD.encode(frame_for(&req.input.text));
    Json(serde_json::json!({ "audioContent": audio })).into_response()
}

// -- ElevenLabs --

#[derive(Debug, Deserialize)]
struct ElevenLabsRequest {
    text: String,
    #[allow(dead_code)]
    model_id: String,
}

async fn handle_elevenlabs(
    State(state): State<Arc<MockTtsState>>,
    Path(voice_id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<ElevenLabsRequest>,
) -> Response {
    if !has_key(&headers, "xi-api-key") {
        return unauthorized();
    }
    if let Err(response) = state.admit(&req.text, &voice_id) {
        return response;
    }

    // Split the frame so the client has to join several body chunks
    let chunks: Vec<Result<bytes::Bytes, Infallible>> = frame_for(&req.text)
        .chunks(STREAM_CHUNK)
        .map(|chunk| Ok(bytes::Bytes::copy_from_slice(chunk)))
        .collect();

    (
        [(axum::http::header::CONTENT_TYPE, "audio/mpeg")],
        Body::from_stream(futures_util::stream::iter(chunks)),
    )
        .into_response()
}
