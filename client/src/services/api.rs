//! HTTP request client for the agent and marketplace servers.
//!
//! All operations funnel through a single request primitive that
//! normalizes headers for JSON vs. multipart bodies and normalizes
//! outcomes into a parsed payload or an [`ApiError`] with a best-effort
//! message. Exactly one network request is issued per call; there are no
//! retries, timeouts or cancellation.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde_json::{json, Value};

use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::types::CreatedModuleRecord;

/// Content type that short-circuits JSON parsing into a binary payload.
const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

/// Fallback message when an error body yields nothing usable.
const GENERIC_ERROR: &str = "An error occurred.";

/// A file attached to a multipart request.
#[derive(Debug, Clone)]
pub struct FileAttachment {
    /// File name reported to the server.
    pub file_name: String,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

/// Request body variants accepted by the request primitive.
enum Body {
    Json(Value),
    Multipart(Form),
}

/// Parsed response payload.
enum Payload {
    Json(Value),
    Audio(Vec<u8>),
}

impl Payload {
    fn into_json(self) -> ApiResult<Value> {
        match self {
            Payload::Json(value) => Ok(value),
            Payload::Audio(_) => Err(ApiError::UnexpectedPayload("expected a JSON body")),
        }
    }

    fn into_audio(self) -> ApiResult<Vec<u8>> {
        match self {
            Payload::Audio(bytes) => Ok(bytes),
            Payload::Json(_) => Err(ApiError::UnexpectedPayload("expected an audio stream")),
        }
    }
}

/// HTTP client for the agent/chat server and the marketplace server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    agent_url: String,
    marketplace_url: String,
}

impl ApiClient {
    /// Create a client for the endpoints in `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            agent_url: config.agent_server_url.clone(),
            marketplace_url: config.marketplace_url.clone(),
        }
    }

    // =========================================================================
    // Request primitive
    // =========================================================================

    /// Issue a single request and normalize the outcome.
    ///
    /// Default headers accept and send JSON; a multipart body drops the
    /// JSON content type so the form boundary can take its place. An
    /// explicit `headers` map replaces the defaults entirely.
    async fn send(
        &self,
        url: String,
        method: Method,
        body: Option<Body>,
        headers: Option<HeaderMap>,
    ) -> ApiResult<Payload> {
        let mut header_map = headers.unwrap_or_else(|| {
            let mut map = HeaderMap::new();
            map.insert(ACCEPT, HeaderValue::from_static("application/json"));
            map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            map
        });
        if matches!(body, Some(Body::Multipart(_))) {
            header_map.remove(CONTENT_TYPE);
        }

        let mut request = self.http.request(method, &url).headers(header_map);
        request = match body {
            Some(Body::Json(value)) => request.json(&value),
            Some(Body::Multipart(form)) => request.multipart(form),
            None => request,
        };

        let response = request.send().await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if content_type == AUDIO_CONTENT_TYPE {
            return Ok(Payload::Audio(response.bytes().await?.to_vec()));
        }

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            log::error!("Request to {} failed: {}", url, text);

            let message = match serde_json::from_str::<Value>(&text) {
                Ok(body) => body
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| GENERIC_ERROR.to_string()),
                Err(_) if text.is_empty() => GENERIC_ERROR.to_string(),
                Err(_) => text,
            };
            return Err(ApiError::Server { message });
        }

        let value = response
            .json::<Value>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(Payload::Json(value))
    }

    fn agent_path(&self, path: &str) -> String {
        format!("{}{}", self.agent_url, path)
    }

    fn marketplace_path(&self, path: &str) -> String {
        format!("{}{}", self.marketplace_url, path)
    }

    // =========================================================================
    // Agent server operations
    // =========================================================================

    /// DELETE an agent server resource.
    pub async fn delete(&self, path: &str) -> ApiResult<Value> {
        self.send(self.agent_path(path), Method::DELETE, None, None)
            .await?
            .into_json()
    }

    /// POST a JSON body to the agent server.
    pub async fn post(&self, path: &str, body: Value) -> ApiResult<Value> {
        self.send(self.agent_path(path), Method::POST, Some(Body::Json(body)), None)
            .await?
            .into_json()
    }

    /// List all running agents.
    pub async fn get_agents(&self) -> ApiResult<Value> {
        self.send(self.agent_path("/agents"), Method::GET, None, None)
            .await?
            .into_json()
    }

    /// Fetch a single agent, including its character definition.
    pub async fn get_agent(&self, agent_id: &str) -> ApiResult<Value> {
        self.send(
            self.agent_path(&format!("/agents/{}", agent_id)),
            Method::GET,
            None,
            None,
        )
        .await?
        .into_json()
    }

    /// Start an agent from a character definition.
    pub async fn start_agent(&self, character_json: Value) -> ApiResult<Value> {
        self.send(
            self.agent_path("/agent/start"),
            Method::POST,
            Some(Body::Json(json!({ "characterJson": character_json }))),
            None,
        )
        .await?
        .into_json()
    }

    /// Send a chat message to an agent, with an optional attached file.
    pub async fn send_message(
        &self,
        agent_id: &str,
        text: &str,
        file: Option<FileAttachment>,
    ) -> ApiResult<Value> {
        let mut form = Form::new()
            .text("text", text.to_string())
            .text("user", "user");
        if let Some(attachment) = file {
            form = form.part(
                "file",
                Part::bytes(attachment.bytes).file_name(attachment.file_name),
            );
        }

        self.send(
            self.agent_path(&format!("/{}/message", agent_id)),
            Method::POST,
            Some(Body::Multipart(form)),
            None,
        )
        .await?
        .into_json()
    }

    /// Synthesize speech for `text`, returning raw MPEG audio.
    pub async fn tts(
        &self,
        agent_id: &str,
        text: &str,
        voice_settings: Value,
    ) -> ApiResult<Vec<u8>> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static(AUDIO_CONTENT_TYPE));

        self.send(
            self.agent_path(&format!("/{}/tts", agent_id)),
            Method::POST,
            Some(Body::Json(json!({
                "text": text,
                "voiceSettings": voice_settings,
            }))),
            Some(headers),
        )
        .await?
        .into_audio()
    }

    /// Transcribe a recorded audio clip.
    pub async fn whisper(&self, agent_id: &str, audio: Vec<u8>) -> ApiResult<Value> {
        let form = Form::new().part("file", Part::bytes(audio).file_name("recording.wav"));

        self.send(
            self.agent_path(&format!("/{}/whisper", agent_id)),
            Method::POST,
            Some(Body::Multipart(form)),
            None,
        )
        .await?
        .into_json()
    }

    // =========================================================================
    // Marketplace server operations
    // =========================================================================

    /// List marketplace modules, optionally filtered by type.
    pub async fn list_modules(&self, module_type: Option<&str>) -> ApiResult<Value> {
        let mut url = self.marketplace_path("/api/listModules");
        if let Some(t) = module_type {
            url.push_str("?type=");
            url.push_str(t);
        }

        self.send(url, Method::GET, None, None).await?.into_json()
    }

    /// Register a freshly published module with the marketplace.
    pub async fn create_module(&self, record: &CreatedModuleRecord) -> ApiResult<Value> {
        let body = serde_json::to_value(record).map_err(|e| ApiError::Encode(e.to_string()))?;

        self.send(
            self.marketplace_path("/api/createModule"),
            Method::POST,
            Some(Body::Json(body)),
            None,
        )
        .await?
        .into_json()
    }

    /// Fetch the content of a memory module.
    pub async fn get_memory_module(&self, module_id: &str) -> ApiResult<Value> {
        let response = self
            .send(
                self.marketplace_path(&format!("/api/getModule/{}", module_id)),
                Method::GET,
                None,
                None,
            )
            .await?
            .into_json()?;

        response
            .get("data")
            .and_then(|data| data.get("content"))
            .cloned()
            .ok_or_else(|| ApiError::Decode("missing data.content in response".into()))
    }

    /// Append messages to a memory module.
    ///
    /// The messages are JSON-serialized into the `content` field, matching
    /// the marketplace's string-encoded content storage.
    pub async fn append_memory_module(
        &self,
        module_id: &str,
        messages: &Value,
    ) -> ApiResult<Value> {
        let content =
            serde_json::to_string(messages).map_err(|e| ApiError::Encode(e.to_string()))?;

        self.send(
            self.marketplace_path("/api/appendModule"),
            Method::POST,
            Some(Body::Json(json!({
                "moduleId": module_id,
                "content": content,
            }))),
            None,
        )
        .await?
        .into_json()
    }
}
