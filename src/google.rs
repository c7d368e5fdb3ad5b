//! Google Cloud Text-to-Speech REST backend.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use serde::Deserialize;
use tracing::{debug, error, instrument};

use crate::error::{ConfigError, SynthesisError};
use crate::request::SynthesisRequest;
use crate::synthesize::SynthesisBackend;

pub const DEFAULT_ENDPOINT: &str = "https://texttospeech.googleapis.com";
const SYNTHESIZE_PATH: &str = "/v1/text:synthesize";

const API_KEY_VARS: &[&str] = &["GOOGLE_TTS_API_KEY", "GOOGLE_API_KEY"];
const TOKEN_VARS: &[&str] = &["GOOGLE_ACCESS_TOKEN", "GCLOUD_AUTH_TOKEN"];
const PROJECT_VAR: &str = "GOOGLE_CLOUD_PROJECT";

#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    ApiKey(String),
    AccessToken(String),
}

// Keep secrets out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::ApiKey(_) => f.write_str("ApiKey(..)"),
            Credentials::AccessToken(_) => f.write_str("AccessToken(..)"),
        }
    }
}

impl Credentials {
    /// Resolve credentials from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve credentials through `lookup`. An API key wins over an access token.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let first = |names: &[&str]| {
            names
                .iter()
                .filter_map(|name| lookup(name))
                .find(|value| !value.trim().is_empty())
        };
        if let Some(key) = first(API_KEY_VARS) {
            return Ok(Credentials::ApiKey(key));
        }
        if let Some(token) = first(TOKEN_VARS) {
            return Ok(Credentials::AccessToken(token));
        }
        Err(ConfigError::MissingCredentials)
    }
}

/// Billing project from the environment, if any.
pub fn project_from_env() -> Option<String> {
    std::env::var(PROJECT_VAR).ok().filter(|p| !p.is_empty())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    #[serde(default)]
    audio_content: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Clone)]
pub struct GoogleTts {
    client: reqwest::Client,
    url: String,
    credentials: Credentials,
    project: Option<String>,
}

impl GoogleTts {
    /// # Arguments
    /// * `endpoint` - API root, eg: "https://texttospeech.googleapis.com"
    pub fn new(endpoint: &str, credentials: Credentials) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: format!("{}{}", endpoint.trim_end_matches('/'), SYNTHESIZE_PATH),
            credentials,
            project: None,
        }
    }

    /// Bill requests to `project` via `x-goog-user-project`.
    pub fn with_project(mut self, project: Option<String>) -> Self {
        self.project = project;
        self
    }
}

#[async_trait]
impl SynthesisBackend for GoogleTts {
    #[instrument(skip(self, request), fields(voice = %request.voice.voice_name))]
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Bytes, SynthesisError> {
        let mut builder = self.client.post(&self.url).json(request);
        builder = match &self.credentials {
            Credentials::ApiKey(key) => builder.query(&[("key", key)]),
            Credentials::AccessToken(token) => builder.bearer_auth(token),
        };
        if let Some(project) = &self.project {
            builder = builder.header("x-goog-user-project", project);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned());
            error!(status = status.as_u16(), "Synthesis request rejected");
            return Err(SynthesisError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: SynthesizeResponse = serde_json::from_slice(&body)
            .map_err(|e| SynthesisError::Decode(e.to_string()))?;
        let audio = STANDARD
            .decode(parsed.audio_content.as_bytes())
            .map_err(|e| SynthesisError::Decode(e.to_string()))?;
        if audio.is_empty() {
            return Err(SynthesisError::EmptyAudio);
        }
        debug!("Received {} bytes of audio", audio.len());

        Ok(Bytes::from(audio))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::build_request;
    use crate::voice::VoiceConfig;
    use mockito::Matcher;

    fn request() -> SynthesisRequest {
        build_request("<speak>hi</speak>", None, &VoiceConfig::default()).unwrap()
    }

    #[test]
    fn api_key_preferred_over_token() {
        let creds = Credentials::from_lookup(|name| match name {
            "GOOGLE_API_KEY" => Some("key".into()),
            "GOOGLE_ACCESS_TOKEN" => Some("token".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(creds, Credentials::ApiKey("key".into()));
    }

    #[test]
    fn token_used_when_no_key() {
        let creds = Credentials::from_lookup(|name| match name {
            "GCLOUD_AUTH_TOKEN" => Some("token".into()),
            "GOOGLE_TTS_API_KEY" => Some("  ".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(creds, Credentials::AccessToken("token".into()));
    }

    #[test]
    fn no_credentials_is_error() {
        assert!(matches!(
            Credentials::from_lookup(|_| None),
            Err(ConfigError::MissingCredentials)
        ));
    }

    #[test]
    fn debug_hides_secret() {
        let shown = format!("{:?}", Credentials::ApiKey("secret".into()));
        assert!(!shown.contains("secret"));
    }

    #[tokio::test]
    async fn decodes_audio_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/text:synthesize")
            .match_query(Matcher::UrlEncoded("key".into(), "k".into()))
            .match_body(Matcher::PartialJson(serde_json::json!({
                "input": { "ssml": "<speak>hi</speak>" },
                "audioConfig": { "audioEncoding": "MP3" },
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(r#"{{"audioContent":"{}"}}"#, STANDARD.encode(b"ID3audio")))
            .create_async()
            .await;

        let tts = GoogleTts::new(&server.url(), Credentials::ApiKey("k".into()));
        let audio = tts.synthesize(&request()).await.unwrap();

        assert_eq!(&audio[..], b"ID3audio");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn sends_bearer_and_project() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/text:synthesize")
            .match_header("authorization", "Bearer tok")
            .match_header("x-goog-user-project", "proj")
            .with_status(200)
            .with_body(format!(r#"{{"audioContent":"{}"}}"#, STANDARD.encode(b"x")))
            .create_async()
            .await;

        let tts = GoogleTts::new(&format!("{}/", server.url()), Credentials::AccessToken("tok".into()))
            .with_project(Some("proj".into()));
        tts.synthesize(&request()).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn api_error_message_is_surfaced() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/text:synthesize")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body(r#"{"error":{"code":400,"message":"Invalid SSML","status":"INVALID_ARGUMENT"}}"#)
            .create_async()
            .await;

        let tts = GoogleTts::new(&server.url(), Credentials::ApiKey("k".into()));
        match tts.synthesize(&request()).await {
            Err(SynthesisError::Api { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid SSML");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_audio_is_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/text:synthesize")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"audioContent":""}"#)
            .create_async()
            .await;

        let tts = GoogleTts::new(&server.url(), Credentials::ApiKey("k".into()));
        assert!(matches!(
            tts.synthesize(&request()).await,
            Err(SynthesisError::EmptyAudio)
        ));
    }
}
