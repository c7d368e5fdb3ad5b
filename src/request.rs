use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::ConfigError;
use crate::voice::{VoiceConfig, VoiceOverride};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudioEncoding {
    Mp3,
}

impl AudioEncoding {
    /// File extension for audio in this encoding.
    pub fn extension(&self) -> &'static str {
        match self {
            AudioEncoding::Mp3 => "mp3",
        }
    }
}

/// Audio output settings. Fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioConfig {
    pub audio_encoding: AudioEncoding,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            audio_encoding: AudioEncoding::Mp3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SynthesisInput {
    pub ssml: String,
}

/// A complete synthesis request, serialized as the `text:synthesize` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisRequest {
    pub input: SynthesisInput,
    pub voice: VoiceConfig,
    pub audio_config: AudioConfig,
}

/// Build a synthesis request
///
/// # Arguments
/// * `ssml` - raw SSML markup, eg: "<speak>hi</speak>". Not validated beyond being non-empty.
/// * `voice_override` - per-job voice; missing fields come from `defaults`
/// * `defaults` - the run's default voice
#[instrument(skip(ssml))]
pub fn build_request(
    ssml: &str,
    voice_override: Option<&VoiceOverride>,
    defaults: &VoiceConfig,
) -> Result<SynthesisRequest, ConfigError> {
    if ssml.trim().is_empty() {
        return Err(ConfigError::EmptySsml);
    }

    let voice = match voice_override {
        Some(over) => over.resolve(defaults)?,
        None => defaults.clone(),
    };
    debug!(voice = %voice.voice_name, gender = %voice.gender, "Built request");

    Ok(SynthesisRequest {
        input: SynthesisInput {
            ssml: ssml.to_owned(),
        },
        voice,
        audio_config: AudioConfig::default(),
    })
}
