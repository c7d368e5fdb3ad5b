use std::path::Path;

use serde::{Deserialize, Deserializer};
use tracing::instrument;

use crate::error::LoadError;
use crate::voice::VoiceOverride;

/// One named SSML snippet to synthesize.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SynthesisJob {
    #[serde(default)]
    pub name: Option<String>,
    /// Missing or null loads as empty; the job then fails when its request is built.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ssml: String,
    #[serde(default)]
    pub voice: Option<VoiceOverride>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl SynthesisJob {
    pub fn new(name: impl Into<String>, ssml: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ssml: ssml.into(),
            voice: None,
        }
    }

    pub fn with_voice(mut self, voice: VoiceOverride) -> Self {
        self.voice = Some(voice);
        self
    }

    /// Output stem for this job: its name, or `audio_NNN` from its position.
    pub fn file_stem(&self, index: usize) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("audio_{:03}", index),
        }
    }
}

pub fn parse_jobs(json: &str) -> Result<Vec<SynthesisJob>, LoadError> {
    Ok(serde_json::from_str(json)?)
}

/// Load a JSON array of jobs from `path`
#[instrument]
pub async fn load_jobs(path: &Path) -> Result<Vec<SynthesisJob>, LoadError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    parse_jobs(&text)
}

/// Jobs used when no job list is supplied.
pub fn sample_jobs() -> Vec<SynthesisJob> {
    vec![
        SynthesisJob::new(
            "greeting",
            r#"<speak>
    こんにちは！
    <break time="500ms"/>
    Google Cloud Text-to-Speech APIを使用しています。
</speak>"#,
        ),
        SynthesisJob::new(
            "hakata_swift",
            r#"<speak>
    今日は<prosody rate="slow">HAKATA</prosody>
    <break time="200ms"/>
    <say-as interpret-as="spell-out">.</say-as>
    <break time="200ms"/>
    <prosody rate="slow">swift</prosody>に参加しています。
</speak>"#,
        ),
        SynthesisJob::new(
            "english_sample",
            r#"<speak>
    <prosody rate="medium" pitch="+2st">
        Welcome to Google Cloud Text-to-Speech!
    </prosody>
</speak>"#,
        )
        .with_voice(VoiceOverride {
            language_code: Some("en-US".into()),
            voice_name: Some("en-US-Neural2-C".into()),
            gender: Some("FEMALE".into()),
        }),
        SynthesisJob::new(
            "numbers",
            r#"<speak>
    電話番号は<say-as interpret-as="telephone">03-1234-5678</say-as>です。
    金額は<say-as interpret-as="currency">¥1,000</say-as>です。
    今日は<say-as interpret-as="date" format="ymd">2025/01/19</say-as>です。
</speak>"#,
        ),
    ]
}
