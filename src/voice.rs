use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_LANGUAGE_CODE: &str = "ja-JP";
pub const DEFAULT_VOICE_NAME: &str = "ja-JP-Neural2-B";

/// SSML voice gender, serialized with the Text-to-Speech API names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Gender {
    #[serde(rename = "MALE")]
    Male,
    #[serde(rename = "FEMALE")]
    Female,
    #[serde(rename = "NEUTRAL")]
    Neutral,
    #[serde(rename = "SSML_VOICE_GENDER_UNSPECIFIED")]
    Unspecified,
}

const GENDER_NAMES: &[(&str, Gender)] = &[
    ("male", Gender::Male),
    ("female", Gender::Female),
    ("neutral", Gender::Neutral),
    ("unspecified", Gender::Unspecified),
    ("ssml_voice_gender_unspecified", Gender::Unspecified),
];

impl FromStr for Gender {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        GENDER_NAMES
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, gender)| *gender)
            .ok_or_else(|| ConfigError::UnknownGender(s.to_owned()))
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
            Gender::Neutral => "NEUTRAL",
            Gender::Unspecified => "SSML_VOICE_GENDER_UNSPECIFIED",
        })
    }
}

/// A fully resolved voice selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceConfig {
    pub language_code: String,
    #[serde(rename = "name")]
    pub voice_name: String,
    #[serde(rename = "ssmlGender")]
    pub gender: Gender,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            language_code: DEFAULT_LANGUAGE_CODE.to_owned(),
            voice_name: DEFAULT_VOICE_NAME.to_owned(),
            gender: Gender::Male,
        }
    }
}

/// Per-job voice parameters as they appear in a job list. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VoiceOverride {
    #[serde(default)]
    pub language_code: Option<String>,
    #[serde(default, rename = "name")]
    pub voice_name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
}

impl VoiceOverride {
    /// Fill the missing fields from `defaults` and map the gender string.
    pub fn resolve(&self, defaults: &VoiceConfig) -> Result<VoiceConfig, ConfigError> {
        let gender = match &self.gender {
            Some(g) => g.parse()?,
            None => defaults.gender,
        };
        Ok(VoiceConfig {
            language_code: self
                .language_code
                .clone()
                .unwrap_or_else(|| defaults.language_code.clone()),
            voice_name: self
                .voice_name
                .clone()
                .unwrap_or_else(|| defaults.voice_name.clone()),
            gender,
        })
    }
}
