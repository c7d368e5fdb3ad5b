//! Command line and environment configuration.

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::error::{ConfigError, LoadError};
use crate::google::DEFAULT_ENDPOINT;
use crate::job::{load_jobs, sample_jobs, SynthesisJob};
use crate::voice::{Gender, VoiceConfig, DEFAULT_LANGUAGE_CODE, DEFAULT_VOICE_NAME};

pub const DEFAULT_JOB_FILE: &str = "ssml_list.json";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

#[derive(Parser, Debug)]
#[command(name = "ssml-tts")]
#[command(version, about = "Synthesize a batch of SSML snippets into MP3 files", long_about = None)]
pub struct Cli {
    /// JSON job list (defaults to ssml_list.json, or built-in samples if that is absent)
    pub jobs: Option<PathBuf>,

    /// Directory the MP3 files are written to
    #[arg(short, long, env = "SSML_TTS_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Default language code
    #[arg(long, default_value = DEFAULT_LANGUAGE_CODE)]
    pub language_code: String,

    /// Default voice name
    #[arg(long, default_value = DEFAULT_VOICE_NAME)]
    pub voice_name: String,

    /// Default voice gender (male, female, neutral, unspecified)
    #[arg(long, default_value = "MALE")]
    pub gender: String,

    /// Text-to-Speech API root
    #[arg(long, env = "GOOGLE_TTS_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobSource {
    File(PathBuf),
    Samples,
}

impl JobSource {
    pub async fn load(&self) -> Result<Vec<SynthesisJob>, LoadError> {
        match self {
            JobSource::File(path) => load_jobs(path).await,
            JobSource::Samples => Ok(sample_jobs()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub jobs: JobSource,
    pub output_dir: PathBuf,
    pub endpoint: String,
    pub voice: VoiceConfig,
    pub verbose: bool,
}

impl Settings {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let gender: Gender = cli.gender.parse()?;
        let jobs = match cli.jobs {
            Some(path) => JobSource::File(path),
            None if Path::new(DEFAULT_JOB_FILE).exists() => {
                JobSource::File(PathBuf::from(DEFAULT_JOB_FILE))
            }
            None => JobSource::Samples,
        };

        Ok(Self {
            jobs,
            output_dir: cli.output_dir,
            endpoint: cli.endpoint,
            voice: VoiceConfig {
                language_code: cli.language_code,
                voice_name: cli.voice_name,
                gender,
            },
            verbose: cli.verbose,
        })
    }
}
