//! Error types for SSML synthesis

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Invalid voice, input or credential settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unknown voice gender: {0:?}")]
    UnknownGender(String),

    #[error("ssml input is empty")]
    EmptySsml,

    #[error("no credentials found; set GOOGLE_TTS_API_KEY or GOOGLE_ACCESS_TOKEN")]
    MissingCredentials,
}

/// Failure reported by a synthesis backend.
#[derive(Error, Debug)]
pub enum SynthesisError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("could not decode audio content: {0}")]
    Decode(String),

    #[error("backend returned no audio")]
    EmptyAudio,
}

/// Coarse category of a [`JobError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Synthesis,
    Io,
}

/// Why a single job failed. Never aborts the batch.
#[derive(Error, Debug)]
pub enum JobError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("synthesis error: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl JobError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            JobError::Configuration(_) => ErrorKind::Configuration,
            JobError::Synthesis(_) => ErrorKind::Synthesis,
            JobError::Io { .. } => ErrorKind::Io,
        }
    }
}

/// Errors that stop a batch before any job runs.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("cannot create output directory {}: {source}", path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors reading a job list.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read job list {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid job list: {0}")]
    Parse(#[from] serde_json::Error),
}
