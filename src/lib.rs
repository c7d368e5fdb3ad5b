mod batch;
pub mod config;
pub mod error;
mod google;
mod job;
mod request;
mod synthesize;
mod voice;

pub use batch::{BatchReport, BatchRunner, JobOutcome};
pub use error::{BatchError, ConfigError, ErrorKind, JobError, LoadError, SynthesisError};
pub use google::{project_from_env, Credentials, GoogleTts, DEFAULT_ENDPOINT};
pub use job::{load_jobs, parse_jobs, sample_jobs, SynthesisJob};
pub use request::{build_request, AudioConfig, AudioEncoding, SynthesisInput, SynthesisRequest};
pub use synthesize::SynthesisBackend;
pub use voice::{Gender, VoiceConfig, VoiceOverride, DEFAULT_LANGUAGE_CODE, DEFAULT_VOICE_NAME};

// Re-export common types
pub use bytes::Bytes;
