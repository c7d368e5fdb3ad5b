use std::path::{Path, PathBuf};

use tracing::{error, info, instrument};

use crate::error::{BatchError, JobError};
use crate::job::SynthesisJob;
use crate::request::{build_request, AudioConfig};
use crate::synthesize::SynthesisBackend;
use crate::voice::VoiceConfig;

/// What happened to one job.
#[derive(Debug)]
pub struct JobOutcome {
    pub index: usize,
    pub name: String,
    pub result: Result<PathBuf, JobError>,
}

impl JobOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// One outcome per job, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<JobOutcome>,
}

impl BatchReport {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.len() - self.succeeded()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &JobError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.name.as_str(), e)))
    }
}

/// Runs jobs one after another against a backend, isolating per-job failures.
pub struct BatchRunner<B> {
    backend: B,
    defaults: VoiceConfig,
}

impl<B: SynthesisBackend> BatchRunner<B> {
    pub fn new(backend: B, defaults: VoiceConfig) -> Self {
        Self { backend, defaults }
    }

    pub fn defaults(&self) -> &VoiceConfig {
        &self.defaults
    }

    /// Synthesize every job into `output_dir`
    ///
    /// Fails only if `output_dir` cannot be created. Each job's own failure is
    /// recorded in the report and the run moves on.
    pub async fn run(
        &self,
        jobs: &[SynthesisJob],
        output_dir: &Path,
    ) -> Result<BatchReport, BatchError> {
        self.run_with(jobs, output_dir, |_| {}).await
    }

    /// Like [`run`](Self::run), calling `on_outcome` as soon as each job finishes.
    #[instrument(skip(self, jobs, on_outcome), fields(jobs = jobs.len()))]
    pub async fn run_with<F>(
        &self,
        jobs: &[SynthesisJob],
        output_dir: &Path,
        mut on_outcome: F,
    ) -> Result<BatchReport, BatchError>
    where
        F: FnMut(&JobOutcome),
    {
        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|source| BatchError::CreateOutputDir {
                path: output_dir.to_path_buf(),
                source,
            })?;

        let extension = AudioConfig::default().audio_encoding.extension();
        let mut report = BatchReport {
            outcomes: Vec::with_capacity(jobs.len()),
        };

        for (index, job) in jobs.iter().enumerate() {
            let name = job.file_stem(index);
            let path = output_dir.join(format!("{}.{}", name, extension));
            let result = self.run_job(job, path).await;
            match &result {
                Ok(path) => info!(job = %name, path = %path.display(), "Wrote audio"),
                Err(e) => error!(job = %name, kind = ?e.kind(), "Job failed: {}", e),
            }
            let outcome = JobOutcome {
                index,
                name,
                result,
            };
            on_outcome(&outcome);
            report.outcomes.push(outcome);
        }

        Ok(report)
    }

    async fn run_job(&self, job: &SynthesisJob, path: PathBuf) -> Result<PathBuf, JobError> {
        let request = build_request(&job.ssml, job.voice.as_ref(), &self.defaults)?;
        let audio = self.backend.synthesize(&request).await?;
        match tokio::fs::write(&path, &audio).await {
            Ok(()) => Ok(path),
            Err(source) => Err(JobError::Io { path, source }),
        }
    }
}
