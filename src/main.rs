use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use ssml_tts::config::{Cli, JobSource, Settings};
use ssml_tts::{
    project_from_env, BatchReport, BatchRunner, Credentials, GoogleTts, JobOutcome,
};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    match &dotenv {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(_) => {
            if let Some(problem) = dotenv_problem(&dotenv) {
                warn!("Ignoring .env: {}", problem);
            }
        }
    }

    let result = run(cli).await;
    if let Err(e) = &result {
        error!("Fatal error: {:#}", e);
        eprintln!("error: {:#}", e);
    }
    ExitCode::from(exit_status(&result))
}

/// A `.env` that exists but could not be loaded. A missing one is not a problem.
fn dotenv_problem<T>(result: &Result<T, dotenvy::Error>) -> Option<&dotenvy::Error> {
    match result {
        Err(e) if !e.not_found() => Some(e),
        _ => None,
    }
}

/// 0 when every job succeeded, 1 when any job failed, 2 when the run could not proceed.
fn exit_status(result: &anyhow::Result<BatchReport>) -> u8 {
    match result {
        Ok(report) if report.all_succeeded() => 0,
        Ok(_) => 1,
        Err(_) => 2,
    }
}

fn status_line(outcome: &JobOutcome) -> String {
    match &outcome.result {
        Ok(path) => format!("wrote {}", path.display()),
        Err(e) => format!("error ({}): {}", outcome.name, e),
    }
}

fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("ssml_tts=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<BatchReport> {
    let settings = Settings::from_cli(cli).context("invalid configuration")?;
    let credentials = Credentials::from_env()?;

    let jobs = settings.jobs.load().await.context("failed to load jobs")?;
    match &settings.jobs {
        JobSource::File(path) => info!("Loaded {} jobs from {}", jobs.len(), path.display()),
        JobSource::Samples => info!("Using {} sample jobs", jobs.len()),
    }

    let backend = GoogleTts::new(&settings.endpoint, credentials).with_project(project_from_env());
    let runner = BatchRunner::new(backend, settings.voice);
    let report = runner
        .run_with(&jobs, &settings.output_dir, |outcome| {
            println!("{}", status_line(outcome))
        })
        .await?;

    println!("{} succeeded, {} failed", report.succeeded(), report.failed());

    Ok(report)
}
