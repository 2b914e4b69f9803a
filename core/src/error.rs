use std::path::PathBuf;
use thiserror::Error;

/// Top-level error for the CLI surface.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),
    #[error("command failed: {0}")]
    Command(String),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Failures of the model-runner subprocess transport. A non-zero exit code is
/// NOT a `RunnerError`: the runner returns the captured result and the
/// pipeline decides what a failed model run means.
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("failed to start model runner: {0}")]
    Spawn(String),
    #[error("stream io error on {stream}: {source}")]
    StreamIo {
        stream: &'static str,
        source: std::io::Error,
    },
}

/// Everything that can terminate a single analysis invocation. All variants
/// are terminal: nothing is retried, no partial artifact is left behind.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("file '{0}' not found")]
    InputNotFound(PathBuf),
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Runner(#[from] RunnerError),
    #[error("model run failed (exit code {exit_code}):\n{stderr}")]
    Model { exit_code: i32, stderr: String },
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
