//! Core pipeline for sage: build a prompt from a source file, run it through a
//! local ollama model, and persist the response beside the input.

pub mod artifact;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod prompt;
pub mod runner;
pub mod task;

pub use artifact::{derive_output_path, markdown_heading, write_artifact, OutputArtifact};
pub use config::{load_default, AppConfig, LoggingConfig, ModelConfig, RunnerConfig};
pub use error::{CliError, PipelineError, RunnerError};
pub use pipeline::Request;
pub use prompt::build_prompt;
pub use runner::{communicate, InvocationResult, ModelRunner, OllamaRunner};
pub use task::TaskKind;
