//! The single-shot request/response pipeline shared by every task: read the
//! source, build the prompt, run the model, persist the artifact.

use std::path::{Path, PathBuf};

use crate::artifact::{derive_output_path, markdown_heading, write_artifact, OutputArtifact};
use crate::error::PipelineError;
use crate::prompt::build_prompt;
use crate::runner::ModelRunner;
use crate::task::TaskKind;

/// One invocation's worth of input, constructed once and never shared.
#[derive(Debug, Clone)]
pub struct Request {
    pub source_path: PathBuf,
    pub source_text: String,
    pub model: String,
    pub task: TaskKind,
    /// Edge-case output gets a Markdown heading and `.md` extension when set.
    pub markdown: bool,
}

impl Request {
    /// Validates the source path and reads its content. Runs before any
    /// process is spawned; a missing or unreadable file never reaches the
    /// runner. Content is decoded lossily, so binary junk degrades to
    /// replacement characters instead of aborting.
    pub async fn from_file(
        source_path: &Path,
        model: impl Into<String>,
        task: TaskKind,
        markdown: bool,
    ) -> Result<Self, PipelineError> {
        let meta = tokio::fs::metadata(source_path)
            .await
            .map_err(|_| PipelineError::InputNotFound(source_path.to_path_buf()))?;
        if !meta.is_file() {
            return Err(PipelineError::InputNotFound(source_path.to_path_buf()));
        }

        let bytes = tokio::fs::read(source_path)
            .await
            .map_err(|e| PipelineError::Read {
                path: source_path.to_path_buf(),
                source: e,
            })?;

        Ok(Self {
            source_path: source_path.to_path_buf(),
            source_text: String::from_utf8_lossy(&bytes).into_owned(),
            model: model.into(),
            task,
            markdown,
        })
    }
}

/// Runs the full pipeline for one request. A non-zero runner exit means the
/// model run itself failed: its stderr is surfaced verbatim and no artifact
/// is written.
pub async fn run(
    request: &Request,
    runner: &dyn ModelRunner,
) -> Result<OutputArtifact, PipelineError> {
    let prompt = build_prompt(&request.source_text, request.task);
    tracing::debug!(
        task = ?request.task,
        model = %request.model,
        prompt_bytes = prompt.len(),
        "invoking model runner"
    );

    let result = runner.invoke(&request.model, &prompt).await?;
    if result.exit_code != 0 {
        return Err(PipelineError::Model {
            exit_code: result.exit_code,
            stderr: result.stderr,
        });
    }

    let path = derive_output_path(&request.source_path, request.task, request.markdown);
    let content = if request.task == TaskKind::EdgeCases && request.markdown {
        format!("{}{}", markdown_heading(&request.source_path), result.stdout)
    } else {
        result.stdout
    };

    let artifact = OutputArtifact { path, content };
    write_artifact(&artifact).await?;
    Ok(artifact)
}
