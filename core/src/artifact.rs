//! Response writer: derives the output path beside the source file and
//! persists the model's response, overwriting any previous artifact.

use std::path::{Path, PathBuf};

use crate::error::PipelineError;
use crate::task::TaskKind;

/// The persisted result of one invocation: where it goes and exactly what is
/// written there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifact {
    pub path: PathBuf,
    pub content: String,
}

/// Pure derivation of the artifact path: source stem plus a task-specific
/// suffix, in the source file's directory. `foo/bar.py` explained becomes
/// `foo/bar_explanation.txt`.
pub fn derive_output_path(source_path: &Path, task: TaskKind, markdown: bool) -> PathBuf {
    let stem = source_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    source_path.with_file_name(format!(
        "{stem}{}.{}",
        task.suffix(),
        task.extension(markdown)
    ))
}

/// Level-1 Markdown heading naming the analyzed file, prepended to edge-case
/// artifacts when Markdown formatting is enabled.
pub fn markdown_heading(source_path: &Path) -> String {
    let name = source_path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("# Edge Case Analysis for {name}\n\n")
}

/// Writes the artifact, replacing any existing file at its path. No backup,
/// no append.
pub async fn write_artifact(artifact: &OutputArtifact) -> Result<(), PipelineError> {
    tokio::fs::write(&artifact.path, &artifact.content)
        .await
        .map_err(|e| PipelineError::Write {
            path: artifact.path.clone(),
            source: e,
        })?;
    tracing::info!(path = %artifact.path.display(), bytes = artifact.content.len(), "artifact written");
    Ok(())
}
