//! Model invoker: owns the external model-runner process lifecycle.
//!
//! The runner is a trait so the pipeline can be exercised against stubs in
//! tests; `OllamaRunner` is the production implementation, invoking
//! `ollama run <model>` and talking to it over the three standard streams.

mod communicate;

pub use communicate::communicate;

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::RunnerError;

/// Everything captured from one model-runner run. `stdout` and `stderr` are
/// decoded lossily: an invalid byte sequence becomes a replacement character
/// rather than failing the whole read.
#[derive(Debug, Clone)]
pub struct InvocationResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

#[async_trait]
pub trait ModelRunner: Send + Sync {
    /// Runs the named model over the prompt and captures its complete output.
    async fn invoke(&self, model: &str, prompt: &str) -> Result<InvocationResult, RunnerError>;
}

/// Invokes the `ollama` executable (or a configured substitute) with
/// `run <model>`, piping the prompt over stdin.
pub struct OllamaRunner {
    program: String,
}

impl OllamaRunner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for OllamaRunner {
    fn default() -> Self {
        Self::new("ollama")
    }
}

#[async_trait]
impl ModelRunner for OllamaRunner {
    async fn invoke(&self, model: &str, prompt: &str) -> Result<InvocationResult, RunnerError> {
        let child = Command::new(&self.program)
            .arg("run")
            .arg(model)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| RunnerError::Spawn(e.to_string()))?;

        tracing::debug!(program = %self.program, model = %model, "model runner spawned");
        communicate(child, prompt.as_bytes().to_vec()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let runner = OllamaRunner::new("sage-test-no-such-binary");
        let err = runner.invoke("some-model", "hello").await.unwrap_err();
        assert!(matches!(err, RunnerError::Spawn(_)));
    }
}
