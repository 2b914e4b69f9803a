//! End-to-end pipeline tests against stubbed model runners: no external
//! process, no ollama install required.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use pretty_assertions::assert_eq;

use sage_core::{
    pipeline, InvocationResult, ModelRunner, PipelineError, Request, RunnerError, TaskKind,
};

/// Returns a fixed result and counts how many times it was asked to run.
struct StubRunner {
    result: InvocationResult,
    invocations: AtomicUsize,
}

impl StubRunner {
    fn ok(stdout: &str) -> Self {
        Self::with_result(InvocationResult {
            stdout: stdout.to_string(),
            stderr: String::new(),
            exit_code: 0,
        })
    }

    fn with_result(result: InvocationResult) -> Self {
        Self {
            result,
            invocations: AtomicUsize::new(0),
        }
    }

    fn count(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelRunner for StubRunner {
    async fn invoke(&self, _model: &str, _prompt: &str) -> Result<InvocationResult, RunnerError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        Ok(self.result.clone())
    }
}

async fn request_for(
    source: &Path,
    task: TaskKind,
    markdown: bool,
) -> Result<Request, PipelineError> {
    Request::from_file(source, "test-model", task, markdown).await
}

fn write_source(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[tokio::test]
async fn explain_writes_raw_response_beside_the_source() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(&dir, "script.py", "print('hi')\n");
    let runner = StubRunner::ok("This script prints hi.");

    let request = request_for(&source, TaskKind::Explain, true).await.unwrap();
    let artifact = pipeline::run(&request, &runner).await.unwrap();

    assert_eq!(artifact.path, dir.path().join("script_explanation.txt"));
    assert_eq!(artifact.content, "This script prints hi.");
    assert_eq!(
        std::fs::read_to_string(&artifact.path).unwrap(),
        "This script prints hi."
    );
    assert_eq!(runner.count(), 1);
}

#[tokio::test]
async fn edge_cases_markdown_artifact_gets_a_heading() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(&dir, "calc.py", "def add(a, b): return a + b\n");
    let runner = StubRunner::ok("1. Overflow when a is huge.\n");

    let request = request_for(&source, TaskKind::EdgeCases, true).await.unwrap();
    let artifact = pipeline::run(&request, &runner).await.unwrap();

    assert_eq!(artifact.path, dir.path().join("calc_edge_cases.md"));
    assert_eq!(
        artifact.content,
        "# Edge Case Analysis for calc.py\n\n1. Overflow when a is huge.\n"
    );
}

#[tokio::test]
async fn edge_cases_without_markdown_is_plain_text() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(&dir, "calc.py", "def add(a, b): return a + b\n");
    let runner = StubRunner::ok("1. Overflow.\n");

    let request = request_for(&source, TaskKind::EdgeCases, false)
        .await
        .unwrap();
    let artifact = pipeline::run(&request, &runner).await.unwrap();

    assert_eq!(artifact.path, dir.path().join("calc_edge_cases.txt"));
    assert_eq!(artifact.content, "1. Overflow.\n");
}

#[tokio::test]
async fn pipeline_is_idempotent_and_overwrites_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(&dir, "main.rs", "fn main() {}\n");
    let runner = StubRunner::ok("An empty main function.");

    let request = request_for(&source, TaskKind::Explain, true).await.unwrap();
    let first = pipeline::run(&request, &runner).await.unwrap();
    let second = pipeline::run(&request, &runner).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(
        std::fs::read_to_string(&second.path).unwrap(),
        second.content
    );
    assert_eq!(runner.count(), 2);
}

#[tokio::test]
async fn failed_model_run_surfaces_stderr_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(&dir, "app.py", "pass\n");
    let runner = StubRunner::with_result(InvocationResult {
        stdout: String::new(),
        stderr: "model not found".to_string(),
        exit_code: 1,
    });

    let request = request_for(&source, TaskKind::Explain, true).await.unwrap();
    let err = pipeline::run(&request, &runner).await.unwrap_err();

    assert!(err.to_string().contains("model not found"));
    assert!(matches!(err, PipelineError::Model { exit_code: 1, .. }));
    assert!(!dir.path().join("app_explanation.txt").exists());
}

#[tokio::test]
async fn missing_input_fails_before_any_invocation() {
    let runner = StubRunner::ok("never used");

    let err = request_for(Path::new("/no/such/file.py"), TaskKind::Explain, true)
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::InputNotFound(_)));
    assert_eq!(runner.count(), 0, "no process may be spawned for missing input");
}

#[tokio::test]
async fn directory_input_is_rejected_like_a_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = request_for(dir.path(), TaskKind::Explain, true)
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::InputNotFound(_)));
}

#[tokio::test]
async fn non_utf8_source_is_read_lossily() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blob.bin");
    std::fs::write(&path, [0x66, 0x6e, 0xff, 0xfe, 0x21]).unwrap();

    let request = request_for(&path, TaskKind::Explain, true).await.unwrap();
    assert!(request.source_text.contains('\u{FFFD}'));
    assert!(request.source_text.starts_with("fn"));
}
