//! Assembly layer between the parsed CLI and the core pipeline: merges flag
//! overrides onto the config, builds the runner, and reports the outcome.

use sage_core::{pipeline, AppConfig, CliError, OllamaRunner, Request, TaskKind};

use crate::commands::cli::{Commands, GenerateArgs, TaskArgs};

pub async fn dispatch(cmd: Commands, cfg: &AppConfig) -> Result<i32, CliError> {
    let task = cmd.task();
    match cmd {
        Commands::Explain(args) | Commands::Optimize(args) => {
            run_task(cfg, task, &args, true).await
        }
        Commands::Generate(GenerateArgs { task: args, no_markdown }) => {
            run_task(cfg, task, &args, !no_markdown).await
        }
    }
}

async fn run_task(
    cfg: &AppConfig,
    task: TaskKind,
    args: &TaskArgs,
    markdown: bool,
) -> Result<i32, CliError> {
    let model = args
        .model
        .clone()
        .unwrap_or_else(|| cfg.model.default.clone());

    let request = Request::from_file(&args.file, model, task, markdown).await?;
    tracing::debug!(
        task = ?task,
        model = %request.model,
        file = %args.file.display(),
        "dispatching analysis"
    );

    eprintln!("Generating {} for {}...", task.label(), args.file.display());
    let runner = OllamaRunner::new(&cfg.runner.program);
    let artifact = pipeline::run(&request, &runner).await?;
    tracing::info!(path = %artifact.path.display(), "analysis complete");

    println!("{} saved to {}", task.title(), artifact.path.display());
    if args.show {
        println!();
        println!("{}", artifact.content);
    }

    Ok(0)
}
