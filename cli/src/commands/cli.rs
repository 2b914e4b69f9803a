use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use sage_core::TaskKind;

#[derive(Parser, Debug)]
#[command(name = "sage", about = "Code analysis tool using local LLMs", version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Review and explain code, identifying any errors or potential bugs
    Explain(TaskArgs),
    /// Generate comprehensive edge test cases for a code file
    Generate(GenerateArgs),
    /// Suggest performance and structural improvements
    Optimize(TaskArgs),
}

impl Commands {
    pub fn task(&self) -> TaskKind {
        match self {
            Commands::Explain(_) => TaskKind::Explain,
            Commands::Generate(_) => TaskKind::EdgeCases,
            Commands::Optimize(_) => TaskKind::Optimize,
        }
    }
}

#[derive(ClapArgs, Debug, Clone)]
pub struct TaskArgs {
    /// Path to the code file to analyze
    pub file: PathBuf,

    /// Model to use; defaults to the configured model
    #[arg(long)]
    pub model: Option<String>,

    /// Display the result in the console after saving
    #[arg(long)]
    pub show: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub task: TaskArgs,

    /// Save plain text instead of Markdown
    #[arg(long)]
    pub no_markdown: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_defaults_to_markdown() {
        let args = Args::parse_from(["sage", "generate", "foo.py"]);
        let Commands::Generate(gen) = args.command else {
            panic!("expected generate subcommand");
        };
        assert!(!gen.no_markdown);
        assert_eq!(gen.task.file, PathBuf::from("foo.py"));
        assert!(gen.task.model.is_none());
    }

    #[test]
    fn explain_accepts_model_and_show() {
        let args = Args::parse_from(["sage", "explain", "foo.py", "--model", "m", "--show"]);
        let Commands::Explain(task) = args.command else {
            panic!("expected explain subcommand");
        };
        assert_eq!(task.model.as_deref(), Some("m"));
        assert!(task.show);
    }

    #[test]
    fn subcommands_map_onto_task_kinds() {
        let cases = [
            ("explain", TaskKind::Explain),
            ("generate", TaskKind::EdgeCases),
            ("optimize", TaskKind::Optimize),
        ];
        for (name, kind) in cases {
            let args = Args::parse_from(["sage", name, "foo.py"]);
            assert_eq!(args.command.task(), kind);
        }
    }
}
