//! The analysis task selected for a single invocation.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Review the code and explain its purpose, functions, and structure.
    Explain,
    /// Generate numbered edge test cases for the code.
    EdgeCases,
    /// Suggest performance and structural improvements.
    Optimize,
}

impl TaskKind {
    /// Suffix appended to the source file's stem when deriving the output path.
    pub fn suffix(self) -> &'static str {
        match self {
            TaskKind::Explain => "_explanation",
            TaskKind::EdgeCases => "_edge_cases",
            TaskKind::Optimize => "_optimization",
        }
    }

    /// Output file extension. Edge cases are saved as Markdown unless the
    /// caller turned it off.
    pub fn extension(self, markdown: bool) -> &'static str {
        match self {
            TaskKind::EdgeCases if markdown => "md",
            _ => "txt",
        }
    }

    /// Lowercase noun for progress messages ("Generating {} for ...").
    pub fn label(self) -> &'static str {
        match self {
            TaskKind::Explain => "explanation",
            TaskKind::EdgeCases => "edge cases",
            TaskKind::Optimize => "optimization suggestions",
        }
    }

    /// Capitalized form for completion messages ("{} saved to ...").
    pub fn title(self) -> &'static str {
        match self {
            TaskKind::Explain => "Explanation",
            TaskKind::EdgeCases => "Edge cases",
            TaskKind::Optimize => "Optimization suggestions",
        }
    }
}
