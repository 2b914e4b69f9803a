//! Prompt construction: a fixed per-task instruction header followed by the
//! verbatim source text. Pure string work, no I/O.

use crate::task::TaskKind;

const EXPLAIN_HEADER: &str = "\
Please review and explain the following code.
If it contains any syntax errors, logic errors, or potential bugs, identify and explain them clearly.
Then describe the code's purpose, key functions, and structure.

Here is the code:
";

const EDGE_CASES_HEADER: &str = "\
Analyze the following code and generate comprehensive edge test cases.
For each test case, include:
1. Description of what edge case it tests
2. Input values that would trigger this edge case
3. Expected output/behavior
4. Why this case is important to test

Focus on:
- Boundary conditions
- Invalid inputs
- Unusual scenarios
- Race conditions (if applicable)
- Memory edge cases
- Error handling paths

Format each test case clearly with numbered sections.
Here's the code:
";

const OPTIMIZE_HEADER: &str = "\
Analyze the following code and suggest concrete optimizations.
Cover both performance and structure:
- Algorithmic complexity and hot paths
- Unnecessary allocations or copies
- Simpler or more idiomatic constructs
- Opportunities to restructure for clarity and speed

For each suggestion, explain what to change, why it helps, and any trade-offs.
Here is the code:
";

/// Builds the full prompt sent to the model runner. Deterministic and total:
/// the same (task, source) pair always yields the same string, and the source
/// text is embedded unmodified.
pub fn build_prompt(source_text: &str, task: TaskKind) -> String {
    let header = match task {
        TaskKind::Explain => EXPLAIN_HEADER,
        TaskKind::EdgeCases => EDGE_CASES_HEADER,
        TaskKind::Optimize => OPTIMIZE_HEADER,
    };
    format!("{header}\n{source_text}\n")
}
