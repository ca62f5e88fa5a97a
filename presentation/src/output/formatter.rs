//! Output formatter trait

use multifill_application::{ShowProblemOutput, TaskReport};
use multifill_domain::{ProblemContent, ScoreSpec, SubtaskSpec};

/// Trait for formatting command results
pub trait OutputFormatter {
    /// Structure and totals of a parsed subtask string
    fn subtask_spec(&self, spec: &SubtaskSpec) -> String;

    /// A parsed score string; `count` adds per-subtask points
    fn score_spec(&self, score: &ScoreSpec, count: Option<usize>) -> String;

    /// Subtask indices selected for one learner
    fn sample(&self, problem_id: &str, seed: &str, ids: &[usize]) -> String;

    /// Results of checking tasks
    fn task_reports(&self, reports: &[TaskReport]) -> String;

    /// The subtasks one learner sees
    fn problem(&self, output: &ShowProblemOutput) -> String;

    /// Normalised problem content
    fn problem_content(&self, content: &ProblemContent) -> String;
}
