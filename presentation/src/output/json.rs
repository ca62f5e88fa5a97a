//! JSON output formatter

use super::formatter::OutputFormatter;
use multifill_application::{ShowProblemOutput, TaskReport};
use multifill_domain::{ProblemContent, ScoreSpec, SubtaskSpec};
use serde::Serialize;
use serde_json::{Value, json};

/// Formats command results as pretty-printed JSON
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    fn report(report: &TaskReport) -> Value {
        let issues: Vec<Value> = report
            .issues
            .iter()
            .map(|issue| {
                json!({
                    "problem_id": issue.problem_id,
                    "error": issue.error.to_string(),
                })
            })
            .collect();

        json!({
            "task_id": report.task_id,
            "checked": report.checked,
            "ok": report.is_ok(),
            "issues": issues,
        })
    }
}

impl OutputFormatter for JsonFormatter {
    fn subtask_spec(&self, spec: &SubtaskSpec) -> String {
        let mut value = serde_json::to_value(spec).unwrap_or(Value::Null);
        if let Value::Object(map) = &mut value {
            map.insert("canonical".to_string(), json!(spec.to_string()));
            map.insert("deterministic".to_string(), json!(spec.is_deterministic()));
        }
        Self::to_json(&value)
    }

    fn score_spec(&self, score: &ScoreSpec, count: Option<usize>) -> String {
        let mut value = json!({
            "minimum": score.minimum(),
            "expected": score.expected(),
            "total": score.total(),
        });
        if let (Some(count), Value::Object(map)) = (count, &mut value) {
            map.insert(
                "points_per_subtask".to_string(),
                json!(score.points_per_subtask(count)),
            );
        }
        Self::to_json(&value)
    }

    fn sample(&self, problem_id: &str, seed: &str, ids: &[usize]) -> String {
        Self::to_json(&json!({
            "problem_id": problem_id,
            "seed": seed,
            "subtasks": ids,
        }))
    }

    fn task_reports(&self, reports: &[TaskReport]) -> String {
        Self::to_json(&reports.iter().map(Self::report).collect::<Vec<_>>())
    }

    fn problem(&self, output: &ShowProblemOutput) -> String {
        Self::to_json(output)
    }

    fn problem_content(&self, content: &ProblemContent) -> String {
        Self::to_json(content)
    }
}
