//! Console output formatter for multifill results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use multifill_application::{ShowProblemOutput, TaskReport};
use multifill_domain::{ConfigIssue, ProblemContent, ScoreSpec, SubtaskSpec};

/// Formats command results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a parsed subtask string
    pub fn format_subtask_spec(spec: &SubtaskSpec) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} {}\n",
            "Subtask string:".cyan().bold(),
            spec.source()
        ));
        if spec.source() != spec.to_string() {
            output.push_str(&format!("{} {}\n", "Canonical:".cyan().bold(), spec));
        }

        output.push_str(&Self::section_header("Segments"));
        for (i, segment) in spec.segments().iter().enumerate() {
            output.push_str(&format!(
                "\n{} {}  {}\n",
                format!("── {} ──", i + 1).yellow().bold(),
                segment,
                format!("(shows {} of {})", segment.pull(), segment.bag()).dimmed()
            ));
            for group in segment.groups() {
                let kind = if group.is_fixed() {
                    "all"
                } else if group.pull() == 0 {
                    "none"
                } else {
                    "random"
                };
                output.push_str(&format!(
                    "  * pick {} of {} ({})\n",
                    group.pull(),
                    group.bag(),
                    kind
                ));
            }
        }

        output.push_str(&format!(
            "\n{} shows {} of {} subtasks\n",
            "Total:".cyan().bold(),
            spec.total_pull(),
            spec.total_bag()
        ));
        let deterministic = if spec.is_deterministic() {
            "yes".green()
        } else {
            "no".yellow()
        };
        output.push_str(&format!(
            "{} {}\n",
            "Same for every learner:".cyan().bold(),
            deterministic
        ));

        output
    }

    /// Format a parsed score string
    pub fn format_score_spec(score: &ScoreSpec, count: Option<usize>) -> String {
        let mut output = format!(
            "{} {}\n  minimum:  {}\n  expected: {}\n  total:    {}\n",
            "Score:".cyan().bold(),
            score,
            score.minimum(),
            score.expected(),
            score.total()
        );
        if let Some(count) = count {
            output.push_str(&format!(
                "  per subtask: {:.2} ({} subtasks)\n",
                score.points_per_subtask(count),
                count
            ));
        }
        output
    }

    /// Format the subtask indices selected for one learner
    pub fn format_sample(problem_id: &str, seed: &str, ids: &[usize]) -> String {
        let ids: Vec<String> = ids.iter().map(usize::to_string).collect();
        format!(
            "{} {}\n",
            format!("{}#{}:", problem_id, seed).dimmed(),
            ids.join(" ")
        )
    }

    /// Format the results of checking tasks
    pub fn format_task_reports(reports: &[TaskReport]) -> String {
        let mut output = String::new();

        for report in reports {
            if report.is_ok() {
                output.push_str(&format!(
                    "{} {} ({} problems)\n",
                    "ok".green().bold(),
                    report.task_id,
                    report.checked
                ));
            } else {
                output.push_str(&format!(
                    "{} {} ({} of {} problems invalid)\n",
                    "FAIL".red().bold(),
                    report.task_id,
                    report.issues.len(),
                    report.checked
                ));
                for issue in &report.issues {
                    output.push_str(&format!("  * {}: {}\n", issue.problem_id, issue.error));
                }
            }
        }

        let failed = reports.iter().filter(|r| !r.is_ok()).count();
        let summary = format!("{} tasks checked, {} failed", reports.len(), failed);
        if failed == 0 {
            output.push_str(&format!("\n{}\n", summary.green()));
        } else {
            output.push_str(&format!("\n{}\n", summary.red()));
        }

        output
    }

    /// Format the subtasks one learner sees
    pub fn format_problem(problem: &ShowProblemOutput) -> String {
        let mut output = String::new();

        let title = if problem.name.is_empty() {
            problem.problem_id.as_str()
        } else {
            problem.name.as_str()
        };
        output.push_str(&Self::header(title));
        output.push('\n');
        output.push_str(&format!(
            "{} {}/{} (seed {})\n",
            "Problem:".cyan().bold(),
            problem.task_id,
            problem.problem_id,
            problem.seed
        ));

        if !problem.header.is_empty() {
            output.push_str(&format!("\n{}\n", problem.header));
        }

        for subtask in &problem.subtasks {
            let label = subtask.title.as_deref().unwrap_or_default();
            output.push_str(&format!(
                "\n{}{}\n",
                label.yellow().bold(),
                format!("[subtask {}]", subtask.id).dimmed()
            ));
            output.push_str(&Self::indent(&subtask.text, "   "));
            output.push('\n');
            if subtask.give_detailed_feedback {
                output.push_str(&format!("   {}\n", "(detailed feedback)".dimmed()));
            }
        }

        output.push_str(&format!(
            "\n{} {} ({:.2} points per subtask)\n",
            "Score:".cyan().bold(),
            problem.score,
            problem.points_per_subtask()
        ));
        output.push_str(&Self::footer());

        output
    }

    /// Format configuration issues
    pub fn format_config_issues(issues: &[ConfigIssue]) -> String {
        issues
            .iter()
            .map(|issue| {
                let tag = if issue.is_error() {
                    "error:".red().bold()
                } else {
                    "warning:".yellow().bold()
                };
                format!("{} {}\n", tag, issue.message)
            })
            .collect()
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn subtask_spec(&self, spec: &SubtaskSpec) -> String {
        Self::format_subtask_spec(spec)
    }

    fn score_spec(&self, score: &ScoreSpec, count: Option<usize>) -> String {
        Self::format_score_spec(score, count)
    }

    fn sample(&self, problem_id: &str, seed: &str, ids: &[usize]) -> String {
        Self::format_sample(problem_id, seed, ids)
    }

    fn task_reports(&self, reports: &[TaskReport]) -> String {
        Self::format_task_reports(reports)
    }

    fn problem(&self, output: &ShowProblemOutput) -> String {
        Self::format_problem(output)
    }

    fn problem_content(&self, content: &ProblemContent) -> String {
        super::json::JsonFormatter::to_json(content)
    }
}
