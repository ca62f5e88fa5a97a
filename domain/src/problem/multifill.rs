//! Multifill problem
//!
//! A problem whose inputs are placed inline with the text of several
//! subtasks. A subtask string decides which subtasks each learner sees.

use super::content::ProblemContent;
use super::error::ProblemError;
use crate::score::ScoreSpec;
use crate::subtask::SubtaskSpec;
use serde::Serialize;
use serde_json::Value;

/// Type name of multifill problems in task descriptors
pub const PROBLEM_TYPE: &str = "multifill";

/// One subtask of a loaded problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subtask {
    pub text: String,
    pub give_detailed_feedback: bool,
}

/// A subtask as selected for one learner, in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShownSubtask {
    /// Index of the subtask in the problem definition
    pub id: usize,
    /// Letter label (`a) `, `b) `, ...), omitted when only one subtask is shown
    pub title: Option<String>,
    pub text: String,
    pub give_detailed_feedback: bool,
}

/// A validated multifill problem
///
/// Construction fails fast: a problem whose subtask string or score string is
/// malformed, or whose subtask string does not cover exactly its subtasks,
/// never becomes usable.
#[derive(Debug, Clone, Serialize)]
pub struct MultifillProblem {
    id: String,
    name: String,
    header: String,
    subtasks: Vec<Subtask>,
    subtask_spec: SubtaskSpec,
    score_spec: ScoreSpec,
}

impl MultifillProblem {
    pub fn new(id: impl Into<String>, content: &ProblemContent) -> Result<Self, ProblemError> {
        let id = id.into();

        if !content.kind.is_empty() && content.kind != PROBLEM_TYPE {
            return Err(ProblemError::WrongType {
                problem_id: id,
                kind: content.kind.clone(),
            });
        }

        let subtasks = match &content.subtasks {
            Some(subtasks) if !subtasks.is_empty() => subtasks,
            _ => return Err(ProblemError::NoSubtasks { problem_id: id }),
        };

        let subtasks = subtasks
            .iter()
            .enumerate()
            .map(|(index, subtask)| match &subtask.text {
                Some(text) => Ok(Subtask {
                    text: text.clone(),
                    give_detailed_feedback: subtask.give_detailed_feedback,
                }),
                None => Err(ProblemError::MissingText {
                    problem_id: id.clone(),
                    index,
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let subtask_spec = SubtaskSpec::for_subtasks(&content.subtask_string, subtasks.len())
            .map_err(|source| ProblemError::SubtaskString {
                problem_id: id.clone(),
                source,
            })?;

        let score_spec = ScoreSpec::for_subtasks(&content.score_string, subtasks.len())
            .map_err(|source| ProblemError::ScoreString {
                problem_id: id.clone(),
                source,
            })?;

        Ok(Self {
            id,
            name: content.name.clone(),
            header: content.header.clone(),
            subtasks,
            subtask_spec,
            score_spec,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn subtasks(&self) -> &[Subtask] {
        &self.subtasks
    }

    pub fn subtask_spec(&self) -> &SubtaskSpec {
        &self.subtask_spec
    }

    pub fn score_spec(&self) -> &ScoreSpec {
        &self.score_spec
    }

    /// Indices of the subtasks shown to the learner identified by `seed`
    pub fn shown_subtask_ids(&self, seed: &str) -> Vec<usize> {
        self.subtask_spec.sample(&self.id, seed)
    }

    /// Subtasks shown to the learner identified by `seed`, in display order
    pub fn shown_subtasks(&self, seed: &str) -> Vec<ShownSubtask> {
        let ids = self.shown_subtask_ids(seed);
        let labelled = ids.len() > 1;

        ids.into_iter()
            .enumerate()
            .map(|(position, id)| {
                let subtask = &self.subtasks[id];
                ShownSubtask {
                    id,
                    title: labelled.then(|| format!("{}) ", subtask_label(position))),
                    text: subtask.text.clone(),
                    give_detailed_feedback: subtask.give_detailed_feedback,
                }
            })
            .collect()
    }

    /// A submission is consistent when it maps this problem's id to an object
    pub fn input_is_consistent(&self, task_input: &Value) -> bool {
        matches!(task_input.get(&self.id), Some(Value::Object(_)))
    }
}

/// Letter label for a display position: `a`..`z`, then `aa`, `ab`, ...
fn subtask_label(position: usize) -> String {
    let mut label = Vec::new();
    let mut n = position + 1;
    while n > 0 {
        n -= 1;
        label.push(b'a' + (n % 26) as u8);
        n /= 26;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}
