//! Stored problem content
//!
//! [`ProblemContent`] mirrors a problem entry of a task descriptor as it is
//! stored on disk. The studio editor submits the same data in a looser form,
//! which [`ProblemContent::from_studio_form`] normalises.

use super::error::ProblemError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw problem entry of a task descriptor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProblemContent {
    /// Problem type name (e.g. `multifill`)
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    /// Text shown above the subtasks
    pub header: String,
    /// `None` when the entry has no subtask list at all
    pub subtasks: Option<Vec<SubtaskContent>>,
    /// Which subtasks to show; blank shows all of them in order
    pub subtask_string: String,
    /// `min/expected/total`; blank means one point per subtask
    pub score_string: String,
}

/// One subtask as stored
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubtaskContent {
    #[serde(default)]
    pub text: Option<String>,
    /// Give feedback per input field instead of per subtask
    #[serde(default, rename = "giveDetailedFeedback")]
    pub give_detailed_feedback: bool,
}

impl SubtaskContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            give_detailed_feedback: false,
        }
    }

    pub fn with_detailed_feedback(mut self, enabled: bool) -> Self {
        self.give_detailed_feedback = enabled;
        self
    }
}

impl ProblemContent {
    /// Convert studio editor input into the storage format.
    ///
    /// The editor submits subtasks as an object keyed by their index
    /// (`{"0": {...}, "1": {...}}`) and checkboxes as `"on"`. Subtasks are
    /// sorted by numeric key, a missing `text` becomes empty, and
    /// `giveDetailedFeedback` is true only for `"on"` or `"true"`.
    pub fn from_studio_form(form: &Value) -> Result<Self, ProblemError> {
        let string_field = |name: &str| {
            form.get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        let subtasks = match form.get("subtasks") {
            Some(Value::Object(entries)) => {
                let mut indexed = Vec::with_capacity(entries.len());
                for (key, value) in entries {
                    let index: u64 = key
                        .trim()
                        .parse()
                        .map_err(|_| ProblemError::InvalidFormKey { key: key.clone() })?;
                    let subtask = subtask_from_form(key, value)?;
                    indexed.push((index, subtask));
                }
                indexed.sort_by_key(|(index, _)| *index);
                Some(indexed.into_iter().map(|(_, subtask)| subtask).collect())
            }
            _ => None,
        };

        Ok(Self {
            kind: string_field("type"),
            name: string_field("name"),
            header: string_field("header"),
            subtasks,
            subtask_string: string_field("subtask_string"),
            score_string: string_field("score_string"),
        })
    }
}

fn subtask_from_form(key: &str, value: &Value) -> Result<SubtaskContent, ProblemError> {
    let fields = value
        .as_object()
        .ok_or_else(|| ProblemError::InvalidFormSubtask {
            key: key.to_string(),
        })?;

    let text = fields
        .get("text")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let give_detailed_feedback = match fields.get("giveDetailedFeedback") {
        Some(Value::Bool(enabled)) => *enabled,
        Some(Value::String(flag)) => matches!(flag.to_lowercase().as_str(), "on" | "true"),
        _ => false,
    };

    Ok(SubtaskContent {
        text: Some(text),
        give_detailed_feedback,
    })
}
