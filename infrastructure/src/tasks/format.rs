//! Descriptor file formats

use multifill_domain::TaskDescriptor;
use std::path::Path;

/// Serialization format of a task descriptor, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorFormat {
    Yaml,
    Toml,
    Json,
}

impl DescriptorFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Toml => "toml",
            Self::Json => "json",
        }
    }

    /// Parse descriptor text, returning the parser's message on failure
    pub fn parse(&self, text: &str) -> Result<TaskDescriptor, String> {
        match self {
            Self::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
            Self::Toml => toml::from_str(text).map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
        }
    }
}

impl std::fmt::Display for DescriptorFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(
            DescriptorFormat::from_path(Path::new("task.yaml")),
            Some(DescriptorFormat::Yaml)
        );
        assert_eq!(
            DescriptorFormat::from_path(Path::new("task.YML")),
            Some(DescriptorFormat::Yaml)
        );
        assert_eq!(
            DescriptorFormat::from_path(Path::new("dir/task.toml")),
            Some(DescriptorFormat::Toml)
        );
        assert_eq!(
            DescriptorFormat::from_path(Path::new("task.json")),
            Some(DescriptorFormat::Json)
        );
        assert_eq!(DescriptorFormat::from_path(Path::new("task.xml")), None);
        assert_eq!(DescriptorFormat::from_path(Path::new("task")), None);
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
name: Week 1
problems:
  q1:
    type: multifill
    header: Fill in
    subtask_string: "1;1/2,1"
    subtasks:
      - text: first
      - text: second
        giveDetailedFeedback: true
      - text: third
      - text: fourth
"#;
        let task = DescriptorFormat::Yaml.parse(yaml).unwrap();
        assert_eq!(task.name, "Week 1");
        let q1 = &task.problems["q1"];
        assert_eq!(q1.subtask_string, "1;1/2,1");
        let subtasks = q1.subtasks.as_ref().unwrap();
        assert_eq!(subtasks.len(), 4);
        assert!(subtasks[1].give_detailed_feedback);
    }

    #[test]
    fn test_parse_toml() {
        let text = r#"
name = "Week 2"

[problems.q1]
type = "multifill"
score_string = "1/2/2"
subtasks = [{ text = "a" }, { text = "b" }]
"#;
        let task = DescriptorFormat::Toml.parse(text).unwrap();
        assert_eq!(task.problems["q1"].score_string, "1/2/2");
    }

    #[test]
    fn test_parse_error_message() {
        let err = DescriptorFormat::Json.parse("{not json").unwrap_err();
        assert!(!err.is_empty());
    }
}
