//! Score constraints
//!
//! A score string holds three integers, `min/expected/total`:
//!
//! - `min` is the minimum score required on the problem
//! - `expected` is the score a learner must reach on average across problems
//! - `total` is the problem's total score, evenly split among shown subtasks
//!
//! Grading relies on these bounds without re-checking them.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const FIELD_SEPARATOR: &str = "/";

/// Errors raised while parsing a score string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreSpecError {
    #[error("Expected 3 parts in score string (min/expected/total), received '{spec}'")]
    WrongArity { spec: String, parts: usize },

    #[error("Score string contains illegal score '{field}': '{spec}'")]
    NonIntegerField { spec: String, field: String },

    #[error("Total score can not be negative: {total}")]
    NegativeTotal { total: i64 },

    #[error("Minimum score is outside valid range 0..={total}: {minimum}")]
    MinimumOutOfRange { minimum: i64, total: i64 },

    #[error("Expected score is outside valid range 0..={total}: {expected}")]
    ExpectedOutOfRange { expected: i64, total: i64 },
}

/// Parsed score string
///
/// # Example
///
/// ```
/// use multifill_domain::score::ScoreSpec;
///
/// let score: ScoreSpec = "2/3/4".parse().unwrap();
/// assert_eq!(score.minimum(), 2);
/// assert_eq!(score.expected(), 3);
/// assert_eq!(score.total(), 4);
///
/// assert!("6/3/5".parse::<ScoreSpec>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreSpec {
    minimum: u64,
    expected: u64,
    total: u64,
}

impl ScoreSpec {
    pub fn parse(spec: &str) -> Result<Self, ScoreSpecError> {
        let parts: Vec<&str> = spec.split(FIELD_SEPARATOR).collect();
        if parts.len() != 3 {
            return Err(ScoreSpecError::WrongArity {
                spec: spec.to_string(),
                parts: parts.len(),
            });
        }

        let field = |text: &str| -> Result<i64, ScoreSpecError> {
            text.trim()
                .parse()
                .map_err(|_| ScoreSpecError::NonIntegerField {
                    spec: spec.to_string(),
                    field: text.to_string(),
                })
        };
        let minimum = field(parts[0])?;
        let expected = field(parts[1])?;
        let total = field(parts[2])?;

        if total < 0 {
            return Err(ScoreSpecError::NegativeTotal { total });
        }
        if minimum < 0 || minimum > total {
            return Err(ScoreSpecError::MinimumOutOfRange { minimum, total });
        }
        if expected < 0 || expected > total {
            return Err(ScoreSpecError::ExpectedOutOfRange { expected, total });
        }

        // All three are within 0..=total here
        Ok(Self {
            minimum: minimum.unsigned_abs(),
            expected: expected.unsigned_abs(),
            total: total.unsigned_abs(),
        })
    }

    /// One point per subtask, no minimum, full marks expected (`0/count/count`)
    pub fn full_marks(count: usize) -> Self {
        // lossless: usize is at most 64 bits
        let count = u64::try_from(count).unwrap_or(u64::MAX);
        Self {
            minimum: 0,
            expected: count,
            total: count,
        }
    }

    /// Build the score spec for a problem with `count` subtasks.
    /// A blank string yields [`ScoreSpec::full_marks`].
    pub fn for_subtasks(spec: &str, count: usize) -> Result<Self, ScoreSpecError> {
        if spec.trim().is_empty() {
            return Ok(Self::full_marks(count));
        }
        Self::parse(spec)
    }

    pub fn minimum(&self) -> u64 {
        self.minimum
    }

    pub fn expected(&self) -> u64 {
        self.expected
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Points carried by each of `shown` subtasks
    pub fn points_per_subtask(&self, shown: usize) -> f64 {
        if shown == 0 {
            return 0.0;
        }
        self.total as f64 / shown as f64
    }
}

impl FromStr for ScoreSpec {
    type Err = ScoreSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ScoreSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.minimum, self.expected, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let score: ScoreSpec = "0/5/5".parse().unwrap();
        assert_eq!(score.minimum(), 0);
        assert_eq!(score.expected(), 5);
        assert_eq!(score.total(), 5);
    }

    #[test]
    fn test_parse_trims_fields() {
        let score: ScoreSpec = " 1 / 2 / 3 ".parse().unwrap();
        assert_eq!(score.to_string(), "1/2/3");
    }

    #[test]
    fn test_minimum_above_total() {
        assert_eq!(
            ScoreSpec::parse("6/3/5"),
            Err(ScoreSpecError::MinimumOutOfRange {
                minimum: 6,
                total: 5
            })
        );
    }

    #[test]
    fn test_expected_above_total() {
        assert_eq!(
            ScoreSpec::parse("1/6/5"),
            Err(ScoreSpecError::ExpectedOutOfRange {
                expected: 6,
                total: 5
            })
        );
    }

    #[test]
    fn test_negative_fields() {
        assert!(matches!(
            ScoreSpec::parse("-1/2/5"),
            Err(ScoreSpecError::MinimumOutOfRange { .. })
        ));
        assert!(matches!(
            ScoreSpec::parse("1/-2/5"),
            Err(ScoreSpecError::ExpectedOutOfRange { .. })
        ));
        assert_eq!(
            ScoreSpec::parse("0/0/-1"),
            Err(ScoreSpecError::NegativeTotal { total: -1 })
        );
    }

    #[test]
    fn test_wrong_arity() {
        for text in ["", "1/2", "1/2/3/4", "5"] {
            assert!(
                matches!(
                    ScoreSpec::parse(text),
                    Err(ScoreSpecError::WrongArity { .. })
                ),
                "{text}"
            );
        }
    }

    #[test]
    fn test_non_integer_field() {
        assert_eq!(
            ScoreSpec::parse("1/x/3"),
            Err(ScoreSpecError::NonIntegerField {
                spec: "1/x/3".to_string(),
                field: "x".to_string(),
            })
        );
        assert!(matches!(
            ScoreSpec::parse("1.5/2/3"),
            Err(ScoreSpecError::NonIntegerField { .. })
        ));
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        assert!(ScoreSpec::parse("5/5/5").is_ok());
        assert!(ScoreSpec::parse("0/0/0").is_ok());
    }

    #[test]
    fn test_full_marks_default() {
        assert_eq!(ScoreSpec::full_marks(5), "0/5/5".parse::<ScoreSpec>().unwrap());
        assert_eq!(ScoreSpec::for_subtasks("", 5).unwrap().to_string(), "0/5/5");
        assert_eq!(ScoreSpec::for_subtasks("  ", 2).unwrap(), ScoreSpec::full_marks(2));
    }

    #[test]
    fn test_full_marks_keeps_large_counts() {
        let score = ScoreSpec::full_marks(usize::MAX);
        assert_eq!(score.total(), usize::MAX as u64);
        assert_eq!(score.to_string(), format!("0/{0}/{0}", usize::MAX));
    }

    #[test]
    fn test_for_subtasks_parses_explicit_string() {
        let score = ScoreSpec::for_subtasks("1/2/10", 3).unwrap();
        assert_eq!(score.total(), 10);
    }

    #[test]
    fn test_points_per_subtask() {
        let score: ScoreSpec = "0/6/6".parse().unwrap();
        assert_eq!(score.points_per_subtask(3), 2.0);
        assert_eq!(score.points_per_subtask(0), 0.0);
    }

    #[test]
    fn test_error_display() {
        let err = ScoreSpec::parse("1/2").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Expected 3 parts in score string (min/expected/total), received '1/2'"
        );
    }
}
