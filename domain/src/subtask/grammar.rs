//! Subtask string grammar
//!
//! A subtask string describes which subtasks of a problem a learner sees.
//!
//! ```text
//! spec    := segment (";" segment)*
//! segment := group ("," group)*
//! group   := INT | INT "/" INT
//! ```
//!
//! `1;1/2,1` means: always show the first subtask, then pick one of the
//! next two and always include the last one. The semicolon forces the first
//! subtask to come first, while the comma lets the two picks swap places.
//!
//! # Example
//!
//! ```
//! use multifill_domain::subtask::SubtaskSpec;
//!
//! let spec: SubtaskSpec = "1;1/2,1".parse().unwrap();
//! assert_eq!(spec.total_bag(), 4);
//! assert_eq!(spec.total_pull(), 3);
//! assert_eq!(spec.segments().len(), 2);
//! ```

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const SEGMENT_SEPARATOR: &str = ";";
const GROUP_SEPARATOR: &str = ",";
const PULL_SEPARATOR: &str = "/";

/// Errors raised while parsing or cross-validating a subtask string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubtaskSpecError {
    #[error("Subtask string '{spec}' contains illegal group '{group}'")]
    MalformedGroup { spec: String, group: String },

    #[error("Subtask string '{spec}' contains negative pull in group '{group}'")]
    NegativePull { spec: String, group: String },

    #[error("Subtask string '{spec}' contains empty bag in group '{group}'")]
    EmptyBag { spec: String, group: String },

    #[error("Subtask string '{spec}' has pull > bag size in group '{group}'")]
    PullExceedsBag { spec: String, group: String },

    #[error("Subtask string '{spec}' is too large at group '{group}'")]
    TooLarge { spec: String, group: String },

    #[error("Problem has {subtasks} subtasks, but the subtask string '{spec}' expects {total_bag}")]
    BagMismatch {
        spec: String,
        subtasks: usize,
        total_bag: usize,
    },
}

/// Pick `pull` items out of the next `bag` items of the global index space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PickGroup {
    pull: usize,
    bag: usize,
}

impl PickGroup {
    /// Create a validated group. Returns `None` unless `0 <= pull <= bag` and `bag >= 1`.
    pub fn new(pull: usize, bag: usize) -> Option<Self> {
        (bag >= 1 && pull <= bag).then_some(Self { pull, bag })
    }

    /// A group that always takes all of its `n` items
    pub fn all(n: usize) -> Option<Self> {
        Self::new(n, n)
    }

    pub fn pull(&self) -> usize {
        self.pull
    }

    pub fn bag(&self) -> usize {
        self.bag
    }

    /// True when the group takes every item of its bag
    pub fn is_fixed(&self) -> bool {
        self.pull == self.bag
    }

    fn parse(token: &str, spec: &str) -> Result<Self, SubtaskSpecError> {
        let malformed = || SubtaskSpecError::MalformedGroup {
            spec: spec.to_string(),
            group: token.to_string(),
        };

        let (pull_str, bag_str) = match token.split_once(PULL_SEPARATOR) {
            Some((pull, bag)) => (pull, bag),
            None => (token, token),
        };
        let pull: i64 = pull_str.trim().parse().map_err(|_| malformed())?;
        let bag: i64 = bag_str.trim().parse().map_err(|_| malformed())?;

        if pull < 0 {
            return Err(SubtaskSpecError::NegativePull {
                spec: spec.to_string(),
                group: token.to_string(),
            });
        }
        if bag < 1 {
            return Err(SubtaskSpecError::EmptyBag {
                spec: spec.to_string(),
                group: token.to_string(),
            });
        }
        if pull > bag {
            return Err(SubtaskSpecError::PullExceedsBag {
                spec: spec.to_string(),
                group: token.to_string(),
            });
        }

        let too_large = || SubtaskSpecError::TooLarge {
            spec: spec.to_string(),
            group: token.to_string(),
        };
        let pull = usize::try_from(pull).map_err(|_| too_large())?;
        let bag = usize::try_from(bag).map_err(|_| too_large())?;
        Ok(Self { pull, bag })
    }
}

impl fmt::Display for PickGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_fixed() {
            write!(f, "{}", self.bag)
        } else {
            write!(f, "{}{}{}", self.pull, PULL_SEPARATOR, self.bag)
        }
    }
}

/// An order-preserving run of pick groups whose picks may be shuffled together
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    groups: Vec<PickGroup>,
}

impl Segment {
    pub fn groups(&self) -> &[PickGroup] {
        &self.groups
    }

    pub fn bag(&self) -> usize {
        self.groups.iter().map(PickGroup::bag).sum()
    }

    pub fn pull(&self) -> usize {
        self.groups.iter().map(PickGroup::pull).sum()
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, group) in self.groups.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", GROUP_SEPARATOR)?;
            }
            write!(f, "{}", group)?;
        }
        Ok(())
    }
}

/// Parsed subtask string
///
/// Immutable once built. Per-learner variation is supplied as a seed when
/// sampling, never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubtaskSpec {
    source: String,
    segments: Vec<Segment>,
    total_pull: usize,
    total_bag: usize,
}

impl SubtaskSpec {
    /// Parse a subtask string. Fails on the first invalid group.
    pub fn parse(spec: &str) -> Result<Self, SubtaskSpecError> {
        let mut segments = Vec::new();
        let mut total_pull: usize = 0;
        let mut total_bag: usize = 0;

        for segment in spec.split(SEGMENT_SEPARATOR) {
            let mut groups = Vec::new();
            for token in segment.split(GROUP_SEPARATOR) {
                let group = PickGroup::parse(token, spec)?;
                // pull <= bag per group, so the bag sum overflows first
                total_bag = total_bag.checked_add(group.bag).ok_or_else(|| {
                    SubtaskSpecError::TooLarge {
                        spec: spec.to_string(),
                        group: token.to_string(),
                    }
                })?;
                total_pull += group.pull;
                groups.push(group);
            }
            segments.push(Segment { groups });
        }

        Ok(Self {
            source: spec.to_string(),
            segments,
            total_pull,
            total_bag,
        })
    }

    /// Every subtask once, in order, without randomization (`1;1;...;1`)
    pub fn sequential(count: usize) -> Self {
        let segments = (0..count)
            .map(|_| Segment {
                groups: vec![PickGroup { pull: 1, bag: 1 }],
            })
            .collect::<Vec<_>>();
        let source = vec!["1"; count].join(SEGMENT_SEPARATOR);

        Self {
            source,
            segments,
            total_pull: count,
            total_bag: count,
        }
    }

    /// Build the spec for a problem with `count` subtasks.
    ///
    /// A blank string yields [`SubtaskSpec::sequential`]. Otherwise the string
    /// is parsed and its total bag must equal `count`.
    pub fn for_subtasks(spec: &str, count: usize) -> Result<Self, SubtaskSpecError> {
        if spec.trim().is_empty() {
            return Ok(Self::sequential(count));
        }

        let parsed = Self::parse(spec)?;
        parsed.ensure_bag_matches(count)?;
        Ok(parsed)
    }

    /// Check that the total bag covers exactly `count` subtasks
    pub fn ensure_bag_matches(&self, count: usize) -> Result<(), SubtaskSpecError> {
        if self.total_bag != count {
            return Err(SubtaskSpecError::BagMismatch {
                spec: self.source.clone(),
                subtasks: count,
                total_bag: self.total_bag,
            });
        }
        Ok(())
    }

    /// The string this spec was parsed from
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of subtasks to pick from
    pub fn total_bag(&self) -> usize {
        self.total_bag
    }

    /// Number of subtasks a learner is shown
    pub fn total_pull(&self) -> usize {
        self.total_pull
    }

    /// True when every learner sees the same subtasks in the same order
    pub fn is_deterministic(&self) -> bool {
        self.segments.iter().all(|segment| {
            segment.pull() <= 1
                && segment
                    .groups
                    .iter()
                    .all(|group| group.pull == 0 || group.is_fixed())
        })
    }
}

impl FromStr for SubtaskSpec {
    type Err = SubtaskSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SubtaskSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", SEGMENT_SEPARATOR)?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(spec: &SubtaskSpec) -> Vec<Vec<(usize, usize)>> {
        spec.segments()
            .iter()
            .map(|s| s.groups().iter().map(|g| (g.pull(), g.bag())).collect())
            .collect()
    }

    #[test]
    fn test_parse_mixed_spec() {
        let spec: SubtaskSpec = "1;1/2,1".parse().unwrap();
        assert_eq!(groups(&spec), vec![vec![(1, 1)], vec![(1, 2), (1, 1)]]);
        assert_eq!(spec.total_bag(), 4);
        assert_eq!(spec.total_pull(), 3);
        assert_eq!(spec.source(), "1;1/2,1");
    }

    #[test]
    fn test_bare_integer_takes_whole_bag() {
        let spec: SubtaskSpec = "3".parse().unwrap();
        assert_eq!(groups(&spec), vec![vec![(3, 3)]]);
        assert!(spec.segments()[0].groups()[0].is_fixed());
    }

    #[test]
    fn test_zero_pull_is_allowed() {
        let spec: SubtaskSpec = "0/3;2".parse().unwrap();
        assert_eq!(spec.total_bag(), 5);
        assert_eq!(spec.total_pull(), 2);
    }

    #[test]
    fn test_tokens_are_trimmed() {
        let spec: SubtaskSpec = " 1 / 2 , 1 ; 2".parse().unwrap();
        assert_eq!(groups(&spec), vec![vec![(1, 2), (1, 1)], vec![(2, 2)]]);
    }

    #[test]
    fn test_totals_are_sums_of_groups() {
        for text in ["1", "1;1/2,1", "2/5,3;1/4;7", "0/1,0/1,1/1"] {
            let spec: SubtaskSpec = text.parse().unwrap();
            let bag: usize = spec.segments().iter().map(Segment::bag).sum();
            let pull: usize = spec.segments().iter().map(Segment::pull).sum();
            assert_eq!(spec.total_bag(), bag, "{text}");
            assert_eq!(spec.total_pull(), pull, "{text}");
        }
    }

    #[test]
    fn test_rejects_malformed_groups() {
        for text in ["abc", "1/x", "x/1", "", "1;;1", "1,", "1/2/3", "1.5"] {
            let err = SubtaskSpec::parse(text).unwrap_err();
            assert!(
                matches!(err, SubtaskSpecError::MalformedGroup { .. }),
                "{text}: {err:?}"
            );
        }
    }

    #[test]
    fn test_rejects_negative_pull() {
        let err = SubtaskSpec::parse("-1/2").unwrap_err();
        assert_eq!(
            err,
            SubtaskSpecError::NegativePull {
                spec: "-1/2".to_string(),
                group: "-1/2".to_string(),
            }
        );
    }

    #[test]
    fn test_rejects_empty_bag() {
        assert!(matches!(
            SubtaskSpec::parse("0/0"),
            Err(SubtaskSpecError::EmptyBag { .. })
        ));
        assert!(matches!(
            SubtaskSpec::parse("1;0"),
            Err(SubtaskSpecError::EmptyBag { .. })
        ));
    }

    #[test]
    fn test_rejects_pull_exceeding_bag() {
        let err = SubtaskSpec::parse("1;2/1").unwrap_err();
        assert_eq!(
            err,
            SubtaskSpecError::PullExceedsBag {
                spec: "1;2/1".to_string(),
                group: "2/1".to_string(),
            }
        );
    }

    #[test]
    fn test_error_message_names_group() {
        let err = SubtaskSpec::parse("1;abc").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Subtask string '1;abc' contains illegal group 'abc'"
        );
    }

    #[test]
    fn test_sequential_matches_explicit_string() {
        let default = SubtaskSpec::sequential(5);
        let explicit: SubtaskSpec = "1;1;1;1;1".parse().unwrap();
        assert_eq!(default, explicit);
        assert_eq!(default.source(), "1;1;1;1;1");
    }

    #[test]
    fn test_sequential_zero_is_empty() {
        let spec = SubtaskSpec::sequential(0);
        assert!(spec.segments().is_empty());
        assert_eq!(spec.total_bag(), 0);
    }

    #[test]
    fn test_for_subtasks_blank_uses_default() {
        let spec = SubtaskSpec::for_subtasks("   ", 3).unwrap();
        assert_eq!(spec, SubtaskSpec::sequential(3));
    }

    #[test]
    fn test_for_subtasks_checks_bag() {
        assert!(SubtaskSpec::for_subtasks("1;1/2,1", 4).is_ok());

        let err = SubtaskSpec::for_subtasks("1;1/2,1", 5).unwrap_err();
        assert_eq!(
            err,
            SubtaskSpecError::BagMismatch {
                spec: "1;1/2,1".to_string(),
                subtasks: 5,
                total_bag: 4,
            }
        );
        assert_eq!(
            err.to_string(),
            "Problem has 5 subtasks, but the subtask string '1;1/2,1' expects 4"
        );
    }

    #[test]
    fn test_rejects_overflowing_bag_total() {
        let text = "9223372036854775807;9223372036854775807;6";
        let err = SubtaskSpec::for_subtasks(text, 4).unwrap_err();
        assert!(matches!(err, SubtaskSpecError::TooLarge { .. }), "{err}");

        let text = "9223372036854775807;9223372036854775807;9223372036854775807";
        assert!(matches!(
            SubtaskSpec::parse(text),
            Err(SubtaskSpecError::TooLarge { ref group, .. }) if group == "9223372036854775807"
        ));
    }

    #[test]
    fn test_display_is_canonical() {
        let spec: SubtaskSpec = " 1 ; 1/2 , 2/2".parse().unwrap();
        assert_eq!(spec.to_string(), "1;1/2,2");
    }

    #[test]
    fn test_is_deterministic() {
        assert!(SubtaskSpec::sequential(4).is_deterministic());
        assert!("0/2;1".parse::<SubtaskSpec>().unwrap().is_deterministic());
        assert!(!"2;1".parse::<SubtaskSpec>().unwrap().is_deterministic());
        assert!(!"1,1".parse::<SubtaskSpec>().unwrap().is_deterministic());
        assert!(!"1/2".parse::<SubtaskSpec>().unwrap().is_deterministic());
    }

    #[test]
    fn test_pick_group_constructor() {
        assert!(PickGroup::new(0, 1).is_some());
        assert!(PickGroup::new(2, 1).is_none());
        assert!(PickGroup::new(0, 0).is_none());
        assert_eq!(PickGroup::all(3).map(|g| g.to_string()), Some("3".to_string()));
        assert_eq!(PickGroup::new(1, 3).map(|g| g.to_string()), Some("1/3".to_string()));
    }
}
