//! Bag/pull sampling of subtask indices
//!
//! Indices `0..total_bag` are assigned to groups left to right. For each
//! segment, every group draws `pull` of its `bag` indices, the picks of the
//! whole segment are shuffled together, and segments are emitted in order.
//! Shuffling never crosses a segment boundary.

use super::grammar::SubtaskSpec;
use super::rng::SeededRng;

impl SubtaskSpec {
    /// Select the subtasks shown to a learner.
    ///
    /// Returns `total_pull` distinct indices in `0..total_bag`. Identical
    /// `(problem_id, seed)` pairs always yield identical sequences.
    ///
    /// # Example
    ///
    /// ```
    /// use multifill_domain::subtask::SubtaskSpec;
    ///
    /// let spec: SubtaskSpec = "1;1/2,1".parse().unwrap();
    /// let shown = spec.sample("q1", "learner-42");
    /// assert_eq!(shown.len(), 3);
    /// assert_eq!(shown[0], 0);
    /// assert_eq!(shown, spec.sample("q1", "learner-42"));
    /// ```
    pub fn sample(&self, problem_id: &str, seed: &str) -> Vec<usize> {
        let mut rng = SeededRng::for_learner(problem_id, seed);
        self.sample_with(&mut rng)
    }

    /// Select subtasks drawing from an existing generator
    pub fn sample_with(&self, rng: &mut SeededRng) -> Vec<usize> {
        let mut result = Vec::new();
        let mut cursor = 0;

        for segment in self.segments() {
            let mut shuffler = Vec::new();

            for group in segment.groups() {
                shuffler.extend(rng.sample_range(cursor, group.bag(), group.pull()));
                cursor += group.bag();
            }

            rng.shuffle(&mut shuffler);
            result.extend(shuffler);
        }

        assert_eq!(
            cursor,
            self.total_bag(),
            "sampler consumed {cursor} subtasks but the subtask string holds {}",
            self.total_bag()
        );

        result
    }
}
