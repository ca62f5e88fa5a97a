//! Deterministic generator for subtask sampling
//!
//! The same `(problem_id, seed)` pair must select the same subtasks on every
//! machine, in every process, on every request. The generator key is the
//! SHA-256 digest of `"{problem_id}#{seed}"`, fed to a ChaCha8 stream. Bounded
//! draws use Lemire's multiply-and-reject method on `u64` words, implemented
//! here so the selection never depends on a library's range sampling.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Separator between the problem id and the learner seed in the generator key
pub const KEY_SEPARATOR: char = '#';

/// Build the generator key for a learner on a problem
pub fn learner_key(problem_id: &str, seed: &str) -> String {
    format!("{problem_id}{KEY_SEPARATOR}{seed}")
}

/// Derive the 32-byte generator seed for an arbitrary key
pub fn derive_seed(key: &str) -> [u8; 32] {
    let digest = Sha256::digest(key.as_bytes());
    let mut seed = [0u8; 32];
    seed.copy_from_slice(&digest);
    seed
}

/// Call-local pseudorandom generator with a portable output sequence
#[derive(Debug, Clone)]
pub struct SeededRng {
    inner: ChaCha8Rng,
}

impl SeededRng {
    /// Generator for one learner on one problem
    pub fn for_learner(problem_id: &str, seed: &str) -> Self {
        Self::from_key(&learner_key(problem_id, seed))
    }

    /// Generator for an arbitrary key
    pub fn from_key(key: &str) -> Self {
        Self {
            inner: ChaCha8Rng::from_seed(derive_seed(key)),
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    /// Two consecutive stream words, low word first
    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Draw `amount` items from `pool` without replacement (partial Fisher-Yates).
    ///
    /// The result order is the draw order; callers that need a uniform order
    /// shuffle afterwards.
    pub fn sample(&mut self, pool: &[usize], amount: usize) -> Vec<usize> {
        self.sample_range(0, pool.len(), amount)
            .into_iter()
            .map(|i| pool[i])
            .collect()
    }

    /// Draw `amount` distinct values from `start..start + len`.
    ///
    /// Same draws as [`sample`](Self::sample) on the materialized range, but
    /// only the displaced positions are stored, so memory follows `amount`
    /// rather than `len`.
    pub fn sample_range(&mut self, start: usize, len: usize, amount: usize) -> Vec<usize> {
        let amount = amount.min(len);
        let mut displaced: HashMap<usize, usize> = HashMap::new();
        let mut picked = Vec::new();
        for i in 0..amount {
            let j = self.index_in(i, len);
            let at_j = displaced.get(&j).copied().unwrap_or(j);
            let at_i = displaced.get(&i).copied().unwrap_or(i);
            displaced.insert(j, at_i);
            picked.push(start + at_j);
        }
        picked
    }

    /// Shuffle `items` in place (Fisher-Yates)
    pub fn shuffle(&mut self, items: &mut [usize]) {
        for i in (1..items.len()).rev() {
            let j = self.index_in(0, i + 1);
            items.swap(i, j);
        }
    }

    /// Uniform index in `low..high`. Requires `low < high`.
    fn index_in(&mut self, low: usize, high: usize) -> usize {
        debug_assert!(low < high, "empty range {low}..{high}");
        // usize is at most 64 bits on every supported target
        let range = u64::try_from(high - low).unwrap_or(u64::MAX);
        // offset < range = high - low, so it fits back into usize
        low + self.bounded(range) as usize
    }

    /// Uniform value in `0..range` (Lemire). Returns 0 for an empty range.
    fn bounded(&mut self, range: u64) -> u64 {
        if range == 0 {
            return 0;
        }
        let mut product = u128::from(self.next_u64()) * u128::from(range);
        if (product as u64) < range {
            let threshold = range.wrapping_neg() % range;
            while (product as u64) < threshold {
                product = u128::from(self.next_u64()) * u128::from(range);
            }
        }
        (product >> 64) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_learner_key_format() {
        assert_eq!(learner_key("q1", "alice"), "q1#alice");
        assert_eq!(learner_key("", ""), "#");
    }

    #[test]
    fn test_derive_seed_is_sha256_of_key() {
        // Published SHA-256 test vector for "abc"
        assert_eq!(
            hex::encode(derive_seed("abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(
            hex::encode(derive_seed("")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_same_key_same_stream() {
        let mut a = SeededRng::for_learner("problem", "learner");
        let mut b = SeededRng::for_learner("problem", "learner");
        let first: Vec<u32> = (0..64).map(|_| a.next_u32()).collect();
        let second: Vec<u32> = (0..64).map(|_| b.next_u32()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_different_keys_different_streams() {
        let mut a = SeededRng::for_learner("problem", "alice");
        let mut b = SeededRng::for_learner("problem", "bob");
        let first: Vec<u32> = (0..8).map(|_| a.next_u32()).collect();
        let second: Vec<u32> = (0..8).map(|_| b.next_u32()).collect();
        assert_ne!(first, second);
    }

    #[test]
    fn test_learner_key_is_plain_concatenation() {
        let mut a = SeededRng::for_learner("a#b", "c");
        let mut b = SeededRng::from_key("a#b#c");
        assert_eq!(a.next_u32(), b.next_u32());
    }

    #[test]
    fn test_stream_golden_values() {
        let mut rng = SeededRng::for_learner("q1", "alice");
        let words: Vec<u32> = (0..8).map(|_| rng.next_u32()).collect();
        assert_eq!(
            words,
            vec![
                399308026, 549311100, 4185791357, 1137947432, 3548379698, 256330640, 687231743,
                3598059746
            ]
        );

        let mut rng = SeededRng::for_learner("q1", "alice");
        let wide: Vec<u64> = (0..4).map(|_| rng.next_u64()).collect();
        assert_eq!(
            wide,
            vec![
                2359273210229093626,
                4887447009192975229,
                1100931719311129138,
                15453548938811298559
            ]
        );

        let mut rng = SeededRng::from_key("abc");
        let words: Vec<u32> = (0..4).map(|_| rng.next_u32()).collect();
        assert_eq!(words, vec![3417789277, 3160572437, 451943076, 2495398923]);
    }

    #[test]
    fn test_sample_golden_values() {
        let mut rng = SeededRng::from_key("golden");
        let pool: Vec<usize> = (0..10).collect();
        assert_eq!(rng.sample(&pool, 3), vec![9, 8, 0]);
    }

    #[test]
    fn test_sample_range_matches_sample() {
        let pool: Vec<usize> = (40..65).collect();
        for amount in [0, 1, 7, 25, 30] {
            let mut dense = SeededRng::from_key("range");
            let mut sparse = SeededRng::from_key("range");
            assert_eq!(
                dense.sample(&pool, amount),
                sparse.sample_range(40, pool.len(), amount)
            );
        }
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_sample_range_huge_range() {
        let mut rng = SeededRng::for_learner("q", "s");
        let len = 4_000_000_000_000_000_000;
        assert_eq!(rng.sample_range(0, len, 1), vec![2198305134308932134]);
    }

    #[test]
    fn test_bounded_stays_in_range() {
        let mut rng = SeededRng::from_key("bounded");
        assert_eq!(rng.bounded(0), 0);
        assert_eq!(rng.bounded(1), 0);
        for range in [2, 3, 7, 1 << 40, u64::MAX] {
            for _ in 0..100 {
                assert!(rng.bounded(range) < range);
            }
        }
    }

    #[test]
    fn test_sample_without_replacement() {
        let mut rng = SeededRng::from_key("sample");
        let pool: Vec<usize> = (10..30).collect();
        for amount in 0..=pool.len() {
            let mut picked = rng.sample(&pool, amount);
            assert_eq!(picked.len(), amount);
            assert!(picked.iter().all(|i| pool.contains(i)));
            picked.sort_unstable();
            picked.dedup();
            assert_eq!(picked.len(), amount);
        }
    }

    #[test]
    fn test_sample_caps_amount_at_pool_size() {
        let mut rng = SeededRng::from_key("cap");
        assert_eq!(rng.sample(&[1, 2], 5).len(), 2);
        assert!(rng.sample(&[], 3).is_empty());
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = SeededRng::from_key("shuffle");
        let mut items: Vec<usize> = (0..50).collect();
        rng.shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_handles_tiny_slices() {
        let mut rng = SeededRng::from_key("tiny");
        let mut empty: Vec<usize> = vec![];
        rng.shuffle(&mut empty);
        assert!(empty.is_empty());

        let mut one = vec![7];
        rng.shuffle(&mut one);
        assert_eq!(one, vec![7]);
    }

    #[test]
    fn test_sample_covers_whole_pool_over_many_keys() {
        let pool: Vec<usize> = (0..5).collect();
        let mut seen = [false; 5];
        for learner in 0..200 {
            let mut rng = SeededRng::for_learner("cover", &learner.to_string());
            for i in rng.sample(&pool, 1) {
                seen[i] = true;
            }
        }
        assert!(seen.iter().all(|s| *s));
    }
}
