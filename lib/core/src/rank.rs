//! Merging per-seed similarity rows into one recommendation list.

use ordered_float::OrderedFloat;
use smallvec::SmallVec;
use std::cmp::Reverse;

pub use crate::config::DEFAULT_CANDIDATE_POOL;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub index: usize,
    pub score: f32,
}

impl Candidate {
    /// Descending score, then ascending catalog index
    #[inline]
    fn sort_key(&self) -> (Reverse<OrderedFloat<f32>>, usize) {
        (Reverse(OrderedFloat(self.score)), self.index)
    }
}

/// Drop repeated seeds, keeping the first occurrence. A title given twice
/// contributes one similarity row and is excluded once.
pub fn unique_seeds(seeds: &[usize]) -> SmallVec<[usize; 3]> {
    let mut unique = SmallVec::new();
    for &seed in seeds {
        if !unique.contains(&seed) {
            unique.push(seed);
        }
    }
    unique
}

/// The best `limit` entries of a similarity row, highest score first and
/// lower catalog index first among equal scores.
pub fn rank_row(row: &[f32], limit: usize) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = row
        .iter()
        .enumerate()
        .map(|(index, &score)| Candidate { index, score })
        .collect();

    if limit == 0 {
        return Vec::new();
    }
    if limit < candidates.len() {
        candidates.select_nth_unstable_by_key(limit - 1, Candidate::sort_key);
        candidates.truncate(limit);
    }
    candidates.sort_unstable_by_key(Candidate::sort_key);
    candidates
}

/// Merge the similarity rows of the seed items into at most `top_n`
/// recommendations.
///
/// The per-seed rankings are pooled and ordered by descending score (ties by
/// catalog index), the pool is cut to `candidate_pool` entries, seeds are
/// removed, and an item reached from several seeds keeps its first (highest
/// scoring) position. Fewer than `top_n` results is not an error.
pub fn merge_rankings<R: AsRef<[f32]>>(
    rows: &[R],
    seeds: &[usize],
    top_n: usize,
    candidate_pool: usize,
) -> Vec<Candidate> {
    // Only the head of each row can reach the head of the pooled ranking
    let mut combined: Vec<Candidate> = rows
        .iter()
        .flat_map(|row| rank_row(row.as_ref(), candidate_pool))
        .collect();
    combined.sort_by_key(Candidate::sort_key);
    combined.truncate(candidate_pool);

    let mut result: Vec<Candidate> = Vec::with_capacity(top_n.min(combined.len()));
    for candidate in combined {
        if result.len() == top_n {
            break;
        }
        if seeds.contains(&candidate.index) {
            continue;
        }
        if result.iter().any(|c| c.index == candidate.index) {
            continue;
        }
        result.push(candidate);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indexes(candidates: &[Candidate]) -> Vec<usize> {
        candidates.iter().map(|c| c.index).collect()
    }

    #[test]
    fn test_unique_seeds() {
        assert_eq!(unique_seeds(&[4, 1, 4]).as_slice(), &[4, 1]);
        assert_eq!(unique_seeds(&[2, 2, 2]).as_slice(), &[2]);
    }

    #[test]
    fn test_rank_row_ties_by_index() {
        let row = [0.5, 0.9, 0.5, 1.0, 0.0];
        assert_eq!(indexes(&rank_row(&row, 10)), vec![3, 1, 0, 2, 4]);
        assert_eq!(indexes(&rank_row(&row, 3)), vec![3, 1, 0]);
        assert!(rank_row(&row, 0).is_empty());
    }

    #[test]
    fn test_merge_excludes_seeds() {
        let rows = vec![
            vec![1.0, 0.8, 0.1, 0.6],
            vec![0.8, 1.0, 0.2, 0.7],
        ];
        let result = merge_rankings(&rows, &[0, 1], 10, DEFAULT_CANDIDATE_POOL);
        assert_eq!(indexes(&result), vec![3, 2]);
    }

    #[test]
    fn test_merge_keeps_highest_score_for_repeats() {
        let rows = vec![
            vec![1.0, 0.0, 0.3, 0.9],
            vec![0.0, 1.0, 0.4, 0.2],
        ];
        let result = merge_rankings(&rows, &[0, 1], 10, DEFAULT_CANDIDATE_POOL);
        assert_eq!(indexes(&result), vec![3, 2]);
        assert_eq!(result[0].score, 0.9);
        assert_eq!(result[1].score, 0.4);
    }

    #[test]
    fn test_merge_truncates_to_top_n() {
        let rows = vec![vec![1.0, 0.9, 0.8, 0.7, 0.6]];
        let result = merge_rankings(&rows, &[0], 2, DEFAULT_CANDIDATE_POOL);
        assert_eq!(indexes(&result), vec![1, 2]);
    }

    #[test]
    fn test_candidate_pool_bounds_result() {
        // Pool of 3 is used up by the seed and two neighbours
        let rows = vec![vec![1.0, 0.9, 0.8, 0.7, 0.6]];
        let result = merge_rankings(&rows, &[0], 10, 3);
        assert_eq!(indexes(&result), vec![1, 2]);
    }

    #[test]
    fn test_pool_counts_repeated_entries() {
        let rows = vec![vec![1.0, 0.0, 0.9, 0.5], vec![0.0, 1.0, 0.9, 0.4]];
        // Pooled: 0(1.0) 1(1.0) 2(0.9) 2(0.9) | 3(0.5) ...
        let result = merge_rankings(&rows, &[0, 1], 10, 4);
        assert_eq!(indexes(&result), vec![2]);
    }

    #[test]
    fn test_merge_is_deterministic() {
        let rows = vec![vec![1.0, 0.5, 0.5, 0.5], vec![0.5, 0.5, 1.0, 0.5]];
        let a = merge_rankings(&rows, &[0, 2], 5, DEFAULT_CANDIDATE_POOL);
        let b = merge_rankings(&rows, &[0, 2], 5, DEFAULT_CANDIDATE_POOL);
        assert_eq!(a, b);
        assert_eq!(indexes(&a), vec![1, 3]);
    }
}
