//! Cosine similarity over feature vectors.
//!
//! [`SimilarityMatrix`] materializes all `n x n` scores (`O(n^2 d)` time,
//! `O(n^2)` memory). Past a size threshold [`SimilarityIndex`] switches to
//! computing single rows from pre-normalized vectors instead.

use crate::vector::{dot_product, Vector};
use rayon::prelude::*;
use std::borrow::Cow;

#[inline]
fn clamp_score(score: f32) -> f32 {
    score.clamp(0.0, 1.0)
}

/// Dense, row-major, symmetric similarity matrix
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    n: usize,
    data: Vec<f32>,
}

impl SimilarityMatrix {
    /// All-pairs cosine similarity. Rows are filled in parallel; every entry
    /// is in `[0, 1]`, the diagonal is 1 for non-zero vectors and 0 for
    /// zero vectors (similarity 0 to everything, itself included).
    pub fn build(vectors: &[Vector]) -> Self {
        let n = vectors.len();
        let norms: Vec<f32> = vectors.iter().map(Vector::norm).collect();
        let mut data = vec![0.0f32; n * n];

        if n > 0 {
            data.par_chunks_mut(n).enumerate().for_each(|(i, row)| {
                let norm_i = norms[i];
                if norm_i == 0.0 {
                    return;
                }
                for (j, cell) in row.iter_mut().enumerate() {
                    let norm_j = norms[j];
                    *cell = if i == j {
                        1.0
                    } else if norm_j == 0.0 {
                        0.0
                    } else {
                        clamp_score(vectors[i].dot(&vectors[j]) / (norm_i * norm_j))
                    };
                }
            });
        }

        Self { n, data }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.data[i * self.n + j]
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[f32] {
        &self.data[i * self.n..(i + 1) * self.n]
    }
}

/// Rows computed per request from unit-length vectors
#[derive(Debug, Clone)]
pub struct OnDemandSimilarity {
    normalized: Vec<Vector>,
    nonzero: Vec<bool>,
}

impl OnDemandSimilarity {
    pub fn build(vectors: &[Vector]) -> Self {
        Self {
            normalized: vectors.iter().map(Vector::normalized).collect(),
            nonzero: vectors.iter().map(|v| v.norm() > 0.0).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.normalized.len()
    }

    pub fn row(&self, i: usize) -> Vec<f32> {
        if !self.nonzero[i] {
            return vec![0.0; self.len()];
        }
        let query = self.normalized[i].as_slice();
        self.normalized
            .par_iter()
            .enumerate()
            .map(|(j, other)| {
                if i == j {
                    1.0
                } else {
                    clamp_score(dot_product(query, other.as_slice()))
                }
            })
            .collect()
    }

    /// One pair, without building the row
    pub fn get(&self, i: usize, j: usize) -> f32 {
        if !self.nonzero[i] || !self.nonzero[j] {
            return 0.0;
        }
        if i == j {
            return 1.0;
        }
        clamp_score(dot_product(
            self.normalized[i].as_slice(),
            self.normalized[j].as_slice(),
        ))
    }
}

/// Similarity source used by the recommenders
#[derive(Debug, Clone)]
pub enum SimilarityIndex {
    Dense(SimilarityMatrix),
    OnDemand(OnDemandSimilarity),
}

impl SimilarityIndex {
    /// Materialize the matrix when there are at most `dense_limit` vectors
    pub fn build(vectors: &[Vector], dense_limit: usize) -> Self {
        if vectors.len() <= dense_limit {
            SimilarityIndex::Dense(SimilarityMatrix::build(vectors))
        } else {
            SimilarityIndex::OnDemand(OnDemandSimilarity::build(vectors))
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SimilarityIndex::Dense(m) => m.len(),
            SimilarityIndex::OnDemand(o) => o.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_dense(&self) -> bool {
        matches!(self, SimilarityIndex::Dense(_))
    }

    pub fn row(&self, i: usize) -> Cow<'_, [f32]> {
        match self {
            SimilarityIndex::Dense(m) => Cow::Borrowed(m.row(i)),
            SimilarityIndex::OnDemand(o) => Cow::Owned(o.row(i)),
        }
    }

    pub fn get(&self, i: usize, j: usize) -> f32 {
        match self {
            SimilarityIndex::Dense(m) => m.get(i, j),
            SimilarityIndex::OnDemand(o) => o.get(i, j),
        }
    }
}
