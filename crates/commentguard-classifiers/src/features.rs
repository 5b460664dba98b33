//! Sparse feature vectors

/// Sparse TF-IDF feature vector.
///
/// Entries are kept sorted by index with no duplicates, so iteration order
/// (and therefore any floating-point reduction over it) is deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    dimension: usize,
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    /// Create an all-zero vector of the given dimension
    pub fn zeros(dimension: usize) -> Self {
        Self {
            dimension,
            entries: Vec::new(),
        }
    }

    /// Build a vector from `(index, weight)` pairs.
    ///
    /// Pairs are sorted, duplicate indices are summed and zero weights are
    /// dropped. Returns `None` if an index is out of range.
    pub fn from_entries(dimension: usize, mut entries: Vec<(usize, f64)>) -> Option<Self> {
        if entries.iter().any(|(index, _)| *index >= dimension) {
            return None;
        }

        entries.sort_by_key(|(index, _)| *index);
        let mut merged: Vec<(usize, f64)> = Vec::with_capacity(entries.len());
        for (index, weight) in entries {
            match merged.last_mut() {
                Some((last, total)) if *last == index => *total += weight,
                _ => merged.push((index, weight)),
            }
        }
        merged.retain(|(_, weight)| *weight != 0.0);

        Some(Self {
            dimension,
            entries: merged,
        })
    }

    /// Fixed dimension (vocabulary size)
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of non-zero entries
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Whether every weight is zero
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Weight at `index`, zero if absent
    pub fn get(&self, index: usize) -> f64 {
        self.entries
            .binary_search_by_key(&index, |(i, _)| *i)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    /// Iterate non-zero `(index, weight)` pairs in ascending index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Euclidean norm
    pub fn l2_norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Scale all weights in place
    pub fn scale(&mut self, factor: f64) {
        for (_, weight) in &mut self.entries {
            *weight *= factor;
        }
    }

    /// Dot product with a dense weight slice of the same dimension
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.entries
            .iter()
            .map(|(index, weight)| weight * dense.get(*index).copied().unwrap_or(0.0))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_are_sorted_and_merged() {
        let v = FeatureVector::from_entries(5, vec![(3, 1.0), (1, 2.0), (3, 0.5), (4, 0.0)])
            .unwrap();
        assert_eq!(v.iter().collect::<Vec<_>>(), vec![(1, 2.0), (3, 1.5)]);
        assert_eq!(v.get(3), 1.5);
        assert_eq!(v.get(0), 0.0);
        assert_eq!(v.nnz(), 2);
    }

    #[test]
    fn test_out_of_range_index_rejected() {
        assert!(FeatureVector::from_entries(2, vec![(2, 1.0)]).is_none());
    }

    #[test]
    fn test_dot_and_norm() {
        let v = FeatureVector::from_entries(3, vec![(0, 3.0), (2, 4.0)]).unwrap();
        assert_eq!(v.l2_norm(), 5.0);
        assert_eq!(v.dot(&[1.0, 10.0, 0.5]), 5.0);
    }
}
