//! Dense distance matrix.

use crate::models::{Instance, Position};

/// A dense n×n distance matrix stored in row-major order.
///
/// Matrices built from an [`Instance`] put the depot at index 0 and the
/// customers at `1..=n` in input order.
///
/// # Examples
///
/// ```
/// use vrp_cost2serve::models::Position;
/// use vrp_cost2serve::distance::DistanceMatrix;
///
/// let positions = vec![
///     Position::new(0.0, 0.0),
///     Position::new(3.0, 4.0),
///     Position::new(6.0, 8.0),
/// ];
/// let dm = DistanceMatrix::from_positions(&positions);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Computes the Euclidean distance matrix of the given positions.
    pub fn from_positions(positions: &[Position]) -> Self {
        let data = positions
            .iter()
            .flat_map(|from| positions.iter().map(move |to| from.distance_to(to)))
            .collect();
        Self {
            data,
            size: positions.len(),
        }
    }

    /// Computes the matrix over the depot (index 0) and all customers.
    pub fn from_instance(instance: &Instance) -> Self {
        let positions: Vec<Position> = std::iter::once(*instance.depot().position())
            .chain(instance.customers().iter().map(|c| *c.position()))
            .collect();
        Self::from_positions(&positions)
    }

    /// Creates a distance matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// The matrix restricted to `nodes`, re-indexed in the given order.
    ///
    /// # Panics
    ///
    /// Panics if a node is out of bounds.
    pub fn submatrix(&self, nodes: &[usize]) -> Self {
        let data = nodes
            .iter()
            .flat_map(|&i| nodes.iter().map(move |&j| self.get(i, j)))
            .collect();
        Self {
            data,
            size: nodes.len(),
        }
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if every entry is finite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|d| d.is_finite())
    }

    /// Returns `true` if `d(i, j)` and `d(j, i)` differ by at most `tol`
    /// everywhere.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        let n = self.size;
        (0..n).all(|i| (i + 1..n).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= tol))
    }

    /// Returns `true` if every diagonal entry is zero.
    pub fn has_zero_diagonal(&self) -> bool {
        (0..self.size).all(|i| self.get(i, i) == 0.0)
    }

    /// Returns the nearest neighbor of `from` among the given candidates.
    ///
    /// Ties go to the candidate listed first. Returns `None` if `candidates`
    /// is empty.
    pub fn nearest_neighbor(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        candidates
            .iter()
            .copied()
            .min_by(|&a, &b| self.get(from, a).total_cmp(&self.get(from, b)))
    }

    /// Length of the walk visiting `path` in order.
    pub fn path_length(&self, path: &[usize]) -> f64 {
        path.windows(2).map(|w| self.get(w[0], w[1])).sum()
    }
}
