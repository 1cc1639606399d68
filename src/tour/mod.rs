//! Tour sequencing: ordering a small node set into a short closed tour.
//!
//! A [`TourSequencer`] receives a distance matrix whose index 0 is the
//! depot and returns a [`Tour`] that starts and ends there and visits every
//! other node once. Any implementation meeting that contract can be plugged
//! into the sweep constructor.

mod sequencer;

pub use sequencer::{LocalSearchSequencer, TourConfig};

use crate::distance::DistanceMatrix;
use crate::error::RoutingError;
use crate::models::round_to;

/// A closed tour over the nodes of a distance matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    nodes: Vec<usize>,
    distance: f64,
}

impl Tour {
    /// A tour with an already computed length, rounded here to 4 decimals.
    pub fn new(nodes: Vec<usize>, distance: f64) -> Self {
        Self {
            nodes,
            distance: round_to(distance, 4),
        }
    }

    /// Builds a tour from its node sequence, summing edge lengths at full
    /// precision and rounding the total to 4 decimals.
    pub fn from_nodes(nodes: Vec<usize>, distances: &DistanceMatrix) -> Self {
        let distance = distances.path_length(&nodes);
        Self::new(nodes, distance)
    }

    /// Node indices, beginning and ending with the depot (0).
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Non-depot nodes in visit order.
    pub fn stops(&self) -> &[usize] {
        match self.nodes.len() {
            0..=2 => &[],
            len => &self.nodes[1..len - 1],
        }
    }

    /// Tour length, rounded to 4 decimals.
    pub fn distance(&self) -> f64 {
        self.distance
    }
}

/// Orders the nodes of a distance matrix into a closed tour from node 0.
pub trait TourSequencer: Send + Sync {
    /// Returns a tour over every node of `distances`.
    ///
    /// Fails with [`RoutingError::TourNotFound`] if no tour can be built.
    fn sequence(&self, distances: &DistanceMatrix) -> Result<Tour, RoutingError>;
}
