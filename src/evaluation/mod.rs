//! Route construction from node sequences and solution validation.

mod evaluator;

pub use evaluator::{RouteEvaluator, CAPACITY_TOLERANCE};
