//! Position, customer and depot types.

use serde::{Deserialize, Serialize};

/// A point in the plane.
///
/// # Examples
///
/// ```
/// use vrp_cost2serve::models::Position;
///
/// let a = Position::new(0.0, 0.0);
/// let b = Position::new(3.0, 4.0);
/// assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Position {
    /// Creates a position.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Returns `true` if both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Compass bearing of this position seen from `origin`, in `[0, 360)`.
    ///
    /// North (positive y) is 0°, east (positive x) is 90°.
    ///
    /// ```
    /// use vrp_cost2serve::models::Position;
    ///
    /// let depot = Position::new(0.0, 0.0);
    /// assert!((Position::new(0.0, 5.0).bearing_from(&depot) - 0.0).abs() < 1e-10);
    /// assert!((Position::new(5.0, 0.0).bearing_from(&depot) - 90.0).abs() < 1e-10);
    /// assert!((Position::new(-5.0, 0.0).bearing_from(&depot) - 270.0).abs() < 1e-10);
    /// ```
    pub fn bearing_from(&self, origin: &Position) -> f64 {
        let angle = (self.y - origin.y).atan2(self.x - origin.x).to_degrees();
        let bearing = (90.0 - angle).rem_euclid(360.0);
        // rem_euclid may round up to exactly 360.0 for tiny negative inputs
        if bearing >= 360.0 {
            0.0
        } else {
            bearing
        }
    }
}

/// A customer of a routing instance.
///
/// `id` is the caller's external identifier and is never used as an index.
/// The scheduling fields are carried through for downstream consumers; no
/// constructor enforces them.
///
/// # Examples
///
/// ```
/// use vrp_cost2serve::models::Customer;
///
/// let c = Customer::new(12, 41.0, 49.0, 10.0).with_schedule(161.0, 171.0, 10.0);
/// assert_eq!(c.id(), 12);
/// assert_eq!(c.demand(), 10.0);
/// assert_eq!(c.due_time(), 171.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    id: i64,
    #[serde(flatten)]
    position: Position,
    demand: f64,
    #[serde(default)]
    ready_time: f64,
    #[serde(default)]
    due_time: f64,
    #[serde(default)]
    service_time: f64,
}

impl Customer {
    /// Creates a customer with zeroed scheduling fields.
    pub fn new(id: i64, x: f64, y: f64, demand: f64) -> Self {
        Self {
            id,
            position: Position::new(x, y),
            demand,
            ready_time: 0.0,
            due_time: 0.0,
            service_time: 0.0,
        }
    }

    /// Sets the ready time, due time and service time.
    pub fn with_schedule(mut self, ready_time: f64, due_time: f64, service_time: f64) -> Self {
        self.ready_time = ready_time;
        self.due_time = due_time;
        self.service_time = service_time;
        self
    }

    /// External identifier.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Location.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Demand to deliver.
    pub fn demand(&self) -> f64 {
        self.demand
    }

    /// Earliest service start.
    pub fn ready_time(&self) -> f64 {
        self.ready_time
    }

    /// Latest service start.
    pub fn due_time(&self) -> f64 {
        self.due_time
    }

    /// Service duration.
    pub fn service_time(&self) -> f64 {
        self.service_time
    }
}

/// The single depot every route starts and ends at.
///
/// A depot record may carry a `demand` field; it is ignored and the depot
/// demand is always zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Depot {
    #[serde(flatten)]
    position: Position,
    #[serde(default)]
    ready_time: f64,
    #[serde(default)]
    due_time: f64,
    #[serde(default)]
    service_time: f64,
}

impl Depot {
    /// Creates a depot at the given coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            position: Position::new(x, y),
            ready_time: 0.0,
            due_time: 0.0,
            service_time: 0.0,
        }
    }

    /// Sets the opening window and service time.
    pub fn with_schedule(mut self, ready_time: f64, due_time: f64, service_time: f64) -> Self {
        self.ready_time = ready_time;
        self.due_time = due_time;
        self.service_time = service_time;
        self
    }

    /// Location.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Always zero.
    pub fn demand(&self) -> f64 {
        0.0
    }

    /// Opening time.
    pub fn ready_time(&self) -> f64 {
        self.ready_time
    }

    /// Closing time.
    pub fn due_time(&self) -> f64 {
        self.due_time
    }

    /// Service time at the depot.
    pub fn service_time(&self) -> f64 {
        self.service_time
    }
}
