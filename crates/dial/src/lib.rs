pub mod arc;
pub mod geometry;
pub mod tracker;

pub use arc::{
    Arc, Band, ProgressArc, RingGeometry, RingSegments, compute_progress_arc,
    compute_ring_segments,
};
pub use geometry::{DialGeometry, Point};
pub use tracker::{AngleTracker, DialAction, GestureState};

pub const UNITS_PER_REVOLUTION: u32 = 60;

pub const DEGREES_PER_UNIT: f64 = 360.0 / UNITS_PER_REVOLUTION as f64;
