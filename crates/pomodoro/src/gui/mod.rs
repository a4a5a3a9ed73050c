pub mod app;
pub mod picker;
pub mod progress;
pub mod theme;

pub const RING_STROKE_WIDTH: f64 = 20.0;
pub const THUMB_RADIUS: f64 = 15.0;
pub const DIAL_INSET: f64 = 30.0; // room for the thumb
pub const PROGRESS_INSET: f64 = 20.0; // room for the stroke
pub const DIAL_SIZE: i32 = 320;
pub const PROGRESS_SIZE: i32 = 300;
