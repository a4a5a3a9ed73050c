use crate::geometry::{self, DialGeometry, Point};
use crate::{DEGREES_PER_UNIT, UNITS_PER_REVOLUTION};

// screen angles: 0 at three o'clock, clockwise positive
pub const TOP_DEGREES: f64 = -90.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub center: Point,
    pub radius: f64,
    pub start_degrees: f64,
    pub sweep_degrees: f64,
}

impl Arc {
    fn from_top(center: Point, radius: f64, sweep_degrees: f64) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            start_degrees: TOP_DEGREES,
            sweep_degrees,
        }
    }

    pub fn end_degrees(&self) -> f64 {
        self.start_degrees + self.sweep_degrees
    }

    pub fn start_radians(&self) -> f64 {
        self.start_degrees.to_radians()
    }

    pub fn end_radians(&self) -> f64 {
        self.end_degrees().to_radians()
    }

    pub fn is_full_circle(&self) -> bool {
        self.sweep_degrees >= 360.0
    }

    pub fn is_empty(&self) -> bool {
        self.sweep_degrees <= 0.0 || self.radius <= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    pub center: Point,
    pub radius: f64,
    pub stroke_width: f64,
}

impl RingGeometry {
    pub fn new(center: Point, radius: f64, stroke_width: f64) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            stroke_width: stroke_width.max(0.0),
        }
    }

    pub fn from_dial(dial: DialGeometry, stroke_width: f64) -> Self {
        Self::new(dial.center, dial.radius, stroke_width)
    }

    /// Radius just inside the stroke, so a filled sector does not bleed under it.
    pub fn inner_radius(&self) -> f64 {
        (self.radius - self.stroke_width / 2.0).max(0.0)
    }
}

/// Passive progress ring: a filled sector plus a stroked arc over the same angles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressArc {
    pub sector: Arc,
    pub stroke: Arc,
}

impl ProgressArc {
    pub fn sweep_degrees(&self) -> f64 {
        self.stroke.sweep_degrees
    }
}

pub fn compute_progress_arc(fraction: f64, ring: &RingGeometry) -> ProgressArc {
    let fraction = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    let sweep = 360.0 * fraction;

    ProgressArc {
        sector: Arc::from_top(ring.center, ring.inner_radius(), sweep),
        stroke: Arc::from_top(ring.center, ring.radius, sweep),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub arc: Arc,
    pub color_index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RingSegments {
    pub completed: Vec<Band>,
    pub current: Band,
    pub thumb: Point,
}

impl RingSegments {
    pub fn completed_revolutions(&self) -> usize {
        self.completed.len()
    }
}

/// Lays out the bands of a dial showing `value` (clamped to `max`).
///
/// The last revolution always spans a full 60 units of angle even when `max` is
/// not a multiple of 60; the value clamp is what keeps the thumb in range.
pub fn compute_ring_segments(
    value: u32,
    max: u32,
    ring: &RingGeometry,
    palette_len: usize,
) -> RingSegments {
    let value = value.min(max.max(1));
    let last_color = palette_len.max(1) - 1;

    let completed_revolutions = (value / UNITS_PER_REVOLUTION) as usize;
    let remainder = value % UNITS_PER_REVOLUTION;
    let partial_sweep = remainder as f64 * DEGREES_PER_UNIT;

    let completed = (0..completed_revolutions)
        .map(|i| Band {
            arc: Arc::from_top(ring.center, ring.radius, 360.0),
            color_index: i.min(last_color),
        })
        .collect();

    let current = Band {
        arc: Arc::from_top(ring.center, ring.radius, partial_sweep),
        color_index: completed_revolutions.min(last_color),
    };

    let thumb = geometry::point_on_circle(ring.center, ring.radius, TOP_DEGREES + partial_sweep);

    RingSegments {
        completed,
        current,
        thumb,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;
    const PALETTE: usize = 5;

    fn ring() -> RingGeometry {
        RingGeometry::new(Point::new(200.0, 200.0), 150.0, 20.0)
    }

    #[test]
    fn test_ring_bands_for_every_value() {
        let ring = ring();
        for value in 0..=300 {
            let segments = compute_ring_segments(value, 300, &ring, PALETTE);
            assert_eq!(segments.completed_revolutions(), (value / 60) as usize);
            assert!(segments.completed.iter().all(|b| b.arc.is_full_circle()));
            let expected = (value % 60) as f64 * 6.0;
            assert!((segments.current.arc.sweep_degrees - expected).abs() < EPS);
            assert_eq!(segments.current.arc.start_degrees, TOP_DEGREES);
        }
    }

    #[test]
    fn test_zero_value_is_degenerate() {
        let ring = ring();
        let segments = compute_ring_segments(0, 300, &ring, PALETTE);

        assert!(segments.completed.is_empty());
        assert!(segments.current.arc.is_empty());
        assert_eq!(segments.current.color_index, 0);
        assert!((segments.thumb.x - 200.0).abs() < EPS);
        assert!((segments.thumb.y - 50.0).abs() < EPS);
    }

    #[test]
    fn test_thumb_follows_remainder() {
        let ring = ring();
        // 15 minutes past the hour: three o'clock
        let segments = compute_ring_segments(75, 300, &ring, PALETTE);
        assert!((segments.thumb.x - 350.0).abs() < 1e-6);
        assert!((segments.thumb.y - 200.0).abs() < 1e-6);
        assert_eq!(segments.current.color_index, 1);
    }

    #[test]
    fn test_color_index_clamped_to_palette() {
        let ring = ring();
        let segments = compute_ring_segments(410, 600, &ring, PALETTE);

        let indices: Vec<_> = segments.completed.iter().map(|b| b.color_index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 4]);
        assert_eq!(segments.current.color_index, 4);

        let empty_palette = compute_ring_segments(130, 300, &ring, 0);
        assert_eq!(empty_palette.current.color_index, 0);
    }

    #[test]
    fn test_value_above_max_is_clamped() {
        let ring = ring();
        let segments = compute_ring_segments(999, 90, &ring, PALETTE);
        assert_eq!(segments.completed_revolutions(), 1);
        assert!((segments.current.arc.sweep_degrees - 180.0).abs() < EPS);
    }

    #[test]
    fn test_progress_sweep_tracks_fraction() {
        let ring = ring();
        for fraction in [0.0, 0.1, 0.25, 0.5, 0.999, 1.0] {
            let arc = compute_progress_arc(fraction, &ring);
            assert!((arc.sweep_degrees() - 360.0 * fraction).abs() < EPS);
            assert_eq!(arc.sector.sweep_degrees, arc.stroke.sweep_degrees);
            assert_eq!(arc.stroke.start_degrees, TOP_DEGREES);
        }
    }

    #[test]
    fn test_progress_fraction_is_clamped() {
        let ring = ring();
        assert_eq!(compute_progress_arc(-0.5, &ring).sweep_degrees(), 0.0);
        assert_eq!(compute_progress_arc(3.0, &ring).sweep_degrees(), 360.0);
        assert_eq!(compute_progress_arc(f64::NAN, &ring).sweep_degrees(), 0.0);
    }

    #[test]
    fn test_sector_is_inset_by_half_stroke() {
        let arc = compute_progress_arc(0.4, &ring());
        assert_eq!(arc.stroke.radius, 150.0);
        assert_eq!(arc.sector.radius, 140.0);
    }

    #[test]
    fn test_zero_radius_draws_nothing() {
        let ring = RingGeometry::new(Point::default(), -5.0, 20.0);
        let arc = compute_progress_arc(0.5, &ring);
        assert!(arc.stroke.is_empty());
        assert!(arc.sector.is_empty());

        let segments = compute_ring_segments(90, 300, &ring, PALETTE);
        assert!(segments.current.arc.is_empty());
        assert_eq!(segments.thumb, Point::default());
    }

    #[test]
    fn test_arc_radians() {
        let arc = compute_progress_arc(0.5, &ring()).stroke;
        assert!((arc.start_radians() + std::f64::consts::FRAC_PI_2).abs() < EPS);
        assert!((arc.end_radians() - std::f64::consts::FRAC_PI_2).abs() < EPS);
    }
}
