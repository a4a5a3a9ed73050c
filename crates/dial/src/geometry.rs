use derive_more::Display;

#[derive(Debug, Clone, Copy, PartialEq, Default, Display)]
#[display("({x:.1}, {y:.1})")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DialGeometry {
    pub center: Point,
    pub radius: f64,
}

impl DialGeometry {
    pub fn new(center: Point, radius: f64) -> Self {
        if radius <= 0.0 {
            log::warn!("Degenerate dial radius {radius}, treating as zero");
        }
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    /// Largest ring that fits a `width` x `height` area, leaving `inset` on every side.
    pub fn fit(width: f64, height: f64, inset: f64) -> Self {
        let center = Point::new(width / 2.0, height / 2.0);
        Self::new(center, width.min(height) / 2.0 - inset)
    }

    pub fn ring_distance(&self, point: Point) -> f64 {
        (self.center.distance_to(point) - self.radius).abs()
    }
}

pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Shortest signed rotation from `from` to `to`, in `(-180, 180]`.
///
/// Crossing the 0/360 seam yields a small step rather than a near-full turn, so
/// the sign follows the direction of travel.
pub fn signed_delta(from: f64, to: f64) -> f64 {
    let delta = (to - from).rem_euclid(360.0);
    if delta > 180.0 { delta - 360.0 } else { delta }
}

/// Angle of `point` around `center`: 0 at twelve o'clock, increasing clockwise, in `[0, 360)`.
///
/// Screen coordinates grow downwards, so plain `atan2` already runs clockwise; the
/// quarter turn moves its zero from three o'clock to the top.
pub fn dial_angle(center: Point, point: Point) -> f64 {
    let (dx, dy) = (point.x - center.x, point.y - center.y);
    normalize_degrees(dy.atan2(dx).to_degrees() + 90.0)
}

/// Point at `screen_degrees` on a circle, where 0 is three o'clock and -90 is the top.
pub fn point_on_circle(center: Point, radius: f64, screen_degrees: f64) -> Point {
    let angle = screen_degrees.to_radians();
    Point::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

pub fn dial_to_screen(dial_degrees: f64) -> f64 {
    dial_degrees - 90.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_normalize_degrees() {
        let cases = vec![
            (0.0, 0.0),
            (360.0, 0.0),
            (-90.0, 270.0),
            (725.0, 5.0),
            (-1e-18, 0.0),
        ];

        for (input, expected) in cases {
            let got = normalize_degrees(input);
            assert!((got - expected).abs() < EPS, "{input} -> {got}");
            assert!((0.0..360.0).contains(&got));
        }
    }

    #[test]
    fn test_signed_delta_crosses_seam() {
        assert!((signed_delta(350.0, 10.0) - 20.0).abs() < EPS);
        assert!((signed_delta(10.0, 350.0) + 20.0).abs() < EPS);
        assert!((signed_delta(0.0, 180.0) - 180.0).abs() < EPS);
        assert!((signed_delta(180.0, 0.0) - 180.0).abs() < EPS);
        assert_eq!(signed_delta(42.0, 42.0), 0.0);
    }

    #[test]
    fn test_dial_angle_cardinals() {
        let c = Point::new(100.0, 100.0);
        let cases = vec![
            (Point::new(100.0, 0.0), 0.0),
            (Point::new(200.0, 100.0), 90.0),
            (Point::new(100.0, 200.0), 180.0),
            (Point::new(0.0, 100.0), 270.0),
        ];

        for (p, expected) in cases {
            assert!((dial_angle(c, p) - expected).abs() < EPS, "{p}");
        }
    }

    #[test]
    fn test_point_on_circle_matches_dial_angle() {
        let c = Point::new(50.0, 80.0);
        for dial in [0.0, 33.0, 90.0, 181.5, 359.0] {
            let p = point_on_circle(c, 40.0, dial_to_screen(dial));
            assert!((c.distance_to(p) - 40.0).abs() < 1e-6);
            assert!((dial_angle(c, p) - dial).abs() < 1e-6);
        }
    }

    #[test]
    fn test_fit_and_degenerate_radius() {
        let g = DialGeometry::fit(300.0, 200.0, 30.0);
        assert_eq!(g.center, Point::new(150.0, 100.0));
        assert_eq!(g.radius, 70.0);

        let tiny = DialGeometry::fit(20.0, 20.0, 30.0);
        assert_eq!(tiny.radius, 0.0);
    }

    #[test]
    fn test_ring_distance() {
        let g = DialGeometry::new(Point::default(), 100.0);
        assert!((g.ring_distance(Point::new(0.0, -100.0))).abs() < EPS);
        assert!((g.ring_distance(Point::new(0.0, -40.0)) - 60.0).abs() < EPS);
        assert!((g.ring_distance(Point::new(130.0, 0.0)) - 30.0).abs() < EPS);
    }
}
