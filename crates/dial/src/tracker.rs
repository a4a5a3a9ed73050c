use crate::geometry::{self, DialGeometry, Point};
use crate::{DEGREES_PER_UNIT, UNITS_PER_REVOLUTION};

/// How far (in pointer units) from the ring a pointer-down may land and still grab the dial.
pub const DEFAULT_HIT_TOLERANCE: f64 = 50.0;

// absorbs atan2 noise so a drag of exactly n units never floors to n - 1
const UNIT_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    Dragging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DialAction {
    pub handled: bool,
    pub should_redraw: bool,
    pub changed: Option<u32>,
}

impl DialAction {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            ..Self::default()
        }
    }

    pub fn redraw() -> Self {
        Self {
            handled: true,
            should_redraw: true,
            changed: None,
        }
    }

    fn value_changed(value: u32) -> Self {
        Self {
            handled: true,
            should_redraw: true,
            changed: Some(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    previous_angle: f64,
    accumulated_angle: f64,
    revolution: u32,
}

impl Drag {
    fn start(value: u32, angle: f64) -> Self {
        Self {
            previous_angle: angle,
            accumulated_angle: (value % UNITS_PER_REVOLUTION) as f64 * DEGREES_PER_UNIT,
            revolution: value / UNITS_PER_REVOLUTION,
        }
    }

    fn rotate(&mut self, delta: f64, max_revolutions: u32) {
        self.accumulated_angle += delta;

        // revolution and angle move together so the pair never describes a skipped turn
        if self.accumulated_angle >= 360.0 {
            self.revolution += 1;
            self.accumulated_angle -= 360.0;
        } else if self.accumulated_angle < 0.0 {
            if self.revolution > 0 {
                self.revolution -= 1;
                self.accumulated_angle += 360.0;
            } else {
                self.accumulated_angle = 0.0;
            }
        }

        if self.revolution >= max_revolutions {
            self.revolution = max_revolutions - 1;
            self.accumulated_angle = 360.0;
        }
    }

    fn units(&self) -> u32 {
        let partial = (self.accumulated_angle / 360.0 * UNITS_PER_REVOLUTION as f64 + UNIT_EPSILON)
            .floor()
            .max(0.0) as u32;
        self.revolution * UNITS_PER_REVOLUTION + partial
    }
}

/// Turns pointer motion around a ring into a bounded value spanning several revolutions.
///
/// The value is driven by the direction of rotation rather than the absolute touch
/// position: every pointer-down re-derives the in-revolution angle from the current
/// value, so lifting and touching elsewhere never makes the value jump.
#[derive(Debug, Clone)]
pub struct AngleTracker {
    geometry: DialGeometry,
    max: u32,
    value: u32,
    hit_tolerance: f64,
    drag: Option<Drag>,
}

impl AngleTracker {
    pub fn new(max: u32, value: u32) -> Self {
        let max = max.max(1);
        Self {
            geometry: DialGeometry::default(),
            max,
            value: value.min(max),
            hit_tolerance: DEFAULT_HIT_TOLERANCE,
            drag: None,
        }
    }

    pub fn set_hit_tolerance(&mut self, tolerance: f64) {
        self.hit_tolerance = tolerance.max(0.0);
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn geometry(&self) -> DialGeometry {
        self.geometry
    }

    pub fn state(&self) -> GestureState {
        match self.drag {
            Some(_) => GestureState::Dragging,
            None => GestureState::Idle,
        }
    }

    pub fn revolutions_for_max(&self) -> u32 {
        self.max.div_ceil(UNITS_PER_REVOLUTION)
    }

    pub fn set_geometry(&mut self, geometry: DialGeometry) -> DialAction {
        self.geometry = geometry;
        DialAction::redraw()
    }

    pub fn set_max(&mut self, max: u32) -> DialAction {
        self.max = max.max(1);
        let clamped = self.value.min(self.max);
        if clamped != self.value {
            self.value = clamped;
            return DialAction::value_changed(clamped);
        }
        DialAction::redraw()
    }

    pub fn set_value(&mut self, value: u32) -> DialAction {
        let value = value.min(self.max);
        if value == self.value {
            return DialAction::handled();
        }
        self.value = value;
        DialAction::value_changed(value)
    }

    pub fn pointer_down(&mut self, point: Point) -> DialAction {
        if self.drag.is_some() {
            log::debug!("Pointer-down at {point} while already dragging, ignoring");
            return DialAction::handled();
        }

        if self.geometry.ring_distance(point) > self.hit_tolerance {
            return DialAction::ignored();
        }

        let angle = geometry::dial_angle(self.geometry.center, point);
        self.drag = Some(Drag::start(self.value, angle));
        log::trace!("Dial grabbed at {angle:.1} deg with value {}", self.value);
        DialAction::handled()
    }

    pub fn pointer_move(&mut self, point: Point) -> DialAction {
        let max_revolutions = self.revolutions_for_max();
        let Some(drag) = self.drag.as_mut() else {
            return DialAction::ignored();
        };

        let angle = geometry::dial_angle(self.geometry.center, point);
        drag.rotate(
            geometry::signed_delta(drag.previous_angle, angle),
            max_revolutions,
        );
        drag.previous_angle = angle;

        let value = drag.units().min(self.max);
        if value == self.value {
            return DialAction::handled();
        }
        self.value = value;
        DialAction::value_changed(value)
    }

    pub fn pointer_up(&mut self) -> DialAction {
        match self.drag.take() {
            Some(_) => {
                log::trace!("Dial released at value {}", self.value);
                DialAction::handled()
            }
            None => DialAction::ignored(),
        }
    }
}
