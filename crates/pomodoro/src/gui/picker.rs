use super::theme::{ThemeColors, set_source};
use super::{DIAL_INSET, RING_STROKE_WIDTH, THUMB_RADIUS};
use crate::theme::Theme;
use cairo::Context;
use dial::{AngleTracker, DialGeometry, Point, RingGeometry, compute_ring_segments};
use gtk::prelude::*;
use gtk4 as gtk;
use std::cell::{Cell, RefCell};
use std::f64::consts::PI;
use std::rc::Rc;

pub fn attach<F>(
    area: &gtk::DrawingArea,
    tracker: Rc<RefCell<AngleTracker>>,
    theme: Rc<Cell<Theme>>,
    on_change: F,
) where
    F: Fn(u32) + 'static,
{
    {
        let tracker = tracker.clone();
        area.connect_resize(move |area, width, height| {
            let geometry = DialGeometry::fit(width as f64, height as f64, DIAL_INSET);
            tracker.borrow_mut().set_geometry(geometry);
            area.queue_draw();
        });
    }

    {
        let tracker = tracker.clone();
        area.set_draw_func(move |_, cr, _, _| {
            let colors = ThemeColors::from_theme(theme.get());
            if let Err(e) = draw(cr, &tracker.borrow(), &colors) {
                log::error!("Dial drawing error: {}", e);
            }
        });
    }

    let drag = gtk::GestureDrag::new();

    {
        let tracker = tracker.clone();
        drag.connect_drag_begin(move |gesture, x, y| {
            let action = tracker.borrow_mut().pointer_down(Point::new(x, y));
            // touches away from the ring belong to whatever is underneath
            let state = if action.handled {
                gtk::EventSequenceState::Claimed
            } else {
                gtk::EventSequenceState::Denied
            };
            gesture.set_state(state);
        });
    }

    {
        let tracker = tracker.clone();
        let area = area.downgrade();
        drag.connect_drag_update(move |gesture, offset_x, offset_y| {
            let Some((start_x, start_y)) = gesture.start_point() else {
                return;
            };
            let action = tracker
                .borrow_mut()
                .pointer_move(Point::new(start_x + offset_x, start_y + offset_y));

            if let Some(value) = action.changed {
                on_change(value);
            }
            if action.should_redraw
                && let Some(area) = area.upgrade()
            {
                area.queue_draw();
            }
        });
    }

    drag.connect_drag_end(move |_, _, _| {
        tracker.borrow_mut().pointer_up();
    });

    area.add_controller(drag);
}

pub fn draw(cr: &Context, tracker: &AngleTracker, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let ring = RingGeometry::from_dial(tracker.geometry(), RING_STROKE_WIDTH);
    if ring.radius <= 0.0 {
        return Ok(());
    }
    let segments = compute_ring_segments(tracker.value(), tracker.max(), &ring, colors.bands.len());

    cr.set_line_width(ring.stroke_width);

    set_source(cr, colors.dial_track);
    cr.new_path();
    cr.arc(ring.center.x, ring.center.y, ring.radius, 0.0, 2.0 * PI);
    cr.stroke()?;

    for band in segments.completed.iter().chain(std::iter::once(&segments.current)) {
        if band.arc.is_empty() {
            continue;
        }
        set_source(cr, colors.bands[band.color_index]);
        cr.new_path();
        cr.arc(
            band.arc.center.x,
            band.arc.center.y,
            band.arc.radius,
            band.arc.start_radians(),
            band.arc.end_radians(),
        );
        cr.stroke()?;
    }

    set_source(cr, colors.thumb);
    cr.new_path();
    cr.arc(segments.thumb.x, segments.thumb.y, THUMB_RADIUS, 0.0, 2.0 * PI);
    cr.fill()
}
