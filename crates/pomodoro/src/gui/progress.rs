use super::theme::{ThemeColors, set_source};
use super::{PROGRESS_INSET, RING_STROKE_WIDTH};
use crate::theme::Theme;
use cairo::Context;
use dial::{Arc, DialGeometry, RingGeometry, compute_progress_arc};
use gtk::prelude::*;
use gtk4 as gtk;
use std::cell::Cell;
use std::f64::consts::PI;
use std::rc::Rc;

/// Renders the passive countdown ring; `fraction` is the elapsed share of the phase.
pub fn attach(area: &gtk::DrawingArea, fraction: Rc<Cell<f64>>, theme: Rc<Cell<Theme>>) {
    area.set_draw_func(move |_, cr, width, height| {
        let dial = DialGeometry::fit(width as f64, height as f64, PROGRESS_INSET);
        let ring = RingGeometry::from_dial(dial, RING_STROKE_WIDTH);
        let colors = ThemeColors::from_theme(theme.get());
        if let Err(e) = draw(cr, &ring, fraction.get(), &colors) {
            log::error!("Progress drawing error: {}", e);
        }
    });
}

pub fn draw(
    cr: &Context,
    ring: &RingGeometry,
    fraction: f64,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    if ring.radius <= 0.0 {
        return Ok(());
    }
    let progress = compute_progress_arc(fraction, ring);

    cr.set_line_width(ring.stroke_width);
    set_source(cr, colors.ring);
    cr.new_path();
    cr.arc(ring.center.x, ring.center.y, ring.radius, 0.0, 2.0 * PI);
    cr.stroke()?;

    if !progress.sector.is_empty() {
        set_source(cr, colors.sector);
        fill_sector(cr, &progress.sector)?;
    }

    if !progress.stroke.is_empty() {
        set_source(cr, colors.progress);
        cr.new_path();
        cr.arc(
            progress.stroke.center.x,
            progress.stroke.center.y,
            progress.stroke.radius,
            progress.stroke.start_radians(),
            progress.stroke.end_radians(),
        );
        cr.stroke()?;
    }
    Ok(())
}

fn fill_sector(cr: &Context, arc: &Arc) -> Result<(), cairo::Error> {
    cr.new_path();
    cr.move_to(arc.center.x, arc.center.y);
    cr.arc(
        arc.center.x,
        arc.center.y,
        arc.radius,
        arc.start_radians(),
        arc.end_radians(),
    );
    cr.close_path();
    cr.fill()
}
