use crate::theme::{self, REVOLUTION_BANDS, THUMB, Theme};
use gtk::gdk;
use gtk4 as gtk;
use palette::{Srgb, Srgba, WithAlpha};

pub struct ThemeColors {
    pub ring: Srgba<f64>,
    pub progress: Srgba<f64>,
    pub sector: Srgba<f64>,
    pub dial_track: Srgba<f64>,
    pub bands: Vec<Srgba<f64>>,
    pub thumb: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_theme(theme: Theme) -> Self {
        let palette = theme.palette();
        Self {
            ring: Self::rgba(palette.text, 0.4),
            progress: Self::rgba(palette.accent, 1.0),
            sector: Self::rgba(palette.tertiary, 0.8),
            dial_track: Self::rgba(palette.secondary, 1.0),
            bands: REVOLUTION_BANDS
                .iter()
                .map(|&c| Self::rgba(c, 1.0))
                .collect(),
            thumb: Self::rgba(THUMB, 1.0),
        }
    }

    fn rgba(color: Srgb<u8>, alpha: f64) -> Srgba<f64> {
        color.into_format::<f64>().with_alpha(alpha)
    }
}

pub fn set_source(cr: &cairo::Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

/// Application stylesheet; reloading it in place restyles every open widget.
pub struct ThemeCss {
    provider: gtk::CssProvider,
}

impl ThemeCss {
    pub fn install(theme: Theme) -> Self {
        let provider = gtk::CssProvider::new();

        if let Some(display) = gdk::Display::default() {
            gtk::style_context_add_provider_for_display(
                &display,
                &provider,
                gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
            );
        }

        let css = Self { provider };
        css.apply(theme);
        css
    }

    pub fn apply(&self, theme: Theme) {
        self.provider.load_from_data(&stylesheet(theme));
    }
}

pub fn stylesheet(theme: Theme) -> String {
    let p = theme.palette();
    let (primary, secondary, tertiary, accent, text) = (
        theme::to_hex(p.primary),
        theme::to_hex(p.secondary),
        theme::to_hex(p.tertiary),
        theme::to_hex(p.accent),
        theme::to_hex(p.text),
    );
    let on_accent = theme::to_hex(theme::contrast_text(p.accent));

    format!(
        "
.pomodoro-window {{
    background-color: {primary};
    color: {text};
}}
.pomodoro-card {{
    background: {secondary};
    color: {text};
    border-radius: 12px;
    padding: 12px 18px;
}}
.pomodoro-card.selected {{
    background: {tertiary};
}}
.pomodoro-accent {{
    background: {accent};
    color: {on_accent};
}}
.pomodoro-time {{
    font-size: 48px;
    font-weight: bold;
}}
.pomodoro-mode {{
    font-size: 14px;
    letter-spacing: 2px;
}}
.pomodoro-minutes {{
    font-size: 36px;
    font-weight: bold;
}}
"
    )
}
