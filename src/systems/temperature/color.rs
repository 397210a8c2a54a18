use crate::core::color::{abgr, blue, green, red};

/// Temperature that maps to the start of the second band
const TEMP_COLOR_SCALE: f64 = 100.0;

/// Temperature -> ABGR colour ramp: blue, cyan, green, yellow, red, magenta.
///
/// `spectrum = clamp(ln(t / 100) / ln(3) + 1, 0, 5)`, one piecewise-linear band
/// per unit of spectrum. Channels are truncated, not rounded.
pub fn color_for(temperature: f64) -> u32 {
    let s = spectrum(temperature);

    let (r, g, b) = if s >= 3.0 {
        if s < 4.0 {
            (255.0, 255.0 * (4.0 - s), 0.0)
        } else {
            (255.0, 0.0, 255.0 * (s - 4.0))
        }
    } else if s < 2.0 {
        if s < 1.0 {
            (0.0, 255.0 * s, 255.0)
        } else {
            (0.0, 255.0, 255.0 * (2.0 - s))
        }
    } else {
        (255.0 * (s - 2.0), 255.0, 0.0)
    };

    abgr(r as u8, g as u8, b as u8)
}

pub(crate) fn spectrum(temperature: f64) -> f64 {
    let s = (temperature / TEMP_COLOR_SCALE).ln() / 3f64.ln() + 1.0;
    if s.is_nan() {
        0.0
    } else {
        s.clamp(0.0, 5.0)
    }
}

/// Darker variant drawn under particles for grid cells
#[inline]
pub fn shaded(color: u32) -> u32 {
    abgr(red(color) / 2, green(color) / 2, blue(color) / 2)
}
