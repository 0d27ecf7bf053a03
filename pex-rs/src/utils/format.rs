//! Formatting utilities

use glam::Vec2;
use pex_emitter::Color;

/// Format an emitter duration, `-1` meaning the emitter never stops
pub fn format_duration(seconds: f32) -> String {
    if seconds < 0.0 {
        "infinite".to_string()
    } else {
        format!("{seconds:.2}s")
    }
}

/// Format a value with its variance as `value ± variance`
pub fn format_varied(value: f32, variance: f32) -> String {
    if variance == 0.0 {
        format!("{value:.2}")
    } else {
        format!("{value:.2} ± {variance:.2}")
    }
}

/// Format a 2D vector
pub fn format_vec2(v: Vec2) -> String {
    format!("({:.2}, {:.2})", v.x, v.y)
}

/// Format an RGBA color
pub fn format_color(color: Color) -> String {
    format!(
        "rgba({:.2}, {:.2}, {:.2}, {:.2})",
        color.red, color.green, color.blue, color.alpha
    )
}

/// Format a percentage
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

/// Format how full a pool is
pub fn format_occupancy(live: usize, capacity: usize) -> String {
    if capacity == 0 {
        "N/A".to_string()
    } else {
        format_percentage(live as f64 / capacity as f64 * 100.0)
    }
}
