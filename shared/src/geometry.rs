//! Angles for laying segments out on the wheel.
//!
//! Two conventions meet here. Selection math measures degrees clockwise
//! from the pointer at the top. Drawing uses canvas degrees, where 0° points
//! right and angles grow clockwise, so the top of the wheel is -90°.

use crate::constants::LABEL_RADIUS_RATIO;

pub fn segment_angle(count: usize) -> f64 {
    360.0 / count as f64
}

/// Center of segment `index`, clockwise from the pointer.
pub fn segment_center(index: usize, count: usize) -> f64 {
    let angle = segment_angle(count);
    index as f64 * angle + angle / 2.0
}

/// Rotation in `[0, 360)` that brings segment `index`'s center under the
/// pointer.
pub fn target_angle(index: usize, count: usize) -> f64 {
    (360.0 - segment_center(index, count)).rem_euclid(360.0)
}

/// Start and end of segment `index` in canvas degrees.
pub fn segment_bounds(index: usize, count: usize) -> (f64, f64) {
    let angle = segment_angle(count);
    (index as f64 * angle - 90.0, (index + 1) as f64 * angle - 90.0)
}

pub fn label_font_size(count: usize) -> f64 {
    match count {
        0..=8 => 14.0,
        9..=12 => 12.0,
        _ => 10.0,
    }
}

/// Where and how a segment label is drawn, relative to the wheel center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelLayout {
    pub x: f64,
    pub y: f64,
    /// Text rotation in canvas degrees.
    pub rotation: f64,
    pub font_size: f64,
}

pub fn label_layout(index: usize, count: usize, radius: f64) -> LabelLayout {
    let (start, end) = segment_bounds(index, count);
    let bisector = (start + end) / 2.0;
    let distance = radius * LABEL_RADIUS_RATIO;
    let radians = bisector.to_radians();

    // Flip text on the left half so it never reads upside down.
    let normalized = bisector.rem_euclid(360.0);
    let rotation = if normalized > 90.0 && normalized < 270.0 {
        bisector + 180.0
    } else {
        bisector
    };

    LabelLayout {
        x: distance * radians.cos(),
        y: distance * radians.sin(),
        rotation,
        font_size: label_font_size(count),
    }
}
