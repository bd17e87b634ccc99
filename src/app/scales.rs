use eframe::egui::Color32;

use crate::data::AcStatus;

/// Fixed chart frame the simulation runs in, in chart pixels. The view
/// maps this frame onto whatever panel space is available.
pub const CHART_WIDTH: f32 = 860.0;
pub const CHART_HEIGHT: f32 = 470.0;

pub const BASE_RADIUS: f32 = 10.0;
pub const FOCUS_RADIUS: f32 = 15.0;

pub const NEUTRAL_FILL: Color32 = Color32::from_rgb(211, 211, 211);

/// Linear map of an indoor temperature onto the chart width.
pub fn temp_x(temp: f32, extent: (f32, f32), width: f32) -> f32 {
    let (min, max) = extent;
    let span = max - min;
    if span <= f32::EPSILON {
        return width * 0.5;
    }
    (temp - min) / span * width
}

/// Fixed per-category offsets, matching the published chart layout.
pub fn status_x(status: AcStatus, width: f32) -> f32 {
    let fraction = match status {
        AcStatus::Broken => 0.2,
        AcStatus::Off => 0.5,
        AcStatus::None => 0.7,
        AcStatus::Unknown => 0.9,
    };
    width * fraction
}

/// Evenly spaced offsets for the distinct years in the dataset.
pub fn year_x(year: u16, years: &[u16], width: f32) -> f32 {
    let Some(position) = years.iter().position(|&candidate| candidate == year) else {
        return width * 0.5;
    };
    width * ((position + 1) as f32 / (years.len() + 1) as f32)
}

pub fn status_color(status: AcStatus) -> Color32 {
    match status {
        AcStatus::Broken => Color32::from_rgb(0x00, 0x7d, 0x8a),
        AcStatus::Off => Color32::from_rgb(0xf2, 0x9e, 0x03),
        AcStatus::None => Color32::from_rgb(0xf8, 0x51, 0x55),
        AcStatus::Unknown => Color32::from_rgb(0x41, 0xb5, 0xc2),
    }
}
