//! Colours and geometry for painting the graph.

use egui::{Color32, Pos2, Stroke};
use graphwalk_core::Position;

use crate::settings::SettingsStyle;

/// Background of every panel.
pub const PANEL_COLOR: Color32 = Color32::BLACK;
/// Background of the result line while an algorithm occupies the slot.
pub const RESULT_ACTIVE_COLOR: Color32 = Color32::LIGHT_GRAY;
/// Text colour on the result line.
pub const RESULT_TEXT_COLOR: Color32 = Color32::BLACK;
/// Text colour on the status line.
pub const STATUS_TEXT_COLOR: Color32 = Color32::WHITE;

const VERTEX_COLOR: Color32 = Color32::WHITE;
const VERTEX_SELECTED_COLOR: Color32 = Color32::YELLOW;

pub fn vertex_fill(selected: bool) -> Color32 {
    if selected {
        VERTEX_SELECTED_COLOR
    } else {
        VERTEX_COLOR
    }
}

/// Vertex labels are drawn in the panel colour on top of the disc.
pub fn vertex_label_color() -> Color32 {
    PANEL_COLOR
}

pub fn edge_stroke(selected: bool, style: &SettingsStyle) -> Stroke {
    let color = if selected {
        VERTEX_SELECTED_COLOR
    } else {
        VERTEX_COLOR
    };
    Stroke::new(style.edge_width, color)
}

pub fn weight_label_color() -> Color32 {
    VERTEX_COLOR
}

/// Top-left corner of a connection's weight label, in canvas coordinates.
///
/// The label sits just off the midpoint, on the side away from the line.
pub fn weight_label_anchor(start: Position, end: Position, style: &SettingsStyle) -> Position {
    let mid = start.midpoint(end);
    let del = (style.vertex_diameter / 10.0) as i32;
    let slope = i64::from(end.y - start.y) * i64::from(end.x - start.x);
    if slope < 0 {
        Position::new(mid.x + del, mid.y + del)
    } else {
        Position::new(mid.x - 3 * del, mid.y + del)
    }
}

/// Canvas position to screen position.
pub fn to_screen(origin: Pos2, position: Position) -> Pos2 {
    Pos2::new(origin.x + position.x as f32, origin.y + position.y as f32)
}

/// Screen position to canvas position, rounded to whole pixels.
pub fn to_canvas(origin: Pos2, point: Pos2) -> Position {
    Position::new(
        (point.x - origin.x).round() as i32,
        (point.y - origin.y).round() as i32,
    )
}
