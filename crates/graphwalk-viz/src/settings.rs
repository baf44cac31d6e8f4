//! Settings structures for the visualization UI.

use graphwalk_engine::VisualizerConfig;

/// Sizes used when painting the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsStyle {
    /// Diameter of a vertex disc.
    pub vertex_diameter: f32,
    /// Font size of the label inside a vertex.
    pub vertex_label_size: f32,
    /// Font size of a connection's weight label.
    pub weight_label_size: f32,
    /// Line width of a connection.
    pub edge_width: f32,
    /// Font size of the status and result lines.
    pub status_text_size: f32,
}

impl Default for SettingsStyle {
    fn default() -> Self {
        Self::from_config(&VisualizerConfig::default())
    }
}

impl SettingsStyle {
    /// Derive every size from the configured vertex diameter.
    pub fn from_config(config: &VisualizerConfig) -> Self {
        let d = config.vertex_diameter;
        Self {
            vertex_diameter: d,
            vertex_label_size: d * 0.8,
            weight_label_size: d * 0.4,
            edge_width: d / 10.0,
            status_text_size: 18.0,
        }
    }

    pub fn vertex_radius(&self) -> f32 {
        self.vertex_diameter / 2.0
    }
}
