//! Color definitions for cell meta-states

use crate::world::MetaState;

/// RGBA color (0.0 to 1.0 per channel)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// 8-bit channels for surfaces without float color
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        (channel(self.r), channel(self.g), channel(self.b))
    }
}

/// Background shown through dead cells
pub const BACKGROUND: Color = Color::new(0.05, 0.05, 0.08, 1.0);

/// Paint color for an alive cell
pub fn meta_color(meta: MetaState) -> Color {
    match meta {
        MetaState::JustBorn => Color::new(0.35, 0.9, 0.4, 1.0),    // Green
        MetaState::LongLived => Color::new(0.3, 0.55, 0.95, 1.0),  // Blue
        MetaState::WillDie => Color::new(0.9, 0.25, 0.2, 1.0),     // Red
        MetaState::ShortLived => Color::new(0.95, 0.7, 0.2, 1.0),  // Amber
    }
}
