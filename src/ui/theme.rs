//! Shared colors and styling constants

use macroquad::prelude::Color;

/// Dark background color
pub const BG_COLOR: Color = Color::new(0.11, 0.11, 0.13, 1.0);

/// Header/toolbar background
pub const HEADER_COLOR: Color = Color::new(0.15, 0.15, 0.18, 1.0);

/// Controls panel background, slightly translucent over the viewport
pub const PANEL_BG: Color = Color::new(0.13, 0.13, 0.16, 0.94);

/// Panel border
pub const PANEL_BORDER: Color = Color::new(0.31, 0.31, 0.31, 1.0);

/// Slider track background
pub const TRACK_BG: Color = Color::new(0.157, 0.157, 0.176, 1.0);

/// Primary text color
pub const TEXT_COLOR: Color = Color::new(0.8, 0.8, 0.85, 1.0);

/// Dimmed/secondary text
pub const TEXT_DIM: Color = Color::new(0.4, 0.4, 0.45, 1.0);

/// Header/title text size
pub const FONT_SIZE_HEADER: f32 = 14.0;

/// Standard content text size
pub const FONT_SIZE_CONTENT: f32 = 12.0;

/// Small/detail text size
pub const FONT_SIZE_SMALL: f32 = 10.0;
