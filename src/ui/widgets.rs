//! Basic UI widgets

use super::theme::{TEXT_COLOR, TEXT_DIM};
use super::{Rect, UiContext};
use macroquad::prelude::*;

/// Accent color for active controls and slider fills
pub const ACCENT_COLOR: Color = Color::new(0.0, 0.75, 0.9, 1.0);

/// Simple toolbar layout helper
pub struct Toolbar {
    rect: Rect,
    cursor_x: f32,
    spacing: f32,
}

impl Toolbar {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            cursor_x: rect.x + 6.0,
            spacing: 6.0,
        }
    }

    /// Add a label
    pub fn label(&mut self, text: &str) {
        let font_size = 14.0;
        let dims = measure_text(text, None, font_size as u16, 1.0);
        // Round to integer pixels for crisp rendering
        let text_y = (self.rect.y + (self.rect.h + dims.height) * 0.5).round();
        draw_text(text, self.cursor_x.round(), text_y, font_size, TEXT_COLOR);
        self.cursor_x += dims.width + self.spacing;
    }

    /// Add a text button, returns true if clicked
    pub fn text_button(&mut self, ctx: &mut UiContext, label: &str) -> bool {
        let font_size = 14.0;
        let dims = measure_text(label, None, font_size as u16, 1.0);
        let btn_h = (self.rect.h - 6.0).round();
        let btn_rect = Rect::new(
            self.cursor_x.round(),
            (self.rect.y + 3.0).round(),
            (dims.width + 14.0).round(),
            btn_h,
        );
        self.cursor_x += btn_rect.w + self.spacing;
        button(ctx, btn_rect, label)
    }
}

/// Draw a flat text button, returns true if clicked
pub fn button(ctx: &mut UiContext, rect: Rect, label: &str) -> bool {
    let id = ctx.next_id();
    let hovered = ctx.mouse.inside(&rect);
    let pressed = ctx.mouse.clicking(&rect);
    let clicked = ctx.mouse.clicked(&rect);

    if hovered {
        ctx.set_hot(id);
    }

    let bg = if pressed {
        Color::from_rgba(60, 60, 70, 255)
    } else if hovered {
        Color::from_rgba(70, 70, 75, 255)
    } else {
        Color::from_rgba(50, 50, 55, 255)
    };
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, bg);

    let text_color = if hovered { WHITE } else { TEXT_COLOR };
    let font_size = 14.0;
    let dims = measure_text(label, None, font_size as u16, 1.0);
    let text_x = (rect.x + (rect.w - dims.width) * 0.5).round();
    let text_y = (rect.y + (rect.h + dims.height) * 0.5).round();
    draw_text(label, text_x, text_y, font_size, text_color);

    clicked
}

/// Draw a clickable color swatch with a selection border
pub fn color_swatch(ctx: &mut UiContext, rect: Rect, color: crate::rasterizer::Color, selected: bool) -> bool {
    let id = ctx.next_id();
    let hovered = ctx.mouse.inside(&rect);
    let clicked = ctx.mouse.clicked(&rect);

    if hovered {
        ctx.set_hot(id);
    }

    draw_rectangle(rect.x, rect.y, rect.w, rect.h, Color::from_rgba(color.r, color.g, color.b, 255));

    let (border, thickness) = if selected {
        (WHITE, 2.0)
    } else if hovered {
        (Color::from_rgba(160, 160, 160, 255), 1.0)
    } else {
        (Color::from_rgba(80, 80, 80, 255), 1.0)
    };
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, thickness, border);

    clicked
}

/// Dimmed caption text above a control
pub fn caption(text: &str, x: f32, y: f32) {
    draw_text(text, x.round(), y.round(), 11.0, TEXT_DIM);
}
