//! Toolbar, controls overlay and status line
//!
//! The toolbar is always visible so a model can be opened from any state.
//! The controls panel overlays the viewport only while a user model is
//! loaded and the visibility flag is set (space hides it while animating).

use macroquad::prelude::*;

use crate::config::{ViewerConfig, SPEED_MAX, SPEED_MIN, SPEED_STEP};
use crate::rasterizer::Color;
use crate::ui::{
    button, caption, color_swatch, MouseState, Rect, Toolbar, UiContext, ACCENT_COLOR,
    FONT_SIZE_CONTENT, FONT_SIZE_HEADER, FONT_SIZE_SMALL, HEADER_COLOR, PANEL_BG, PANEL_BORDER,
    TEXT_COLOR, TEXT_DIM, TRACK_BG,
};

use super::state::ViewerState;

const TOOLBAR_H: f32 = 34.0;
const PANEL_W: f32 = 220.0;
const PANEL_H: f32 = 162.0;
const PANEL_MARGIN: f32 = 12.0;

/// Highlight swatches; the first matches the default config color
const PALETTE: [Color; 6] = [
    Color { r: 255, g: 0, b: 0 },
    Color { r: 255, g: 152, b: 0 },
    Color { r: 255, g: 235, b: 59 },
    Color { r: 76, g: 175, b: 80 },
    Color { r: 33, g: 150, b: 243 },
    Color { r: 171, g: 71, b: 188 },
];

fn toolbar_rect() -> Rect {
    Rect::new(0.0, 0.0, screen_width(), TOOLBAR_H)
}

fn panel_rect() -> Rect {
    Rect::new(
        screen_width() - PANEL_W - PANEL_MARGIN,
        TOOLBAR_H + PANEL_MARGIN,
        PANEL_W,
        PANEL_H,
    )
}

/// True when the pointer is over the toolbar or the visible controls
/// panel; those clicks must not reach the 3D view.
pub fn over_ui(state: &ViewerState, mouse: &MouseState) -> bool {
    if toolbar_rect().contains(mouse.x, mouse.y) {
        return true;
    }
    state.user_model_loaded() && state.panel_visible && panel_rect().contains(mouse.x, mouse.y)
}

/// Overlay UI. Holds the one piece of retained widget state, the active
/// slider drag.
pub struct Panel {
    speed_active: bool,
}

impl Panel {
    pub fn new() -> Self {
        Self { speed_active: false }
    }

    pub fn draw(&mut self, ctx: &mut UiContext, state: &mut ViewerState) {
        draw_toolbar(ctx, state);
        if state.user_model_loaded() && state.panel_visible {
            self.draw_controls(ctx, state);
        }
        if let Some(message) = state.get_status() {
            draw_text(message, 10.0, screen_height() - 10.0, FONT_SIZE_CONTENT, TEXT_COLOR);
        }
    }

    fn draw_controls(&mut self, ctx: &mut UiContext, state: &mut ViewerState) {
        let rect = panel_rect();
        draw_rectangle(rect.x, rect.y, rect.w, rect.h, PANEL_BG);
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, PANEL_BORDER);

        let inner = rect.pad(10.0);
        let mut y = inner.y;

        draw_text("Controls", inner.x, y + 12.0, FONT_SIZE_HEADER, TEXT_COLOR);
        y += 22.0;

        let count = format!("{} selected", state.selection.len());
        draw_text(&count, inner.x, y + 10.0, FONT_SIZE_CONTENT, TEXT_DIM);
        y += 18.0;

        caption("Highlight", inner.x, y + 9.0);
        y += 13.0;
        let mut swatch_x = inner.x;
        for color in PALETTE {
            let swatch = Rect::new(swatch_x, y, 22.0, 22.0);
            if color_swatch(ctx, swatch, color, state.highlight() == color) {
                state.set_highlight(color);
                save_settings(state);
            }
            swatch_x += 26.0;
        }
        y += 30.0;

        caption("Spin speed", inner.x, y + 9.0);
        y += 13.0;
        let track = Rect::new(inner.x, y, inner.w - 44.0, 14.0);
        if self.speed_slider(ctx, track, state) {
            save_settings(state);
        }
        let speed_label = format!("{:.2}", state.rotation_speed);
        draw_text(&speed_label, track.right() + 8.0, y + 11.0, FONT_SIZE_CONTENT, TEXT_DIM);
        y += 24.0;

        let button_w = (inner.w - 6.0) / 2.0;
        if button(ctx, Rect::new(inner.x, y, button_w, 22.0), "Start") {
            state.start_animation();
        }
        if button(ctx, Rect::new(inner.x + button_w + 6.0, y, button_w, 22.0), "Stop") {
            state.stop_animation();
        }
    }

    /// Stepped slider for the rotation speed. Returns true when a drag
    /// ends, which is when the new value is worth persisting.
    fn speed_slider(&mut self, ctx: &mut UiContext, track: Rect, state: &mut ViewerState) -> bool {
        let id = ctx.next_id();
        let hovered = ctx.mouse.inside(&track);
        if hovered {
            ctx.set_hot(id);
        }

        draw_rectangle(track.x, track.y, track.w, track.h, TRACK_BG);
        let t = (state.rotation_speed - SPEED_MIN) / (SPEED_MAX - SPEED_MIN);
        let fill = t.clamp(0.0, 1.0) * track.w;
        draw_rectangle(track.x, track.y, fill, track.h, ACCENT_COLOR);
        draw_rectangle(track.x + fill - 2.0, track.y, 4.0, track.h, WHITE);

        let mut released = false;
        if self.speed_active {
            if ctx.mouse.left_down {
                let rel = ((ctx.mouse.x - track.x) / track.w).clamp(0.0, 1.0);
                let raw = SPEED_MIN + rel * (SPEED_MAX - SPEED_MIN);
                let stepped = (raw / SPEED_STEP).round() * SPEED_STEP;
                state.rotation_speed = stepped.clamp(SPEED_MIN, SPEED_MAX);
            } else {
                self.speed_active = false;
                released = true;
            }
        } else if hovered && ctx.mouse.left_pressed {
            self.speed_active = true;
        }
        released
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

fn draw_toolbar(ctx: &mut UiContext, state: &mut ViewerState) {
    let rect = toolbar_rect();
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, HEADER_COLOR);
    draw_rectangle(rect.x, rect.bottom() - 1.0, rect.w, 1.0, PANEL_BORDER);

    let mut toolbar = Toolbar::new(rect);
    toolbar.label("Meshview");
    if toolbar.text_button(ctx, "Open glTF...") {
        open_model(state);
    }

    let hint = "left click: select   right drag: orbit   wheel: zoom   space: animate";
    let dims = measure_text(hint, None, FONT_SIZE_SMALL as u16, 1.0);
    let hint_x = rect.right() - dims.width - 10.0;
    let hint_y = (rect.y + (rect.h + dims.height) * 0.5).round();
    draw_text(hint, hint_x, hint_y, FONT_SIZE_SMALL, TEXT_DIM);
}

fn save_settings(state: &mut ViewerState) {
    let config = ViewerConfig {
        rotation_speed: state.rotation_speed,
        highlight_color: state.highlight(),
    };
    if let Err(e) = config.save() {
        state.set_status(&format!("Could not save settings: {}", e), 4.0);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn open_model(state: &mut ViewerState) {
    use crate::scene::GltfImporter;

    let Some(path) = rfd::FileDialog::new()
        .add_filter("glTF model", &["gltf", "glb"])
        .pick_file()
    else {
        return; // dialog cancelled, nothing to do
    };

    match GltfImporter::load_from_file(&path) {
        Ok(model) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "model".to_string());
            state.install_model(model);
            state.set_status(&format!("Loaded {}", name), 3.0);
        }
        Err(e) => state.set_status(&format!("Load failed: {}", e), 5.0),
    }
}

#[cfg(target_arch = "wasm32")]
fn open_model(state: &mut ViewerState) {
    state.set_status("Opening files needs the native build", 4.0);
}
