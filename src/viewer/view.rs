//! Scene rendering and viewport input
//!
//! Draws the model through the software rasterizer and blits the result to
//! the window, then maps mouse input to orbit, zoom and part picking.

use macroquad::prelude::*;

use crate::rasterizer::{
    render_mesh, screen_to_ray, Color, CullMode, Framebuffer, RasterSettings, ShadingMode,
};
use crate::ui::UiContext;

use super::state::ViewerState;

const BACKDROP_TOP: Color = Color { r: 38, g: 41, b: 48 };
const BACKDROP_BOTTOM: Color = Color { r: 21, g: 22, b: 26 };

/// Outline shell drawn behind selected parts
const OUTLINE_COLOR: Color = Color { r: 235, g: 235, b: 240 };
const OUTLINE_SCALE: f32 = 1.05;

const ORBIT_SENSITIVITY: f32 = 0.005;

/// Render the scene into `fb` and blit it across the window
pub fn draw_scene(fb: &mut Framebuffer, state: &ViewerState) {
    let width = (screen_width() as usize).max(1);
    let height = (screen_height() as usize).max(1);
    fb.resize(width, height);
    fb.clear_gradient(BACKDROP_TOP, BACKDROP_BOTTOM);

    // Outline shells draw first, without touching the z-buffer and with
    // front faces culled. The solid pass then covers the shell interior,
    // leaving a rim around each highlighted part.
    let outline_settings = RasterSettings {
        depth_test: false,
        cull: CullMode::Front,
        shading: ShadingMode::Unlit,
        ..RasterSettings::default()
    };
    for (id, part) in state.model.parts.iter().enumerate() {
        if !state.outline_visible(id) {
            continue;
        }
        let shell = part.world_vertices_scaled(state.model.offset, OUTLINE_SCALE);
        render_mesh(fb, &shell, &part.faces, OUTLINE_COLOR, &state.camera, &outline_settings);
    }

    let solid_settings = RasterSettings::default();
    for part in &state.model.parts {
        let world = part.world_vertices(state.model.offset);
        render_mesh(fb, &world, &part.faces, part.color, &state.camera, &solid_settings);
    }

    let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.pixels);
    texture.set_filter(FilterMode::Nearest);
    draw_texture_ex(
        &texture,
        0.0,
        0.0,
        WHITE,
        DrawTextureParams {
            dest_size: Some(vec2(screen_width(), screen_height())),
            ..Default::default()
        },
    );
}

/// Orbit, zoom and click picking. `over_ui` keeps toolbar and panel
/// clicks from reaching the scene.
pub fn handle_input(state: &mut ViewerState, ctx: &UiContext, over_ui: bool) {
    let mouse = ctx.mouse;

    // Right-drag orbits around the origin
    if mouse.right_down && (!over_ui || state.orbit_captured) {
        if state.orbit_captured {
            let dx = mouse.x - state.last_mouse.0;
            let dy = mouse.y - state.last_mouse.1;
            state.orbit.rotate(dx * ORBIT_SENSITIVITY, dy * ORBIT_SENSITIVITY);
            state.orbit.apply(&mut state.camera);
        }
        state.orbit_captured = true;
        state.last_mouse = (mouse.x, mouse.y);
    } else if !mouse.right_down {
        state.orbit_captured = false;
    }

    if !over_ui && mouse.scroll != 0.0 {
        let zoom_factor = if mouse.scroll > 0.0 { 0.9 } else { 1.1 };
        state.orbit.zoom(zoom_factor);
        state.orbit.apply(&mut state.camera);
    }

    // Left click picks a part; only user models are selectable. Testing the
    // press keeps clicks that started on the panel from reaching the scene.
    if mouse.left_pressed && !over_ui && state.user_model_loaded() {
        let width = (screen_width() as usize).max(1);
        let height = (screen_height() as usize).max(1);
        let ray = screen_to_ray(mouse.x, mouse.y, width, height, &state.camera);
        if let Some(id) = state.model.pick(&ray) {
            state.toggle_selection(id);
        }
    }
}
