//! Meshview: an interactive glTF model viewer
//!
//! Shows a small animated robot until a model is opened, then lets the
//! user orbit, click parts to select them, recolor and spin the selection,
//! and toggle the controls overlay with the space bar. Rendering goes
//! through the crate's own software rasterizer.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
mod rasterizer;
mod scene;
mod ui;
mod viewer;

use macroquad::prelude::*;

use config::ViewerConfig;
use rasterizer::Framebuffer;
use ui::{MouseState, UiContext, BG_COLOR};
use viewer::{draw_scene, handle_input, over_ui, Panel, ViewerState};

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Meshview v{}", VERSION),
        window_width: 1280,
        window_height: 800,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let config = ViewerConfig::load();
    let mut state = ViewerState::new(&config);
    let mut fb = Framebuffer::new(1, 1);
    let mut ctx = UiContext::new();
    let mut panel = Panel::new();

    loop {
        clear_background(BG_COLOR);
        ctx.begin_frame(MouseState::poll());

        if is_key_pressed(KeyCode::Space) {
            state.toggle_animation();
        }

        let blocked = over_ui(&state, &ctx.mouse);
        handle_input(&mut state, &ctx, blocked);
        state.update(get_frame_time());

        draw_scene(&mut fb, &state);
        panel.draw(&mut ctx, &mut state);

        next_frame().await
    }
}
