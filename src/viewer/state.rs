//! Viewer state: scene, selection, animation flags, camera framing
//!
//! Single owner of everything the event handlers mutate: the loaded model,
//! the selection set, the highlight color, the animation flags and the
//! camera. Per-frame updates and input handlers all route through here, so
//! shared render state keeps single-writer semantics.

use std::collections::HashSet;

use crate::config::ViewerConfig;
use crate::rasterizer::{Camera, Color};
use crate::scene::{robot, ClipPlayer, Model, PartId};

/// Color a part returns to when deselected
pub const NEUTRAL_COLOR: Color = Color::WHITE;

/// Camera distance as a multiple of the model's bounding-box diagonal
const FRAMING_DISTANCE: f32 = 1.6;
/// Framing pitch. Negative puts the camera below center looking up, so its
/// height ends up at a fixed negative multiple of the model size.
const FRAMING_ELEVATION: f32 = -0.32;
/// Orbit distance for the built-in robot scene
const ROBOT_DISTANCE: f32 = 6.0;

/// Which scene is mounted. Replacing `Robot` drops its player, which is
/// what stops the built-in clips when a user model takes over.
pub enum ActiveScene {
    Robot { player: ClipPlayer },
    UserModel,
}

/// Orbit parameters the camera is derived from; the target is always the
/// world origin because models are recentered there.
pub struct Orbit {
    pub azimuth: f32,
    pub elevation: f32,
    pub distance: f32,
    min_distance: f32,
    max_distance: f32,
}

impl Orbit {
    pub fn framed(distance: f32) -> Self {
        Self {
            azimuth: 0.0,
            elevation: FRAMING_ELEVATION,
            distance,
            min_distance: distance * 0.15,
            max_distance: distance * 6.0,
        }
    }

    pub fn rotate(&mut self, d_azimuth: f32, d_elevation: f32) {
        self.azimuth += d_azimuth;
        self.elevation = (self.elevation + d_elevation).clamp(-1.4, 1.4);
    }

    pub fn zoom(&mut self, factor: f32) {
        self.distance = (self.distance * factor).clamp(self.min_distance, self.max_distance);
    }

    /// Place the camera on the orbit sphere looking at the origin
    pub fn apply(&self, camera: &mut Camera) {
        camera.rotation_x = self.elevation;
        camera.rotation_y = self.azimuth;
        camera.update_basis();
        camera.position = camera.basis_z * -self.distance;
    }
}

pub struct ViewerState {
    pub model: Model,
    pub scene: ActiveScene,
    pub camera: Camera,
    pub orbit: Orbit,
    /// Selected part ids in click order; toggling a member removes it
    pub selection: Vec<PartId>,
    /// Parts that have ever animated. Insert-only for the model's lifetime.
    started: HashSet<PartId>,
    highlight: Color,
    pub rotation_speed: f32,
    pub animating: bool,
    pub panel_visible: bool,
    /// Right-drag orbit capture, so the drag survives leaving the viewport
    pub orbit_captured: bool,
    pub last_mouse: (f32, f32),
    needs_framing: bool,
    status_message: Option<(String, f64)>,
}

impl ViewerState {
    pub fn new(config: &ViewerConfig) -> Self {
        let orbit = Orbit::framed(ROBOT_DISTANCE);
        let mut camera = Camera::new();
        orbit.apply(&mut camera);
        Self {
            model: robot::build(),
            scene: ActiveScene::Robot {
                player: ClipPlayer::new(robot::clips()),
            },
            camera,
            orbit,
            selection: Vec::new(),
            started: HashSet::new(),
            highlight: config.highlight_color,
            rotation_speed: config.rotation_speed,
            animating: false,
            panel_visible: true,
            orbit_captured: false,
            last_mouse: (0.0, 0.0),
            needs_framing: false,
            status_message: None,
        }
    }

    pub fn user_model_loaded(&self) -> bool {
        matches!(self.scene, ActiveScene::UserModel)
    }

    /// Swap in a user-loaded model. Per-model state (selection, started
    /// markers, framing) resets; highlight color, speed and the visibility
    /// flags survive the swap.
    pub fn install_model(&mut self, model: Model) {
        self.model = model;
        self.scene = ActiveScene::UserModel;
        self.selection.clear();
        self.started.clear();
        self.needs_framing = true;
    }

    /// Per-frame update: one-shot framing, clip playback, selection spin
    pub fn update(&mut self, dt: f32) {
        if self.needs_framing {
            self.frame_model();
            self.needs_framing = false;
        }
        if let ActiveScene::Robot { player } = &mut self.scene {
            player.advance(dt, &mut self.model);
        }
        if self.animating {
            // Radians per frame, not per second: N frames advance by
            // exactly N * rotation_speed.
            for &id in &self.selection {
                if let Some(part) = self.model.parts.get_mut(id) {
                    part.rotation.z += self.rotation_speed;
                }
            }
        }
    }

    /// Recenter the model at the origin and pull the camera back far
    /// enough to frame it.
    fn frame_model(&mut self) {
        let Some(size) = self.model.recenter() else {
            return;
        };
        self.orbit = Orbit::framed((size * FRAMING_DISTANCE).max(1.0));
        self.orbit.apply(&mut self.camera);
    }

    /// Toggle a part in the selection set. Deselecting resets the part to
    /// the neutral color, not the color it was imported with. Clicks on
    /// the built-in robot never select; only user models are editable.
    pub fn toggle_selection(&mut self, id: PartId) {
        if !self.user_model_loaded() {
            return;
        }
        if let Some(pos) = self.selection.iter().position(|&p| p == id) {
            self.selection.remove(pos);
            if let Some(part) = self.model.parts.get_mut(id) {
                part.color = NEUTRAL_COLOR;
            }
        } else {
            self.selection.push(id);
        }
        self.apply_highlight();
    }

    pub fn highlight(&self) -> Color {
        self.highlight
    }

    /// Change the highlight color and re-apply it to every selected part
    pub fn set_highlight(&mut self, color: Color) {
        self.highlight = color;
        self.apply_highlight();
    }

    fn apply_highlight(&mut self) {
        for &id in &self.selection {
            if let Some(part) = self.model.parts.get_mut(id) {
                part.color = self.highlight;
            }
        }
    }

    /// Space bar: flip the animation flag and the panel visibility
    /// together. They start inverse (idle, panel shown) and stay inverse
    /// under space alone.
    pub fn toggle_animation(&mut self) {
        self.animating = !self.animating;
        self.panel_visible = !self.panel_visible;
        if self.animating {
            self.mark_selection_started();
        }
    }

    /// Panel start button; leaves panel visibility alone
    pub fn start_animation(&mut self) {
        if !self.animating {
            self.animating = true;
            self.mark_selection_started();
        }
    }

    /// Panel stop button; freezes rotation wherever it is
    pub fn stop_animation(&mut self) {
        self.animating = false;
    }

    fn mark_selection_started(&mut self) {
        for &id in &self.selection {
            self.started.insert(id);
        }
    }

    /// The outline shell shows only for selected parts that have never
    /// animated; once a part's marker is set the outline is gone for good.
    pub fn outline_visible(&self, id: PartId) -> bool {
        self.selection.contains(&id) && !self.started.contains(&id)
    }

    /// Set a status message that will be displayed for a duration
    pub fn set_status(&mut self, message: &str, duration_secs: f64) {
        let expiry = macroquad::time::get_time() + duration_secs;
        self.status_message = Some((message.to_string(), expiry));
    }

    /// Get current status message if not expired
    pub fn get_status(&self) -> Option<&str> {
        if let Some((msg, expiry)) = &self.status_message {
            if macroquad::time::get_time() < *expiry {
                return Some(msg);
            }
        }
        None
    }
}
