//! Interactive viewer: state machine, scene rendering, controls overlay

mod panel;
mod state;
mod view;

pub use panel::{over_ui, Panel};
pub use state::ViewerState;
pub use view::{draw_scene, handle_input};
