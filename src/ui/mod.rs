//! Immediate-mode UI layer
//!
//! Small helpers on top of macroquad's draw calls: a rectangle type,
//! per-frame mouse state, theme constants and a few widgets.
//! Rebuilt each frame, no retained widget tree.

#![allow(dead_code)]

mod input;
mod rect;
mod theme;
mod widgets;

pub use input::*;
pub use rect::*;
pub use theme::*;
pub use widgets::*;
