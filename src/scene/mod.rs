//! Model data, glTF import, clips, and the built-in robot scene

#![allow(dead_code)]

pub mod animation;
pub mod import;
pub mod model;
pub mod robot;

pub use animation::ClipPlayer;
pub use import::{GltfImporter, ImportError};
pub use model::{Model, PartId};
