//! A looping image slideshow with built-in transition effects, rendered with raylib.

pub mod constants;
pub mod effect;
pub mod loader;
pub mod order;
pub mod render;
pub mod slide;
pub mod slideshow;
pub mod state;
pub mod texture_loader;

pub use crate::effect::Effect;
pub use crate::loader::{ImageLoader, LoadError};
pub use crate::slideshow::{Layer, Slideshow};
