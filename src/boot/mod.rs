//! Boot overlay: the retro desktop shown before the page content
//!
//! [`BootLoader`] is the state machine. The page template drives the same
//! transitions in the browser from the serialized [`BootConfig`], and
//! [`terminal::run`] drives it in the console.

mod audio;
mod config;
mod controller;
pub mod terminal;

pub use audio::{AudioError, AudioSource, SilentAudio};
pub use config::BootConfig;
pub use controller::{BootLoader, BootSnapshot, BootStage, Phase, FRAME_STEP};
