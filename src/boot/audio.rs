//! Audio playback seam for the boot controller

use thiserror::Error;

/// Playback failures; the controller ignores them and uses its synthetic clock
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio playback was refused: {0}")]
    Refused(String),

    #[error("no audio output available")]
    Unavailable,
}

/// Something that plays the boot sound and reports its position
pub trait AudioSource {
    /// Start or resume playback
    fn play(&mut self) -> Result<(), AudioError>;

    fn is_paused(&self) -> bool;

    /// Playback position in seconds, when known
    fn position(&self) -> Option<f64>;

    /// Stop playback and release the underlying handle
    fn stop(&mut self);

    fn set_volume(&mut self, _volume: f32) {}
}

/// Audio that never plays, forcing the frame-counted clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioSource for SilentAudio {
    fn play(&mut self) -> Result<(), AudioError> {
        Err(AudioError::Unavailable)
    }

    fn is_paused(&self) -> bool {
        true
    }

    fn position(&self) -> Option<f64> {
        None
    }

    fn stop(&mut self) {}
}
