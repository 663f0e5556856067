//! Boot overlay timing configuration (`boot:` in _config.yml)

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timings and assets of the boot overlay
///
/// Serialized as-is into the page so the browser driver uses the same numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootConfig {
    pub audio_src: String,
    pub complete_gif_src: String,

    /// Seconds for the progress bar to fill
    pub bar_seconds: f64,
    /// Seconds at which the desktop phase switches to the dove phase
    pub switch_seconds: f64,
    /// Total animation length in seconds
    pub total_seconds: f64,
    pub segments: u32,

    /// Two clicks closer than this open the system window
    pub double_click_ms: u64,
    /// Icon selection is cleared this long after the last click
    pub select_clear_ms: u64,
    /// Length of the fade-out before the page is shown
    pub exit_ms: u64,

    pub fade_in_seconds: f64,
    pub fade_out_seconds: f64,

    pub volume: f32,
    pub lock_scroll: bool,
    pub mount_children_after_done: bool,
    pub icon_label: String,
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            audio_src: "/assets/boot.mp3".to_string(),
            complete_gif_src: "/assets/loading_complete.gif".to_string(),
            bar_seconds: 5.0,
            switch_seconds: 6.0,
            total_seconds: 15.0,
            segments: 10,
            double_click_ms: 320,
            select_clear_ms: 1600,
            exit_ms: 350,
            fade_in_seconds: 5.0,
            fade_out_seconds: 5.0,
            volume: 0.1,
            lock_scroll: true,
            mount_children_after_done: true,
            icon_label: "noirediego".to_string(),
        }
    }
}

impl BootConfig {
    pub fn double_click_window(&self) -> Duration {
        Duration::from_millis(self.double_click_ms)
    }

    pub fn select_clear_delay(&self) -> Duration {
        Duration::from_millis(self.select_clear_ms)
    }

    pub fn exit_delay(&self) -> Duration {
        Duration::from_millis(self.exit_ms)
    }
}
