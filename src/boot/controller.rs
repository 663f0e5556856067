//! Boot overlay state machine
//!
//! The controller owns every timer and the audio handle. Drivers feed it
//! clicks and call [`BootLoader::tick`] once per frame with a monotonic
//! timestamp; nothing here reads the clock on its own.

use serde::Serialize;
use std::time::Duration;

use super::audio::AudioSource;
use super::config::BootConfig;

/// Seconds added per frame when the audio position is unknown
pub const FRAME_STEP: f64 = 1.0 / 60.0;

/// Visual content of the open system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Desktop,
    Dove,
}

/// Where the overlay is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BootStage {
    /// Desktop with the clickable icon
    Idle,
    /// System window open, progress bar filling
    Loading,
    /// Full-screen completion image
    Dove,
    /// Overlay fading out
    Exiting,
    /// Overlay gone, page content visible
    Done,
}

/// Serializable view of the controller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BootSnapshot {
    pub stage: BootStage,
    pub phase: Phase,
    pub elapsed: f64,
    pub progress: f64,
    pub filled_segments: u32,
    pub segments: u32,
    pub dove_opacity: f64,
    pub dove_scale: f64,
    pub selected: bool,
    pub system_open: bool,
    pub taskbar_label: &'static str,
    pub content_visible: bool,
}

/// The boot overlay controller
pub struct BootLoader<A: AudioSource> {
    config: BootConfig,
    audio: Option<A>,

    system_open: bool,
    started: bool,
    exiting: bool,
    done: bool,
    shut_down: bool,

    /// Seconds into the animation
    elapsed: f64,

    frame_scheduled: bool,
    exit_at: Option<Duration>,

    selected: bool,
    select_clear_at: Option<Duration>,
    last_click: Option<Duration>,
}

impl<A: AudioSource> BootLoader<A> {
    pub fn new(config: BootConfig, audio: A) -> Self {
        Self {
            config,
            audio: Some(audio),
            system_open: false,
            started: false,
            exiting: false,
            done: false,
            shut_down: false,
            elapsed: 0.0,
            frame_scheduled: false,
            exit_at: None,
            selected: false,
            select_clear_at: None,
            last_click: None,
        }
    }

    pub fn config(&self) -> &BootConfig {
        &self.config
    }

    /// The audio handle, until shutdown releases it
    pub fn audio(&self) -> Option<&A> {
        self.audio.as_ref()
    }

    /// Click on the desktop icon; returns true if this click opened the system
    pub fn click(&mut self, now: Duration) -> bool {
        if self.shut_down {
            return false;
        }
        let previous = self.last_click.replace(now);

        self.selected = true;
        self.select_clear_at = Some(now + self.config.select_clear_delay());

        let is_double = previous
            .and_then(|prev| now.checked_sub(prev))
            .map(|delta| !delta.is_zero() && delta < self.config.double_click_window())
            .unwrap_or(false);

        if is_double && !self.system_open {
            return self.open();
        }
        false
    }

    /// Mouse press on the desktop; anywhere but the icon clears the selection
    pub fn desktop_mouse_down(&mut self, on_icon: bool) {
        if !self.shut_down && !on_icon {
            self.selected = false;
        }
    }

    /// Open the system window and start the animation
    ///
    /// Returns false once the overlay is done or shut down.
    pub fn open(&mut self) -> bool {
        if self.done || self.shut_down {
            return false;
        }
        self.system_open = true;
        self.start();
        true
    }

    fn start(&mut self) {
        if self.started {
            if let Some(audio) = self.audio.as_mut().filter(|a| a.is_paused()) {
                if let Err(e) = audio.play() {
                    tracing::debug!("Boot audio resume failed: {}", e);
                }
            }
            return;
        }

        self.started = true;

        if let Some(audio) = self.audio.as_mut() {
            audio.set_volume(self.config.volume);
            if let Err(e) = audio.play() {
                tracing::debug!("Boot audio unavailable, using frame clock: {}", e);
            }
        }

        self.frame_scheduled = true;
    }

    /// Run every timer that is due at `now` and return the resulting stage
    pub fn tick(&mut self, now: Duration) -> BootStage {
        if self.select_clear_at.is_some_and(|at| now >= at) {
            self.selected = false;
            self.select_clear_at = None;
        }

        if self.frame_scheduled {
            self.frame(now);
        }

        if self.exit_at.is_some_and(|at| now >= at) {
            self.exit_at = None;
            self.done = true;
            tracing::debug!("Boot overlay done");
        }

        self.stage()
    }

    fn frame(&mut self, now: Duration) {
        let position = self
            .audio
            .as_ref()
            .and_then(|a| a.position())
            .filter(|p| p.is_finite() && *p > 0.0);

        let next = position.unwrap_or(self.elapsed + FRAME_STEP);
        let clamped = next.min(self.config.total_seconds);
        self.elapsed = clamped;

        if clamped >= self.config.total_seconds {
            self.finish(now);
        }
    }

    fn finish(&mut self, now: Duration) {
        self.exiting = true;
        self.frame_scheduled = false;
        self.exit_at = Some(now + self.config.exit_delay());
    }

    /// Cancel every pending timer and release the audio
    pub fn shutdown(&mut self) {
        self.shut_down = true;
        self.frame_scheduled = false;
        self.exit_at = None;
        self.select_clear_at = None;

        if let Some(mut audio) = self.audio.take() {
            audio.stop();
        }
    }

    /// Whether a frame, exit or selection timer is still scheduled
    pub fn has_pending_timers(&self) -> bool {
        self.frame_scheduled || self.exit_at.is_some() || self.select_clear_at.is_some()
    }

    pub fn stage(&self) -> BootStage {
        if self.done {
            BootStage::Done
        } else if self.exiting {
            BootStage::Exiting
        } else if !self.system_open {
            BootStage::Idle
        } else {
            match self.phase() {
                Phase::Desktop => BootStage::Loading,
                Phase::Dove => BootStage::Dove,
            }
        }
    }

    pub fn phase(&self) -> Phase {
        if self.elapsed >= self.config.switch_seconds {
            Phase::Dove
        } else {
            Phase::Desktop
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Fill fraction of the progress bar, always within [0, 1]
    pub fn progress(&self) -> f64 {
        if !self.system_open {
            return 0.0;
        }
        if self.phase() != Phase::Desktop {
            return 1.0;
        }
        if self.config.bar_seconds <= 0.0 {
            return 1.0;
        }
        clamp_unit(self.elapsed / self.config.bar_seconds)
    }

    pub fn filled_segments(&self) -> u32 {
        let segments = self.config.segments;
        let filled = (self.progress() * f64::from(segments)).floor() as u32;
        filled.min(segments)
    }

    pub fn dove_opacity(&self) -> f64 {
        if self.phase() != Phase::Dove {
            return 0.0;
        }

        let BootConfig {
            switch_seconds,
            total_seconds,
            fade_in_seconds,
            fade_out_seconds,
            ..
        } = self.config;

        if self.elapsed < switch_seconds + fade_in_seconds {
            return ramp(self.elapsed - switch_seconds, fade_in_seconds);
        }
        if self.elapsed > total_seconds - fade_out_seconds {
            return ramp(total_seconds - self.elapsed, fade_out_seconds);
        }
        1.0
    }

    pub fn dove_scale(&self) -> f64 {
        0.98 + self.dove_opacity() * 0.02
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_system_open(&self) -> bool {
        self.system_open
    }

    /// Page content is shown only once the overlay is done
    pub fn content_visible(&self) -> bool {
        self.done
    }

    pub fn scroll_locked(&self) -> bool {
        self.config.lock_scroll && !self.done && !self.shut_down
    }

    pub fn taskbar_label(&self) -> &'static str {
        if self.system_open {
            "SYSTEM"
        } else {
            "Desktop"
        }
    }

    pub fn snapshot(&self) -> BootSnapshot {
        BootSnapshot {
            stage: self.stage(),
            phase: self.phase(),
            elapsed: self.elapsed,
            progress: self.progress(),
            filled_segments: self.filled_segments(),
            segments: self.config.segments,
            dove_opacity: self.dove_opacity(),
            dove_scale: self.dove_scale(),
            selected: self.selected,
            system_open: self.system_open,
            taskbar_label: self.taskbar_label(),
            content_visible: self.content_visible(),
        }
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Linear ramp of `value` over `window`, clamped to [0, 1]
fn ramp(value: f64, window: f64) -> f64 {
    if window <= 0.0 {
        return if value >= 0.0 { 1.0 } else { 0.0 };
    }
    clamp_unit(value / window)
}
