//! Terminal driver: plays the boot sequence in the console

use anyhow::Result;
use std::io::Write;
use std::time::Duration;
use tokio::time::{interval, Instant, MissedTickBehavior};

use super::{BootConfig, BootLoader, BootSnapshot, BootStage, SilentAudio};

/// Frames per second of the driver loop
const FPS: f64 = 60.0;

/// Fastest accepted playback multiplier
pub const MAX_SPEED: f64 = 1000.0;

/// Run the boot sequence until done or Ctrl+C
///
/// `speed` scales wall-clock time; 2.0 plays twice as fast. It must lie in
/// `(0, MAX_SPEED]`.
pub async fn run(config: BootConfig, speed: f64) -> Result<()> {
    if !(speed.is_finite() && speed > 0.0 && speed <= MAX_SPEED) {
        anyhow::bail!("Boot speed must be above 0 and at most {}, got {}", MAX_SPEED, speed);
    }

    let mut boot = BootLoader::new(config, SilentAudio);
    let started = Instant::now();
    let now = || started.elapsed().mul_f64(speed);

    println!("[{}] double-click dont be shy", boot.config().icon_label);
    let first = now();
    boot.click(first);
    let opened = boot.click(first + boot.config().double_click_window() / 2);
    if !opened {
        boot.open();
    }
    tracing::debug!("Double click delivered, system open: {}", opened);

    let period = Duration::from_secs_f64(1.0 / (FPS * speed)).max(Duration::from_micros(1));
    let mut frames = interval(period);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut stdout = std::io::stdout();
    let mut last_stage = boot.stage();

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = frames.tick() => {
                let stage = boot.tick(now());
                let line = render_line(&boot.snapshot());
                write!(stdout, "\r{:<48}", line)?;
                stdout.flush()?;

                if stage != last_stage {
                    tracing::debug!("Boot stage: {:?} -> {:?}", last_stage, stage);
                    last_stage = stage;
                }
                if stage == BootStage::Done {
                    break;
                }
            }
            _ = &mut ctrl_c => {
                boot.shutdown();
                println!();
                tracing::info!("Boot sequence cancelled");
                return Ok(());
            }
        }
    }

    boot.shutdown();
    println!();
    println!("Welcome.");
    Ok(())
}

/// One console line for the current state
pub fn render_line(snapshot: &BootSnapshot) -> String {
    match snapshot.stage {
        BootStage::Idle => "[icon] | Desktop".to_string(),
        BootStage::Loading => {
            let filled = snapshot.filled_segments as usize;
            let empty = snapshot.segments.saturating_sub(snapshot.filled_segments) as usize;
            format!(
                "SYSTEM  LOADING [{}{}] {:>3}%",
                "#".repeat(filled),
                " ".repeat(empty),
                (snapshot.progress * 100.0).round() as u32
            )
        }
        BootStage::Dove => {
            let width = (snapshot.dove_opacity * 10.0).round() as usize;
            format!("~ dove ~ [{:<10}]", "*".repeat(width.min(10)))
        }
        BootStage::Exiting => "...".to_string(),
        BootStage::Done => "done".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_loading_bar() {
        let mut boot = BootLoader::new(BootConfig::default(), SilentAudio);
        boot.open();
        for i in 0..165 {
            boot.tick(Duration::from_millis(i * 16));
        }
        let line = render_line(&boot.snapshot());
        assert!(line.starts_with("SYSTEM  LOADING [#####"), "{}", line);
        assert!(line.ends_with("%"));
    }

    #[test]
    fn test_render_idle() {
        let boot = BootLoader::new(BootConfig::default(), SilentAudio);
        assert_eq!(render_line(&boot.snapshot()), "[icon] | Desktop");
    }

    #[tokio::test]
    async fn test_run_completes_quickly_when_sped_up() {
        let config = BootConfig {
            bar_seconds: 0.1,
            switch_seconds: 0.1,
            total_seconds: 0.2,
            exit_ms: 10,
            ..BootConfig::default()
        };
        run(config, 4.0).await.unwrap();
    }

    #[tokio::test]
    async fn test_run_rejects_out_of_range_speed() {
        for speed in [0.0, -1.0, f64::NAN, f64::INFINITY, 1e12] {
            assert!(run(BootConfig::default(), speed).await.is_err(), "{}", speed);
        }
    }

    #[tokio::test]
    async fn test_run_at_max_speed() {
        let config = BootConfig {
            total_seconds: 1.0,
            bar_seconds: 0.5,
            switch_seconds: 0.6,
            exit_ms: 10,
            ..BootConfig::default()
        };
        run(config, MAX_SPEED).await.unwrap();
    }
}
