//! Generate the static page

use anyhow::Result;
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebounceEventResult, DebouncedEvent};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crate::content::ContentLoader;
use crate::generator::Generator;
use crate::server::is_relevant;
use crate::{Bio, CONFIG_FILE};

/// Load content and write public/index.html plus static assets
pub async fn run(bio: &Bio) -> Result<()> {
    let start = Instant::now();

    let loader = ContentLoader::new(bio);
    let content = loader.load_all().await?;

    tracing::info!(
        "Loaded {} socials and {} mini posts",
        content.socials.items.len(),
        content.posts.len()
    );

    let generator = Generator::new(bio)?;
    let output = generator.generate(&content)?;

    let duration = start.elapsed();
    tracing::info!("Generated {:?} in {:.2}s", output, duration.as_secs_f64());

    Ok(())
}

/// Watch for file changes and regenerate
///
/// The config file is read once at startup; restart to pick up config edits.
pub async fn watch(bio: &Bio) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();

    // Each batch holds every change seen within the debounce window
    let mut debouncer = new_debouncer(Duration::from_millis(500), move |res: DebounceEventResult| {
        let _ = tx.send(res);
    })?;

    debouncer
        .watcher()
        .watch(&bio.content_dir, RecursiveMode::Recursive)?;

    if bio.static_dir.exists() {
        debouncer
            .watcher()
            .watch(&bio.static_dir, RecursiveMode::Recursive)?;
    }

    let config_path = bio.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            batch = rx.recv() => {
                match batch {
                    Some(Ok(events)) => {
                        rebuild_on(bio, &events).await;
                    }
                    Some(Err(e)) => tracing::error!("Watch error: {:?}", e),
                    None => break,
                }
            }
            _ = &mut ctrl_c => {
                tracing::info!("Stopped watching");
                break;
            }
        }
    }

    Ok(())
}

/// Regenerate if the batch touches anything besides editor or VCS files
async fn rebuild_on(bio: &Bio, events: &[DebouncedEvent]) -> bool {
    let changed: Vec<_> = events.iter().filter(|e| is_relevant(&e.path)).collect();
    if changed.is_empty() {
        return false;
    }

    for event in &changed {
        tracing::debug!("File changed: {}", event.path.display());
    }

    tracing::info!("File changed, regenerating...");
    if let Err(e) = run(bio).await {
        tracing::error!("Generation failed: {:#}", e);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use std::fs;
    use tempfile::TempDir;

    fn write_site(bio: &Bio) {
        fs::create_dir_all(bio.content_dir.join("posts")).unwrap();
        fs::create_dir_all(bio.static_dir.join("assets")).unwrap();
        fs::write(bio.content_dir.join("about.md"), "hello there\n").unwrap();
        fs::write(
            bio.content_dir.join("socials.md"),
            "---\nheader: links\n---\n- [Steam](https://steamcommunity.com/id/x)\n",
        )
        .unwrap();
        fs::write(
            bio.content_dir.join("posts/a.md"),
            "---\ndate: 2024-01-05\ntitle: First\n---\nfirst post\n",
        )
        .unwrap();
        fs::write(
            bio.content_dir.join("posts/b.md"),
            "---\ndate: 2024-03-01\ntitle: Second\n---\nsecond post\n",
        )
        .unwrap();
        fs::write(bio.static_dir.join("assets/boot.mp3"), b"mp3").unwrap();
    }

    #[tokio::test]
    async fn test_generate_site() {
        let tmp = TempDir::new().unwrap();
        let bio = Bio::with_config(tmp.path(), SiteConfig::default());
        write_site(&bio);

        run(&bio).await.unwrap();

        let html = fs::read_to_string(bio.public_dir.join("index.html")).unwrap();
        assert!(html.contains("<p>hello there</p>"));
        assert!(html.contains("/assets/socials/steam.png"));
        assert!(html.contains("Mar 01, 2024"));

        let first = html.find("data-key=\"2024-03-01-Second\"").unwrap();
        let second = html.find("data-key=\"2024-01-05-First\"").unwrap();
        assert!(first < second);

        assert!(bio.public_dir.join("assets/boot.mp3").exists());
    }

    #[tokio::test]
    async fn test_rebuild_on_relevant_batch_only() {
        use notify_debouncer_mini::DebouncedEventKind;

        let tmp = TempDir::new().unwrap();
        let bio = Bio::with_config(tmp.path(), SiteConfig::default());
        write_site(&bio);
        let index = bio.public_dir.join("index.html");

        let noise = vec![DebouncedEvent {
            path: bio.base_dir.join(".git/index"),
            kind: DebouncedEventKind::Any,
        }];
        assert!(!rebuild_on(&bio, &noise).await);
        assert!(!index.exists());

        let batch = vec![
            DebouncedEvent {
                path: bio.content_dir.join("about.md"),
                kind: DebouncedEventKind::Any,
            },
            DebouncedEvent {
                path: bio.content_dir.join("posts/a.md"),
                kind: DebouncedEventKind::AnyContinuous,
            },
        ];
        assert!(rebuild_on(&bio, &batch).await);
        assert!(index.exists());
    }

    #[tokio::test]
    async fn test_generate_fails_without_content() {
        let tmp = TempDir::new().unwrap();
        let bio = Bio::with_config(tmp.path(), SiteConfig::default());

        assert!(run(&bio).await.is_err());
        assert!(!bio.public_dir.join("index.html").exists());
    }
}
