//! Development server with live reload
//!
//! `/` is rendered from the content files on every request, so edits show up
//! without a build step. Everything else comes from the static directory.

use anyhow::Result;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::ContentLoader;
use crate::generator::Generator;
use crate::helpers::inject_before_body_end;
use crate::{Bio, CONFIG_FILE};

/// Live reload script injected into the page
const LIVE_RELOAD_SCRIPT: &str = r#"
<script>
(function() {
    var ws = new WebSocket('ws://' + location.host + '/__livereload');
    ws.onmessage = function(msg) {
        if (msg.data === 'reload') {
            location.reload();
        }
    };
    ws.onclose = function() {
        console.log('Live reload disconnected. Attempting to reconnect...');
        setTimeout(function() { location.reload(); }, 1000);
    };
})();
</script>
"#;

/// Server state
struct ServerState {
    bio: Bio,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
}

/// Build the router for a site
fn router(bio: &Bio, reload_tx: broadcast::Sender<()>, live_reload: bool) -> Router {
    let state = Arc::new(ServerState {
        bio: bio.clone(),
        reload_tx,
        live_reload,
    });

    Router::new()
        .route("/", get(index_handler))
        .route("/__livereload", get(livereload_handler))
        .fallback_service(ServeDir::new(&bio.static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the development server
pub async fn start(bio: &Bio, ip: &str, port: u16, watch: bool, open: bool) -> Result<()> {
    let (reload_tx, _) = broadcast::channel::<()>(16);
    let app = router(bio, reload_tx.clone(), watch);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    if watch {
        println!("Live reload enabled. Watching for changes...");
    }
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    if watch {
        let paths = vec![
            bio.content_dir.clone(),
            bio.static_dir.clone(),
            bio.base_dir.join(CONFIG_FILE),
        ];

        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_reload(paths, reload_tx) {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Render the page from the current content files
async fn render_index(bio: &Bio) -> Result<String> {
    let content = ContentLoader::new(bio).load_all().await?;
    let generator = Generator::new(bio)?;
    generator.render_page(&content)
}

/// `GET /`
async fn index_handler(State(state): State<Arc<ServerState>>) -> Response {
    match render_index(&state.bio).await {
        Ok(html) if state.live_reload => {
            Html(inject_before_body_end(&html, LIVE_RELOAD_SCRIPT)).into_response()
        }
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Failed to render page: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}

/// Watch content, static files and config; notify clients on change
fn watch_and_reload(paths: Vec<PathBuf>, reload_tx: broadcast::Sender<()>) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    for path in &paths {
        if !path.exists() {
            continue;
        }
        let mode = if path.is_dir() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        debouncer.watcher().watch(path, mode)?;
        tracing::debug!("Watching: {:?}", path);
    }

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant: Vec<_> = events.iter().filter(|e| is_relevant(&e.path)).collect();
                if relevant.is_empty() {
                    continue;
                }

                for event in &relevant {
                    tracing::info!("File changed: {}", event.path.display());
                }

                // No receivers just means no browser is connected
                let _ = reload_tx.send(());
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

/// Editor swap files and VCS metadata don't trigger reloads
pub(crate) fn is_relevant(path: &std::path::Path) -> bool {
    let path_str = path.to_string_lossy();
    !path_str.contains(".git")
        && !path_str.contains(".DS_Store")
        && !path_str.ends_with('~')
        && !path_str.ends_with(".swp")
}

/// WebSocket handler for live reload
async fn livereload_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let reload_rx = state.reload_tx.subscribe();
    ws.on_upgrade(move |socket| handle_livereload_socket(socket, reload_rx))
}

async fn handle_livereload_socket(mut socket: WebSocket, mut reload_rx: broadcast::Receiver<()>) {
    tracing::debug!("Live reload client connected");

    loop {
        tokio::select! {
            result = reload_rx.recv() => {
                match result {
                    Ok(_) => {
                        if socket.send(Message::Text("reload".to_string())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
        }
    }

    tracing::debug!("Live reload client disconnected");
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use std::fs;
    use tempfile::TempDir;

    fn site(tmp: &TempDir) -> Bio {
        let bio = Bio::with_config(tmp.path(), SiteConfig::default());
        fs::create_dir_all(bio.content_dir.join("posts")).unwrap();
        fs::write(bio.content_dir.join("about.md"), "---\nheader: hi\n---\n**bold**\n").unwrap();
        fs::write(
            bio.content_dir.join("socials.md"),
            "- [Discord](https://discord.gg/x)\n",
        )
        .unwrap();
        bio
    }

    #[tokio::test]
    async fn test_index_renders_with_live_reload() {
        let tmp = TempDir::new().unwrap();
        let bio = site(&tmp);
        let (tx, _) = broadcast::channel(1);
        let state = Arc::new(ServerState {
            bio,
            reload_tx: tx,
            live_reload: true,
        });

        let response = index_handler(State(state)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_index_fails_on_broken_content() {
        let tmp = TempDir::new().unwrap();
        let bio = site(&tmp);
        fs::write(
            bio.content_dir.join("posts/bad.md"),
            "---\ntitle: [unclosed\n---\nbody\n",
        )
        .unwrap();
        let (tx, _) = broadcast::channel(1);
        let state = Arc::new(ServerState {
            bio,
            reload_tx: tx,
            live_reload: false,
        });

        let response = index_handler(State(state)).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_render_index_contains_content() {
        let tmp = TempDir::new().unwrap();
        let bio = site(&tmp);
        let html = render_index(&bio).await.unwrap();
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("https://discord.gg/x"));
        assert!(html.contains(">hi<"));
    }

    #[test]
    fn test_is_relevant() {
        assert!(is_relevant(std::path::Path::new("content/about.md")));
        assert!(!is_relevant(std::path::Path::new("content/.git/HEAD")));
        assert!(!is_relevant(std::path::Path::new("content/about.md~")));
    }
}
