//! CLI entry point for retro-bio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "retro-bio")]
#[command(version = "0.1.0")]
#[command(about = "A single-page bio site with a retro boot screen", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new bio site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new mini post
    New {
        /// Title of the new post
        title: String,

        /// Post type shown next to the date
        #[arg(short = 't', long = "type", default_value = "update")]
        kind: String,

        /// Title accent (cyan, pink, emerald, sky, indigo)
        #[arg(short, long)]
        accent: Option<String>,
    },

    /// Generate the static page
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,
    },

    /// Clean the public folder
    Clean,

    /// List site content
    List {
        /// Type of content to list (post, social, about)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Play the boot sequence in the terminal
    Boot {
        /// Playback speed multiplier (above 0, at most 1000)
        #[arg(short, long, default_value = "1.0")]
        speed: f64,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "retro_bio=debug,info"
    } else {
        "retro_bio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing bio site in {:?}", target_dir);
            retro_bio::commands::init::init_site(&target_dir)?;
            println!("Initialized bio site in {:?}", target_dir);
        }

        Commands::New {
            title,
            kind,
            accent,
        } => {
            let bio = retro_bio::Bio::new(&base_dir)?;
            tracing::info!("Creating new {} post: {}", kind, title);
            retro_bio::commands::new::create_post(&bio, &title, &kind, accent.as_deref())?;
        }

        Commands::Generate { watch } => {
            let bio = retro_bio::Bio::new(&base_dir)?;
            tracing::info!("Generating static page...");

            bio.generate().await?;
            println!("Generated successfully!");

            if watch {
                tracing::info!("Watching for file changes...");
                retro_bio::commands::generate::watch(&bio).await?;
            }
        }

        Commands::Server {
            port,
            ip,
            open,
            r#static,
        } => {
            let bio = retro_bio::Bio::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            retro_bio::server::start(&bio, &ip, port, !r#static, open).await?;
        }

        Commands::Clean => {
            let bio = retro_bio::Bio::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            bio.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let bio = retro_bio::Bio::new(&base_dir)?;
            retro_bio::commands::list::run(&bio, &r#type).await?;
        }

        Commands::Boot { speed } => {
            let bio = retro_bio::Bio::new(&base_dir)?;
            retro_bio::boot::terminal::run(bio.config.boot.clone(), speed).await?;
        }

        Commands::Version => {
            println!("retro-bio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
