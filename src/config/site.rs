//! Site configuration (_config.yml)

use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::boot::BootConfig;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub content_dir: String,
    pub static_dir: String,
    pub public_dir: String,

    // Section headers used when the content has none
    pub about_header: String,
    pub socials_header: String,
    pub blog_header: String,

    #[serde(default)]
    pub markdown: MarkdownConfig,

    #[serde(default)]
    pub boot: BootConfig,

    /// Icon and hover style per social label (IndexMap keeps YAML order)
    #[serde(default = "default_social_meta")]
    pub socials: IndexMap<String, SocialMeta>,

    #[serde(default = "default_stickers")]
    pub stickers: Vec<Sticker>,

    /// Background, frame and decoration images
    #[serde(default)]
    pub assets: AssetsConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "noirediego".to_string(),
            description: "my cool bio".to_string(),
            author: "noirediego".to_string(),
            language: "en".to_string(),

            url: "http://localhost:4000".to_string(),
            root: "/".to_string(),

            content_dir: "content".to_string(),
            static_dir: "static".to_string(),
            public_dir: "public".to_string(),

            about_header: "about me XD".to_string(),
            socials_header: "find me here!1!".to_string(),
            blog_header: "mini blog :3".to_string(),

            markdown: MarkdownConfig::default(),
            boot: BootConfig::default(),
            socials: default_social_meta(),
            stickers: default_stickers(),
            assets: AssetsConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Look up the icon/hover pair for a social label, falling back to the default entry
    pub fn social_meta(&self, label: &str) -> SocialMeta {
        self.socials
            .get(label)
            .cloned()
            .unwrap_or_else(SocialMeta::fallback)
    }
}

/// Markdown rendering options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Syntax-highlight fenced code blocks
    pub highlight: bool,
    pub highlight_theme: String,
    pub line_numbers: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            highlight: false,
            highlight_theme: "base16-ocean.dark".to_string(),
            line_numbers: false,
        }
    }
}

/// Icon and hover class for one social label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialMeta {
    pub icon: String,
    pub hover: String,
}

impl SocialMeta {
    fn new(icon: &str, hover: &str) -> Self {
        Self {
            icon: icon.to_string(),
            hover: hover.to_string(),
        }
    }

    /// Used for labels with no configured entry
    pub fn fallback() -> Self {
        Self::new("/assets/socials/discord.png", "hover:text-cyan-300")
    }
}

fn default_social_meta() -> IndexMap<String, SocialMeta> {
    let mut map = IndexMap::new();
    map.insert(
        "Discord".to_string(),
        SocialMeta::new("/assets/socials/discord.png", "hover:text-indigo-400"),
    );
    map.insert(
        "Steam".to_string(),
        SocialMeta::new("/assets/socials/steam.png", "hover:text-sky-400"),
    );
    map.insert(
        "Twitter".to_string(),
        SocialMeta::new("/assets/socials/twitter.png", "hover:text-cyan-400"),
    );
    map.insert(
        "Roblox".to_string(),
        SocialMeta::new("/assets/socials/roblox.png", "hover:text-red-300"),
    );
    map.insert(
        "NameMC".to_string(),
        SocialMeta::new("/assets/socials/namemc.png", "hover:text-emerald-300"),
    );
    map
}

/// A decoration image pinned around the content frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sticker {
    pub src: String,
    pub alt: String,
    #[serde(default)]
    pub class: String,
}

fn default_stickers() -> Vec<Sticker> {
    vec![
        Sticker {
            src: "/assets/oska.gif".to_string(),
            alt: "Sticker 1".to_string(),
            class: "sticker-top-left".to_string(),
        },
        Sticker {
            src: "/assets/ner3uk.gif".to_string(),
            alt: "Sticker 2".to_string(),
            class: "sticker-top-right".to_string(),
        },
        Sticker {
            src: "/assets/shadow.jpg".to_string(),
            alt: "Sticker 3".to_string(),
            class: "sticker-bottom-left".to_string(),
        },
    ]
}

/// Fixed page images
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub background: String,
    pub frame: String,
    pub logo: String,
    pub desktop_icon: String,
    pub decorations: Vec<String>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            background: "/assets/bg.png".to_string(),
            frame: "/assets/frame.png".to_string(),
            logo: "/assets/noirediego.png".to_string(),
            desktop_icon: "/assets/desktop_icon.svg".to_string(),
            decorations: vec![
                "/assets/sonic_decoration.gif".to_string(),
                "/assets/angel_decoration.gif".to_string(),
            ],
        }
    }
}
