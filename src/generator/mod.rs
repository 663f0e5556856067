//! Generator module - renders the bio page using built-in Tera templates

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use tera::Context;
use walkdir::WalkDir;

use crate::boot::{BootLoader, SilentAudio};
use crate::content::SiteContent;
use crate::helpers::{full_url_for, url_for};
use crate::templates::{
    AboutData, BlogData, BootData, PageData, PostData, SiteData, SocialData, SocialsData,
    TemplateRenderer,
};
use crate::Bio;

/// Page generator using Tera templates
pub struct Generator {
    bio: Bio,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(bio: &Bio) -> Result<Self> {
        let renderer = TemplateRenderer::new(&bio.config)?;

        Ok(Self {
            bio: bio.clone(),
            renderer,
        })
    }

    /// Render the page and copy static assets into the public directory
    pub fn generate(&self, content: &SiteContent) -> Result<PathBuf> {
        fs::create_dir_all(&self.bio.public_dir)?;

        let copied = self.copy_static_assets()?;
        tracing::debug!("Copied {} static files", copied);

        let html = self.render_page(content)?;
        let output_path = self.bio.public_dir.join("index.html");
        fs::write(&output_path, html)?;
        tracing::debug!("Generated: {:?}", output_path);

        Ok(output_path)
    }

    /// Render the full page to an HTML string
    pub fn render_page(&self, content: &SiteContent) -> Result<String> {
        let page = self.build_page_data(content)?;
        let context = Context::from_serialize(&page)?;
        self.renderer.render("index.html", &context)
    }

    /// Build template data, applying header defaults and social metadata
    pub fn build_page_data(&self, content: &SiteContent) -> Result<PageData> {
        let config = &self.bio.config;

        let site = SiteData {
            title: config.title.clone(),
            description: config.description.clone(),
            language: config.language.clone(),
            url: full_url_for(config, "/"),
        };

        let about = AboutData {
            header: content
                .about
                .header
                .clone()
                .unwrap_or_else(|| config.about_header.clone()),
            html: content.about.html.clone(),
        };

        let socials = SocialsData {
            header: content
                .socials
                .header
                .clone()
                .unwrap_or_else(|| config.socials_header.clone()),
            items: content
                .socials
                .items
                .iter()
                .map(|item| {
                    let meta = config.social_meta(&item.label);
                    SocialData {
                        label: item.label.clone(),
                        href: item.href.clone(),
                        icon: meta.icon,
                        hover: meta.hover,
                    }
                })
                .collect(),
        };

        let blog = BlogData {
            header: config.blog_header.clone(),
            posts: content
                .posts
                .iter()
                .map(|p| PostData {
                    key: p.key(),
                    date: p.date.clone(),
                    kind: p.kind.clone(),
                    title: p.title.clone(),
                    accent: p.accent.clone(),
                    body_html: p.body_html.clone(),
                })
                .collect(),
        };

        // The overlay's first frame comes from a fresh controller
        let initial = BootLoader::new(config.boot.clone(), SilentAudio).snapshot();

        // The page script loads media itself, so it gets root-resolved paths
        let mut client = config.boot.clone();
        client.audio_src = url_for(config, &client.audio_src);
        client.complete_gif_src = url_for(config, &client.complete_gif_src);

        let boot = BootData {
            config: config.boot.clone(),
            initial,
            json: serde_json::to_string(&client)?,
        };

        Ok(PageData {
            site,
            about,
            socials,
            blog,
            boot,
            assets: config.assets.clone(),
            stickers: config.stickers.clone(),
        })
    }

    /// Copy everything under the static directory into the public directory
    fn copy_static_assets(&self) -> Result<usize> {
        let static_dir = &self.bio.static_dir;
        if !static_dir.exists() {
            tracing::debug!("No static directory at {:?}", static_dir);
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            let dest = self.bio.public_dir.join(relative);

            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }

            fs::copy(path, &dest)?;
            copied += 1;
        }

        Ok(copied)
    }
}
