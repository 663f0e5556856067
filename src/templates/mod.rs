//! Built-in page templates using the Tera template engine
//!
//! The single page and its partials are embedded directly in the binary.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::boot::{BootConfig, BootSnapshot};
use crate::config::{AssetsConfig, SiteConfig, Sticker};
use crate::helpers::{accent_class, date_label, url_for};

/// Template renderer with the embedded bio page
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let mut tera = Tera::default();

        // Bodies are pre-rendered HTML from trusted content files
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("bio/layout.html")),
            ("index.html", include_str!("bio/index.html")),
            ("macros.html", include_str!("bio/macros.html")),
            ("partials/head.html", include_str!("bio/partials/head.html")),
            ("partials/boot.html", include_str!("bio/partials/boot.html")),
            (
                "partials/boot_script.html",
                include_str!("bio/partials/boot_script.html"),
            ),
            (
                "partials/stickers.html",
                include_str!("bio/partials/stickers.html"),
            ),
        ])?;

        tera.register_filter("date_label", date_label_filter);
        tera.register_filter("accent_class", accent_class_filter);

        let site = config.clone();
        tera.register_filter(
            "url_for",
            move |value: &tera::Value, _args: &HashMap<String, tera::Value>| {
                let path = tera::try_get_value!("url_for", "value", String, value);
                Ok(tera::Value::String(url_for(&site, &path)))
            },
        );

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: ISO date to a short label like "Jan 05, 2024"
fn date_label_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_label", "value", String, value);
    Ok(tera::Value::String(date_label(&s)))
}

/// Tera filter: accent tag to the post title class
fn accent_class_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("accent_class", "value", String, value);
    Ok(tera::Value::String(accent_class(&s).to_string()))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub language: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AboutData {
    pub header: String,
    pub html: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SocialData {
    pub label: String,
    pub href: String,
    pub icon: String,
    pub hover: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SocialsData {
    pub header: String,
    pub items: Vec<SocialData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub key: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub accent: String,
    pub body_html: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlogData {
    pub header: String,
    pub posts: Vec<PostData>,
}

/// Boot overlay data: the config for the browser driver and its first frame
#[derive(Debug, Clone, Serialize)]
pub struct BootData {
    pub config: BootConfig,
    pub initial: BootSnapshot,
    /// `config` as JSON, embedded in the page script
    pub json: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageData {
    pub site: SiteData,
    pub about: AboutData,
    pub socials: SocialsData,
    pub blog: BlogData,
    pub boot: BootData,
    pub assets: AssetsConfig,
    pub stickers: Vec<Sticker>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters() {
        let config = SiteConfig {
            root: "/bio/".to_string(),
            ..SiteConfig::default()
        };
        let renderer = TemplateRenderer::new(&config).unwrap();

        let mut tera = renderer.tera;
        tera.add_raw_template(
            "probe",
            "{{ d | date_label }}|{{ a | accent_class }}|{{ p | url_for }}",
        )
        .unwrap();

        let mut context = Context::new();
        context.insert("d", "2024-01-05");
        context.insert("a", "emerald");
        context.insert("p", "/assets/bg.png");
        assert_eq!(
            tera.render("probe", &context).unwrap(),
            "Jan 05, 2024|text-emerald-300|/bio/assets/bg.png"
        );
    }
}
