//! Content models handed to the page renderer

use serde::{Deserialize, Serialize};

/// Accent used for mini posts without one
pub const DEFAULT_ACCENT: &str = "cyan";

/// The "about me" section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutSection {
    /// Header from front-matter, if any
    pub header: Option<String>,

    /// Rendered HTML body
    pub html: String,
}

/// One social link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialItem {
    pub label: String,
    pub href: String,
}

/// The social links section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Socials {
    pub header: Option<String>,
    pub items: Vec<SocialItem>,
}

/// A short blog-style entry in the feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiniPost {
    /// ISO date string (`YYYY-MM-DD`), empty when missing
    pub date: String,

    /// Category string
    #[serde(rename = "type")]
    pub kind: String,

    pub title: String,

    /// Color tag for the title
    pub accent: String,

    /// Rendered HTML body
    pub body_html: String,
}

impl MiniPost {
    /// Stable key for the feed markup
    pub fn key(&self) -> String {
        format!("{}-{}", self.date, self.title)
    }
}

/// Everything the page needs, loaded in one fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteContent {
    pub about: AboutSection,
    pub socials: Socials,
    pub posts: Vec<MiniPost>,
}
