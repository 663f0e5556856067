//! Content module - about section, social links and mini posts

mod error;
mod frontmatter;
pub mod loader;
mod markdown;
mod models;
mod social;

pub use error::ContentError;
pub use frontmatter::FrontMatter;
pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
pub use models::{AboutSection, MiniPost, SiteContent, SocialItem, Socials, DEFAULT_ACCENT};
pub use social::{parse_social_items, parse_social_line};
