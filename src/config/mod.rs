//! Configuration module

mod site;

pub use site::AssetsConfig;
pub use site::MarkdownConfig;
pub use site::SiteConfig;
pub use site::SocialMeta;
pub use site::Sticker;
