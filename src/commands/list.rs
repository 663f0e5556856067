//! List site content

use anyhow::Result;

use crate::content::ContentLoader;
use crate::helpers::date_label;
use crate::Bio;

/// List site content by type
pub async fn run(bio: &Bio, content_type: &str) -> Result<()> {
    let loader = ContentLoader::new(bio);

    match content_type {
        "post" | "posts" => {
            let posts = loader.load_mini_posts().await?;
            println!("Mini posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} [{}, {}]",
                    date_label(&post.date),
                    post.title,
                    post.kind,
                    post.accent
                );
            }
        }
        "social" | "socials" => {
            let socials = loader.load_socials().await?;
            let header = socials.header.unwrap_or_else(|| bio.config.socials_header.clone());
            println!("{} ({}):", header, socials.items.len());
            for item in socials.items {
                println!("  {} -> {}", item.label, item.href);
            }
        }
        "about" => {
            let about = loader.load_about().await?;
            let header = about.header.unwrap_or_else(|| bio.config.about_header.clone());
            println!("{}:", header);
            println!("{}", about.html.trim_end());
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, social, about",
                content_type
            );
        }
    }

    Ok(())
}
