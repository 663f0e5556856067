//! Create a new mini post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::loader::POSTS_DIR;
use crate::content::DEFAULT_ACCENT;
use crate::helpers::today_iso;
use crate::Bio;

/// Create `content/posts/<date>-<slug>.md` with front-matter filled in
pub fn create_post(bio: &Bio, title: &str, kind: &str, accent: Option<&str>) -> Result<PathBuf> {
    let date = today_iso();
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Title {:?} has nothing to build a file name from", title);
    }

    let target_dir = bio.content_dir.join(POSTS_DIR);
    fs::create_dir_all(&target_dir)?;

    let file_path = target_dir.join(format!("{}-{}.md", date, slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let content = format!(
        "---\ndate: {}\ntype: {}\ntitle: {}\naccent: {}\n---\n\n",
        date,
        yaml_scalar(kind),
        yaml_scalar(title),
        yaml_scalar(accent.unwrap_or(DEFAULT_ACCENT)),
    );

    fs::write(&file_path, content)?;
    println!("Created: {:?}", file_path);

    Ok(file_path)
}

/// Quote a value so titles like `hi: there` stay plain strings
fn yaml_scalar(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
