//! Content loader - loads the about section, socials and mini posts

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::social::parse_social_items;
use super::{
    AboutSection, ContentError, FrontMatter, MarkdownRenderer, MiniPost, SiteContent, Socials,
    DEFAULT_ACCENT,
};
use crate::Bio;

/// File holding the about section
pub const ABOUT_FILE: &str = "about.md";
/// File holding the social links
pub const SOCIALS_FILE: &str = "socials.md";
/// Directory holding one file per mini post
pub const POSTS_DIR: &str = "posts";

/// Loads content from the content directory
///
/// Every call reads the files again; nothing is cached between fetches.
#[derive(Clone)]
pub struct ContentLoader {
    content_dir: PathBuf,
    renderer: Arc<MarkdownRenderer>,
}

impl ContentLoader {
    /// Create a new content loader
    pub fn new(bio: &Bio) -> Self {
        let renderer = MarkdownRenderer::from_config(&bio.config.markdown);
        Self::with_renderer(&bio.content_dir, renderer)
    }

    /// Create a loader for an arbitrary directory
    pub fn with_renderer<P: AsRef<Path>>(content_dir: P, renderer: MarkdownRenderer) -> Self {
        Self {
            content_dir: content_dir.as_ref().to_path_buf(),
            renderer: Arc::new(renderer),
        }
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Load all three content kinds concurrently; the first failure fails the fetch
    pub async fn load_all(&self) -> Result<SiteContent, ContentError> {
        let (about, socials, posts) = tokio::try_join!(
            self.load_about(),
            self.load_socials(),
            self.load_mini_posts()
        )?;

        tracing::debug!(
            "Loaded content: {} socials, {} posts",
            socials.items.len(),
            posts.len()
        );

        Ok(SiteContent {
            about,
            socials,
            posts,
        })
    }

    /// Load about.md
    pub async fn load_about(&self) -> Result<AboutSection, ContentError> {
        let (fm, body) = read_markdown(&self.content_dir.join(ABOUT_FILE)).await?;
        Ok(AboutSection {
            header: fm.header,
            html: self.renderer.render(&body),
        })
    }

    /// Load socials.md; lines that are not bullet links are ignored
    pub async fn load_socials(&self) -> Result<Socials, ContentError> {
        let (fm, body) = read_markdown(&self.content_dir.join(SOCIALS_FILE)).await?;
        Ok(Socials {
            header: fm.header,
            items: parse_social_items(&body),
        })
    }

    /// Load every `.md` file in posts/, newest first
    ///
    /// Files are read in file-name order and processed on separate tasks.
    /// The sort is stable, so posts sharing a date keep file-name order.
    pub async fn load_mini_posts(&self) -> Result<Vec<MiniPost>, ContentError> {
        let posts_dir = self.content_dir.join(POSTS_DIR);
        let files = list_markdown_files(&posts_dir).await?;

        let handles: Vec<_> = files
            .into_iter()
            .map(|path| {
                let renderer = Arc::clone(&self.renderer);
                tokio::spawn(async move {
                    let (fm, body) = read_markdown(&path).await?;
                    tracing::debug!("Loaded post: {:?}", path);
                    Ok::<_, ContentError>(build_mini_post(fm, &body, &renderer))
                })
            })
            .collect();

        let mut posts = Vec::with_capacity(handles.len());
        for handle in handles {
            posts.push(handle.await??);
        }

        sort_by_date_desc(&mut posts);

        Ok(posts)
    }
}

/// Sort newest first by plain string comparison of ISO dates
pub fn sort_by_date_desc(posts: &mut [MiniPost]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date));
}

fn build_mini_post(fm: FrontMatter, body: &str, renderer: &MarkdownRenderer) -> MiniPost {
    MiniPost {
        date: fm.date.unwrap_or_default(),
        kind: fm.kind.unwrap_or_default(),
        title: fm.title.unwrap_or_default(),
        accent: fm.accent.unwrap_or_else(|| DEFAULT_ACCENT.to_string()),
        body_html: renderer.render(body),
    }
}

/// Read a file and split it into front-matter and body
async fn read_markdown(path: &Path) -> Result<(FrontMatter, String), ContentError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ContentError::io(path, e))?;

    let (fm, body) = FrontMatter::parse(&raw).map_err(|e| ContentError::FrontMatter {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok((fm, body.to_string()))
}

/// List `*.md` files directly inside a directory, sorted by file name
async fn list_markdown_files(dir: &Path) -> Result<Vec<PathBuf>, ContentError> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| ContentError::io(dir, e))?;

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| ContentError::io(dir, e))?
    {
        let path = entry.path();
        let is_dir = entry
            .file_type()
            .await
            .map(|t| t.is_dir())
            .unwrap_or(false);
        if !is_dir && is_markdown_file(&path) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Check if a file name ends in `.md`
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn site_dir() -> TempDir {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            ABOUT_FILE,
            "---\nheader: \"hi\"\n---\n**bold**",
        );
        write(
            tmp.path(),
            SOCIALS_FILE,
            "---\nheader: links\n---\n- [Discord](https://discord.gg/x)\njust text\n",
        );
        fs::create_dir_all(tmp.path().join(POSTS_DIR)).unwrap();
        tmp
    }

    fn loader(dir: &Path) -> ContentLoader {
        ContentLoader::with_renderer(dir, MarkdownRenderer::new())
    }

    #[tokio::test]
    async fn test_load_about() {
        let tmp = site_dir();
        let about = loader(tmp.path()).load_about().await.unwrap();
        assert_eq!(about.header.as_deref(), Some("hi"));
        assert_eq!(about.html.trim_end(), "<p><strong>bold</strong></p>");
    }

    #[tokio::test]
    async fn test_load_about_without_header() {
        let tmp = site_dir();
        write(tmp.path(), ABOUT_FILE, "plain *about*");
        let about = loader(tmp.path()).load_about().await.unwrap();
        assert!(about.header.is_none());
        assert_eq!(about.html.trim_end(), "<p>plain <em>about</em></p>");
    }

    #[tokio::test]
    async fn test_load_about_indented_code_without_frontmatter() {
        let tmp = site_dir();
        write(tmp.path(), ABOUT_FILE, "    let x = 1;\n");
        let about = loader(tmp.path()).load_about().await.unwrap();
        assert_eq!(about.html, "<pre><code>let x = 1;\n</code></pre>\n");
    }

    #[tokio::test]
    async fn test_load_socials() {
        let tmp = site_dir();
        let socials = loader(tmp.path()).load_socials().await.unwrap();
        assert_eq!(socials.header.as_deref(), Some("links"));
        assert_eq!(socials.items.len(), 1);
        assert_eq!(socials.items[0].label, "Discord");
        assert_eq!(socials.items[0].href, "https://discord.gg/x");
    }

    #[tokio::test]
    async fn test_mini_posts_sorted_desc_with_defaults() {
        let tmp = site_dir();
        write(
            tmp.path(),
            "posts/a.md",
            "---\ndate: 2024-01-05\ntype: note\ntitle: Old\naccent: pink\n---\nold",
        );
        write(
            tmp.path(),
            "posts/b.md",
            "---\ndate: 2024-06-30\ntype: update\ntitle: New\n---\nnew",
        );
        write(tmp.path(), "posts/c.md", "no front-matter at all");
        write(tmp.path(), "posts/notes.txt", "---\ndate: 2099-01-01\n---\n");

        let posts = loader(tmp.path()).load_mini_posts().await.unwrap();
        assert_eq!(posts.len(), 3);

        assert_eq!(posts[0].title, "New");
        assert_eq!(posts[0].accent, DEFAULT_ACCENT);
        assert_eq!(posts[0].kind, "update");
        assert_eq!(posts[1].title, "Old");
        assert_eq!(posts[1].accent, "pink");
        assert_eq!(posts[1].body_html.trim_end(), "<p>old</p>");

        // Missing date/type/title become empty strings and sort last
        assert_eq!(posts[2].date, "");
        assert_eq!(posts[2].kind, "");
        assert_eq!(posts[2].title, "");

        for pair in posts.windows(2) {
            assert!(pair[0].date >= pair[1].date);
        }
    }

    #[tokio::test]
    async fn test_equal_dates_keep_file_order() {
        let tmp = site_dir();
        for name in ["c", "a", "b"] {
            write(
                tmp.path(),
                &format!("posts/{}.md", name),
                &format!("---\ndate: 2024-02-02\ntitle: {}\n---\n", name),
            );
        }

        let posts = loader(tmp.path()).load_mini_posts().await.unwrap();
        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_load_all() {
        let tmp = site_dir();
        write(
            tmp.path(),
            "posts/first.md",
            "---\ndate: 2024-03-01\ntitle: First\n---\nhello",
        );

        let content = loader(tmp.path()).load_all().await.unwrap();
        assert_eq!(content.about.header.as_deref(), Some("hi"));
        assert_eq!(content.socials.items.len(), 1);
        assert_eq!(content.posts.len(), 1);
        assert_eq!(content.posts[0].key(), "2024-03-01-First");
    }

    #[tokio::test]
    async fn test_missing_posts_dir_fails_fetch() {
        let tmp = site_dir();
        fs::remove_dir_all(tmp.path().join(POSTS_DIR)).unwrap();

        let err = loader(tmp.path()).load_all().await.unwrap_err();
        assert!(matches!(err, ContentError::Io { .. }));
    }

    #[tokio::test]
    async fn test_missing_about_fails_fetch() {
        let tmp = site_dir();
        fs::remove_file(tmp.path().join(ABOUT_FILE)).unwrap();

        let err = loader(tmp.path()).load_about().await.unwrap_err();
        match err {
            ContentError::Io { path, .. } => assert!(path.ends_with(ABOUT_FILE)),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_broken_post_frontmatter_fails_fetch() {
        let tmp = site_dir();
        write(tmp.path(), "posts/bad.md", "---\ntitle: [oops\n---\nbody");

        let err = loader(tmp.path()).load_mini_posts().await.unwrap_err();
        assert!(matches!(err, ContentError::FrontMatter { .. }));
    }

    #[test]
    fn test_sort_is_total_and_stable() {
        let post = |date: &str, title: &str| MiniPost {
            date: date.to_string(),
            kind: String::new(),
            title: title.to_string(),
            accent: DEFAULT_ACCENT.to_string(),
            body_html: String::new(),
        };
        let mut posts = vec![
            post("2023-12-31", "x"),
            post("2024-01-01", "y"),
            post("2023-12-31", "z"),
        ];
        sort_by_date_desc(&mut posts);
        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["y", "x", "z"]);
    }
}
