//! Initialize a new bio site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::content::loader::{ABOUT_FILE, POSTS_DIR, SOCIALS_FILE};
use crate::helpers::today_iso;
use crate::{Bio, CONFIG_FILE};

const CONFIG_TEMPLATE: &str = r#"# retro-bio configuration

# Site
title: noirediego
description: my cool bio
author: ''
language: en

# URL
url: http://localhost:4000
root: /

# Directory
content_dir: content
static_dir: static
public_dir: public

# Section headers (front-matter `header` wins)
about_header: about me XD
socials_header: find me here!1!
blog_header: mini blog :3

# Markdown
markdown:
  highlight: false
  highlight_theme: base16-ocean.dark
  line_numbers: false

# Boot overlay
boot:
  audio_src: /assets/boot.mp3
  complete_gif_src: /assets/loading_complete.gif
  bar_seconds: 5.0
  switch_seconds: 6.0
  total_seconds: 15.0
  segments: 10
  volume: 0.1
  lock_scroll: true
  mount_children_after_done: true
  icon_label: noirediego
"#;

const ABOUT_TEMPLATE: &str = r#"---
header: about me XD
---

hi! i make things on the internet.

edit `content/about.md` to change this text.
"#;

const SOCIALS_TEMPLATE: &str = r#"---
header: find me here!1!
---

- [Discord](https://discord.com)
- [Steam](https://steamcommunity.com)
- [Twitter](https://twitter.com)
"#;

/// Initialize a new site in the given directory
///
/// Existing files are left untouched, so re-running only fills in gaps.
pub fn init_site(target_dir: &Path) -> Result<()> {
    let content_dir = target_dir.join("content");
    let static_dir = target_dir.join("static");

    fs::create_dir_all(content_dir.join(POSTS_DIR))?;
    fs::create_dir_all(static_dir.join("assets/socials"))?;

    let hello = format!(
        r#"---
date: {}
type: update
title: hello world
accent: pink
---

first post on the new site!!
"#,
        today_iso()
    );

    let files = [
        (target_dir.join(CONFIG_FILE), CONFIG_TEMPLATE.to_string()),
        (content_dir.join(ABOUT_FILE), ABOUT_TEMPLATE.to_string()),
        (content_dir.join(SOCIALS_FILE), SOCIALS_TEMPLATE.to_string()),
        (content_dir.join(POSTS_DIR).join("hello-world.md"), hello),
    ];

    for (path, body) in files {
        if path.exists() {
            tracing::warn!("Skipping existing file: {:?}", path);
            continue;
        }
        fs::write(&path, body)?;
        tracing::debug!("Created: {:?}", path);
    }

    Ok(())
}

/// Run the init command with an existing site instance
pub fn run(bio: &Bio) -> Result<()> {
    init_site(&bio.base_dir)
}
