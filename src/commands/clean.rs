//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::Bio;

/// Remove the generated output
pub fn run(bio: &Bio) -> Result<()> {
    if bio.public_dir.exists() {
        fs::remove_dir_all(&bio.public_dir)?;
        tracing::info!("Deleted: {:?}", bio.public_dir);
    } else {
        tracing::debug!("Nothing to clean at {:?}", bio.public_dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    #[test]
    fn test_clean_removes_public_only() {
        let tmp = TempDir::new().unwrap();
        let bio = Bio::with_config(tmp.path(), SiteConfig::default());
        fs::create_dir_all(bio.public_dir.join("assets")).unwrap();
        fs::create_dir_all(&bio.content_dir).unwrap();

        run(&bio).unwrap();
        assert!(!bio.public_dir.exists());
        assert!(bio.content_dir.exists());

        // Second run is a no-op
        run(&bio).unwrap();
    }
}
