//! Bookmark file: one JSON object per line.
//!
//! This is the CLI's stand-in for the bookmark store. The core only sees it as
//! a [`BookmarkSink`].

use anyhow::Result;
use clipmark_core::config::ClipmarkConfig;
use clipmark_core::intake::{BookmarkSink, PersistError};
use clipmark_core::metadata::Bookmark;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct JsonlBookmarks {
    path: PathBuf,
}

impl JsonlBookmarks {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `bookmarks_file` from config, else `~/.local/share/clipmark/bookmarks.jsonl`.
    pub fn from_config(cfg: &ClipmarkConfig) -> Result<Self> {
        let path = match &cfg.bookmarks_file {
            Some(p) => p.clone(),
            None => xdg::BaseDirectories::with_prefix("clipmark")?
                .place_data_file("bookmarks.jsonl")?,
        };
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, bookmark: &Bookmark) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut line = serde_json::to_string(bookmark)?;
        line.push('\n');
        let mut f = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        f.write_all(line.as_bytes())
    }
}

impl BookmarkSink for JsonlBookmarks {
    fn persist(&self, bookmark: &Bookmark) -> Result<(), PersistError> {
        self.append(bookmark).map_err(|e| {
            tracing::warn!("append to {} failed: {}", self.path.display(), e);
            PersistError(format!("{}: {}", self.path.display(), e))
        })?;
        tracing::info!("saved {} to {}", bookmark.url, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipmark_core::metadata::OgMetadata;
    use clipmark_core::url_model::{canonicalize, validate};

    fn bookmark(url: &str, title: &str) -> Bookmark {
        Bookmark {
            url: canonicalize(&validate(url).unwrap()),
            metadata: OgMetadata {
                title: Some(title.into()),
                domain: Some("example.com".into()),
                ..Default::default()
            },
        }
    }

    #[test]
    fn appends_one_line_per_bookmark() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonlBookmarks::new(dir.path().join("sub").join("marks.jsonl"));
        sink.persist(&bookmark("https://example.com/a?x=1", "A")).unwrap();
        sink.persist(&bookmark("https://example.com/b", "B")).unwrap();

        let data = fs::read_to_string(sink.path()).unwrap();
        let lines: Vec<&str> = data.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: Bookmark = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.url.as_str(), "https://example.com/a");
        assert_eq!(first.metadata.title.as_deref(), Some("A"));
    }

    #[test]
    fn unwritable_path_is_persist_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for append.
        let sink = JsonlBookmarks::new(dir.path().to_path_buf());
        let err = sink.persist(&bookmark("https://example.com/", "x")).unwrap_err();
        assert!(err.to_string().starts_with("could not save bookmark:"));
    }

    #[test]
    fn config_path_wins() {
        let cfg = ClipmarkConfig {
            bookmarks_file: Some(PathBuf::from("/tmp/clipmark-test.jsonl")),
            ..Default::default()
        };
        let sink = JsonlBookmarks::from_config(&cfg).unwrap();
        assert_eq!(sink.path(), Path::new("/tmp/clipmark-test.jsonl"));
    }
}
