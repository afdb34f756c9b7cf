//! validate → canonicalize → fetch → extract → attach domain.
//!
//! Each step short-circuits; a failed fetch yields no metadata at all. There is
//! no cache: every call issues a fresh request.

use std::sync::Arc;
use thiserror::Error;

use crate::config::ClipmarkConfig;
use crate::extract::Extractor;
use crate::fetch_page::{CurlFetcher, FetchError, FetchOptions, NetworkFailure, PageFetcher};
use crate::metadata::{OgMetadata, Preview};
use crate::url_model::{self, ValidUrl, ValidationError};

/// Failure of [`MetadataPipeline::fetch_preview`]; wraps the failing step's error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("invalid URL ({0})")]
    Validation(#[from] ValidationError),
    #[error("could not load page: {0}")]
    Fetch(#[from] FetchError),
}

/// Link preview pipeline over a [`PageFetcher`].
#[derive(Debug)]
pub struct MetadataPipeline<F = CurlFetcher> {
    fetcher: Arc<F>,
    extractor: Extractor,
}

impl<F> Clone for MetadataPipeline<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            extractor: self.extractor,
        }
    }
}

impl MetadataPipeline<CurlFetcher> {
    /// Curl-backed pipeline using the fetch and extract settings from `cfg`.
    pub fn from_config(cfg: &ClipmarkConfig) -> Self {
        Self::new(
            CurlFetcher::new(FetchOptions::from(cfg)),
            Extractor::new(cfg.extract),
        )
    }
}

impl<F: PageFetcher> MetadataPipeline<F> {
    pub fn new(fetcher: F, extractor: Extractor) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            extractor,
        }
    }

    /// Validates `raw` and returns the metadata of the page it points to.
    pub async fn fetch_preview(&self, raw: &str) -> Result<OgMetadata, PipelineError> {
        let url = url_model::validate(raw)?;
        let preview = self.preview(&url).await?;
        Ok(preview.metadata)
    }

    /// Fetches and extracts an already validated URL, keeping the canonical URL.
    pub async fn preview(&self, url: &ValidUrl) -> Result<Preview, PipelineError> {
        let canonical = url_model::canonicalize(url);

        let doc = tokio::task::spawn_blocking({
            let fetcher = Arc::clone(&self.fetcher);
            let canonical = canonical.clone();
            move || fetcher.fetch(&canonical)
        })
        .await
        .map_err(|e| FetchError::Network {
            kind: NetworkFailure::Other,
            message: format!("fetch task join: {}", e),
        })??;

        let mut metadata = self.extractor.extract(&doc.body);
        metadata.domain = canonical.domain().map(str::to_string);
        tracing::debug!(
            "preview for {}: title={:?} image={} description={}",
            canonical,
            metadata.title,
            metadata.image.is_some(),
            metadata.description.is_some()
        );

        Ok(Preview {
            url: canonical,
            metadata,
        })
    }
}
