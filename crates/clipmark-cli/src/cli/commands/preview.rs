//! `clipmark preview <url>` – fetch and render a link preview.

use anyhow::Result;
use clipmark_core::config::ClipmarkConfig;
use clipmark_core::pipeline::MetadataPipeline;
use clipmark_core::url_model::validate;

use crate::cli::render::render_preview;

pub async fn run_preview(cfg: &ClipmarkConfig, url: &str, json: bool) -> Result<()> {
    let url = validate(url).map_err(|e| anyhow::anyhow!("{:?} is not a valid URL ({})", url, e))?;
    let pipeline = MetadataPipeline::from_config(cfg);
    let preview = pipeline.preview(&url).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&preview.metadata)?);
    } else {
        print!("{}", render_preview(&preview));
    }
    Ok(())
}
