//! `clipmark add <url|->` – run the full capture flow.

use anyhow::{Context, Result};
use clipmark_core::config::ClipmarkConfig;
use clipmark_core::intake::{
    spawn_intake, IntakeHandle, IntakeOptions, IntakeState, SourceError, SourceReader,
};
use clipmark_core::pipeline::MetadataPipeline;

use crate::cli::bookmarks::JsonlBookmarks;
use crate::cli::render::render_preview;
use crate::cli::source::StdinLine;

/// Literal argument or the first line of stdin.
enum CliSource {
    Literal(String),
    Stdin(StdinLine),
}

impl SourceReader for CliSource {
    fn read(&self) -> Result<String, SourceError> {
        match self {
            CliSource::Literal(s) => Ok(s.clone()),
            CliSource::Stdin(s) => s.read(),
        }
    }
}

pub async fn run_add(cfg: &ClipmarkConfig, source: &str, yes: bool, json: bool) -> Result<()> {
    let source = if source == "-" {
        CliSource::Stdin(StdinLine)
    } else {
        CliSource::Literal(source.to_string())
    };
    let sink = JsonlBookmarks::from_config(cfg)?;
    let sink_path = sink.path().to_path_buf();

    let (mut handle, task) = spawn_intake(
        source,
        MetadataPipeline::from_config(cfg),
        sink,
        IntakeOptions::from(cfg),
    );

    handle.check_source().await?;
    let mut state = settle(&mut handle, |s| !s.is_busy() && *s != IntakeState::Idle).await?;
    if matches!(state, IntakeState::Valid(_)) {
        // Ignored if auto-preview already moved on.
        handle.load_preview().await?;
        state = settle(&mut handle, |s| {
            !s.is_busy() && !matches!(s, IntakeState::Valid(_))
        })
        .await?;
    }

    if let IntakeState::PreviewReady(preview) = &state {
        print!("{}", render_preview(preview));
        if yes || ask_confirm().await? {
            handle.confirm().await?;
            state = settle(&mut handle, IntakeState::is_finished).await?;
        } else {
            handle.cancel().await?;
            state = settle(&mut handle, |s| *s == IntakeState::Idle).await?;
        }
    }

    drop(handle);
    task.await.context("intake driver join")?;

    match state {
        IntakeState::Submitted(bookmark) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&bookmark)?);
            } else {
                println!("Saved {} to {}", bookmark.url, sink_path.display());
            }
            Ok(())
        }
        IntakeState::Idle => {
            println!("Cancelled.");
            Ok(())
        }
        IntakeState::Invalid(reason) => anyhow::bail!("invalid input: {}", reason),
        IntakeState::Failed(reason) => anyhow::bail!("{}", reason),
        other => anyhow::bail!("capture stopped in unexpected state {}", other.name()),
    }
}

/// Waits for a state matching `pred`; Ctrl-C cancels the current attempt.
async fn settle(
    handle: &mut IntakeHandle,
    pred: impl FnMut(&IntakeState) -> bool,
) -> Result<IntakeState> {
    let canceller = handle.clone();
    tokio::select! {
        state = handle.wait_for(pred) => Ok(state?),
        res = tokio::signal::ctrl_c() => {
            res.context("listen for Ctrl-C")?;
            tracing::info!("capture cancelled by user");
            canceller.cancel().await?;
            Ok(handle.wait_for(|s| *s == IntakeState::Idle).await?)
        }
    }
}

async fn ask_confirm() -> Result<bool> {
    // Same std stdin as the `-` source, so a line it buffered is not lost.
    let answer = tokio::task::spawn_blocking(|| -> std::io::Result<String> {
        use std::io::{BufRead, Write};
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(b"Save bookmark? [y/N] ")?;
        stdout.flush()?;
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        Ok(line)
    })
    .await
    .context("confirmation task join")?
    .context("read confirmation")?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"))
}
