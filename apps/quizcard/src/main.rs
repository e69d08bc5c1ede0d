mod config;
mod errors;
mod layout;
mod llm_client;
mod models;
mod provider;
mod render;
mod sequence;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::models::SlideKind;
use crate::provider::QuestionProvider;
use crate::render::{AssetPaths, FontSet, SlideAssets, SlideComposer};
use crate::sequence::{list_artifacts, next_sequence};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting quizcard v{}", env!("CARGO_PKG_VERSION"));

    // The question slides decide the counter; answers always mirror them.
    let existing = list_artifacts(&config.output_dir.join(SlideKind::Question.directory()))?;
    let sequence = next_sequence(config.counter_policy, &existing);
    info!("Next sequence: {}", sequence.label());

    // Load everything local before spending an API call.
    let fonts = FontSet::load(&config.assets_dir);
    let assets = SlideAssets::load(&AssetPaths::new(&config.assets_dir))?;

    let provider = QuestionProvider::from_config(&config);
    let record = provider.next_question().await;

    let composer = SlideComposer::new(&fonts, &assets);
    for kind in SlideKind::ALL {
        let slide = composer.compose(&record, sequence, kind);
        info!(
            ?kind,
            card_height = slide.card_height,
            body_lines = slide.body_lines,
            "Slide composed"
        );
        let path = slide.save_under(&config.output_dir)?;
        println!("Saved {} slide for {}: {}", kind.directory(), sequence.label(), path.display());
    }

    Ok(())
}
