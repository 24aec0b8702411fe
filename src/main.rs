use std::sync::Arc;

use anyhow::Context;
use aspas::cli;
use aspas::config::OnboardingConfig;
use aspas::onboarding::OnboardingFlow;
use aspas::store::{LibSqlBackend, ProfileStore};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = OnboardingConfig::from_env().context("Invalid configuration")?;

    eprintln!("Aspas v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Database: {}", config.db_path.display());
    eprintln!("   JPEG quality: {}", config.jpeg_quality);
    eprintln!("   Type /quit to exit.\n");

    let backend = LibSqlBackend::new_local(&config.db_path)
        .await
        .with_context(|| format!("Failed to open database at {}", config.db_path.display()))?;
    let store: Arc<dyn ProfileStore> = Arc::new(backend);

    let mut flow = OnboardingFlow::new(store).with_jpeg_quality(config.jpeg_quality);
    let stdin = BufReader::new(tokio::io::stdin());
    let summary = cli::run(&mut flow, stdin, tokio::io::stdout()).await?;

    tracing::info!(completed = summary.completed, "Session ended");
    Ok(())
}
