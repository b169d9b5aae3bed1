//! Product optimizer CLI
//!
//! Uploads a reference image and product images, waits for the remote
//! optimizer and downloads the processed bundle.

#![allow(missing_docs)]

use anyhow::Context;
use clap::Parser;
use product_optimizer::utils::logging::init_logging;
use product_optimizer::utils::{format_bytes, format_duration};
use product_optimizer::{
    ArtifactDownloader, Batch, BatchCoordinator, Config, FileHandle, build_info,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "optimizer")]
#[command(about = "Upload product images for optimization and fetch the scaled bundle")]
#[command(version)]
struct Cli {
    /// YAML configuration file (defaults plus environment when omitted)
    #[arg(short, long, env = "OPTIMIZER_CONFIG")]
    config: Option<PathBuf>,

    /// Reference image the products are matched against
    #[arg(short, long)]
    reference: Option<PathBuf>,

    /// Directory the scaled bundle is written to
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Print the bundle location instead of downloading it
    #[arg(long)]
    no_download: bool,

    /// Product images, uploaded in the given order
    products: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())
        .await
        .context("Failed to load configuration")?;
    init_logging(config.logging())?;
    info!("{}", build_info());

    let coordinator = BatchCoordinator::from_config(&config)?;
    let mut batch = Batch::new();
    info!(batch_id = %batch.id(), "Session started");

    if let Some(path) = &cli.reference {
        let file = FileHandle::from_path(path)
            .await
            .with_context(|| format!("Failed to read reference image {}", path.display()))?;
        warn_if_not_image(&file);
        batch.select_reference(file)?;
    }

    let mut products = Vec::with_capacity(cli.products.len());
    for path in &cli.products {
        let file = FileHandle::from_path(path)
            .await
            .with_context(|| format!("Failed to read product image {}", path.display()))?;
        warn_if_not_image(&file);
        products.push(file);
    }
    batch.select_products(products)?;

    let cycle = run_cycle(&coordinator, &mut batch, &config, &cli);
    until_interrupted(cycle, tokio::signal::ctrl_c()).await
}

async fn run_cycle(
    coordinator: &BatchCoordinator,
    batch: &mut Batch,
    config: &Config,
    cli: &Cli,
) -> anyhow::Result<()> {
    let report = coordinator.run(batch).await?;
    info!(
        files = report.keys.len(),
        size = %format_bytes(report.total_bytes),
        elapsed = %format_duration(report.duration),
        "Upload finished"
    );

    let location = coordinator.retrieve(batch)?;
    if cli.no_download {
        println!("{}", location);
        return Ok(());
    }

    let downloader = ArtifactDownloader::new(config.upload().timeout())?;
    let path = downloader
        .download(&location, &cli.output)
        .await
        .with_context(|| format!("Failed to download {}", location))?;
    println!("{}", path.display());
    Ok(())
}

/// Drive `work` to completion unless `interrupt` fires first, in which case
/// the pending upload, wait or download is dropped
async fn until_interrupted<T, W, I>(work: W, interrupt: I) -> anyhow::Result<T>
where
    W: Future<Output = anyhow::Result<T>>,
    I: Future<Output = std::io::Result<()>>,
{
    tokio::pin!(work);
    tokio::select! {
        result = &mut work => result,
        signal = interrupt => match signal {
            Ok(()) => {
                warn!("Interrupted, abandoning batch");
                anyhow::bail!("Interrupted")
            }
            Err(e) => {
                warn!(error = %e, "Cannot listen for Ctrl-C");
                work.await
            }
        },
    }
}

fn warn_if_not_image(file: &FileHandle) {
    if !file.is_image() {
        warn!(name = file.name(), "File does not look like an image");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_interrupt_drops_pending_work() {
        let interrupt = async {
            tokio::time::sleep(Duration::from_secs(1)).await;
            Ok(())
        };

        let err = until_interrupted(std::future::pending::<anyhow::Result<()>>(), interrupt)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Interrupted");
    }

    #[tokio::test(start_paused = true)]
    async fn test_finished_work_wins_over_later_interrupt() {
        let work = async {
            tokio::time::sleep(Duration::from_secs(1)).await;
            Ok(7)
        };
        let interrupt = async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        };

        assert_eq!(until_interrupted(work, interrupt).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_work_continues_when_signal_listener_fails() {
        let work = async {
            tokio::task::yield_now().await;
            Ok("done")
        };
        let interrupt = async { Err(std::io::Error::other("no signal driver")) };

        assert_eq!(until_interrupted(work, interrupt).await.unwrap(), "done");
    }

    #[test]
    fn test_cli_parses_products_in_order() {
        let cli = Cli::parse_from(["optimizer", "-r", "logo.png", "a.png", "b.png"]);
        assert_eq!(cli.reference, Some(PathBuf::from("logo.png")));
        assert_eq!(cli.products, vec![PathBuf::from("a.png"), PathBuf::from("b.png")]);
        assert_eq!(cli.output, PathBuf::from("."));
        assert!(!cli.no_download);
    }
}
