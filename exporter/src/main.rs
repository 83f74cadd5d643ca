use anyhow::Context;
use exporter::config::{init_logger, load_environment};
use exporter::{Config, ExportSummary};
use log::{error, info};
use std::process::ExitCode;

async fn export() -> anyhow::Result<ExportSummary> {
    let config = Config::from_env().context("configuration failed")?;
    info!(
        "Exporting playlist {} to {}",
        config.playlist_id,
        config.output_path.display()
    );

    Ok(exporter::run(&config).await?)
}

#[tokio::main]
async fn main() -> ExitCode {
    load_environment();
    init_logger();

    match export().await {
        Ok(summary) => {
            info!(
                "Export complete: {} records ({} videos) in {}",
                summary.record_count,
                summary.video_count,
                summary.output_path.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Export failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}
