use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sp_app::{BindingOptions, MetricsBinding, PerformanceCoordinator};
use sp_core::config::AppConfig;
use sp_core::particle::Bounds;
use tracing::info;

use super::config::load_config_or_default;
use super::paths::AppPaths;
use super::wiring::build_coordinator;
use crate::cli::{Cli, Commands};

/// Resolve config, wire the services and run one command.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let paths = AppPaths::discover()?;
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| paths.config_path.clone());
    let config = load_config_or_default(&config_path)?;
    let coordinator = build_coordinator(&config, &paths)?;

    let result = execute(cli.command, &coordinator, &config).await;
    coordinator.cleanup();
    result
}

pub async fn execute(
    command: Commands,
    coordinator: &Arc<PerformanceCoordinator>,
    config: &AppConfig,
) -> anyhow::Result<()> {
    match command {
        Commands::Preload { urls } => {
            let urls = if urls.is_empty() {
                config.performance.media_preload_list.clone()
            } else {
                urls
            };
            if urls.is_empty() {
                println!("nothing to preload");
                return Ok(());
            }
            coordinator.preload_assets(&urls).await;
            for url in &urls {
                let state = if coordinator.get_optimized_media_url(url) == *url {
                    "uncached"
                } else {
                    "cached"
                };
                println!("{state:>8}  {url}");
            }
        }
        Commands::Url { url } => {
            println!("{}", coordinator.get_optimized_media_url(&url));
        }
        Commands::Particles {
            kind,
            count,
            width,
            height,
            json,
        } => {
            let batch =
                coordinator.create_optimized_particles(&kind, count, Bounds::new(width, height));
            if json {
                let rendered = serde_json::to_string_pretty(&batch)
                    .context("Failed to serialize particle batch")?;
                println!("{rendered}");
            } else {
                println!(
                    "{} {kind} particles (requested {count}, ceiling {})",
                    batch.len(),
                    coordinator.max_particles_per_section()
                );
                for particle in &batch {
                    println!(
                        "  {} size={:.2} color={} at ({:.1}, {:.1})",
                        particle.id(),
                        particle.size,
                        particle.color,
                        particle.position.x,
                        particle.position.y
                    );
                }
            }
            let pooled = coordinator.return_particles(batch);
            info!(pooled, "Returned particle batch");
        }
        Commands::Metrics { json } => {
            let metrics = coordinator.get_metrics();
            if json {
                let rendered = serde_json::to_string_pretty(&metrics)
                    .context("Failed to serialize metrics")?;
                println!("{rendered}");
            } else {
                println!("{metrics}");
            }
        }
        Commands::Monitor { duration } => {
            monitor(coordinator, config, duration.map(Duration::from_secs)).await?;
        }
        Commands::Clear => {
            coordinator.media_cache().clear_cache();
            println!("media cache cleared");
        }
    }
    Ok(())
}

async fn monitor(
    coordinator: &Arc<PerformanceCoordinator>,
    config: &AppConfig,
    duration: Option<Duration>,
) -> anyhow::Result<()> {
    let frame_interval = Duration::from_millis(config.performance.particle_update_interval_ms.max(1));
    let options = BindingOptions::from_config(&config.performance).with_frame_ticker(frame_interval);
    let mut binding = MetricsBinding::spawn(Arc::clone(coordinator), options);
    let mut updates = binding.subscribe();

    let deadline = async {
        match duration {
            Some(duration) => tokio::time::sleep(duration).await,
            None => std::future::pending::<()>().await,
        }
    };
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let metrics = updates.borrow_and_update().clone();
                println!("{metrics}\n");
            }
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for Ctrl+C")?;
                break;
            }
            _ = &mut deadline => break,
        }
    }

    binding.stop();
    Ok(())
}
