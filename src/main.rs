//! Autowar - Entry Point
//!
//! Standalone host: loads the settings and a galaxy snapshot, then runs
//! either a single pass or the recurring timer until Ctrl-C.

use autowar::core::config::AutowarConfig;
use autowar::core::error::Result;
use autowar::core::types::FactionId;
use autowar::engine::Autowar;
use autowar::galaxy::map::StarMap;
use autowar::scheduler::{HostState, Scheduler};

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Autowar - AI factions fighting over a star map
#[derive(Parser, Debug)]
#[command(name = "autowar")]
#[command(about = "Run automated faction turns over a galaxy snapshot")]
struct Args {
    /// Settings file (TOML); written with defaults when absent
    #[arg(long, default_value = "autowar_settings.toml")]
    config: PathBuf,

    /// Galaxy snapshot (JSON); rewritten after each run
    #[arg(long, default_value = "galaxy.json")]
    galaxy: PathBuf,

    /// Run a single pass and exit
    #[arg(long)]
    once: bool,

    /// Random seed for deterministic passes
    #[arg(long)]
    seed: Option<u64>,

    /// Faction to skip (repeatable)
    #[arg(long)]
    disable: Vec<String>,

    /// Print the faction profiles and exit
    #[arg(long)]
    list_profiles: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("autowar=info")))
        .init();

    let args = Args::parse();

    let mut config = AutowarConfig::load(&args.config)?;
    config.save_if_absent(&args.config)?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let map = StarMap::load(&args.galaxy)?;
    tracing::info!("Loaded {} systems from {:?}", map.len(), args.galaxy);

    let universe = faction_universe(&config, &map);
    let mut engine = Autowar::load(&config, &universe)?;
    for name in &args.disable {
        engine.set_faction_enabled(&FactionId::new(name.as_str()), false)?;
    }

    if args.list_profiles {
        for (_, profile) in engine.profiles().iter() {
            println!("{} ({} turns, {}% attack)", profile, profile.turn_budget(), profile.attack_chance());
        }
        return Ok(());
    }

    let scheduler = Arc::new(Scheduler::new(engine, HostState::new(map), &config));

    if args.once {
        let report = scheduler.run_pass().await;
        if let Some(delivery) = report.delivery {
            if let Err(e) = delivery.await {
                tracing::error!("Webhook task failed: {}", e);
            }
        }
        println!(
            "{} steps: {} invasions, {} remote attacks, {} local attacks, {} fortifications",
            report.summary.steps,
            report.summary.invasions,
            report.summary.remote_attacks,
            report.summary.local_attacks,
            report.summary.fortifications
        );
    } else {
        let timer = Arc::clone(&scheduler);
        let runner = tokio::spawn(async move { timer.run().await });

        tokio::signal::ctrl_c().await?;
        tracing::info!("Shutting down autowar");
        scheduler.shutdown();
        if let Err(e) = runner.await {
            tracing::error!("Timer task failed: {}", e);
        }
    }

    let host = scheduler.host();
    let host = host.lock().await;
    host.map.save(&args.galaxy)?;
    Ok(())
}

/// Configured factions, or every faction named in the galaxy
fn faction_universe(config: &AutowarConfig, map: &StarMap) -> Vec<FactionId> {
    if config.factions.is_empty() {
        return map.factions().into_iter().collect();
    }
    config
        .factions
        .iter()
        .map(|name| FactionId::new(name.as_str()))
        .filter(|f| !f.is_sentinel())
        .collect()
}
