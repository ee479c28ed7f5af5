// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sipsense

//! SipSense - Smart Bottle Notification Engine
//!
//! Headless runner: feeds simulated bottle readings through the
//! notification engine and logs notification changes and pushes.

use anyhow::{bail, Result};
use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use sipsense::sensors::BottleSimulator;
use sipsense::{Config, MemoryPushChannel, NotificationEngine, ReminderClass, VERSION};

/// SipSense - Smart Bottle Notification Engine
#[derive(Parser, Debug)]
#[command(name = "sipsense")]
#[command(author = "SipSense Project")]
#[command(version = VERSION)]
#[command(about = "Sensor-driven hydration notifications, push escalation and reminders")]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable trace-level logging
    #[arg(long)]
    trace: bool,

    /// Number of simulated readings (0 runs until Ctrl+C)
    #[arg(long)]
    ticks: Option<u64>,

    /// Milliseconds between simulated readings
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Seed for a reproducible simulation
    #[arg(long)]
    seed: Option<u64>,

    /// Schedule reminders for a class before running (healthy or medical)
    #[arg(long)]
    schedule: Option<String>,

    /// Condition label for medical reminders
    #[arg(long)]
    condition: Option<String>,

    /// Owner identifier attached to reminders
    #[arg(long, default_value = "local-user")]
    owner: String,

    /// Disable push escalation
    #[arg(long)]
    no_push: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load or create configuration
    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_create(&config_path)?;

    // Initialize logging
    let log_level = if args.trace {
        Level::TRACE
    } else if args.debug {
        Level::DEBUG
    } else {
        Level::from_str(&config.log_level).unwrap_or(Level::INFO)
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(args.debug)
        .with_line_number(args.debug)
        .with_ansi(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("💧 SipSense v{} - Smart Bottle Notification Engine", VERSION);
    info!("Configuration loaded from {:?}", config_path);

    // Override with command line args
    if let Some(ticks) = args.ticks {
        config.simulator.ticks = ticks;
    }
    if let Some(interval) = args.interval_ms {
        config.simulator.tick_interval_ms = interval;
    }
    if args.seed.is_some() {
        config.simulator.seed = args.seed;
    }
    if args.no_push {
        config.engine.push_enabled = false;
    }
    config.validate()?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_headless(config, args))
}

fn parse_class(value: &str) -> Result<ReminderClass> {
    match value.to_lowercase().as_str() {
        "healthy" => Ok(ReminderClass::Healthy),
        "medical" => Ok(ReminderClass::Medical),
        other => bail!("unknown reminder class '{}', expected healthy or medical", other),
    }
}

/// Run the simulator through the engine until done or Ctrl+C
async fn run_headless(config: Config, args: Args) -> Result<()> {
    let channel = Arc::new(MemoryPushChannel::new());
    let engine = Arc::new(NotificationEngine::new(&config, Some(channel.clone())));

    engine.subscribe(|notifications| {
        let mut kinds: Vec<&str> = notifications.iter().map(|n| n.kind.as_str()).collect();
        kinds.sort_unstable();
        info!("Active notifications ({}): {:?}", notifications.len(), kinds);
    });

    if let Some(class) = args.schedule.as_deref() {
        let class = parse_class(class)?;
        let reminder = config.reminders.reminder_config(class, &args.owner, args.condition.clone());
        if engine.schedule_hydration_reminders(&reminder).await {
            info!("Scheduled {} reminders, {} pending in total", class, engine.scheduled_count().await);
        } else {
            warn!("Could not schedule {} reminders", class);
        }
    }

    let sim = &config.simulator;
    let mut simulator = match sim.seed {
        Some(seed) => BottleSimulator::seeded(seed, sim.capacity_ml, sim.goal_ml),
        None => BottleSimulator::new(sim.capacity_ml, sim.goal_ml),
    };

    info!("🚀 SipSense running in headless mode");
    info!("   Press Ctrl+C to shutdown");

    let mut tick = tokio::time::interval(Duration::from_millis(sim.tick_interval_ms.max(1)));
    loop {
        tokio::select! {
            _ = tick.tick() => {
                let (snapshot, stats) = simulator.step(Utc::now());
                engine.update_from_sensor_data(snapshot, stats, config.quiet_hours);

                if sim.ticks > 0 && simulator.sequence() >= sim.ticks {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received, cleaning up...");
                break;
            }
        }
    }

    // Let the last debounced update run
    if engine.has_pending_update() {
        tokio::time::sleep(config.engine.debounce() + Duration::from_millis(100)).await;
    }

    let stats = engine.stats();
    info!(
        "Evaluations: {}, pushes sent: {}, skipped: {}, failed: {}, delivered: {}",
        stats.evaluations,
        stats.pushes_sent,
        stats.pushes_skipped,
        stats.pushes_failed,
        channel.sent_count()
    );

    engine.shutdown();
    info!("SipSense shutdown complete");

    Ok(())
}
