// src/lib.rs

pub mod cli;
pub mod clients;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod schedule;
pub mod state;
pub mod tasks;
pub mod types;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::CommandFactory;
use tracing::{debug, info};

use crate::cli::{CliArgs, Command};
use crate::config::{load_settings, Settings};
use crate::engine::{CoreRuntime, Runtime};
use crate::errors::BotError;
use crate::exec::{InProcessLauncher, ProcessLauncher};
use crate::fs::RealFileSystem;
use crate::schedule::{TaskKind, TaskMask, TickScheduler};
use crate::state::StateStore;
use crate::tasks::{run_task, TaskContext, ROBOT_ICON};
use crate::types::{LaunchMode, RunStatus};

/// High-level entry point used by `main.rs`.
///
/// Dispatches the subcommand. Everything except `usage` loads settings
/// first; `scheduler` blocks until another invocation runs `kill`.
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = args.config.as_ref().map(PathBuf::from);
    let settings = || load_settings(config_path.as_deref());

    match args.command.clone().unwrap_or(Command::Usage) {
        Command::Usage => print_usage(),
        Command::Scheduler { tokens } => run_scheduler(settings()?, &tokens, &args).await,
        Command::Task { tokens } => {
            let kind = TaskKind::first_in_tokens(&tokens)
                .ok_or_else(|| BotError::UnknownTask(tokens.join(" ")))?;
            let ctx = TaskContext::from_settings(settings()?)?;
            run_task(kind, &ctx).await
        }
        Command::Kill => {
            let store = state_store(&settings()?);
            store.set_run_status(RunStatus::Done)?;
            info!(marker = %store.path_of(state::StateKey::RunStatus).display(), "shutdown requested");
            Ok(())
        }
        Command::Message { text } => {
            let ctx = TaskContext::from_settings(settings()?)?;
            let channel = ctx.settings.slack.test_channel.clone();
            let delivery = ctx
                .announcer
                .announce(&channel, &text.join(" "), ROBOT_ICON)
                .await;
            if !delivery.ok {
                bail!("message to #{channel} failed: {}", delivery.detail);
            }
            Ok(())
        }
        Command::Channels => {
            let ctx = TaskContext::from_settings(settings()?)?;
            let channels = ctx.announcer.notifier().list_channels().await?;
            for channel in channels {
                println!("{}\t{}", channel.id, channel.name);
            }
            Ok(())
        }
        Command::Check => {
            println!("{}", render_check(&settings()?, config_path.as_deref()));
            Ok(())
        }
    }
}

/// Decode the mask and run the tick loop with the configured launcher.
async fn run_scheduler(settings: Settings, tokens: &[String], args: &CliArgs) -> Result<()> {
    let mask = TaskMask::from_tokens(tokens);
    debug!(?mask, ?tokens, "decoded task mask");

    let scheduler = TickScheduler::new(mask, settings.scheduler.base_frequency);
    let core = CoreRuntime::new(scheduler);
    let store = state_store(&settings);
    let tick = settings.scheduler.tick;

    match settings.scheduler.launch_mode {
        LaunchMode::Process => {
            let program = match &settings.scheduler.worker_program {
                Some(p) => p.clone(),
                None => std::env::current_exe().context("locating the running executable")?,
            };
            let launcher = ProcessLauncher::new(
                program,
                args.config.as_ref().map(PathBuf::from),
                args.log_level,
            );
            Runtime::new(core, store, launcher, tick).run().await
        }
        LaunchMode::InProcess => {
            let max_workers = settings.scheduler.max_workers;
            let ctx = Arc::new(TaskContext::from_settings(settings)?);
            let launcher = InProcessLauncher::new(ctx, max_workers);
            Runtime::new(core, store, launcher, tick).run().await
        }
    }
}

fn state_store(settings: &Settings) -> StateStore {
    StateStore::new(
        Arc::new(RealFileSystem),
        &settings.station.state_dir,
        &settings.station.logger_dir,
    )
}

fn print_usage() -> Result<()> {
    CliArgs::command()
        .print_long_help()
        .context("printing usage")?;
    println!();
    Ok(())
}

fn loaded(secret: &str) -> &'static str {
    if secret.is_empty() { "missing" } else { "loaded" }
}

/// Render the resolved settings for `check`. Secrets are reported only as
/// loaded or missing.
pub fn render_check(settings: &Settings, config_path: Option<&Path>) -> String {
    let source = match config_path {
        Some(p) => p.display().to_string(),
        None if config::default_config_path().exists() => {
            config::default_config_path().display().to_string()
        }
        None => "(defaults)".to_string(),
    };

    let s = &settings.scheduler;
    let st = &settings.station;
    let mut lines = vec![
        "stationwatch check".to_string(),
        format!("  config = {source}"),
        String::new(),
        "scheduler:".to_string(),
        format!("  base_frequency = {}", s.base_frequency),
        format!("  tick = {:?}", s.tick),
        format!("  launch_mode = {:?}", s.launch_mode),
        format!("  max_workers = {}", s.max_workers),
    ];
    if let Some(ref p) = s.worker_program {
        lines.push(format!("  worker_program = {}", p.display()));
    }
    for kind in TaskKind::ALL {
        lines.push(format!(
            "  {:<14} every {} ticks ({} / {})",
            kind.name(),
            s.base_frequency.saturating_mul(kind.multiplier()),
            kind.short_flag(),
            kind.long_flag()
        ));
    }
    let stream_url = if st.stream_url.is_empty() { "(not set)" } else { st.stream_url.as_str() };
    lines.extend([
        String::new(),
        "station:".to_string(),
        format!("  stream_url = {stream_url}"),
        format!("  probe_timeout = {:?}", st.probe_timeout),
        format!("  probe_attempts = {}", st.probe_attempts),
        format!("  state_dir = {}", st.state_dir.display()),
        format!("  logger_dir = {}", st.logger_dir.display()),
        String::new(),
        "slack:".to_string(),
        format!("  token: {}", loaded(&settings.slack.token)),
        format!("  display_name = {}", settings.slack.display_name),
        format!("  nowplaying_channel = {}", settings.slack.nowplaying_channel),
        format!("  alerts_channel = {}", settings.slack.alerts_channel),
        format!("  test_channel = {}", settings.slack.test_channel),
        String::new(),
        "tunein:".to_string(),
        format!("  station_id: {}", loaded(&settings.tunein.station_id)),
        format!("  partner_id: {}", loaded(&settings.tunein.partner_id)),
        format!("  partner_key: {}", loaded(&settings.tunein.partner_key)),
        String::new(),
        "genius:".to_string(),
        format!("  token: {}", loaded(&settings.genius.token)),
        String::new(),
        "update:".to_string(),
        format!("  command = {}", settings.update.command),
        format!("  repo_dir = {}", settings.update.repo_dir.display()),
    ]);

    lines.join("\n")
}
