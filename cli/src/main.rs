//! CLI entrypoint for wordchain
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod driver;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use driver::Driver;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use wordchain_application::{
    CompositePublisher, HandlerDeps, ModeRegistry, ModeVoteUseCase, NaturalEndRelay,
    RoundEventPublisher, RoundOrchestrator,
};
use wordchain_domain::{GameMode, ParticipantId, StartReason};
use wordchain_infrastructure::{
    BroadcastEventBus, ChannelActivity, ConfigLoader, ConfigValidationError, InMemoryStats,
    JsonlRoundLogger, SimulatedChannel,
};
use wordchain_presentation::{Cli, ConsoleFormatter, RoundAnnouncer};

/// Participant id the bot posts as when neither the CLI nor the config sets one
const DEFAULT_BOT_ID: u64 = 1;

const SHUTDOWN_GRACE: Duration = Duration::from_millis(200);

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if cli.show_config {
        for line in ConfigLoader::describe_sources() {
            println!("{}", line);
        }
        return Ok(());
    }

    // === Configuration ===
    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let log_dir = cli
        .log_dir
        .clone()
        .or_else(|| file_config.logging.directory_path());
    let _log_guard = init_tracing(&cli, log_dir.as_deref())?;

    info!("Starting wordchain");

    let (mut config, warnings) = match file_config.to_checked_game_config() {
        Ok(checked) => checked,
        Err(ConfigValidationError::Invalid(issues)) => {
            for issue in issues.iter().filter(|i| i.is_error()) {
                error!("{}", issue.message);
            }
            return Err(ConfigValidationError::Invalid(issues).into());
        }
    };
    for issue in &warnings {
        warn!("{}", issue.message);
    }

    // CLI overrides
    if let Some(mode) = &cli.mode {
        config.initial_mode = mode
            .parse::<GameMode>()
            .with_context(|| format!("--mode {}", mode))?;
        if !config.is_enabled(config.initial_mode) {
            anyhow::bail!("--mode {} is not an enabled mode", mode);
        }
    }
    if let Some(seconds) = cli.vote_window {
        if seconds == 0 {
            anyhow::bail!("--vote-window cannot be 0");
        }
        config.vote_window = Duration::from_secs(seconds);
    }
    let bot_id = ParticipantId(
        cli.bot_id
            .or(config.bot_id.map(|id| id.0))
            .unwrap_or(DEFAULT_BOT_ID),
    );
    config.bot_id = Some(bot_id);

    // === Dependency Injection ===
    let (activity_tx, activity_rx) = mpsc::unbounded_channel();
    let channel = Arc::new(SimulatedChannel::new(bot_id).with_observer(activity_tx));
    let stats = Arc::new(InMemoryStats::new());
    let bus = Arc::new(BroadcastEventBus::new());

    let mut publishers: Vec<Arc<dyn RoundEventPublisher>> = vec![bus.clone()];
    let event_log = cli
        .event_log
        .clone()
        .or_else(|| file_config.logging.event_log_path());
    if let Some(path) = event_log
        && let Some(logger) = JsonlRoundLogger::new(&path)
    {
        info!("Writing round events to {}", logger.path().display());
        publishers.push(Arc::new(logger));
    }

    let deps = HandlerDeps::new(
        channel.clone(),
        stats,
        Arc::new(CompositePublisher::new(publishers)),
    );
    let registry = ModeRegistry::standard(deps, &config);

    let mut orchestrator = RoundOrchestrator::new(registry, &config);
    if let Some(seed) = cli.seed {
        orchestrator = orchestrator.with_rng(StdRng::seed_from_u64(seed));
    }
    let orchestrator = Arc::new(orchestrator);
    let mode_vote = Arc::new(ModeVoteUseCase::new(
        orchestrator.clone(),
        channel.clone(),
        &config,
    ));

    // Subscribers must exist before the first round publishes anything
    let cancel = CancellationToken::new();
    let relay = tokio::spawn(
        NaturalEndRelay::new(orchestrator.clone()).run(bus.subscribe(), cancel.clone()),
    );
    let announcer =
        tokio::spawn(RoundAnnouncer::new(channel.clone()).run(bus.subscribe(), cancel.clone()));
    let printer = tokio::spawn(print_activity(activity_rx, bot_id, cancel.clone()));

    println!("{}", ConsoleFormatter::welcome(&config.enabled_modes));

    if let Err(e) = orchestrator
        .start_round(config.initial_mode, StartReason::Startup)
        .await
    {
        error!("Could not start the first round: {}", e);
        eprintln!("{}", ConsoleFormatter::error(&e.to_string()));
    }

    Driver::new(orchestrator.clone(), mode_vote, channel).run().await?;

    if orchestrator.force_terminate("shutdown").await {
        // Let the announcer post the final summary
        tokio::time::sleep(SHUTDOWN_GRACE).await;
    }
    cancel.cancel();
    let _ = tokio::join!(relay, announcer, printer);

    info!("wordchain stopped");
    Ok(())
}

/// Console plus, when `log_dir` is set, a daily rolling file
///
/// `-v` flags take precedence over `RUST_LOG`; with neither, only warnings
/// are shown.
fn init_tracing(cli: &Cli, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = if cli.verbose > 0 {
        EnvFilter::new(cli.log_filter())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()))
    };

    let console = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let Some(dir) = log_dir else {
        tracing_subscriber::registry()
            .with(filter)
            .with(console)
            .init();
        return Ok(None);
    };

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("wordchain")
        .filename_suffix("log")
        .build(dir)
        .with_context(|| format!("Could not open log directory {}", dir.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .init();

    Ok(Some(guard))
}

/// Print channel activity until cancelled
async fn print_activity(
    mut activity: mpsc::UnboundedReceiver<ChannelActivity>,
    bot_id: ParticipantId,
    cancel: CancellationToken,
) {
    loop {
        let next = tokio::select! {
            _ = cancel.cancelled() => break,
            next = activity.recv() => next,
        };

        match next {
            Some(ChannelActivity::Posted(message)) => println!(
                "{}",
                ConsoleFormatter::post(
                    message.id,
                    message.author,
                    message.author == bot_id,
                    &message.content
                )
            ),
            Some(ChannelActivity::Reacted { message, emoji, by }) => println!(
                "{}",
                ConsoleFormatter::reaction(message, &emoji, by.participant, by.is_bot)
            ),
            None => break,
        }
    }
}
