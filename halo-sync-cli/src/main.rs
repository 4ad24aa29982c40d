//! `halo-sync` entry point
//!
//! Builds the application state over a local folder and runs one command.
//! `watch` keeps running, pushing manual saves and reloading the config
//! when `halo.json` changes.

mod cli;
mod picker;

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use halo_sync_app::adapters::{LocalWorkspace, MarkdownSavePoller, PollingConfigWatcher};
use halo_sync_app::{AppState, AppStateBuilder};
use halo_sync_core::error::CoreError;
use halo_sync_core::traits::Workspace;
use halo_sync_core::types::{
    ConfigChangeEvent, PickOutcome, PublishOutcome, PullOutcome, PushOutcome, SaveEvent,
};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Command};
use picker::TerminalPicker;

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr, command output to stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Log a core failure at the level its kind deserves.
fn report(err: &CoreError) {
    if err.is_expected() {
        tracing::warn!("{err}");
    } else {
        tracing::error!("{err}");
    }
}

fn fail(err: CoreError) -> anyhow::Error {
    report(&err);
    anyhow::anyhow!(err.user_message())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let root = std::fs::canonicalize(&cli.workspace)
        .with_context(|| format!("workspace {} is not accessible", cli.workspace.display()))?;
    let interval = Duration::from_millis(cli.poll_interval_ms.max(10));
    let workspace = Arc::new(LocalWorkspace::new(&root));

    let mut builder = AppStateBuilder::new()
        .workspace(workspace.clone())
        .picker(Arc::new(TerminalPicker));
    let mut config_events = None;
    if cli.command == Command::Watch {
        let (watcher, rx) = PollingConfigWatcher::new(interval);
        builder = builder.config_watcher(Arc::new(watcher));
        config_events = Some(rx);
    }
    let state = builder.build().map_err(fail)?;

    match cli.command {
        Command::CheckConfig => {
            let config = state.check_config().await.map_err(fail)?;
            let path = state.ctx.config_store.config_path().await.unwrap_or_default();
            println!("Config OK: {} ({})", config.blog_url, path.display());
        }
        Command::ReloadConfig => {
            let config = state.reload_config().await.map_err(fail)?;
            println!("Config reloaded: {}", config.blog_url);
        }
        Command::List => match state.sync_engine.open_catalog_picker().await.map_err(fail)? {
            PickOutcome::Pulled(outcome) => print_pull(&outcome),
            PickOutcome::Cancelled => println!("Cancelled"),
        },
        Command::Pull { id } => {
            let outcome = state.sync_engine.pull(id).await.map_err(fail)?;
            print_pull(&outcome);
        }
        Command::Push { file } => {
            let text = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("cannot read {}", file.display()))?;
            let outcome = state
                .sync_engine
                .on_save(SaveEvent::manual(&file, text))
                .await
                .map_err(fail)?;
            print_push(&file, &outcome);
        }
        Command::Publish { file } => {
            match state
                .publish_controller
                .publish_file(&file)
                .await
                .map_err(fail)?
            {
                PublishOutcome::Published(post) => {
                    println!("Published {:?} (post {})", post.title(), post.id());
                }
                PublishOutcome::Skipped(reason) => println!("Skipped {}: {reason}", file.display()),
            }
        }
        Command::Watch => {
            if let Some(rx) = config_events {
                watch(&state, workspace, rx, interval).await;
            }
        }
    }
    Ok(())
}

fn print_pull(outcome: &PullOutcome) {
    match outcome {
        PullOutcome::Written { path, .. } => println!("Pulled into {}", path.display()),
        PullOutcome::Unchanged { path, .. } => println!("Already up to date: {}", path.display()),
    }
}

fn print_push(file: &Path, outcome: &PushOutcome) {
    match outcome {
        PushOutcome::Updated(post) => println!("Pushed {:?} (post {})", post.title(), post.id()),
        PushOutcome::Skipped(reason) => println!("Skipped {}: {reason}", file.display()),
    }
}

async fn watch(
    state: &AppState,
    workspace: Arc<LocalWorkspace>,
    mut config_events: mpsc::UnboundedReceiver<ConfigChangeEvent>,
    interval: Duration,
) {
    // Loading up front registers the config watcher
    let root = workspace.root().unwrap_or_default();
    match state.check_config().await {
        Ok(config) => tracing::info!("Watching {} for {}", root.display(), config.blog_url),
        Err(e) => report(&e),
    }

    let (tx, mut saves) = mpsc::channel(64);
    let poller = MarkdownSavePoller::new(workspace).spawn(interval, tx);

    loop {
        tokio::select! {
            Some(event) = config_events.recv() => {
                state.on_config_change(event).await;
                match state.check_config().await {
                    Ok(config) => tracing::info!("Config reloaded: {}", config.blog_url),
                    Err(e) => report(&e),
                }
            }
            Some(event) = saves.recv() => {
                let path = event.path.clone();
                match state.sync_engine.on_save(event).await {
                    Ok(PushOutcome::Updated(post)) => {
                        println!("Pushed {:?} (post {})", post.title(), post.id());
                    }
                    Ok(PushOutcome::Skipped(reason)) => {
                        tracing::debug!("Skipped {}: {reason}", path.display());
                    }
                    Err(e) => {
                        report(&e);
                        eprintln!("Failed to push {}: {}", path.display(), e.user_message());
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, stopping");
                break;
            }
        }
    }

    poller.abort();
}
