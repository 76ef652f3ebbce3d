//! Console dashboard for a Torrust tracker.
//!
//! Keep the dashboard in sync with the tracker and render it on every change:
//!
//! ```text
//! cargo run -- watch
//! cargo run -- watch --tab peers --select 9e0217d0fa71c87332cd8bf9dbeabcb2c2cf3c4d
//! ```
//!
//! One-shot commands:
//!
//! ```text
//! cargo run -- upload ./ubuntu.iso
//! cargo run -- peers 9e0217d0fa71c87332cd8bf9dbeabcb2c2cf3c4d
//! cargo run -- download 9e0217d0fa71c87332cd8bf9dbeabcb2c2cf3c4d --output ./torrents
//! cargo run -- stats
//! ```
//!
//! Provide the configuration with a file path or the whole TOML content:
//!
//! ```text
//! TORRUST_DASHBOARD_CONFIG_TOML_PATH="./share/default/config/dashboard.development.toml" cargo run -- stats
//! TORRUST_DASHBOARD_CONFIG_TOML=$(cat "./share/default/config/dashboard.development.toml") cargo run -- stats
//! ```
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use torrust_tracker_dashboard_clock::clock::Time;
use torrust_tracker_dashboard_configuration::Configuration;
use torrust_tracker_dashboard_primitives::info_hash::InfoHash;

use super::console::Console;
use super::printer::Printer;
use super::render;
use crate::bootstrap;
use crate::core::api::Api;
use crate::core::dashboard::Dashboard;
use crate::core::upload::UploadFile;
use crate::core::view::{Panel, Tab};
use crate::{signals, CurrentClock};

/// How often the watched dashboard is rendered even if nothing changed, so
/// relative times like "5m ago" stay current.
const RENDER_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML configuration file.
    #[clap(short, long)]
    config_toml_path: Option<String>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Keep the dashboard in sync with the tracker and render it on every change.
    Watch {
        /// The tab to show.
        #[clap(long, default_value_t = Tab::Upload)]
        tab: Tab,

        /// Info-hash of the torrent whose peers are shown.
        #[clap(long)]
        select: Option<InfoHash>,
    },

    /// Upload a file to the tracker to create a torrent for it.
    Upload { path: PathBuf },

    /// Show the peers of a torrent.
    Peers { info_hash: InfoHash },

    /// Download the torrent file of a torrent.
    Download {
        info_hash: InfoHash,

        /// Directory where the torrent file is saved. It defaults to the
        /// configured downloads directory.
        #[clap(short, long)]
        output: Option<Utf8PathBuf>,
    },

    /// Show the tracker statistics.
    Stats,
}

/// # Errors
///
/// Will return an error if the configuration can't be loaded or the command
/// fails.
pub async fn run() -> Result<()> {
    let args = Args::parse();

    let (config, dashboard) = bootstrap::app::setup(args.config_toml_path.as_deref())?;

    let console = Console::new();

    match args.command {
        Command::Watch { tab, select } => watch(&config, &dashboard, tab, select, &console).await,
        Command::Upload { path } => upload(&dashboard, &path, &console).await,
        Command::Peers { info_hash } => peers(&dashboard, &info_hash, &console).await,
        Command::Download { info_hash, output } => {
            let output = output.unwrap_or_else(|| config.downloads.output_dir.clone());
            download(&dashboard, &info_hash, &output, &console).await
        }
        Command::Stats => stats(&dashboard, &console).await,
    }
}

/// Renders the dashboard on every state change until the process receives a
/// shutdown signal.
///
/// # Errors
///
/// It does not fail: tracker failures are logged and the last known state is
/// kept on screen.
pub async fn watch<A: Api>(
    config: &Configuration,
    dashboard: &Arc<Dashboard<A>>,
    tab: Tab,
    select: Option<InfoHash>,
    printer: &impl Printer,
) -> Result<()> {
    dashboard.switch_tab(tab);

    let mut changes = dashboard.subscribe();
    let mut pending_selection = select;

    let job = bootstrap::jobs::polling::start_job(&config.polling, dashboard);

    let mut render_interval = tokio::time::interval(RENDER_INTERVAL);

    let shutdown = signals::global_shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        if let Some(info_hash) = &pending_selection {
            if dashboard.select_by_info_hash(info_hash).is_ok() {
                pending_selection = None;
            }
        }

        printer.clear();
        render::view(&dashboard.view(CurrentClock::now()), printer);

        tokio::select! {
            changed = changes.changed() => {
                if !changed {
                    break;
                }
            }
            _ = render_interval.tick() => {}
            () = &mut shutdown => {
                tracing::info!("Stopping the dashboard..");
                break;
            }
        }
    }

    job.stop().await;

    Ok(())
}

/// Uploads a file and prints the progress and the result.
///
/// # Errors
///
/// Will return an error if the file can't be read or the tracker rejects it.
pub async fn upload<A: Api>(dashboard: &Dashboard<A>, path: &std::path::Path, printer: &impl Printer) -> Result<()> {
    let file = UploadFile::open(path)
        .await
        .with_context(|| format!("can't read the file {}", path.display()))?;

    let mut status = dashboard.uploader().subscribe();

    let upload = dashboard.upload(file);
    tokio::pin!(upload);

    let result = loop {
        tokio::select! {
            result = &mut upload => break result,
            Ok(()) = status.changed() => {
                if let Some(progress) = render::upload_progress(&status.borrow_and_update()) {
                    printer.print(&format!("\r{progress}"));
                }
            }
        }
    };

    printer.println("");

    let view = dashboard.view(CurrentClock::now());

    if let Panel::Upload { upload, .. } = &view.panel {
        render::upload_panel(upload, printer);
    }

    result.map(|_| ()).context("the upload failed")
}

/// Prints the peers of a torrent.
///
/// # Errors
///
/// Will return an error if the torrent list can't be fetched or the torrent
/// is not in it.
pub async fn peers<A: Api>(dashboard: &Dashboard<A>, info_hash: &InfoHash, printer: &impl Printer) -> Result<()> {
    refresh(dashboard).await?;

    if let Some(fetch) = dashboard.select_by_info_hash(info_hash)? {
        fetch.await.context("the peer fetch task failed")?;
    }

    dashboard.switch_tab(Tab::Peers);

    render::view(&dashboard.view(CurrentClock::now()), printer);

    Ok(())
}

/// Saves the torrent file of a torrent in `output`.
///
/// # Errors
///
/// Will return an error if the torrent is unknown or its file can't be
/// downloaded or saved.
pub async fn download<A: Api>(
    dashboard: &Dashboard<A>,
    info_hash: &InfoHash,
    output: &camino::Utf8Path,
    printer: &impl Printer,
) -> Result<()> {
    refresh(dashboard).await?;

    let torrent = dashboard
        .torrents()
        .into_iter()
        .find(|torrent| &torrent.info_hash == info_hash)
        .ok_or_else(|| anyhow!("torrent {info_hash} is not in the torrent list"))?;

    let path = dashboard.download(&torrent, output).await?;

    printer.println(&format!("Torrent file saved to {path}"));

    Ok(())
}

/// Prints the tracker statistics.
///
/// # Errors
///
/// Will return an error if the tracker state can't be fetched.
pub async fn stats<A: Api>(dashboard: &Dashboard<A>, printer: &impl Printer) -> Result<()> {
    refresh(dashboard).await?;

    dashboard.switch_tab(Tab::Stats);

    render::view(&dashboard.view(CurrentClock::now()), printer);

    Ok(())
}

/// Fetches the torrent list and the statistics once.
async fn refresh<A: Api>(dashboard: &Dashboard<A>) -> Result<()> {
    dashboard
        .synchronizer()
        .tick()
        .join()
        .await
        .context("can't fetch the tracker state")
}
