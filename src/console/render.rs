//! Text rendering of the dashboard views.
use super::printer::Printer;
use crate::core::upload::{Progress, UploadStatus};
use crate::core::view::{Panel, PeersPanel, RecentActivity, StatCard, Tab, TorrentsPanel, UploadPanel, View};

/// Renders a whole view: the tab bar followed by the active panel.
pub fn view(view: &View, printer: &impl Printer) {
    printer.println(&tab_bar(view.tab));
    printer.println("");

    match &view.panel {
        Panel::Upload { upload, stats } => {
            upload_panel(upload, printer);
            printer.println("");
            stat_cards(stats, printer);
        }
        Panel::Torrents(panel) => torrents_panel(panel, printer),
        Panel::Peers(panel) => peers_panel(panel, printer),
        Panel::Stats { stats, recent } => {
            stat_cards(stats, printer);
            printer.println("");
            recent_activity(recent, printer);
        }
    }
}

/// The tab bar, with the active tab in brackets.
#[must_use]
pub fn tab_bar(active: Tab) -> String {
    Tab::ALL
        .iter()
        .map(|tab| {
            if *tab == active {
                format!("[{}]", tab.label())
            } else {
                format!(" {} ", tab.label())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A one-line description of an upload in progress.
#[must_use]
pub fn upload_progress(status: &UploadStatus) -> Option<String> {
    match status {
        UploadStatus::InProgress(Progress::Percent(percent)) => Some(format!("Uploading... {percent}%")),
        UploadStatus::InProgress(Progress::Indeterminate) => Some("Uploading...".to_string()),
        _ => None,
    }
}

pub fn upload_panel(panel: &UploadPanel, printer: &impl Printer) {
    match panel {
        UploadPanel::Idle => printer.println("Choose a file to create a torrent."),
        UploadPanel::InProgress { percent: Some(percent) } => printer.println(&format!("Uploading... {percent}%")),
        UploadPanel::InProgress { percent: None } => printer.println("Uploading..."),
        UploadPanel::Succeeded {
            message,
            info_hash,
            file_size,
            pieces,
        } => {
            printer.println(message);
            printer.println(&format!("  Info Hash: {info_hash}"));
            printer.println(&format!("  File Size: {file_size}"));
            printer.println(&format!("  Pieces: {pieces}"));
        }
        UploadPanel::Failed { message } => printer.println(&format!("Error: {message}")),
    }
}

fn stat_cards(cards: &[StatCard], printer: &impl Printer) {
    for card in cards {
        printer.println(&format!("{:<16}{:>12}", card.title, card.value));
    }
}

fn torrents_panel(panel: &TorrentsPanel, printer: &impl Printer) {
    if panel.rows.is_empty() {
        printer.println("No torrents yet. Upload a file to create the first one.");
        return;
    }

    printer.println(&panel.title);

    for row in &panel.rows {
        let marker = if row.selected { ">" } else { " " };

        printer.println("");
        printer.println(&format!("{marker} {} [{}]", row.name, row.status));
        printer.println(&format!(
            "    {} | {} | {} | {}",
            row.size, row.swarm, row.downloads, row.created
        ));
        printer.println(&format!("    {} ({})", row.pieces, row.piece_size));
        printer.println(&format!("    Info Hash: {}", row.info_hash));
    }
}

fn peers_panel(panel: &PeersPanel, printer: &impl Printer) {
    match panel {
        PeersPanel::NoSelection => printer.println("Select a torrent to see its peers."),
        PeersPanel::Loading { torrent } => printer.println(&format!("Loading peers for \"{torrent}\"...")),
        PeersPanel::Failed { torrent, message } => {
            printer.println(&format!("Failed to load the peers for \"{torrent}\": {message}"));
        }
        PeersPanel::Empty { torrent } => printer.println(&format!("No active peers for \"{torrent}\"")),
        PeersPanel::List { title, rows } => {
            printer.println(title);
            printer.println("");
            printer.println(&format!(
                "{:<28} {:<22} {:<8} {:<24} {}",
                "Peer", "Peer ID", "Status", "Transfer", "Last Seen"
            ));

            for row in rows {
                let transfer = format!("up {} / down {}", row.uploaded, row.downloaded);

                printer.println(&format!(
                    "{:<28} {:<22} {:<8} {:<24} {}",
                    row.address, row.peer_id, row.role, transfer, row.last_seen
                ));

                if let Some(remaining) = &row.remaining {
                    printer.println(&format!("{:<60}{remaining}", ""));
                }
            }
        }
    }
}

fn recent_activity(recent: &[RecentActivity], printer: &impl Printer) {
    printer.println("Recent Activity");

    for activity in recent {
        printer.println(&format!(
            "  {} ({}) {}, {}",
            activity.name, activity.created, activity.seeders, activity.leechers
        ));
    }
}
