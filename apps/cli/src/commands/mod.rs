//! CLI subcommands.

pub mod download;
pub mod history;
pub mod selection;
pub mod settings;

use std::path::PathBuf;

use clap::Subcommand;

use crate::state::AppState;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Toggle assets in the selection by id
    Select {
        /// Asset ids to add (or remove, if already selected)
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Show the current selection
    List,
    /// Remove every asset from the selection
    Clear,
    /// Show or change the interaction mode (view, multi-select)
    Mode {
        mode: Option<String>,
    },
    /// Download the selection as one zip archive
    Download {
        /// Directory to write the archive to
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List past bulk downloads
    History {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// Replace the selection with the assets of a past download
    Reselect {
        history_id: String,
    },
    /// Show the configuration, one key, or set a key
    Config {
        key: Option<String>,
        value: Option<String>,
    },
}

pub async fn run(command: Command, state: &mut AppState) -> anyhow::Result<()> {
    match command {
        Command::Select { ids } => selection::select(state, &ids).await,
        Command::List => selection::list(state),
        Command::Clear => selection::clear(state),
        Command::Mode { mode } => selection::mode(state, mode.as_deref()),
        Command::Download { out } => download::run(state, out).await,
        Command::History { page, limit } => history::list(state, page, limit).await,
        Command::Reselect { history_id } => history::reselect(state, &history_id).await,
        Command::Config { key, value } => settings::run(state, key.as_deref(), value.as_deref()),
    }
}

/// Human-readable byte count (`512B`, `12KB`, `3.4MB`).
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    let bytes_f = bytes as f64;
    if bytes_f < KB {
        format!("{bytes}B")
    } else if bytes_f < MB {
        format!("{}KB", (bytes_f / KB).round())
    } else {
        format!("{:.1}MB", bytes_f / MB)
    }
}
