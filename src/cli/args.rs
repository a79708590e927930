//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::domain::GridSize;

/// Browser start page bookmarks: tabs, folders and drag-style moves
#[derive(Parser, Debug)]
#[command(name = "startpage")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Data directory (default: ~/.startpage)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub dir: Option<PathBuf>,

    /// Tab to work on (default: configured or first tab)
    #[arg(short, long, global = true)]
    pub tab: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the active tab as a tree
    Show {
        /// Show only the content of this folder
        #[arg(long)]
        folder: Option<String>,
    },

    /// Add a bookmark
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        url: String,
        /// Target folder (default: tab root)
        #[arg(long)]
        folder: Option<String>,
        /// Icon image source
        #[arg(long)]
        icon: Option<String>,
        /// Background color, e.g. "#ffffff"
        #[arg(long)]
        color: Option<String>,
    },

    /// Delete a bookmark or folder by id
    Rm {
        id: String,
    },

    /// Change a bookmark or folder in place
    Update {
        id: String,
        /// New bookmark title
        #[arg(long)]
        title: Option<String>,
        /// New bookmark url
        #[arg(long)]
        url: Option<String>,
        /// New folder name
        #[arg(long)]
        name: Option<String>,
        /// New folder grid size, e.g. 2x3
        #[arg(long)]
        size: Option<GridSize>,
    },

    /// Manage folders
    Folder {
        #[command(subcommand)]
        command: FolderCommands,
    },

    /// Move an item like a completed drag gesture
    Move {
        /// Item to move
        id: String,
        /// Destination container: "bookmarks" or "folder-<id>"
        #[arg(long)]
        to: String,
        /// Position inside the destination container
        #[arg(long)]
        index: usize,
    },

    /// Filter the active tab's top-level items
    Search {
        query: String,
    },

    /// Manage tabs
    Tab {
        #[command(subcommand)]
        command: TabCommands,
    },

    /// Write the tab config as JSON (default: tab-config-<date>.json)
    Export {
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Replace the tab config with a JSON file
    Import {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Replace the tab config with the default one
    Reset,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum FolderCommands {
    /// Create an empty folder at the tab root
    Create {
        name: String,
        /// Grid size, e.g. 2x2
        #[arg(long, default_value = "1x1")]
        size: GridSize,
    },
    /// Delete a folder and its bookmarks
    Rm {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum TabCommands {
    /// List tabs
    List,
    /// Add an empty tab
    Add {
        name: String,
        #[arg(long, default_value = "home")]
        icon: String,
    },
    /// Delete a tab and everything in it
    Rm {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Show config file locations
    Path,
    /// Print a config template
    Template,
}
