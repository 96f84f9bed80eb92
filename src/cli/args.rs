use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "waqt", version, author, about = "Today's mosque prayer times and the next jamaah")]
pub struct Cli {
    /// Mosque key from the config (defaults to `default_mosque`)
    #[arg(short, long, global = true)]
    pub mosque: Option<String>,

    /// Read the timetable page from a file instead of fetching it
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    /// Reference time instead of now, e.g. 2026-02-18T13:00
    #[arg(long, global = true)]
    pub at: Option<String>,

    /// Config file to use instead of the platform default
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory for the cached rows
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a config file with the default mosques and prayer list
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        reset: bool,
    },
    /// Show today's prayer times with the next jamaah highlighted
    Times,
    /// Show only the next prayer and the time left
    Next,
    /// One line per mosque with all of today's times
    Summary,
    /// List configured mosques
    Mosques,
    /// Inspect or drop the cached row
    Cache {
        #[command(subcommand)]
        action: CacheCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Print the cached row as JSON
    Show,
    /// Delete the cached row
    Clear,
}
