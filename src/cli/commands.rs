use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tsk", about = concat!("tsk v", env!("CARGO_PKG_VERSION"), " - a plain-text task list"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding task files (default: $TSK_DIR, config, then ~/.tsk)
    #[arg(short = 'd', long = "dir", global = true)]
    pub dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task to a list (creates the list if needed)
    Add(AddArgs),
    /// Show the tasks in a list
    List(ListArgs),
    /// Show a single task
    Show(ShowArgs),
    /// Search notes and tags (case-insensitive)
    Search(SearchArgs),
    /// Change a task's note, priority or tags
    Modify(ModifyArgs),
    /// Remove a task and renumber the rest
    Rm(RmArgs),
    /// Copy a list to another file name
    Cp(CpArgs),
    /// List saved task files
    Files,
    /// Delete a task file
    Delete(DeleteArgs),
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Task file name (`.tsk` is added if missing)
    pub list: String,
    /// Group by priority instead of id order
    #[arg(long, conflicts_with = "by_number")]
    pub by_priority: bool,
    /// Force id order even if config says otherwise
    #[arg(long)]
    pub by_number: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    pub list: String,
    /// Task number
    pub id: String,
}

#[derive(Args)]
pub struct SearchArgs {
    pub list: String,
    /// Text to look for in notes and tags
    pub query: String,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    pub list: String,
    /// Task text
    pub note: String,
    /// low, medium or high
    #[arg(short, long, default_value = "low")]
    pub priority: String,
    /// Free-text tags
    #[arg(short, long, default_value = "")]
    pub tags: String,
}

#[derive(Args)]
pub struct ModifyArgs {
    pub list: String,
    /// Task number
    pub id: String,
    /// New task text
    #[arg(long)]
    pub note: Option<String>,
    /// New priority (low, medium or high)
    #[arg(short, long)]
    pub priority: Option<String>,
    /// New tags
    #[arg(short, long)]
    pub tags: Option<String>,
}

#[derive(Args)]
pub struct RmArgs {
    pub list: String,
    /// Task number
    pub id: String,
}

#[derive(Args)]
pub struct CpArgs {
    /// Source list
    pub from: String,
    /// Destination list (overwritten if it exists)
    pub to: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Task file to delete
    pub list: String,
}
