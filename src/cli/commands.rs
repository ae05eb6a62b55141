use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::STORE_ENV;
use crate::editor::{ChecklistPath, ReviewField, ReviewPath};
use crate::entity::Weekday;

#[derive(Parser, Debug)]
#[command(name = "goalplan")]
#[command(version, about = "A local goal planner with checklists, reviews and milestones")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path of the goal list file (defaults to .goalplan/goals.json in the project root)
    #[arg(long, global = true, env = STORE_ENV, value_name = "PATH")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all goals
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one goal with all of its sections
    Show {
        /// Goal number (like "2"), title, or id prefix
        goal: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a new goal after the existing ones
    Add {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a goal and renumber the rest ("Goal 1" can't be deleted)
    Delete {
        /// Goal number, title, or id prefix
        goal: String,

        /// Skip the confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Export one goal to a JSON file
    Export {
        /// Goal number, title, or id prefix
        goal: String,

        /// Directory to write the file into
        #[arg(long, short = 'o', value_name = "DIR")]
        out: Option<PathBuf>,

        /// Print the JSON instead of writing a file
        #[arg(long, conflicts_with = "out")]
        stdout: bool,
    },

    /// Import a goal from an exported JSON file
    Import {
        /// File to import
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Edit checklist rows
    Item(ItemCommand),

    /// Edit weekly or monthly reviews
    Review(ReviewCommand),

    /// Set the dream of a goal's vision
    Dream {
        /// Goal number, title, or id prefix
        goal: String,

        /// What achieving this goal looks like
        text: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set the preferred time of day for a goal
    Time {
        /// Goal number, title, or id prefix
        goal: String,

        /// Preferred time, e.g. "7am"
        text: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Select or deselect a weekday for a goal
    Day {
        /// Goal number, title, or id prefix
        goal: String,

        /// Weekday (mon, tue, wed, thu, fri, sat, sun)
        day: Weekday,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
pub struct ItemCommand {
    #[command(subcommand)]
    pub action: ItemAction,
}

#[derive(Subcommand, Debug)]
pub enum ItemAction {
    /// Append an empty row
    Add {
        /// Goal number, title, or id prefix
        goal: String,

        /// List path, e.g. "system.dailyRoutines" or "obstacles"
        list: ChecklistPath,

        /// Text for the new row
        text: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove a row
    Remove {
        goal: String,
        list: ChecklistPath,
        id: u64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replace a row's text
    Set {
        goal: String,
        list: ChecklistPath,
        id: u64,
        text: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check or uncheck a row
    Toggle {
        goal: String,
        list: ChecklistPath,
        id: u64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
pub struct ReviewCommand {
    #[command(subcommand)]
    pub action: ReviewAction,
}

#[derive(Subcommand, Debug)]
pub enum ReviewAction {
    /// Append an empty review
    Add {
        /// Goal number, title, or id prefix
        goal: String,

        /// "weekly" or "monthly"
        list: ReviewPath,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove a review
    Remove {
        goal: String,
        list: ReviewPath,
        id: u64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set a review's date or comment
    Set {
        goal: String,
        list: ReviewPath,
        id: u64,

        /// "date" or "comment"
        field: ReviewField,

        value: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
