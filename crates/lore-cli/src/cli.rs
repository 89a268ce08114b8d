use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "lorediff",
    about = "Lorediff — compare, merge, and edit lorebook documents",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format; defaults to the config file value, else text
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Config file (default: ./lorediff.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show line and word changes between two documents
    Diff(DiffArgs),
    /// Build a merged document from two versions and a set of decisions
    Merge(MergeArgs),
    /// List lorebook entries in display order
    Outline(OutlineArgs),
    /// Inspect or edit a single lorebook entry
    Entry(EntryArgs),
    /// Reduce a lorebook to uid, comment, and content
    Narrative(NarrativeArgs),
    /// Write one markdown file per entry
    ExportMarkdown(ExportMarkdownArgs),
    /// Pretty-print a JSON document
    Format(FormatArgs),
    /// Strip whitespace from a JSON document
    Minify(MinifyArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    pub left: PathBuf,
    pub right: PathBuf,
    /// Unchanged lines shown around each change
    #[arg(short = 'C', long)]
    pub context: Option<usize>,
}

#[derive(Args)]
pub struct MergeArgs {
    pub left: PathBuf,
    pub right: PathBuf,
    /// JSON file of previously recorded decisions
    #[arg(long)]
    pub decisions: Option<PathBuf>,
    /// Accept one side of a change, e.g. `3-modified=right`
    #[arg(long, value_name = "ID=SIDE")]
    pub accept: Vec<String>,
    /// Reject a change, e.g. `5-added`
    #[arg(long, value_name = "ID")]
    pub reject: Vec<String>,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Write the final decision set to this file
    #[arg(long)]
    pub save_decisions: Option<PathBuf>,
}

#[derive(Args)]
pub struct OutlineArgs {
    pub file: PathBuf,
    #[arg(short, long, default_value = "")]
    pub search: String,
}

#[derive(Args)]
pub struct EntryArgs {
    #[command(subcommand)]
    pub action: EntryAction,
}

#[derive(Subcommand)]
pub enum EntryAction {
    /// Print one entry
    Show { file: PathBuf, uid: String },
    /// Delete one entry
    Remove {
        file: PathBuf,
        uid: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Shallow-merge a JSON object into one entry
    Update {
        file: PathBuf,
        uid: String,
        #[arg(long)]
        patch: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
pub struct NarrativeArgs {
    pub file: PathBuf,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ExportMarkdownArgs {
    pub file: PathBuf,
    #[arg(long)]
    pub out_dir: PathBuf,
}

#[derive(Args)]
pub struct FormatArgs {
    pub file: PathBuf,
    #[arg(long)]
    pub indent: Option<usize>,
}

#[derive(Args)]
pub struct MinifyArgs {
    pub file: PathBuf,
}
