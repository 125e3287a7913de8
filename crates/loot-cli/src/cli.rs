use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use loot_service::LootKind;

#[derive(Parser)]
#[command(
    name = "loot",
    about = "Loot store -- keep captured files and credentials in one place",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Store directory (overrides the config file)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create the store layout
    Init(InitArgs),
    /// Store a file or credential
    Add(AddArgs),
    /// Show an entry and its payload
    Get(GetArgs),
    /// Remove an entry and its payload
    #[command(alias = "remove")]
    Rm(RmArgs),
    /// List entries
    #[command(alias = "list")]
    Ls(LsArgs),
    /// Look for blobs no entry refers to
    Fsck(FsckArgs),
}

#[derive(Args)]
pub struct InitArgs {}

#[derive(Args)]
pub struct AddArgs {
    pub name: String,

    /// Entry kind; inferred from the payload flags when omitted
    #[arg(short, long)]
    pub kind: Option<LootKind>,

    /// File to capture
    #[arg(long, conflicts_with_all = ["user", "api_key", "raw"])]
    pub file: Option<PathBuf>,

    #[arg(long, requires = "password", conflicts_with_all = ["api_key", "raw"])]
    pub user: Option<String>,

    #[arg(long, requires = "user")]
    pub password: Option<String>,

    #[arg(long, conflicts_with = "raw")]
    pub api_key: Option<String>,

    /// File whose bytes are stored as an opaque credential
    #[arg(long)]
    pub raw: Option<PathBuf>,
}

#[derive(Args)]
pub struct GetArgs {
    pub id: String,

    /// Write file data here instead of printing a summary
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct RmArgs {
    pub id: String,
}

#[derive(Args)]
pub struct LsArgs {
    #[arg(short, long)]
    pub kind: Option<LootKind>,
}

#[derive(Args)]
pub struct FsckArgs {
    /// Delete stray blobs
    #[arg(long)]
    pub prune: bool,
}
