use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use seam_types::{CharComparisonMode, ComparisonPolicy};

#[derive(Parser)]
#[command(
    name = "seam",
    about = "Seam: whitespace-aware text comparison and three-way merge",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML file with `[comparison]` and `[merge]` settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show differences between two files
    Diff(DiffArgs),
    /// Merge two files against their common base
    Merge(MergeArgs),
    /// Try to resolve a single conflict at word granularity
    Resolve(ResolveArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Granularity {
    Line,
    Word,
    Char,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum PolicyArg {
    Default,
    Trim,
    Ignore,
    Chunks,
}

impl From<PolicyArg> for ComparisonPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Default => ComparisonPolicy::Default,
            PolicyArg::Trim => ComparisonPolicy::TrimWhitespaces,
            PolicyArg::Ignore => ComparisonPolicy::IgnoreWhitespaces,
            PolicyArg::Chunks => ComparisonPolicy::IgnoreWhitespacesChunks,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeArg {
    Raw,
    Smart,
}

impl From<ModeArg> for CharComparisonMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Raw => CharComparisonMode::Raw,
            ModeArg::Smart => CharComparisonMode::Smart,
        }
    }
}

#[derive(Args)]
pub struct DiffArgs {
    pub old: PathBuf,
    pub new: PathBuf,
    #[arg(long, default_value = "line")]
    pub granularity: Granularity,
    #[arg(long, default_value = "default")]
    pub policy: PolicyArg,
    /// Alignment for `--granularity char`
    #[arg(long, default_value = "smart")]
    pub mode: ModeArg,
}

#[derive(Args)]
pub struct MergeArgs {
    pub left: PathBuf,
    pub base: PathBuf,
    pub right: PathBuf,
    #[arg(long)]
    pub greedy: bool,
    /// Overrides the policy from the config file
    #[arg(long)]
    pub policy: Option<PolicyArg>,
    /// Write the merged text here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ResolveArgs {
    pub left: PathBuf,
    pub base: PathBuf,
    pub right: PathBuf,
    #[arg(long)]
    pub greedy: bool,
}
