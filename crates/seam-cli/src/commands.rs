use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use colored::Colorize;
use seam_diff::{split_lines, ComparisonManager};
use seam_merge::{apply_merge, try_greedy_resolve, try_resolve};
use seam_types::{CancellationToken, DiffFragment, LineFragment};
use serde::Serialize;

use crate::cli::*;
use crate::config::Settings;

/// Whether a command left something for the user to fix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Done,
    Unresolved,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Done => ExitCode::SUCCESS,
            Status::Unresolved => ExitCode::FAILURE,
        }
    }
}

pub fn run_command(cli: Cli) -> anyhow::Result<Status> {
    let settings = Settings::load(cli.config.as_deref())?;
    let cancel = CancellationToken::new();
    match cli.command {
        Command::Diff(args) => cmd_diff(args, &settings, cli.format, &cancel),
        Command::Merge(args) => cmd_merge(args, &settings, cli.format, &cancel),
        Command::Resolve(args) => cmd_resolve(args, cli.format, &cancel),
    }
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_diff(
    args: DiffArgs,
    settings: &Settings,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> anyhow::Result<Status> {
    let old = read(&args.old)?;
    let new = read(&args.new)?;
    let manager = ComparisonManager::new(settings.comparison.clone());
    let policy = args.policy.into();

    match args.granularity {
        Granularity::Line => {
            let fragments = manager.compare_lines(&old, &new, policy, cancel)?;
            match format {
                OutputFormat::Json => print_json(&fragments)?,
                OutputFormat::Text => print_line_fragments(&fragments, &old, &new),
            }
        }
        granularity => {
            let fragments = if granularity == Granularity::Word {
                manager.compare_words(&old, &new, policy, cancel)?
            } else {
                manager.compare_chars(&old, &new, policy, args.mode.into(), cancel)?
            };
            match format {
                OutputFormat::Json => print_json(&fragments)?,
                OutputFormat::Text => print_fragments(&fragments, &old, &new),
            }
        }
    }
    Ok(Status::Done)
}

fn print_line_fragments(fragments: &[LineFragment], old: &str, new: &str) {
    if fragments.is_empty() {
        println!("No differences.");
        return;
    }
    let old_lines = split_lines(old);
    let new_lines = split_lines(new);
    for f in fragments {
        println!(
            "{}",
            format!(
                "@@ -{},{} +{},{} @@",
                f.start_line1 + 1,
                f.line_count1(),
                f.start_line2 + 1,
                f.line_count2()
            )
            .cyan()
        );
        for line in &old_lines[f.start_line1..f.end_line1] {
            println!("{}", format!("-{line}").red());
        }
        for line in &new_lines[f.start_line2..f.end_line2] {
            println!("{}", format!("+{line}").green());
        }
    }
}

fn print_fragments(fragments: &[DiffFragment], old: &str, new: &str) {
    if fragments.is_empty() {
        println!("No differences.");
        return;
    }
    for f in fragments {
        println!(
            "{} {:?} {} {:?}",
            format!("[{}, {}) - [{}, {})", f.start_offset1, f.end_offset1, f.start_offset2, f.end_offset2).dimmed(),
            &old[f.start_offset1..f.end_offset1],
            "→".bold(),
            &new[f.start_offset2..f.end_offset2],
        );
    }
}

fn cmd_merge(
    args: MergeArgs,
    settings: &Settings,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> anyhow::Result<Status> {
    let left = read(&args.left)?;
    let base = read(&args.base)?;
    let right = read(&args.right)?;

    let mut options = settings.merge.clone();
    options.greedy |= args.greedy;
    if let Some(policy) = args.policy {
        options.policy = policy.into();
    }
    let outcome = apply_merge(&left, &base, &right, &options, &settings.comparison, cancel)?;

    match &args.output {
        Some(path) => std::fs::write(path, &outcome.text)
            .with_context(|| format!("writing {}", path.display()))?,
        None if format == OutputFormat::Text => print!("{}", outcome.text),
        None => {}
    }
    match format {
        OutputFormat::Json => print_json(&outcome)?,
        OutputFormat::Text if outcome.is_clean() => eprintln!(
            "{} Merged cleanly ({} conflicts auto-resolved).",
            "✓".green().bold(),
            outcome.auto_resolved
        ),
        OutputFormat::Text => eprintln!(
            "{} {} conflicts remain ({} auto-resolved).",
            "✗".red().bold(),
            outcome.conflicts.to_string().bold(),
            outcome.auto_resolved
        ),
    }
    Ok(if outcome.is_clean() {
        Status::Done
    } else {
        Status::Unresolved
    })
}

#[derive(Serialize)]
struct ResolveReport {
    resolved: Option<String>,
}

fn cmd_resolve(args: ResolveArgs, format: OutputFormat, cancel: &CancellationToken) -> anyhow::Result<Status> {
    let left = read(&args.left)?;
    let base = read(&args.base)?;
    let right = read(&args.right)?;

    let resolved = if args.greedy {
        try_greedy_resolve(&left, &base, &right, cancel)?
    } else {
        try_resolve(&left, &base, &right, cancel)?
    };
    let status = if resolved.is_some() {
        Status::Done
    } else {
        Status::Unresolved
    };
    match format {
        OutputFormat::Json => print_json(&ResolveReport { resolved })?,
        OutputFormat::Text => match resolved {
            Some(text) => print!("{text}"),
            None => eprintln!("{} Conflict cannot be resolved automatically.", "✗".red().bold()),
        },
    }
    Ok(status)
}
