use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;

use incsort_core::config::Config;
use incsort_core::formatter::{FileOutcome, FileStatus, FormatOptions, Formatter};
use incsort_core::{IncsortError, Result, BUILTIN_CATEGORIES};

mod args;
use args::{Cli, Commands, ConfigAction};

#[derive(Clone, Copy)]
enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let verbosity = Verbosity::from_flags(cli.verbose, cli.quiet);
    let base_dir = cli.config_dir();

    let result = match cli.command {
        Some(Commands::Fmt {
            paths,
            check,
            dry_run,
            exclude,
        }) => handle_fmt(
            &base_dir,
            paths,
            FormatOptions { check, dry_run },
            &exclude,
            verbosity,
        ),
        Some(Commands::Stdin { filename }) => handle_stdin(&base_dir, &filename),
        Some(Commands::Config { action }) => handle_config(action, &base_dir),
        Some(Commands::Categories) => {
            handle_categories();
            Ok(())
        }
        Some(Commands::Completions { shell }) => {
            generate(shell, &mut Cli::command(), "incsort", &mut io::stdout());
            Ok(())
        }
        None => {
            Cli::command().print_help().ok();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn handle_fmt(
    base_dir: &Path,
    paths: Vec<PathBuf>,
    options: FormatOptions,
    exclude: &[String],
    verbosity: Verbosity,
) -> Result<()> {
    let config = Config::load(base_dir)?;
    let formatter = Formatter::new(config.to_file_filter(exclude)?);

    let paths = if paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        paths
    };

    let loud = matches!(verbosity, Verbosity::Verbose);
    let quiet = matches!(verbosity, Verbosity::Quiet);

    if !quiet {
        if options.check {
            println!("{}", "(check)".yellow());
        } else if options.dry_run {
            println!("{}", "(dry run)".yellow());
        }
    }

    let writes = options.writes();
    let on_file = |outcome: &FileOutcome| {
        if outcome.status == FileStatus::Failed {
            eprintln!(
                "  {} {}",
                "[FAILED]".red().bold(),
                outcome.error.as_deref().unwrap_or_default()
            );
            return;
        }
        if quiet || (outcome.status != FileStatus::Sorted && !loud) {
            return;
        }
        let tag = format!("[{}]", outcome.status.label(writes));
        let tag = match outcome.status {
            FileStatus::Sorted => tag.green(),
            FileStatus::NoIncludes => tag.yellow(),
            _ => tag.normal(),
        };
        println!("  {} {}", tag, outcome.path.display());

        if options.dry_run {
            if let Some(block) = &outcome.replacement {
                for line in block.lines() {
                    println!("      {}", line.dimmed());
                }
            }
        }
    };

    let summary = formatter.format_paths(&paths, options, Some(&on_file))?;

    if !quiet {
        println!();
        println!("Summary:");
        println!("  Sorted: {}", summary.sorted);
        println!("  Unchanged: {}", summary.unchanged);
        println!("  No includes: {}", summary.no_includes);
        if summary.failed > 0 {
            println!("  Failed: {}", summary.failed.to_string().red());
        }
    }

    if summary.failed > 0 {
        return Err(IncsortError::FilesFailed {
            count: summary.failed,
        });
    }

    if options.check && summary.sorted > 0 {
        return Err(IncsortError::NotSorted {
            count: summary.sorted,
        });
    }

    Ok(())
}

fn handle_categories() {
    println!();
    for builtin in BUILTIN_CATEGORIES {
        println!(
            "  {} {:<14} {}",
            builtin.category.priority(),
            builtin.category.name().cyan(),
            builtin.description
        );
    }
    println!();
}

fn handle_stdin(base_dir: &Path, filename: &Path) -> Result<()> {
    let config = Config::load(base_dir)?;
    let formatter = Formatter::new(config.to_file_filter(&[])?);

    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;

    let sorted = formatter.format_text(&text, filename);

    let mut stdout = io::stdout().lock();
    stdout.write_all(sorted.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn handle_config(action: ConfigAction, base_dir: &Path) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let value = Config::load(base_dir)?
                .get(&key)
                .ok_or(IncsortError::ConfigKeyNotFound { key })?;
            println!("{}", value);
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load(base_dir)?;
            config.set(&key, &value)?;
            config.save(base_dir)?;
            println!("{} {} = {}", "Set:".green(), key, value);
        }
        ConfigAction::List => {
            let config = Config::load(base_dir)?;
            println!();
            for (key, value) in config.list() {
                println!("{} = {}", key.cyan(), value);
            }
            println!();
        }
        ConfigAction::Path => {
            let path = Config::path(base_dir);
            println!("{}", path.display());
        }
        ConfigAction::Init => {
            let path = Config::init(base_dir)?;
            println!("{} {}", "Initialized:".green(), path.display());
        }
    }

    Ok(())
}
