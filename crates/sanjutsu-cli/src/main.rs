//! Sanjutsu command-line workbench.
//!
//! Runs formulas and reviews workspace session files.
//!
//! Usage:
//!   sanjutsu calc turning.cutting_speed d=50 n=1200
//!   sanjutsu calc mass.round_bar d=40 length=500 material=steel --session shop.json
//!   sanjutsu pending shop.json
//!   sanjutsu accept shop.json 0192a3b4
//!   sanjutsu history shop.json --limit 10 --json

mod session_file;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use sanjutsu_calc::{FormulaTable, Params, family};
use sanjutsu_workspace::{CalcRecord, Edit, Version, WorkspaceBuffer, WorkspaceConfig};

#[derive(Parser, Debug)]
#[command(name = "sanjutsu", version, about = "Machining calculations with a reviewable workspace")]
struct Cli {
    /// Workspace config (default: ~/.config/sanjutsu/workspace.ron)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Machine-readable JSON output
    #[arg(long, global = true)]
    json: bool,

    /// More log output on stderr (repeat for more)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a formula, optionally appending the result to a session
    Calc {
        /// Formula kind, e.g. turning.cutting_speed
        kind: String,
        /// Inputs as key=value
        params: Vec<String>,
        /// Session file to append the result block to (created if absent)
        #[arg(long, value_name = "FILE")]
        session: Option<PathBuf>,
    },
    /// List available formulas
    Formulas,
    /// Print workspace content
    Show { file: PathBuf },
    /// Print workspace statistics
    Stats { file: PathBuf },
    /// Print recent edits
    History {
        file: PathBuf,
        /// Number of edits (0 for all; default from config)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print retained versions
    Versions { file: PathBuf },
    /// Print model suggestions awaiting review
    Pending { file: PathBuf },
    /// Restore content from a retained version
    Restore {
        file: PathBuf,
        /// Version id or hex prefix
        version: String,
    },
    /// Accept a pending suggestion
    Accept {
        file: PathBuf,
        /// Edit id or hex prefix
        edit: String,
    },
    /// Reject a pending suggestion
    Reject {
        file: PathBuf,
        /// Edit id or hex prefix
        edit: String,
    },
    /// Record a model suggestion to replace START..END with TEXT
    Suggest {
        file: PathBuf,
        start: usize,
        end: usize,
        text: String,
        #[arg(long, short, default_value = "")]
        description: String,
    },
    /// Print the effective workspace config
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = WorkspaceConfig::load_or_default(cli.config.as_deref())
        .context("loading workspace config")?;
    let formulas = FormulaTable::builtin();

    match cli.command {
        Command::Calc { kind, params, session } => {
            let params = Params::from_assignments(params.iter().map(String::as_str))?;
            let outcome = formulas.compute(&kind, &params)?;
            let formula = formulas
                .get(&kind)
                .with_context(|| format!("formula {kind} disappeared"))?;
            let record = CalcRecord {
                calc_type: family(&kind).to_string(),
                calc_name: formula.name().to_string(),
                parameters: params.into_inner(),
                result: outcome.value,
                unit: outcome.unit,
            };
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                println!("{}", record.to_block());
            }
            if let Some(path) = session {
                let mut buffer = session_file::load_or_new(&path, &config)?;
                buffer.add_calculation(&record);
                session_file::save(&buffer, &path)?;
            }
        }
        Command::Formulas => {
            for kind in formulas.names() {
                let Some(formula) = formulas.get(kind) else { continue };
                println!(
                    "{kind:<26} {:<8} {}  ({})",
                    formula.unit(),
                    formula.name(),
                    formula.params().join(", ")
                );
            }
        }
        Command::Show { file } => {
            let buffer = session_file::load(&file, &config)?;
            println!("{}", buffer.content());
        }
        Command::Stats { file } => {
            let stats = session_file::load(&file, &config)?.stats();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("content length:      {}", stats.content_length);
                println!("edits:               {}", stats.total_edits);
                println!("  by user:           {}", stats.user_edits);
                println!("  by model:          {}", stats.model_edits);
                println!("pending suggestions: {}", stats.pending_suggestions);
                println!("versions:            {}", stats.versions);
                if let Some(ts) = stats.last_modified {
                    println!("last modified:       {}", ts.to_rfc3339());
                }
            }
        }
        Command::History { file, limit } => {
            let buffer = session_file::load(&file, &config)?;
            let edits = buffer.edit_history(limit.unwrap_or(config.history_limit));
            print_edits(edits.iter(), cli.json)?;
        }
        Command::Versions { file } => {
            let buffer = session_file::load(&file, &config)?;
            print_versions(&buffer, cli.json)?;
        }
        Command::Pending { file } => {
            let buffer = session_file::load(&file, &config)?;
            print_edits(buffer.pending_suggestions().into_iter(), cli.json)?;
        }
        Command::Restore { file, version } => {
            let mut buffer = session_file::load(&file, &config)?;
            let id = session_file::resolve_version(&buffer, &version)?;
            if !buffer.restore_version(id) {
                anyhow::bail!("version {id} is no longer retained");
            }
            session_file::save(&buffer, &file)?;
            println!("restored {}", id.short());
        }
        Command::Accept { file, edit } => {
            let mut buffer = session_file::load(&file, &config)?;
            let id = session_file::resolve_edit(&buffer, &edit)?;
            if !buffer.get_edit(id).is_some_and(Edit::is_pending) {
                anyhow::bail!("edit {} is not a pending suggestion", id.short());
            }
            let accepted = buffer.accept_suggestion(id);
            // A conflicting suggestion was marked rejected; keep that.
            session_file::save(&buffer, &file)?;
            if !accepted {
                anyhow::bail!(
                    "suggestion {} no longer matches the content and was rejected",
                    id.short()
                );
            }
            println!("accepted {}", id.short());
        }
        Command::Reject { file, edit } => {
            let mut buffer = session_file::load(&file, &config)?;
            let id = session_file::resolve_edit(&buffer, &edit)?;
            if !buffer.reject_suggestion(id) {
                anyhow::bail!("edit {} is not a pending suggestion", id.short());
            }
            session_file::save(&buffer, &file)?;
            println!("rejected {}", id.short());
        }
        Command::Suggest { file, start, end, text, description } => {
            let mut buffer = session_file::load_or_new(&file, &config)?;
            let edit = buffer.suggest_edit(start, end, &text, description);
            session_file::save(&buffer, &file)?;
            println!("{}", edit.id);
        }
        Command::Config => {
            println!("{}", config.to_ron()?);
            if let Some(path) = cli.config.or_else(WorkspaceConfig::default_path) {
                eprintln!("# from {}", display_source(&path));
            }
        }
    }
    Ok(())
}

/// `RUST_LOG` wins; otherwise `-v` steps warn → info → debug.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn display_source(path: &Path) -> String {
    if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found, defaults)", path.display())
    }
}

fn print_edits<'a>(edits: impl Iterator<Item = &'a Edit>, json: bool) -> Result<()> {
    if json {
        let edits: Vec<&Edit> = edits.collect();
        println!("{}", serde_json::to_string_pretty(&edits)?);
        return Ok(());
    }
    for edit in edits {
        let state = if edit.is_pending() {
            "pending"
        } else if edit.rejected() {
            "rejected"
        } else {
            "applied"
        };
        println!(
            "{}  {}  {:<14} {:<8} @{:<5} {:?} -> {:?}",
            edit.id.short(),
            edit.timestamp.format("%Y-%m-%d %H:%M:%S"),
            edit.edit_type.as_str(),
            state,
            edit.position,
            edit.old_text,
            edit.new_text,
        );
        if let Some(description) = &edit.description {
            println!("          {description}");
        }
    }
    Ok(())
}

fn print_versions(buffer: &WorkspaceBuffer, json: bool) -> Result<()> {
    let versions: &[Version] = buffer.version_history();
    if json {
        println!("{}", serde_json::to_string_pretty(versions)?);
        return Ok(());
    }
    let current = buffer.current_version_id();
    for version in versions {
        let marker = if version.id == current { "*" } else { " " };
        println!(
            "{marker} {}  {}  {:>6} chars  {}",
            version.id.short(),
            version.timestamp.format("%Y-%m-%d %H:%M:%S"),
            version.content.chars().count(),
            version.description,
        );
    }
    Ok(())
}
