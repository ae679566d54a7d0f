//! forky CLI: panel layout shell and persisted size tools

mod logging;

use std::error::Error;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use forky_layout::{
    replay, JsonFileStore, LayoutConfig, Panel, PanelSizeModel, PanelSizes, PanelSizesPatch,
    PointerTrace, ReplayReport,
};
use logging::LogTarget;

/// Resizable panel shell for the forky git client
#[derive(Parser)]
#[command(name = "forky")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding config.json, store.json and forky.log
    #[arg(long, global = true, default_value = ".forky")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the panel shell (default when no command specified)
    Tui,

    /// Print the persisted panel sizes
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change panel sizes; values are clamped to each panel's bounds
    Set {
        /// Sidebar width in pixels
        #[arg(long)]
        sidebar: Option<f64>,

        /// Commit panel height in percent of its container
        #[arg(long)]
        commit_panel: Option<f64>,

        /// Diff sidebar width in pixels
        #[arg(long)]
        diff_sidebar: Option<f64>,
    },

    /// Restore the default panel sizes
    Reset,

    /// Replay a recorded pointer trace against an in-memory layout
    Replay {
        /// Trace file (JSON)
        trace: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let data_dir = cli.data_dir.as_path();

    let target = match cli.command {
        None | Some(Commands::Tui) => LogTarget::File { data_dir },
        Some(_) => LogTarget::Stderr,
    };
    if let Err(e) = logging::init(target) {
        eprintln!("Warning: logging disabled: {e}");
    }

    let result = match cli.command {
        None | Some(Commands::Tui) => {
            let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
            rt.block_on(forky_tui::run_tui(data_dir))
        }
        Some(Commands::Show { json }) => cmd_show(data_dir, json),
        Some(Commands::Set {
            sidebar,
            commit_panel,
            diff_sidebar,
        }) => cmd_set(
            data_dir,
            PanelSizesPatch {
                sidebar_width: sidebar,
                commit_panel_height: commit_panel,
                diff_sidebar_width: diff_sidebar,
            },
        ),
        Some(Commands::Reset) => cmd_reset(data_dir),
        Some(Commands::Replay { trace, json }) => cmd_replay(data_dir, &trace, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Load the persisted model the same way the shell does.
fn open_model(data_dir: &Path) -> PanelSizeModel {
    let config = LayoutConfig::load_or_default(data_dir);
    let store = JsonFileStore::new(config.store_path(data_dir));
    PanelSizeModel::load(Box::new(store), config.storage_key)
}

fn cmd_show(data_dir: &Path, json: bool) -> Result<(), Box<dyn Error>> {
    let sizes = open_model(data_dir).get();
    if json {
        println!("{}", serde_json::to_string_pretty(&sizes)?);
    } else {
        print!("{}", format_sizes(&sizes));
    }
    Ok(())
}

fn cmd_set(data_dir: &Path, patch: PanelSizesPatch) -> Result<(), Box<dyn Error>> {
    if !patch.has_finite_value() {
        return Err(
            "nothing to set; pass a number to --sidebar, --commit-panel or --diff-sidebar".into(),
        );
    }
    let sizes = open_model(data_dir).try_set(patch)?;
    print!("{}", format_sizes(&sizes));
    Ok(())
}

fn cmd_reset(data_dir: &Path) -> Result<(), Box<dyn Error>> {
    let sizes = open_model(data_dir).try_reset()?;
    println!("Panel sizes reset to defaults\n");
    print!("{}", format_sizes(&sizes));
    Ok(())
}

fn cmd_replay(data_dir: &Path, trace_path: &Path, json: bool) -> Result<(), Box<dyn Error>> {
    let config = LayoutConfig::load_or_default(data_dir);
    let trace = PointerTrace::load(trace_path)?;
    let report = replay(&trace, &config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_report(&report));
    }
    Ok(())
}

fn unit(panel: Panel) -> &'static str {
    match panel {
        Panel::CommitPanel => "%",
        Panel::Sidebar | Panel::DiffSidebar => "px",
    }
}

/// Human-readable size table with bounds.
fn format_sizes(sizes: &PanelSizes) -> String {
    let mut out = String::new();
    for panel in Panel::ALL {
        let bounds = panel.bounds();
        let _ = writeln!(
            out,
            "  {:<14}{:>6.0} {:<3} [{:.0}, {:.0}]",
            panel.to_string(),
            sizes.get(panel),
            unit(panel),
            bounds.min,
            bounds.max
        );
    }
    out
}

fn format_report(report: &ReplayReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Applied updates: {}\n", report.applied.len());
    for update in &report.applied {
        let _ = writeln!(
            out,
            "  {:>6} ms  {:<14}{:.1} {}",
            update.at_ms,
            update.panel.to_string(),
            update.sizes.get(update.panel),
            unit(update.panel)
        );
    }
    if report.skipped > 0 || report.ignored > 0 {
        let _ = writeln!(
            out,
            "\nSkipped: {}  Ignored: {}",
            report.skipped, report.ignored
        );
    }
    let _ = writeln!(out, "\nFinal sizes:");
    out.push_str(&format_sizes(&report.final_sizes));
    out
}
