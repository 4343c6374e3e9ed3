//! `goaltree` command-line front end.
//!
//! Reads goal and project records as JSON arrays, builds the forest and
//! prints it as JSON or as a plain indented outline.

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

use goaltree::config::{load_config, TreeConfig};
use goaltree::observability::{init_logging, Metrics};
use goaltree::tree::node::walk;
use goaltree::types::{Goal, Project};
use goaltree::{Node, Result, TreeBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Outline,
}

#[derive(Debug, Parser)]
#[command(name = "goaltree", version, about = "Build a goal/project tree from flat records")]
struct Cli {
    /// JSON file holding an array of goal records.
    #[arg(long)]
    goals: PathBuf,

    /// JSON file holding an array of project records.
    #[arg(long)]
    projects: Option<PathBuf>,

    /// Options file (YAML, or JSON with a .json extension).
    #[arg(long)]
    options: Option<PathBuf>,

    /// Override the sort column (name, timeframe, last_check_in, champion, space, progress).
    #[arg(long)]
    sort_column: Option<String>,

    /// Override the sort direction (asc, desc).
    #[arg(long)]
    sort_direction: Option<String>,

    /// Also show paused work.
    #[arg(long)]
    show_paused: bool,

    /// Also show completed work.
    #[arg(long)]
    show_completed: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Print build stats to stderr after the tree.
    #[arg(long)]
    stats: bool,
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        tracing::error!("goaltree failed: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.options {
        Some(path) => load_config(path)?,
        None => TreeConfig::default(),
    };
    if let Some(column) = cli.sort_column {
        config.sort_column = column;
    }
    if let Some(direction) = cli.sort_direction {
        config.sort_direction = direction;
    }
    config.show_paused |= cli.show_paused;
    config.show_completed |= cli.show_completed;
    let options = config.into_options()?;

    let goals: Vec<Goal> = read_records(&cli.goals)?;
    let projects: Vec<Project> = match &cli.projects {
        Some(path) => read_records(path)?,
        None => Vec::new(),
    };

    let (forest, stats) = TreeBuilder::new(options).build_with_stats(&goals, &projects)?;

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&forest)?),
        OutputFormat::Outline => print!("{}", outline(&forest)),
    }

    if cli.stats {
        let mut metrics = Metrics::new();
        metrics.record(&stats);
        eprintln!("{}", metrics.to_json());
    }
    Ok(())
}

fn read_records<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let text = std::fs::read_to_string(path)?;
    let records: Vec<T> = serde_json::from_str(&text)?;
    tracing::debug!(path = %path.display(), count = records.len(), "read records");
    Ok(records)
}

fn outline(forest: &[Node]) -> String {
    let mut out = String::new();
    for node in walk(forest) {
        let indent = "  ".repeat(node.depth as usize);
        let marker = if node.is_closed() { "x" } else { "-" };
        out.push_str(&format!("{indent}{marker} {} [{}]", node.name, node.node_type()));
        let label = node.children_info_label();
        if !label.is_empty() {
            out.push_str(&format!(" ({label})"));
        }
        out.push('\n');
    }
    out
}
