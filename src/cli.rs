//! Command-line interface: argument definitions and command handlers.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;

use crate::config::loader::load_config;
use crate::config::schema::BiblioConfig;
use crate::error::Result;
use crate::registry::{load_tools, read_only_tools};
use crate::selection::ToolSelector;
use crate::types::Tool;

/// Keyword-scored tool selection for the library chat assistant.
#[derive(Parser, Debug)]
#[command(name = "bibliotool", version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    /// YAML config file (overrides BIBLIOTOOL_CONFIG and the platform default).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging when RUST_LOG is not set.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Select the tools to send along with a chat message.
    Select(SelectArgs),
    /// Show how a query scores against the category catalog.
    Analyze(AnalyzeArgs),
    /// List the categories of the active catalog.
    Categories,
}

#[derive(Parser, Debug, Clone)]
pub struct SelectArgs {
    /// The user's chat message.
    pub query: String,

    /// JSON tool document (array, or object with a `tools` array).
    #[arg(long, value_name = "FILE")]
    pub tools: PathBuf,

    /// Override `selection.max_tools_per_request`.
    #[arg(long, value_name = "N")]
    pub max_tools: Option<usize>,

    /// Only consider tools that call GET endpoints.
    #[arg(long)]
    pub read_only: bool,

    /// Print machine-readable JSON instead of a summary.
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// The user's chat message.
    pub query: String,

    #[arg(long)]
    pub json: bool,
}

/// Load config and dispatch the parsed command.
pub fn run(args: &CliArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let selector = ToolSelector::new(config.build_catalog()?);

    match &args.command {
        Commands::Select(select_args) => handle_select(&selector, config, select_args),
        Commands::Analyze(analyze_args) => handle_analyze(&selector, analyze_args),
        Commands::Categories => {
            handle_categories(&selector);
            Ok(())
        }
    }
}

/// Load the tool list, keeping only GET tools in read-only mode.
fn load_selectable_tools(path: &Path, read_only: bool) -> Result<Vec<Tool>> {
    let loaded = load_tools(path)?;
    if !read_only {
        return Ok(loaded);
    }
    let kept: Vec<Tool> = read_only_tools(&loaded).into_iter().cloned().collect();
    tracing::debug!(kept = kept.len(), total = loaded.len(), "read-only tool filter applied");
    Ok(kept)
}

fn handle_select(
    selector: &ToolSelector,
    mut config: BiblioConfig,
    args: &SelectArgs,
) -> Result<()> {
    if let Some(max) = args.max_tools {
        config.selection.max_tools_per_request = max;
    }
    config.read_only |= args.read_only;

    let all_tools = load_selectable_tools(&args.tools, config.read_only)?;

    let selection = selector.select(&args.query, &all_tools, &config.selection);
    let stats = selector.stats(&selection, &all_tools);

    if args.json {
        let out = serde_json::json!({
            "selectedTools": selection.selected_tools,
            "analysis": selection.analysis,
            "usedCategories": selection.used_categories,
            "stats": stats,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", style(selector.summary(&selection, &all_tools)).bold());
    for tool in &selection.selected_tools {
        match (&tool.api_method, &tool.api_endpoint) {
            (Some(method), Some(endpoint)) => println!(
                "  {} {}",
                style(&tool.name).cyan(),
                style(format!("{method} {endpoint}")).dim()
            ),
            _ => println!("  {}", style(&tool.name).cyan()),
        }
    }
    Ok(())
}

fn handle_analyze(selector: &ToolSelector, args: &AnalyzeArgs) -> Result<()> {
    let analysis = selector.analyze(&args.query);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    let catalog = selector.catalog();
    for category in catalog.categories() {
        let conf = analysis.confidence_of(&category.id);
        let marker = if analysis.detected_categories.contains(&category.id) {
            style("detected").green()
        } else if analysis.suggested_categories.contains(&category.id) {
            style("suggested").yellow()
        } else {
            style("-").dim()
        };
        println!(
            "{:<16} {:>5.1}%  {}",
            category.id,
            conf * 100.0,
            marker
        );
    }
    Ok(())
}

fn handle_categories(selector: &ToolSelector) {
    let catalog = selector.catalog();
    for category in catalog.categories() {
        let default_marker = if catalog.default_categories().contains(&category.id) {
            " (default)"
        } else {
            ""
        };
        println!(
            "{} {}{}: priority {}, {} tools",
            style(&category.id).bold(),
            category.display_name,
            style(default_marker).dim(),
            category.priority,
            category.tool_ids.len()
        );
    }
}
