//! Command-line interface for the syntharena utility
//!
//! Reads flat route node records as JSON, either a plain record array or a
//! route store document (`{"routes": {"<id>": [...]}}`), and writes
//! positioned layouts, comparison graphs or terminal outlines.

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::outline::render_outline;
use syntharena::compare::{ComparisonBuilder, ComparisonConfig, PANEL_GAP};
use syntharena::core::logging::{init_logging, LogFormat as CoreLogFormat};
use syntharena::core::{ComparisonMode, Direction, NodeSource, Point};
use syntharena::layout::{
    LayoutConfig, PositionedTree, TreeLayout, HORIZONTAL_SPACING, NODE_HEIGHT, NODE_WIDTH,
    VERTICAL_SPACING,
};
use syntharena::route::{BuildOutcome, BuildPolicy, RouteMetrics, RouteNode, Stock, TreeBuilder};
use syntharena::InMemoryNodeSource;

/// SynthArena - lay out and compare retrosynthesis routes
#[derive(Parser)]
#[command(name = "syntharena")]
#[command(about = "Lay out and compare retrosynthesis routes stored as flat node records")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

/// Node size, spacing and direction
#[derive(Args, Debug, Clone, Copy, PartialEq)]
pub struct GeometryArgs {
    /// Node box width
    #[arg(long, default_value_t = NODE_WIDTH)]
    pub node_width: f64,

    /// Node box height
    #[arg(long, default_value_t = NODE_HEIGHT)]
    pub node_height: f64,

    /// Gap between sibling subtrees
    #[arg(long = "h-spacing", default_value_t = HORIZONTAL_SPACING)]
    pub horizontal_spacing: f64,

    /// Gap between levels
    #[arg(long = "v-spacing", default_value_t = VERTICAL_SPACING)]
    pub vertical_spacing: f64,

    /// Tree direction
    #[arg(long, value_enum, default_value_t = DirectionChoice::Td)]
    pub direction: DirectionChoice,
}

impl GeometryArgs {
    pub fn layout_config(&self) -> Result<LayoutConfig> {
        let config = LayoutConfig::default()
            .with_node_size(self.node_width, self.node_height)
            .with_spacing(self.horizontal_spacing, self.vertical_spacing)
            .with_direction(self.direction.into());
        config.validate()?;
        Ok(config)
    }
}

/// Layout directions
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum DirectionChoice {
    /// Root at the top, children below
    #[default]
    #[value(alias = "top-down")]
    Td,
    /// Root on the left, children to the right
    #[value(alias = "left-right")]
    Lr,
}

impl From<DirectionChoice> for Direction {
    fn from(value: DirectionChoice) -> Self {
        match value {
            DirectionChoice::Td => Direction::TopDown,
            DirectionChoice::Lr => Direction::LeftRight,
        }
    }
}

/// Comparison display modes
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum ModeChoice {
    /// Prediction drawn once, nodes tagged by status
    #[default]
    #[value(alias = "diff")]
    Overlay,
    /// Prediction and references as separate panels
    SideBySide,
}

impl From<ModeChoice> for ComparisonMode {
    fn from(value: ModeChoice) -> Self {
        match value {
            ModeChoice::Overlay => ComparisonMode::Overlay,
            ModeChoice::SideBySide => ComparisonMode::SideBySide,
        }
    }
}

/// When to colorize output
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Use colors if output is a terminal and NO_COLOR is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a route tree and write its positioned layout as JSON
    Layout {
        /// Input file with route records (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the layout JSON (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Route to use when the input is a route store
        #[arg(short, long)]
        route: Option<String>,

        #[command(flatten)]
        geometry: GeometryArgs,

        /// Lay out the reachable part of a route with orphaned records
        #[arg(long)]
        lenient: bool,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Compare a predicted route with one or more reference routes
    Compare {
        /// File with the predicted route
        #[arg(short, long)]
        prediction: PathBuf,

        /// Route to use when the prediction file is a route store
        #[arg(long)]
        prediction_route: Option<String>,

        /// File with reference routes; a route store contributes all its routes
        #[arg(short = 'R', long = "reference", required = true)]
        references: Vec<PathBuf>,

        /// Output file for the comparison JSON (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Display mode
        #[arg(short, long, value_enum, default_value_t = ModeChoice::Overlay)]
        mode: ModeChoice,

        #[command(flatten)]
        geometry: GeometryArgs,

        /// Gap between side-by-side panels
        #[arg(long, default_value_t = PANEL_GAP)]
        panel_gap: f64,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Check that route records form a single rooted tree
    Validate {
        /// Input file to validate (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Route to use when the input is a route store
        #[arg(short, long)]
        route: Option<String>,

        /// Accept orphaned records and only report them
        #[arg(long)]
        lenient: bool,
    },

    /// Print a route as an indented tree
    Outline {
        /// Input file with route records (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Route to use when the input is a route store
        #[arg(short, long)]
        route: Option<String>,

        /// Stock file (JSON key array or {"name", "keys"}) to mark leaves against
        #[arg(short, long)]
        stock: Option<PathBuf>,

        /// Print the reachable part of a route with orphaned records
        #[arg(long)]
        lenient: bool,

        /// When to use colors in output
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
        color: ColorChoice,
    },

    /// Show comparison modes, directions and log formats
    Types {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Layout output: the positioned tree plus route facts
#[derive(Debug, Serialize)]
struct LayoutReport<'a> {
    metrics: RouteMetrics,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    orphans: &'a [String],
    #[serde(flatten)]
    layout: &'a PositionedTree,
}

/// Main CLI application
#[derive(Debug, Default)]
pub struct SynthArenaApp {
    verbose: bool,
}

impl SynthArenaApp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level_str = std::env::var("SYNTHARENA_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| {
                let level = if cli.verbose && cli.log_level == LogLevel::Warn {
                    LogLevel::Debug
                } else {
                    cli.log_level
                };
                Some(level.as_str().to_string())
            });

        let log_format_str = std::env::var("SYNTHARENA_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        self.verbose = cli.verbose;
        if self.verbose {
            eprintln!("SynthArena v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Layout {
                input,
                output,
                route,
                geometry,
                lenient,
                pretty,
            } => self.layout_command(input, output, route, geometry, lenient, pretty),
            Commands::Compare {
                prediction,
                prediction_route,
                references,
                output,
                mode,
                geometry,
                panel_gap,
                pretty,
            } => {
                let config = ComparisonConfig::default()
                    .with_layout(geometry.layout_config()?)
                    .with_panel_gap(panel_gap);
                self.compare_command(
                    &prediction,
                    prediction_route.as_deref(),
                    &references,
                    output,
                    mode.into(),
                    config,
                    pretty,
                )
            }
            Commands::Validate {
                input,
                route,
                lenient,
            } => self.validate_command(input, route, lenient),
            Commands::Outline {
                input,
                route,
                stock,
                lenient,
                color,
            } => self.outline_command(input, route, stock, lenient, color),
            Commands::Types { json } => self.types_command(json),
        }
    }

    /// Handle the layout command
    fn layout_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        route: Option<String>,
        geometry: GeometryArgs,
        lenient: bool,
        pretty: bool,
    ) -> Result<()> {
        let config = geometry.layout_config()?;
        let content = self.read_input(input)?;
        let records = parse_records(&content, route.as_deref())?;
        let outcome = build(&records, lenient)?;

        let positioned = TreeLayout::new(config).layout_at(&outcome.tree, Point::default())?;
        let report = LayoutReport {
            metrics: RouteMetrics::of(&outcome.tree),
            orphans: &outcome.orphans,
            layout: &positioned,
        };

        if self.verbose {
            eprintln!(
                "Laid out {} nodes in a {:.0} x {:.0} area",
                positioned.nodes.len(),
                positioned.width(),
                positioned.height()
            );
        }

        self.write_output(output, &to_json(&report, pretty)?)
    }

    /// Handle the compare command
    #[allow(clippy::too_many_arguments)]
    fn compare_command(
        &self,
        prediction: &Path,
        prediction_route: Option<&str>,
        references: &[PathBuf],
        output: Option<PathBuf>,
        mode: ComparisonMode,
        config: ComparisonConfig,
        pretty: bool,
    ) -> Result<()> {
        let content = read_file(prediction)?;
        let prediction_tree = build(&parse_records(&content, prediction_route)?, false)?.tree;

        let mut reference_trees = Vec::new();
        for path in references {
            let content = read_file(path)?;
            for (route_id, records) in parse_routes(&content)? {
                debug!(path = %path.display(), route_id = %route_id, "Loaded reference route");
                let tree = TreeBuilder::new()
                    .build(&records)
                    .with_context(|| {
                        format!("Reference route '{}' in '{}'", route_id, path.display())
                    })?
                    .tree;
                reference_trees.push(tree);
            }
        }

        let graph = ComparisonBuilder::new(config).build(mode, &prediction_tree, &reference_trees)?;

        if self.verbose {
            eprintln!(
                "Compared against {} reference(s): {} shared, {} prediction-only, {} reference-only",
                reference_trees.len(),
                graph.summary.shared,
                graph.summary.prediction_only,
                graph.summary.reference_only
            );
        }

        self.write_output(output, &to_json(&graph, pretty)?)
    }

    /// Handle the validate command
    fn validate_command(
        &self,
        input: Option<PathBuf>,
        route: Option<String>,
        lenient: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;
        let records = parse_records(&content, route.as_deref())?;

        match build(&records, lenient) {
            Ok(outcome) => {
                let metrics = RouteMetrics::of(&outcome.tree);
                println!(
                    "✓ Valid route: {} nodes, depth {}, {} starting materials",
                    metrics.node_count, metrics.depth, metrics.leaf_count
                );
                if !outcome.is_complete() {
                    println!(
                        "  {} orphaned record(s): {}",
                        outcome.orphans.len(),
                        outcome.orphans.join(", ")
                    );
                }
                Ok(())
            }
            Err(e) => {
                println!("✗ Invalid route: {}", e);
                Err(e)
            }
        }
    }

    /// Handle the outline command
    fn outline_command(
        &self,
        input: Option<PathBuf>,
        route: Option<String>,
        stock: Option<PathBuf>,
        lenient: bool,
        color: ColorChoice,
    ) -> Result<()> {
        let content = self.read_input(input)?;
        let records = parse_records(&content, route.as_deref())?;
        let outcome = build(&records, lenient)?;

        let check = match stock {
            Some(path) => {
                let stock = load_stock(&path)?;
                let check = stock.check(&outcome.tree);
                if self.verbose {
                    eprintln!(
                        "Stock '{}': {} of {} leaves available",
                        stock.name,
                        check.in_stock.len(),
                        check.in_stock.len() + check.missing.len()
                    );
                }
                Some(check)
            }
            None => None,
        };

        let outline = render_outline(&outcome.tree, check.as_ref(), should_colorize(color));
        self.write_output(None, &outline)
    }

    /// Handle the types command
    fn types_command(&self, json: bool) -> Result<()> {
        if self.verbose {
            eprintln!("Listing supported option values");
        }

        if json {
            let types = serde_json::json!({
                "comparison_modes": ComparisonMode::variants(),
                "directions": ["td", "lr"],
                "log_formats": CoreLogFormat::variants(),
            });
            println!("{}", serde_json::to_string_pretty(&types)?);
        } else {
            println!("Comparison modes:");
            println!("  overlay       - prediction drawn once, nodes tagged by status (alias: diff)");
            println!("  side-by-side  - prediction and each reference as separate panels");
            println!();
            println!("Directions:");
            println!("  td  - root at the top");
            println!("  lr  - root on the left");
            println!();
            println!("Log formats: {}", CoreLogFormat::variants().join(", "));
        }

        Ok(())
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => read_file(&path),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        let stdout_content = if content.is_empty() || content.ends_with('\n') {
            content.to_string()
        } else {
            format!("{}\n", content)
        };

        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                print!("{}", stdout_content);
                io::stdout().flush()?;
            }
        }
        Ok(())
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e))
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn build(records: &[RouteNode], lenient: bool) -> Result<BuildOutcome> {
    let policy = if lenient {
        BuildPolicy::Lenient
    } else {
        BuildPolicy::Strict
    };
    let outcome = TreeBuilder::with_policy(policy).build(records)?;
    if !outcome.is_complete() {
        warn!(orphans = ?outcome.orphans, "Ignoring orphaned records");
    }
    Ok(outcome)
}

/// Parse one route from a record array or a route store
///
/// A store with a single route needs no `route` selection.
pub fn parse_records(content: &str, route: Option<&str>) -> Result<Vec<RouteNode>> {
    let value: serde_json::Value =
        serde_json::from_str(content).context("Input is not valid JSON")?;

    if value.is_array() {
        if let Some(route) = route {
            return Err(anyhow!(
                "Route '{}' requested but the input is a plain record list",
                route
            ));
        }
        return serde_json::from_value(value).context("Failed to parse route node records");
    }

    let source: InMemoryNodeSource = serde_json::from_value(value)
        .context("Input is neither a record list nor a route store")?;
    let route_id = match route {
        Some(id) => id.to_string(),
        None => {
            let ids = source.route_ids();
            match ids.as_slice() {
                [only] => only.clone(),
                [] => return Err(anyhow!("Route store contains no routes")),
                _ => {
                    return Err(anyhow!(
                        "Route store holds {} routes; pick one with --route ({})",
                        ids.len(),
                        ids.join(", ")
                    ))
                }
            }
        }
    };
    source.route_nodes(&route_id)
}

/// Parse every route in a record array or a route store, in route id order
pub fn parse_routes(content: &str) -> Result<Vec<(String, Vec<RouteNode>)>> {
    let value: serde_json::Value =
        serde_json::from_str(content).context("Input is not valid JSON")?;

    if value.is_array() {
        let records: Vec<RouteNode> =
            serde_json::from_value(value).context("Failed to parse route node records")?;
        return Ok(vec![("0".to_string(), records)]);
    }

    let source: InMemoryNodeSource = serde_json::from_value(value)
        .context("Input is neither a record list nor a route store")?;
    source
        .route_ids()
        .into_iter()
        .map(|id| source.route_nodes(&id).map(|records| (id, records)))
        .collect()
}

/// Load a stock from a JSON key array or a `{"name", "keys"}` object
pub fn load_stock(path: &Path) -> Result<Stock> {
    let content = read_file(path)?;
    let value: serde_json::Value =
        serde_json::from_str(&content).context("Stock file is not valid JSON")?;

    if value.is_array() {
        let keys: Vec<String> =
            serde_json::from_value(value).context("Stock key list must hold strings")?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "stock".to_string());
        return Ok(Stock::from_keys(name, keys));
    }

    serde_json::from_value(value).context("Failed to parse stock file")
}

/// Determine if we should colorize stdout
fn should_colorize(color: ColorChoice) -> bool {
    match color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            if std::env::var("NO_COLOR").is_ok() {
                return false;
            }
            crossterm::tty::IsTty::is_tty(&std::io::stdout())
        }
    }
}
