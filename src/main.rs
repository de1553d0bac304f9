use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use depgraph::export::{self, ExportFormat, GraphReport};
use depgraph::graph::DependencyGraph;
use depgraph::ingest::{self, IngestOptions, IngestReport};
use depgraph::scanner::{self, ManifestKind, ScanOptions};

#[derive(Parser)]
#[command(name = "depgraph")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version)]
#[command(about = "Build and query the dependency graph of an installed npm/bower tree", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct ScanArgs {
    /// Project directory to scan
    #[arg(short, long, default_value = ".", env = "DEPGRAPH_PATH")]
    path: PathBuf,

    /// Follow the project's devDependencies too
    #[arg(long)]
    include_dev: bool,

    /// Skip bower_components
    #[arg(long)]
    no_bower: bool,

    /// Deepest install level to read (1 = top-level node_modules only)
    #[arg(long)]
    max_depth: Option<usize>,
}

impl ScanArgs {
    fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            include_root: true,
            include_bower: !self.no_bower,
            max_depth: self.max_depth,
        }
    }

    fn ingest_options(&self) -> IngestOptions {
        IngestOptions {
            include_dev: self.include_dev,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a project and print the whole dependency graph
    Scan {
        #[command(flatten)]
        scan: ScanArgs,

        /// Output format: json, markdown, dot
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List what a package depends on
    Deps {
        /// Package name (case-insensitive)
        name: String,

        #[command(flatten)]
        scan: ScanArgs,

        /// Follow dependencies of dependencies
        #[arg(long)]
        transitive: bool,
    },
    /// List what depends on a package
    Dependants {
        /// Package name (case-insensitive)
        name: String,

        #[command(flatten)]
        scan: ScanArgs,
    },
    /// Show version information
    Version,
}

struct Loaded {
    project_name: Option<String>,
    graph: DependencyGraph,
    report: IngestReport,
}

fn load(args: &ScanArgs) -> Result<Loaded> {
    let records = scanner::scan(&args.path, &args.scan_options())
        .with_context(|| format!("failed to scan {}", args.path.display()))?;

    let project_name = records
        .iter()
        .find(|r| r.kind == ManifestKind::Root)
        .map(|r| r.name.clone());

    let (graph, report) = ingest::build_graph(&records, &args.ingest_options())
        .context("failed to build dependency graph")?;

    Ok(Loaded {
        project_name,
        graph,
        report,
    })
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Some(Commands::Scan {
            scan,
            format,
            output,
        }) => {
            let loaded = load(scan)?;
            let report = GraphReport::new(loaded.project_name, &loaded.graph, loaded.report)?;

            match output {
                Some(path) => {
                    let file = File::create(path)
                        .with_context(|| format!("failed to create {}", path.display()))?;
                    let mut writer = BufWriter::new(file);
                    export::export(*format, &report, &mut writer)?;
                    writer.flush()?;
                    tracing::info!(path = %path.display(), format = %format, "report written");
                }
                None => export::export(*format, &report, &mut io::stdout().lock())?,
            }
        }
        Some(Commands::Deps {
            name,
            scan,
            transitive,
        }) => {
            let loaded = load(scan)?;
            let node = loaded.graph.get_node(name)?;
            let value = if *transitive {
                json!({
                    "name": node.name,
                    "version": node.version,
                    "transitive": loaded.graph.transitive_dependencies(name)?,
                })
            } else {
                json!({
                    "name": node.name,
                    "version": node.version,
                    "dependencies": loaded.graph.list_dependencies_of_dependency(name)?,
                })
            };
            print_json(&value)?;
        }
        Some(Commands::Dependants { name, scan }) => {
            let loaded = load(scan)?;
            let node = loaded.graph.get_node(name)?;
            print_json(&json!({
                "name": node.name,
                "version": node.version,
                "aliases": node.aliases,
                "dependants": loaded.graph.list_dependants_of_dependency(name),
            }))?;
        }
        Some(Commands::Version) => {
            println!("depgraph v{}", env!("CARGO_PKG_VERSION"));
        }
        None => {
            println!("depgraph - dependency graph for installed npm/bower trees");
            println!("Run 'depgraph scan' to print the graph of the current project");
            println!("Run 'depgraph --help' for more information");
        }
    }

    Ok(())
}
