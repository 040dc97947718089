//! docgraph CLI

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use docgraph::{
    DocSet, DocumentCategory, Frontmatter, GraphFilter, TemplateRegistry, load_settings,
    to_force_graph,
};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

/// docgraph - document relationship graphs for markdown documentation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Documentation root directory
    #[arg(short, long, env = "DOCGRAPH_ROOT", default_value = ".")]
    root: PathBuf,

    /// Configuration file (YAML, TOML or JSON)
    #[arg(short, long, env = "DOCGRAPH_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the graph in force-graph JSON form
    Graph(FilterArgs),
    /// Print graph metrics and metadata statistics
    Stats {
        /// Length of the most-connected ranking
        #[arg(long)]
        top: Option<usize>,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// List documents with no links in or out
    Orphans(FilterArgs),
    /// List references that resolve to no document
    Dangling,
    /// Validate document frontmatter; exits non-zero on errors
    Validate,
    /// List the document templates
    Templates {
        /// Only templates of this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Create a document from a template
    New {
        /// Template id
        template: String,
        /// Document title
        #[arg(long)]
        title: Option<String>,
        /// Document tags (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Write to this file, relative to the root, instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Keep only these categories (repeatable)
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Keep documents carrying any of these tags (repeatable)
    #[arg(long = "tag")]
    tags: Vec<String>,

    /// Keep only orphaned documents
    #[arg(long)]
    orphans_only: bool,

    /// Case-insensitive substring of the document title
    #[arg(long)]
    search: Option<String>,
}

impl FilterArgs {
    fn to_filter(&self) -> GraphFilter {
        let mut filter = GraphFilter::new().orphans_only(self.orphans_only);
        for category in &self.categories {
            filter = filter.with_category(DocumentCategory::parse(category));
        }
        for tag in &self.tags {
            filter = filter.with_tag(tag);
        }
        if let Some(term) = &self.search {
            filter = filter.with_search(term.clone());
        }
        filter
    }
}

#[derive(Serialize)]
struct OrphanEntry<'a> {
    id: &'a str,
    name: &'a str,
    category: DocumentCategory,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    log::debug!("docgraph v{}", env!("CARGO_PKG_VERSION"));

    let templates = TemplateRegistry::new();
    match &cli.command {
        Command::Templates { category } => {
            match category {
                Some(category) => {
                    print_json(&templates.by_category(DocumentCategory::parse(category)))?
                }
                None => print_json(&templates.all())?,
            }
            return Ok(ExitCode::SUCCESS);
        }
        Command::New {
            template,
            title,
            tags,
            output,
        } => {
            let mut overrides = Frontmatter::new();
            if let Some(title) = title {
                overrides = overrides.with("title", title.as_str());
            }
            if !tags.is_empty() {
                overrides = overrides.with("tags", tags.clone());
            }
            let content = templates.create(template, &overrides)?;

            match output {
                Some(output) => {
                    let path = cli.root.join(output);
                    if path.exists() {
                        anyhow::bail!("{} already exists", path.display());
                    }
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    log::info!("Created {} from template {}", path.display(), template);
                }
                None => print!("{}", content),
            }
            return Ok(ExitCode::SUCCESS);
        }
        _ => {}
    }

    let settings = load_settings(cli.config.as_deref()).context("Failed to load configuration")?;
    let docs = DocSet::load(&cli.root, settings)
        .with_context(|| format!("Failed to scan {}", cli.root.display()))?;

    match cli.command {
        Command::Graph(filter) => {
            let graph = docs.graph(&filter.to_filter());
            print_json(&to_force_graph(&graph))?;
        }
        Command::Stats { top, filter } => {
            let stats = docs.stats(&filter.to_filter(), top);
            stats.graph.log_summary();
            print_json(&stats)?;
        }
        Command::Orphans(filter) => {
            let graph = docs.graph(&filter.to_filter().orphans_only(true));
            let orphans: Vec<OrphanEntry> = graph
                .nodes
                .iter()
                .map(|n| OrphanEntry {
                    id: &n.id,
                    name: &n.name,
                    category: n.category,
                })
                .collect();
            log::info!("{} orphaned documents", orphans.len());
            print_json(&orphans)?;
        }
        Command::Dangling => {
            let dangling = docs.dangling();
            log::info!("{} dangling references", dangling.len());
            print_json(&dangling)?;
        }
        Command::Validate => {
            let results = docs.validate()?;
            let failed = results.iter().filter(|r| r.report.has_failures()).count();
            print_json(&results)?;
            if failed > 0 {
                log::error!("{} of {} documents failed validation", failed, results.len());
                return Ok(ExitCode::FAILURE);
            }
            log::info!("All {} documents passed validation", results.len());
        }
        Command::Templates { .. } | Command::New { .. } => {}
    }

    Ok(ExitCode::SUCCESS)
}
