//! CLI binary for bizfinder.

use bizfinder::categories::{self, CATEGORIES};
use bizfinder::export::{self, ExportFormat};
use bizfinder::{
    FinderConfig, FinderError, ProgressCallback, ProgressEvent, QueryPlan, RunOutcome,
    SearchEngine, Selection,
};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Find business profiles on social media by category and city.
#[derive(Parser)]
#[command(name = "bizfinder", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Search for profiles and export the result table.
    Search {
        #[command(flatten)]
        selection: SelectionArgs,

        #[command(flatten)]
        overrides: Overrides,

        /// Print the query plan without contacting the provider.
        #[arg(long)]
        dry_run: bool,

        /// Show the table but do not write an export file.
        #[arg(long)]
        no_export: bool,

        /// Directory for the export file.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export format (csv|json).
        #[arg(long)]
        format: Option<ExportFormat>,
    },

    /// Print the queries a search would send.
    Query {
        #[command(flatten)]
        selection: SelectionArgs,

        #[command(flatten)]
        overrides: Overrides,
    },

    /// List the built-in business categories.
    Categories,

    /// Print the effective configuration as TOML.
    Config {
        /// Save it to the default config path.
        #[arg(long)]
        write: bool,
    },
}

/// What to search for.
#[derive(Args)]
struct SelectionArgs {
    /// Business category; repeat for several.
    #[arg(short = 'c', long = "category")]
    categories: Vec<String>,

    /// Search every built-in category.
    #[arg(long, conflicts_with_all = ["categories", "keyword"])]
    all: bool,

    /// Free-text keyword instead of a category.
    #[arg(short, long, conflicts_with = "categories")]
    keyword: Option<String>,
}

/// Flags overriding values from the config file.
#[derive(Args)]
struct Overrides {
    /// Search provider (duckduckgo|google).
    #[arg(short, long)]
    provider: Option<SearchEngine>,

    /// OR-combine up to 5 categories per query.
    #[arg(long)]
    batch: bool,

    /// Results requested per query.
    #[arg(short = 'n', long)]
    max_results: Option<usize>,

    /// Politeness delay upper bound in seconds.
    #[arg(short, long)]
    delay: Option<f64>,

    /// Location literal, e.g. "Kota Solok".
    #[arg(long)]
    location: Option<String>,

    /// Domain for the `site:` operator.
    #[arg(long)]
    domain: Option<String>,

    /// DuckDuckGo region code, e.g. id-id.
    #[arg(long)]
    region: Option<String>,
}

impl Overrides {
    fn apply(&self, config: &mut FinderConfig) {
        if let Some(engine) = self.provider {
            config.provider.engine = engine;
        }
        if self.batch {
            config.query.batch = true;
        }
        if let Some(n) = self.max_results {
            config.provider.max_results = n;
        }
        if let Some(delay) = self.delay {
            config.provider.delay_seconds = delay;
        }
        if let Some(ref location) = self.location {
            config.query.location = location.clone();
        }
        if let Some(ref domain) = self.domain {
            config.query.domain = domain.clone();
        }
        if let Some(ref region) = self.region {
            config.provider.region = region.clone();
        }
    }
}

impl SelectionArgs {
    fn resolve(&self, config: &FinderConfig) -> anyhow::Result<Selection> {
        if let Some(ref keyword) = self.keyword {
            return Ok(Selection::Keyword(keyword.clone()));
        }
        if self.all {
            return Ok(Selection::Multi(
                CATEGORIES.iter().map(|c| (*c).to_owned()).collect(),
            ));
        }

        let terms = if self.categories.is_empty() {
            config.categories.clone()
        } else {
            self.categories.clone()
        };
        if terms.is_empty() {
            anyhow::bail!(
                "choose a category with --category, --all or --keyword (see `bizfinder categories`)"
            );
        }

        let terms = terms
            .into_iter()
            .map(|term| match categories::resolve(&term) {
                Some(canonical) => canonical.to_owned(),
                None => {
                    tracing::warn!(category = %term, "not in the built-in catalog, searching as given");
                    term
                }
            })
            .collect();
        Ok(Selection::from_terms(terms))
    }
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so the result table on stdout stays clean.
    // Users can override with RUST_LOG=debug to see everything.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("bizfinder=info,bizfinder_search=info")
            }),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("bizfinder failed: {e:#}");
        if let Some(hint) = e.downcast_ref::<FinderError>().and_then(FinderError::hint) {
            eprintln!("hint: {hint}");
        }
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => FinderConfig::from_file(path)?,
        None => FinderConfig::load_or_default()?,
    };

    match cli.command {
        Command::Search {
            selection,
            overrides,
            dry_run,
            no_export,
            output,
            format,
        } => {
            overrides.apply(&mut config);
            if let Some(dir) = output {
                config.export.output_dir = dir;
            }
            if let Some(format) = format {
                config.export.format = format;
            }
            let selection = selection.resolve(&config)?;
            if dry_run {
                return print_plan(&selection, &config);
            }
            run_search(&config, &selection, !no_export).await
        }
        Command::Query {
            selection,
            overrides,
        } => {
            overrides.apply(&mut config);
            let selection = selection.resolve(&config)?;
            print_plan(&selection, &config)
        }
        Command::Categories => {
            for category in CATEGORIES {
                println!("{category}");
            }
            Ok(())
        }
        Command::Config { write } => {
            print!("{}", config.to_toml()?);
            if write {
                let path = FinderConfig::default_config_path();
                config.save_to_file(&path)?;
                eprintln!("saved to {}", path.display());
            }
            Ok(())
        }
    }
}

fn print_plan(selection: &Selection, config: &FinderConfig) -> anyhow::Result<()> {
    config.validate()?;
    let plan = QueryPlan::build(selection, &config.query)?;
    for planned in &plan {
        println!("{}", planned.query);
    }
    Ok(())
}

async fn run_search(
    config: &FinderConfig,
    selection: &Selection,
    write_export: bool,
) -> anyhow::Result<()> {
    config.validate()?;
    let plan = QueryPlan::build(selection, &config.query)?;

    println!(
        "searching '{}' in {} via {} ({} queries)",
        selection.label(),
        config.query.location,
        config.provider.engine,
        plan.len()
    );

    let bar = ProgressBar::new(1000);
    if let Ok(style) =
        ProgressStyle::with_template("  {prefix} [{bar:30}] {percent:>3}% {wide_msg}")
    {
        bar.set_style(style);
    }

    let callback: ProgressCallback = {
        let bar = bar.clone();
        Box::new(move |event| match event {
            ProgressEvent::QueryStarted { index, total, .. } => {
                bar.set_prefix(format!("query {}/{total}", index + 1));
                bar.set_position(0);
            }
            ProgressEvent::ItemProcessed { fraction, status } => {
                bar.set_position((fraction * 1000.0).round() as u64);
                bar.set_message(status);
            }
            ProgressEvent::RecordAccepted { .. } | ProgressEvent::QueryFinished { .. } => {}
        })
    };

    let provider = config.provider.engine;
    let outcome = bizfinder::run(&provider, &plan, config, Some(&callback)).await;
    bar.finish_and_clear();
    let report = outcome?;

    if let RunOutcome::Found(_) = report.outcome() {
        print!("{}", export::render_table(&report.records));
    }
    println!("{}", report.summary());

    if write_export && matches!(report.outcome(), RunOutcome::Found(_)) {
        let file_name = export::export_filename(
            &config.export.file_prefix,
            &selection.label(),
            config.export.format,
        );
        let path = export::export_records(
            &report.records,
            &config.export.output_dir,
            &file_name,
            config.export.format,
        )?;
        println!("saved {}", path.display());
    }

    Ok(())
}
