use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use prodtax_core::*;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// Product Taxonomy Browser - Look up categories and their localized paths
///
/// Examples:
///   # List root categories
///   prodtax
///
///   # Show a category with its children
///   prodtax 1594
///
///   # Show categories in German (falls back to the key language for missing names)
///   prodtax --display de-DE 6536 16
///
///   # Use taxonomy files from a directory instead of the bundled sample
///   prodtax --data-dir ./taxonomy --lang ja-JP --display ja-JP 166
///
///   # Machine-readable output
///   prodtax --json 1594
#[derive(Parser, Debug)]
#[command(name = "prodtax")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Data Files:\n  \
    - Each language is read from taxonomy-with-ids.<LANG>.txt\n  \
    - The key language defines the tree; other languages only provide names\n\n\
Config File:\n  \
    - JSON with optional fields key_language, languages, data_dir\n  \
    - Command-line flags override values from the file")]
struct Cli {
    /// Category IDs to display (root categories are listed when omitted)
    #[arg(value_name = "ID")]
    ids: Vec<CategoryId>,

    /// Path to a JSON config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory containing taxonomy-with-ids.<LANG>.txt files
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Language that defines the category tree
    #[arg(short, long, value_name = "LANG")]
    key_language: Option<String>,

    /// Additional language to load (can be specified multiple times)
    #[arg(short, long = "lang", value_name = "LANG")]
    languages: Vec<String>,

    /// Language to display names in (defaults to the key language)
    #[arg(short, long, value_name = "LANG")]
    display: Option<String>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Log loading details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            eprintln!("{} {:#}", "Error:".red().bold(), err);
            process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "prodtax=debug,prodtax_core=debug"
    } else {
        "prodtax=warn,prodtax_core=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Merge the config file (if any) with command-line overrides
fn resolve_config(cli: &Cli) -> Result<TaxonomyConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Error loading config from '{}'", path.display()))?,
        None => TaxonomyConfig::default(),
    };

    if let Some(key_language) = &cli.key_language {
        config.key_language = key_language.clone();
    }
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = Some(data_dir.clone());
    }
    for language in &cli.languages {
        if !config.languages.contains(language) {
            config.languages.push(language.clone());
        }
    }

    for warning in language_warnings(&config) {
        tracing::warn!("{}", warning);
    }

    Ok(config)
}

/// Warn about languages the configured data source is unlikely to provide
fn language_warnings(config: &TaxonomyConfig) -> Vec<String> {
    let bundled = EmbeddedLoader::languages();
    let mut warnings = Vec::new();

    for language in config.languages.iter().chain([&config.key_language]) {
        if !SUPPORTED_LANGUAGES.contains(&language.as_str()) {
            warnings.push(format!(
                "'{}' is not one of the standard taxonomy locales",
                language
            ));
        } else if config.data_dir.is_none() && !bundled.contains(&language.as_str()) {
            warnings.push(format!(
                "'{}' is not bundled (bundled: {}); use --data-dir to load it",
                language,
                bundled.join(", ")
            ));
        }
    }

    warnings
}

/// Returns Ok(false) when some requested IDs were not found
fn run(cli: &Cli) -> Result<bool> {
    let config = resolve_config(cli)?;
    let taxonomy = Taxonomy::from_config(&config).context("Error building taxonomy")?;

    let display = cli
        .display
        .clone()
        .unwrap_or_else(|| taxonomy.key_language().to_string());
    taxonomy
        .load_language(&display)
        .with_context(|| format!("Error loading display language '{}'", display))?;

    if cli.ids.is_empty() {
        let mut roots = taxonomy.get_roots_category_info(&display)?;
        roots.sort_by_key(|info| info.id);
        print_infos(&roots, cli.json)?;
        return Ok(true);
    }

    let mut infos = Vec::new();
    let mut all_found = true;
    for &id in &cli.ids {
        match taxonomy.get_category_info(id, &display)? {
            Some(info) => infos.push(info),
            None => {
                eprintln!("{} category {} not found", "Warning:".yellow().bold(), id);
                all_found = false;
            }
        }
    }

    print_infos(&infos, cli.json)?;
    Ok(all_found)
}

fn print_infos(infos: &[CategoryInfo], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(infos)?);
        return Ok(());
    }

    for info in infos {
        println!("{} - {}", info.id.to_string().bold(), info);
    }
    Ok(())
}
