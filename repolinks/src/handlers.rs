use anyhow::{Context, bail};
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use repolinks_core::config::{ConfigError, Endpoint, ExtractConfig};
use repolinks_core::data::Database;
use repolinks_core::report::{ReportFormat, generate_report, save_report};
use repolinks_core::{RepositoryUrlIndex, Structure};
use repolinks_source::gather_index;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, warn};

pub fn print_banner() {
    println!(
        "{} {}",
        "repolinks".bright_cyan().bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).bright_black()
    );
}

/// Logs go to stderr so the URL listing on stdout stays clean.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Load variables from a `.env` file into the process environment. With no
/// path, `.env` is searched for from the current directory upwards. Variables
/// already set are left alone. Returns the file that was read, if any.
pub fn load_env_file(path: Option<&Path>) -> Option<PathBuf> {
    match path {
        Some(path) => dotenvy::from_path(path).ok().map(|()| path.to_path_buf()),
        None => dotenvy::dotenv().ok(),
    }
}

// Helper functions for extract handler

/// Build the run configuration from `extract` arguments.
pub fn resolve_config(args: &ArgMatches) -> Result<ExtractConfig, ConfigError> {
    let uri = args.get_one::<String>("uri").map(String::as_str);
    let mut config = ExtractConfig::from_uri(uri)?;

    if let Some(database) = args.get_one::<String>("database") {
        config = config.with_database(database.as_str());
    }
    if let Some(collection) = args.get_one::<String>("collection") {
        config = config.with_collection(collection.as_str());
    }
    if let Some(output) = args.get_one::<String>("output") {
        let expanded = shellexpand::tilde(output);
        config = config.with_output(PathBuf::from(expanded.as_ref()));
    }
    if let Some(format) = args
        .get_one::<String>("format")
        .and_then(|f| ReportFormat::from_str(f))
    {
        config = config.with_format(format);
    }

    Ok(config)
}

/// Console listing of the index, one block per repository.
pub fn format_index(index: &RepositoryUrlIndex) -> String {
    let mut out = String::new();

    for (repo, urls) in index.iter() {
        out.push_str(&format!("{} {}\n", "Repository:".bright_blue().bold(), repo.bright_white()));
        for url in urls {
            out.push_str(&format!("{} {}\n", "-".blue(), url));
        }
    }

    out
}

pub async fn handle_extract(args: &ArgMatches) {
    let config = match resolve_config(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "✗ Error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!("Reading {}...", config.collection));

    let index = gather_index(&config).await;
    spinner.finish_and_clear();

    if index.is_empty() {
        println!("{} No repository URLs found.", "→".blue());
        return;
    }

    print!("{}", format_index(&index));
    println!();

    write_report(&index, config.format, &config.output);
}

/// Write the report. Failures are logged and otherwise ignored; the console
/// listing has already been printed by then.
pub fn write_report(index: &RepositoryUrlIndex, format: ReportFormat, output: &Path) -> bool {
    let content = match generate_report(index, format) {
        Ok(content) => content,
        Err(e) => {
            error!("Error rendering {} report: {}", format.as_str(), e);
            return false;
        }
    };

    match save_report(&content, output) {
        Ok(()) => {
            println!(
                "{} URLs saved to {}",
                "✓".green().bold(),
                output.display().to_string().bright_white()
            );
            true
        }
        Err(e) => {
            error!("Error saving URLs to file {}: {}", output.display(), e);
            false
        }
    }
}

// Helper functions for import handler

/// One document read from an import file. Either field may be missing.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedDocument {
    pub repo: Option<String>,
    pub structure: Option<Structure>,
}

/// Parse an import file: a JSON array of documents, or a single document.
/// Array entries that are not objects are skipped with a warning.
pub fn parse_documents(content: &str) -> anyhow::Result<Vec<ImportedDocument>> {
    let value: serde_json::Value =
        serde_json::from_str(content).context("Import file is not valid JSON")?;

    let items = match value {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(_) => vec![value],
        _ => bail!("Import file must hold a JSON array of documents or a single document"),
    };

    let documents = items
        .into_iter()
        .enumerate()
        .filter_map(|(position, item)| match item {
            serde_json::Value::Object(mut fields) => {
                let repo = fields
                    .remove("repo")
                    .and_then(|repo| repo.as_str().map(String::from));
                let structure = fields.remove("structure").map(Structure::from);
                Some(ImportedDocument { repo, structure })
            }
            _ => {
                warn!("Skipping entry {}: not a JSON object", position);
                None
            }
        })
        .collect();

    Ok(documents)
}

/// Load and parse documents from a file
pub fn load_documents_from_file(path: &Path) -> anyhow::Result<Vec<ImportedDocument>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read import file {}", path.display()))?;
    parse_documents(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Resolve a `sqlite://` store argument to a file path.
pub fn store_path(store: &str) -> anyhow::Result<PathBuf> {
    match Endpoint::parse(store)? {
        Endpoint::Sqlite(path) => Ok(path),
        Endpoint::Mongo(_) => bail!("Only sqlite:// stores can be managed locally"),
    }
}

/// Outcome of an import: documents added by this run and the collection's
/// size afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub collection_total: i64,
}

/// Import every document of `input` into `collection` of the store at `db_path`.
pub fn import_documents(
    input: &Path,
    db_path: &Path,
    collection: &str,
) -> anyhow::Result<ImportSummary> {
    let documents = load_documents_from_file(input)?;

    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let db = Database::new(db_path)
        .with_context(|| format!("Failed to open store {}", db_path.display()))?;

    for document in &documents {
        db.insert_document(collection, document.repo.as_deref(), document.structure.as_ref())?;
    }

    Ok(ImportSummary {
        imported: documents.len(),
        collection_total: db.count_documents(collection)?,
    })
}

pub fn handle_import(args: &ArgMatches) -> anyhow::Result<()> {
    let input = args
        .get_one::<PathBuf>("input")
        .context("--input is required")?;
    let store = args
        .get_one::<String>("store")
        .context("--store is required")?;
    let collection = args
        .get_one::<String>("collection")
        .context("--collection is required")?;

    let db_path = store_path(store)?;
    let summary = import_documents(input, &db_path, collection)?;

    println!(
        "{} Imported {} documents into {} ({}), {} stored in total",
        "✓".green().bold(),
        summary.imported.to_string().cyan(),
        collection.bright_white(),
        db_path.display().to_string().bright_white(),
        summary.collection_total.to_string().cyan()
    );
    Ok(())
}

pub fn handle_collections(args: &ArgMatches) -> anyhow::Result<()> {
    let store = args
        .get_one::<String>("store")
        .context("--store is required")?;
    let db_path = store_path(store)?;

    if !Database::exists(&db_path) {
        bail!("No local store at {}", db_path.display());
    }

    let db = Database::open(&db_path)?;
    let collections = db.list_collections()?;

    if collections.is_empty() {
        println!("{} Store is empty", "→".blue());
    }
    for (name, count) in collections {
        println!("  {} {} ({} documents)", "•".blue(), name.bright_white(), count);
    }
    Ok(())
}
