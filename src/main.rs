//! Binary entry point for bytestash.
//!
//! This binary provides the CLI interface for the bytestash snippet manager.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow unnecessary_wraps for consistent command function signatures
#![allow(clippy::unnecessary_wraps)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use anyhow::Context;
use bytestash::codegen::{CodeSuggester, OllamaSuggester};
use bytestash::config::StashConfig;
use bytestash::display::relative_update_time;
use bytestash::io::{ExportSerializer, ImportService};
use bytestash::models::{Fragment, NewSnippet, unique_languages};
use bytestash::observability::{self, LoggingConfig};
use bytestash::search::{SnippetFilter, compute_sections, resolve_selection};
use bytestash::store::{JsonFileStore, SnippetStore};
use bytestash::{Snippet, TracingNotifier};
use chrono::Utc;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// ByteStash - a personal code snippet manager.
#[derive(Parser)]
#[command(name = "bytestash")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Import snippets from an export document.
    Import {
        /// Path to the JSON export document.
        file: PathBuf,
    },

    /// Export the full collection to a JSON document.
    Export {
        /// Output file (default: bytestash-export-<date>.json).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Add a snippet from one or more code files.
    Add {
        /// Title of the snippet.
        title: String,

        /// Code file; repeat for multi-fragment snippets.
        #[arg(short, long = "file", required = true)]
        files: Vec<PathBuf>,

        /// Description of the snippet.
        #[arg(short, long)]
        description: Option<String>,

        /// Language tag applied to every fragment.
        #[arg(short, long)]
        language: Option<String>,

        /// Category tag; repeatable.
        #[arg(short = 't', long = "category")]
        categories: Vec<String>,

        /// Mark the snippet as publicly visible.
        #[arg(long)]
        public: bool,
    },

    /// List the stored snippets.
    List,

    /// Search snippets by term and categories.
    Search {
        /// The search term.
        query: String,

        /// Required category; repeatable.
        #[arg(short = 't', long = "category")]
        categories: Vec<String>,

        /// Also match the term against fragment code.
        #[arg(long)]
        code: bool,
    },

    /// Show category suggestions for a live query.
    Suggest {
        /// The raw query, e.g. "retry #ba".
        query: String,

        /// Category already selected; repeatable.
        #[arg(short, long = "selected")]
        selected: Vec<String>,

        /// Resolve this suggestion option instead of listing sections.
        #[arg(long)]
        pick: Option<String>,
    },

    /// Draft snippet code with the configured suggestion backend.
    Generate {
        /// Title of the snippet to draft.
        title: String,

        /// Description refining the request.
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = observability::init_observability(&LoggingConfig::from_env(cli.verbose)) {
        eprintln!("Failed to initialize observability: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Dispatches the parsed command.
async fn run_command(cli: Cli, config: StashConfig) -> anyhow::Result<()> {
    match cli.command {
        Commands::Import { file } => cmd_import(&config, file).await,

        Commands::Export { output } => cmd_export(&config, output).await,

        Commands::Add {
            title,
            files,
            description,
            language,
            categories,
            public,
        } => cmd_add(&config, title, files, description, language, categories, public).await,

        Commands::List => cmd_list(&config).await,

        Commands::Search {
            query,
            categories,
            code,
        } => cmd_search(&config, query, categories, code).await,

        Commands::Suggest {
            query,
            selected,
            pick,
        } => cmd_suggest(&config, query, selected, pick).await,

        Commands::Generate { title, description } => {
            cmd_generate(&config, title, description).await
        },

        Commands::Completions { shell } => cmd_completions(shell),
    }
}

/// Loads configuration.
fn load_config(path: Option<&str>) -> anyhow::Result<StashConfig> {
    // If a path is provided, load from that file
    if let Some(config_path) = path {
        return StashConfig::load_from_file(std::path::Path::new(config_path))
            .map_err(anyhow::Error::from);
    }

    // Environment override for config path
    if let Ok(config_path) = std::env::var("BYTESTASH_CONFIG_PATH") {
        if !config_path.trim().is_empty() {
            return StashConfig::load_from_file(std::path::Path::new(&config_path))
                .map_err(anyhow::Error::from);
        }
    }

    // Otherwise, load from default location
    Ok(StashConfig::load_default())
}

fn open_store(config: &StashConfig) -> Arc<JsonFileStore> {
    Arc::new(JsonFileStore::new(&config.store_path))
}

/// Import command.
async fn cmd_import(
    config: &StashConfig,
    file: PathBuf,
) -> anyhow::Result<()> {
    let store = open_store(config);
    let service = ImportService::new(store, TracingNotifier::new());

    // Line-based progress updates from the watch channel
    let mut progress_rx = service.subscribe();
    let progress_task = tokio::spawn(async move {
        while progress_rx.changed().await.is_ok() {
            let Some(progress) = progress_rx.borrow().clone() else {
                continue;
            };
            print!(
                "\rProcessing: {}/{} ({:.1}%) - Succeeded: {}, Failed: {}",
                progress.current,
                progress.total,
                progress.percent_complete(),
                progress.succeeded,
                progress.failed,
            );
            // Flush to ensure output appears immediately
            let _ = std::io::stdout().flush();
        }
    });

    let result = service.import_from_file(&file).await;
    progress_task.abort();

    let report = result?;

    // Clear progress line and print final summary
    println!();
    println!();
    println!("Import completed:");
    println!("  Imported:  {}", report.succeeded);
    println!("  Failed:    {}", report.failed);
    println!("  Total:     {}", report.total);

    if !report.errors.is_empty() {
        println!();
        println!("Errors ({}):", report.errors.len());
        for failure in report.errors.iter().take(10) {
            println!("  - {}: {}", failure.title, failure.error);
        }
        if report.errors.len() > 10 {
            println!("  ... and {} more", report.errors.len() - 10);
        }
    }

    Ok(())
}

/// Export command.
async fn cmd_export(
    config: &StashConfig,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let store = open_store(config);
    let snippets = store.list_snippets().await?;

    let now = Utc::now();
    let output = output.unwrap_or_else(|| PathBuf::from(ExportSerializer::file_name(now)));

    let serializer = ExportSerializer::new();
    serializer.export_and_notify(&output, &snippets, now, &TracingNotifier::new())?;

    println!("Export completed:");
    println!("  Exported: {}", snippets.len());
    println!("  Output:   {}", output.display());

    Ok(())
}

/// Add command.
async fn cmd_add(
    config: &StashConfig,
    title: String,
    files: Vec<PathBuf>,
    description: Option<String>,
    language: Option<String>,
    categories: Vec<String>,
    public: bool,
) -> anyhow::Result<()> {
    let mut snippet = NewSnippet::new(title).with_public(public);
    if let Some(description) = description {
        snippet = snippet.with_description(description);
    }
    for category in categories {
        snippet = snippet.with_category(category);
    }
    for path in files {
        let code = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut fragment = Fragment::new(file_name, code);
        if let Some(language) = &language {
            fragment = fragment.with_language(language.clone());
        }
        snippet = snippet.with_fragment(fragment);
    }

    let store = open_store(config);
    let stored = store.add_snippet(snippet, true).await?;

    println!("Added snippet {} \"{}\"", stored.id, stored.title);
    if !stored.categories.is_empty() {
        println!("  Categories: {}", stored.categories.join(", "));
    }
    println!("  Fragments:  {}", stored.fragments.len());

    Ok(())
}

/// List command.
async fn cmd_list(config: &StashConfig) -> anyhow::Result<()> {
    let store = open_store(config);
    let snippets = store.list_snippets().await?;

    if snippets.is_empty() {
        println!("No snippets stored.");
        return Ok(());
    }

    println!("{} snippets:", snippets.len());
    println!();
    let now = Utc::now();
    for snippet in &snippets {
        print_snippet_line(snippet, now);
    }

    Ok(())
}

/// Search command.
async fn cmd_search(
    config: &StashConfig,
    query: String,
    categories: Vec<String>,
    code: bool,
) -> anyhow::Result<()> {
    let store = open_store(config);
    let snippets = store.list_snippets().await?;

    let filter = SnippetFilter::new()
        .with_term(query)
        .with_categories(categories)
        .with_code_search(code || config.search_code);
    let matches = filter.apply(&snippets);

    println!("Found {} snippets:", matches.len());
    println!();
    let now = Utc::now();
    for snippet in matches {
        print_snippet_line(snippet, now);
    }

    Ok(())
}

/// Suggest command.
async fn cmd_suggest(
    config: &StashConfig,
    query: String,
    selected: Vec<String>,
    pick: Option<String>,
) -> anyhow::Result<()> {
    if let Some(option) = pick {
        let selection = resolve_selection(&option, &query);
        println!("Query:    \"{}\"", selection.next_query);
        println!("Category: {}", selection.category);
        return Ok(());
    }

    let store = open_store(config);
    let snippets = store.list_snippets().await?;

    // All categories in the collection, first occurrence wins.
    let mut existing: Vec<String> = Vec::new();
    for snippet in &snippets {
        for category in &snippet.categories {
            if !existing.contains(category) {
                existing.push(category.clone());
            }
        }
    }

    let sections = compute_sections(&query, &existing, &selected);
    if sections.is_empty() {
        println!("No suggestions.");
        return Ok(());
    }
    for section in sections {
        println!("{}:", section.title());
        for item in &section.items {
            println!("  {item}");
        }
    }

    Ok(())
}

/// Generate command.
async fn cmd_generate(
    config: &StashConfig,
    title: String,
    description: Option<String>,
) -> anyhow::Result<()> {
    let mut suggester = OllamaSuggester::new().with_http_config(config.codegen.http_config());
    if let Some(endpoint) = &config.codegen.endpoint {
        suggester = suggester.with_endpoint(endpoint.clone());
    }
    if let Some(model) = &config.codegen.model {
        suggester = suggester.with_model(model.clone());
    }

    if !suggester.is_available().await {
        eprintln!("Suggestion backend is not reachable.");
        eprintln!("Note: start Ollama locally or set OLLAMA_HOST");
        anyhow::bail!("suggestion backend unavailable");
    }

    let code = suggester.suggest(&title, description.as_deref()).await?;
    println!("{code}");

    Ok(())
}

/// Completions command.
fn cmd_completions(shell: Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "bytestash", &mut std::io::stdout());
    Ok(())
}

/// Prints one listing line for a snippet.
fn print_snippet_line(snippet: &Snippet, now: chrono::DateTime<Utc>) {
    let languages = unique_languages(&snippet.fragments);
    let language_note = if languages.is_empty() {
        String::new()
    } else {
        format!(" [{}]", languages.join(", "))
    };
    let visibility = if snippet.is_public { "public" } else { "private" };
    println!(
        "  #{} {}{} ({})",
        snippet.id, snippet.title, language_note, visibility
    );
    if let Some(description) = &snippet.description {
        // Truncate content for display
        let description = if description.chars().count() > 100 {
            let truncated: String = description.chars().take(100).collect();
            format!("{truncated}...")
        } else {
            description.clone()
        };
        println!("       {description}");
    }
    if !snippet.categories.is_empty() {
        println!("       tags: {}", snippet.categories.join(", "));
    }
    println!(
        "       updated {}",
        relative_update_time(&snippet.updated_at, now)
    );
    println!();
}
