//! mdsite CLI - Render Markdown pages and build static sites
//!
//! Usage:
//!   mdsite [OPTIONS] <COMMAND>
//!
//! Commands:
//!   render    Render one Markdown file to HTML (or its node tree as JSON)
//!   validate  Check documents for errors without output
//!   title     Print the title of a document
//!   build     Build a site from content, static assets and a template

mod config;
mod json;
mod site;

use std::error::Error as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser as _, Subcommand};
use mdsite_core::parser::DEFAULT_ROOT_TAG;
use mdsite_core::{extract_title, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::SiteConfig;
use crate::json::{convert_node, convert_site_error, JsonValidation};
use crate::site::SiteError;

#[derive(Debug, clap::Parser)]
#[command(name = "mdsite", version, about = "Render Markdown pages and build static sites")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render one Markdown file to HTML
    Render {
        file: PathBuf,
        /// Print the node tree as JSON instead of HTML
        #[arg(short, long)]
        json: bool,
        /// Tag of the element wrapping the document
        #[arg(long, default_value = DEFAULT_ROOT_TAG)]
        root_tag: String,
    },
    /// Check documents for errors without output
    Validate {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Report results as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Print the title of a document
    Title { file: PathBuf },
    /// Build a site from content, static assets and a template
    Build(BuildArgs),
}

#[derive(Debug, Args)]
struct BuildArgs {
    /// Config file (defaults to ./mdsite.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Directory of Markdown pages
    #[arg(long)]
    content: Option<PathBuf>,
    /// Directory copied verbatim into the output
    #[arg(long = "static")]
    static_dir: Option<PathBuf>,
    /// Page template with {{ Title }} and {{ Content }} placeholders
    #[arg(long)]
    template: Option<PathBuf>,
    /// Output directory, replaced on every build
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Prefix for root-relative links, e.g. /my-repo/
    #[arg(long)]
    basepath: Option<String>,
    /// Skip pages that fail to render instead of stopping
    #[arg(long)]
    keep_going: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Render {
            file,
            json,
            root_tag,
        } => cmd_render(&file, json, root_tag),
        Command::Validate { files, json } => cmd_validate(&files, json),
        Command::Title { file } => cmd_title(&file),
        Command::Build(args) => cmd_build(args),
    }
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path.display()))
}

// =============================================================================
// Render Command
// =============================================================================

fn cmd_render(file: &Path, json: bool, root_tag: String) -> Result<()> {
    let input = read_input(file)?;
    let parser = Parser::new().with_root_tag(root_tag);
    let context = || format!("failed to render '{}'", file.display());

    if json {
        let root = parser.parse_document(&input).with_context(context)?;
        println!("{}", serde_json::to_string_pretty(&convert_node(&root))?);
    } else {
        println!("{}", parser.to_html(&input).with_context(context)?);
    }
    Ok(())
}

// =============================================================================
// Validate Command
// =============================================================================

/// Validate every file, recording read and parse failures per file.
fn validate_files(files: &[PathBuf]) -> Vec<(&PathBuf, Result<(), SiteError>)> {
    let parser = Parser::new();
    files
        .iter()
        .map(|file| {
            let result = validate_file(&parser, file);
            debug!(file = %file.display(), ok = result.is_ok(), "validated");
            (file, result)
        })
        .collect()
}

fn validate_file(parser: &Parser, file: &Path) -> Result<(), SiteError> {
    let input = fs::read_to_string(file).map_err(|source| SiteError::Io {
        path: file.to_path_buf(),
        source,
    })?;
    parser
        .render(&input)
        .map(|_| ())
        .map_err(|source| SiteError::Parse {
            path: file.to_path_buf(),
            source,
        })
}

fn cmd_validate(files: &[PathBuf], json: bool) -> Result<()> {
    let results = validate_files(files);
    let failed = results.iter().filter(|(_, r)| r.is_err()).count();

    if json {
        let report: Vec<_> = results
            .iter()
            .map(|(file, result)| JsonValidation {
                file: file.display().to_string(),
                valid: result.is_ok(),
                error: result.as_ref().err().map(convert_site_error),
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "valid": failed == 0,
                "files": report,
            }))?
        );
    } else {
        for (file, result) in &results {
            match result {
                Ok(()) => println!("ok      {}", file.display()),
                Err(e) => {
                    let cause = e.source().map_or_else(|| e.to_string(), ToString::to_string);
                    println!("invalid {}: {}", file.display(), cause);
                }
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} file(s) failed validation", failed, results.len());
    }
    Ok(())
}

// =============================================================================
// Title Command
// =============================================================================

fn cmd_title(file: &Path) -> Result<()> {
    let input = read_input(file)?;
    let title = extract_title(&input)
        .with_context(|| format!("failed to read title of '{}'", file.display()))?;
    println!("{}", title);
    Ok(())
}

// =============================================================================
// Build Command
// =============================================================================

fn cmd_build(args: BuildArgs) -> Result<()> {
    let mut config = SiteConfig::load(args.config.as_deref())?;
    if let Some(content) = args.content {
        config.content_dir = content;
    }
    if let Some(static_dir) = args.static_dir {
        config.static_dir = static_dir;
    }
    if let Some(template) = args.template {
        config.template = template;
    }
    if let Some(output) = args.output {
        config.output_dir = output;
    }
    if let Some(basepath) = args.basepath {
        config.basepath = basepath;
    }
    debug!(?config, "effective site config");

    let report = site::build_site(&config, args.keep_going)?;
    println!(
        "Generated {} page(s) into {}",
        report.pages,
        config.output_dir.display()
    );

    if !report.is_success() {
        for failure in &report.failures {
            eprintln!("  - {}", failure);
        }
        bail!("{} page(s) failed to build", report.failures.len());
    }
    Ok(())
}
