use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mdsite::{Config, ConfigError, PageError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Page(#[from] PageError),

    #[error("{0}")]
    Markdown(#[from] mdsite::Error),

    #[error("Failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Parser)]
#[command(name = "mdsite", version)]
#[command(about = "Build a static HTML site from Markdown files")]
struct Cli {
    /// Log every generated page and copied file
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy static assets and generate every page
    Build {
        /// Config file (defaults are used if it does not exist)
        #[arg(short, long, default_value = "mdsite.toml")]
        config: PathBuf,

        /// Prefix for root-relative links, overriding the config file
        #[arg(long)]
        basepath: Option<String>,
    },
    /// Convert a single Markdown file to an HTML fragment
    Convert {
        /// Input Markdown file
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build { config, basepath } => build(&config, basepath),
        Commands::Convert { input, output } => convert(&input, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn build(config_path: &Path, basepath: Option<String>) -> Result<(), CliError> {
    let mut config = Config::load_or_default(config_path)?;
    if let Some(basepath) = basepath {
        config.site.basepath = basepath;
    }
    let site = &config.site;

    mdsite::copy_static(&site.static_dir, &site.public_dir)?;
    let pages = mdsite::generate_pages_recursive(
        &site.content_dir,
        &site.template,
        &site.public_dir,
        &site.basepath,
        &config.template,
    )?;

    println!("Generated {} pages in {}", pages, site.public_dir.display());
    Ok(())
}

fn convert(input: &Path, output: Option<&Path>) -> Result<(), CliError> {
    let markdown = fs::read_to_string(input).map_err(|source| CliError::Io {
        action: "read",
        path: input.to_path_buf(),
        source,
    })?;
    let html = mdsite::markdown_to_html(&markdown)?;

    match output {
        Some(path) => {
            fs::write(path, html).map_err(|source| CliError::Io {
                action: "write",
                path: path.to_path_buf(),
                source,
            })?;
            println!("Created {}", path.display());
        }
        None => println!("{}", html),
    }
    Ok(())
}
