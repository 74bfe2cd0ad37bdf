use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ftsql::config::FulltextConfig;
use ftsql::fulltext::{dump, parse_query, Dialect, Renderer};

/// Translate a search-box fulltext query into native SQL fulltext syntax
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Target dialect (h2, postgresql, mysql, oracle, sqlserver)
    #[arg(short, long)]
    dialect: Option<Dialect>,

    /// Render for every supported dialect
    #[arg(long, conflicts_with = "dialect")]
    all: bool,

    /// Also print the parsed query tree
    #[arg(long)]
    ast: bool,

    /// Print the parsed query tree as JSON instead of rendering it
    #[arg(long, conflicts_with_all = ["ast", "all", "dialect"])]
    json: bool,

    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// The query; several arguments are joined with spaces
    #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
    query: Vec<String>,
}

fn main() -> Result<()> {
    // Logs go to stderr so the fragment on stdout can be piped
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => FulltextConfig::load_from(path)?,
        None => FulltextConfig::load().context("Failed to load configuration")?,
    };
    let query = cli.query.join(" ");

    if cli.json {
        let ast = parse_query(&query)?;
        println!("{}", serde_json::to_string_pretty(&ast)?);
        return Ok(());
    }

    if cli.ast {
        let ast = parse_query(&query)?;
        println!("ast: {}", dump(ast.as_ref()));
    }

    let renderer = Renderer::new(config.render_options());
    if cli.all {
        for dialect in Dialect::ALL {
            println!("{:<10} {}", dialect, renderer.translate(&query, dialect)?);
        }
    } else {
        let dialect = cli.dialect.unwrap_or(config.default_dialect);
        println!("{}", renderer.translate(&query, dialect)?);
    }

    Ok(())
}
