//! relsql: compile serialized query trees from the command line
//!
//! # Usage
//!
//! ```bash
//! # Compile a JSON tree for PostgreSQL
//! relsql compile query.json --dialect postgres
//!
//! # Inline bind values instead of placeholders
//! cat query.json | relsql compile --dialect oracle --substitute
//!
//! # Graphviz rendering of the tree
//! relsql dot query.json | dot -Tsvg > query.svg
//! ```

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use relsql::prelude::*;
use relsql::visitors::{to_dot, where_sql};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "relsql")]
#[command(version)]
#[command(about = "Compile relational-algebra trees to dialect-exact SQL", long_about = None)]
#[command(after_help = "EXAMPLES:
    relsql compile query.json --dialect mysql
    relsql compile --config relsql.toml < query.json
    relsql where query.json --dialect sqlserver
    relsql dot query.json")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct Target {
    /// JSON-encoded tree; reads stdin when omitted
    input: Option<PathBuf>,

    /// Target dialect (overrides the config file)
    #[arg(short, long, env = "RELSQL_DIALECT")]
    dialect: Option<Dialect>,

    /// TOML compiler configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Split IN lists longer than this
    #[arg(long)]
    in_clause_length: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a tree to SQL and print its binds
    Compile {
        #[command(flatten)]
        target: Target,

        /// Inline quoted values instead of placeholders
        #[arg(short, long)]
        substitute: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print only the WHERE clause of a SELECT statement
    Where {
        #[command(flatten)]
        target: Target,
    },
    /// Render the tree as a Graphviz digraph
    Dot {
        /// JSON-encoded tree; reads stdin when omitted
        input: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("RELSQL_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Compile {
            target,
            substitute,
            json,
        } => {
            let node = read_tree(target.input.as_ref())?;
            let mut config = resolve_config(&target)?;
            config.substitute_binds |= substitute;
            let compiled = config.compile(&node)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&compiled)?);
            } else {
                print_compiled(&config.dialect, &compiled);
            }
        }
        Commands::Where { target } => {
            let node = read_tree(target.input.as_ref())?;
            let Node::SelectStatement(stmt) = &node else {
                bail!("expected a SelectStatement, found {:?}", node.kind());
            };
            let config = resolve_config(&target)?;
            match where_sql(config.generator().as_ref(), stmt)? {
                Some(compiled) => print_compiled(&config.dialect, &compiled),
                None => println!("{}", "(no predicates)".dimmed()),
            }
        }
        Commands::Dot { input } => {
            let node = read_tree(input.as_ref())?;
            print!("{}", to_dot(&node));
        }
    }
    Ok(())
}

fn resolve_config(target: &Target) -> Result<CompilerConfig> {
    let mut config = match &target.config {
        Some(path) => CompilerConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CompilerConfig::default(),
    };
    if let Some(dialect) = target.dialect {
        config.dialect = dialect;
    }
    if let Some(max) = target.in_clause_length {
        config.in_clause_length = Some(max);
    }
    tracing::debug!(dialect = %config.dialect, "resolved compiler config");
    Ok(config)
}

fn read_tree(input: Option<&PathBuf>) -> Result<Node> {
    let text = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };
    serde_json::from_str(&text).context("decoding query tree")
}

fn print_compiled(dialect: &Dialect, compiled: &Compiled) {
    println!("{} {}", "SQL".green().bold(), format!("({})", dialect).dimmed());
    println!("{}", compiled.sql.white());
    if !compiled.binds.is_empty() {
        println!();
        println!("{}", "Binds:".cyan().bold());
        for (i, value) in compiled.binds.iter().enumerate() {
            println!("  {} {:?}", format!("{}.", i + 1).dimmed(), value);
        }
    }
    if !compiled.preparable {
        println!();
        println!("{}", "note: statement is not preparable".yellow());
    }
}
