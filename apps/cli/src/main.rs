mod config;
mod query_args;
mod telemetry;

use advsearch::service::{export, fields, search};
use advsearch::{operators_for_type, FieldType};
use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use config::DataSources;
use query_args::QueryArgs;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(ClapParser, Debug)]
#[command(name = "advs")]
#[command(about = "Filter, sort and page tabular records", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// JSON array of records to search (defaults to the built-in employee sample)
    #[arg(long, global = true, env = "ADVSEARCH_DATASET")]
    dataset: Option<PathBuf>,

    /// JSON array of field definitions (defaults to the employee catalog)
    #[arg(long, global = true, env = "ADVSEARCH_CATALOG")]
    catalog: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the searchable fields
    Fields,

    /// Print the operators offered for a field type
    Operators {
        /// string, number, date or boolean
        field_type: String,
    },

    /// Run a query and print one page of results as JSON
    Search {
        #[command(flatten)]
        query: QueryArgs,

        /// Reject unknown fields, unsupported operators and missing values
        #[arg(long)]
        strict: bool,
    },

    /// Write every match of a query as CSV
    Export {
        #[command(flatten)]
        query: QueryArgs,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let args = Args::parse();
    let sources = DataSources {
        dataset: args.dataset,
        catalog: args.catalog,
    };

    match args.command {
        Commands::Fields => {
            let catalog = sources.load_catalog()?;
            print_json(&serde_json::to_value(fields::list(&catalog))?)?;
        }
        Commands::Operators { field_type } => {
            let field_type: FieldType = serde_json::from_value(Value::String(field_type))
                .context("Invalid field type")?;
            print_json(&serde_json::to_value(operators_for_type(field_type))?)?;
        }
        Commands::Search { query, strict } => {
            let query = query.build()?;
            let catalog = sources.load_catalog()?;
            let records = sources.load_records(&catalog)?;
            let response = search::run(&records, &query, &catalog, strict)?;
            print_json(&serde_json::to_value(&response)?)?;
        }
        Commands::Export { query, output } => {
            let query = query.build()?;
            let catalog = sources.load_catalog()?;
            let records = sources.load_records(&catalog)?;
            let csv = export::run(&records, &query, &catalog)?;
            match output {
                Some(path) => {
                    fs::write(&path, csv)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!(path = %path.display(), "Export written");
                }
                None => print!("{csv}"),
            }
        }
    }

    Ok(())
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
