use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use jsontabledb::{DatabaseConfig, FileStorage, JsonDatabase, Selection};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jsontabledb")]
#[command(about = "Inspect and maintain a JSON table database on disk")]
struct Cli {
    /// Directory holding the database containers
    #[arg(long, default_value = ".")]
    root: PathBuf,

    #[arg(long, default_value = "root")]
    container: String,

    #[arg(long, default_value = "db")]
    database: String,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List table names
    Tables,
    /// Print a table's columns
    Schema { table: String },
    /// Print a table's rows
    Query {
        table: String,
        /// Sort key as column[:asc|desc]; repeatable
        #[arg(long = "order-by", value_parser = parse_order)]
        order_by: Vec<(String, String)>,
        /// Only these columns
        #[arg(long, value_delimiter = ',')]
        keys: Vec<String>,
        #[arg(long, default_value_t = 0)]
        offset: usize,
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Rewrite the stored document in sanitized form
    Sanitize,
    /// Replace the whole database with a JSON file
    Import { file: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Table,
}

fn parse_order(raw: &str) -> std::result::Result<(String, String), String> {
    let (column, direction) = raw.split_once(':').unwrap_or((raw, "asc"));
    if column.trim().is_empty() {
        return Err(format!("missing column in '{}'", raw));
    }
    Ok((column.trim().to_string(), direction.trim().to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = DatabaseConfig::new(&cli.database)
        .container(&cli.container)
        .debug(cli.verbose);
    let mut db = JsonDatabase::new(FileStorage::new(&cli.root), config);
    db.open().await.with_context(|| {
        format!(
            "Failed to open '{}' in {}",
            db.config().database,
            cli.root.join(&db.config().container).display()
        )
    })?;

    match cli.command {
        Command::Tables => {
            for name in db.tables().get() {
                println!("{}", name);
            }
        }
        Command::Schema { table } => {
            let handle = db
                .table(&table)
                .with_context(|| format!("No table named '{}'", table))?;
            println!("{}", serde_json::to_string_pretty(&handle.columns())?);
        }
        Command::Query {
            table,
            order_by,
            keys,
            offset,
            limit,
            format,
        } => {
            let handle = db
                .table(&table)
                .with_context(|| format!("No table named '{}'", table))?;
            let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
            let keys = (!keys.is_empty()).then_some(keys.as_slice());

            let query = handle.all();
            let selection = if order_by.is_empty() {
                query.get(keys)
            } else {
                query.order_by(order_by).get(keys)
            };
            print_selection(&selection.limit(offset, limit), format)?;
        }
        Command::Sanitize => {
            let location = db.save().await.context("Failed to save sanitized document")?;
            println!("{}", location);
        }
        Command::Import { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let raw: serde_json::Value = serde_json::from_str(&text)
                .with_context(|| format!("{} is not valid JSON", file.display()))?;
            if !db.set(&raw).await.context("Failed to save imported document")? {
                bail!(
                    "{} has an unsupported version (expected {})",
                    file.display(),
                    jsontabledb::CURRENT_VERSION
                );
            }
            println!("Imported {} table(s)", db.tables().get().len());
        }
    }

    Ok(())
}

fn print_selection(selection: &Selection, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&selection.to_json())?),
        Format::Table => selection.print(),
    }
    Ok(())
}
