//! bankrank CLI binary.
//!
//! Running `bankrank` with no arguments performs the whole ETL job with the
//! default locations. `bankrank query <SQL>` inspects an existing database.

use bankrank::config::{
    DEFAULT_CSV_PATH, DEFAULT_DB_PATH, DEFAULT_LOG_PATH, DEFAULT_RATES_PATH, DEFAULT_SOURCE_URL,
    DEFAULT_TABLE_NAME, DEFAULT_TOP_N,
};
use bankrank::{OutputFormat, Pipeline, PipelineConfig, QueryRunner, SourceLocation};
use bankrank_data::BankStore;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bankrank")]
#[command(about = "Quarterly ETL of the largest banks by market capitalization", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full extract, transform and load job (default)
    Run(RunArgs),

    /// Run one read-only query against an existing database
    Query {
        /// SQL statement (must not modify the database)
        sql: String,

        /// SQLite database file
        #[arg(long, default_value = DEFAULT_DB_PATH)]
        db: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Args, Clone)]
struct RunArgs {
    /// Source page URL
    #[arg(long, default_value = DEFAULT_SOURCE_URL)]
    url: String,

    /// Read the source page from a saved HTML file instead of the network
    #[arg(long, conflicts_with = "url")]
    source_file: Option<PathBuf>,

    /// Exchange-rate CSV (Currency,Rate)
    #[arg(long, default_value = DEFAULT_RATES_PATH)]
    rates: PathBuf,

    /// CSV output file
    #[arg(long, default_value = DEFAULT_CSV_PATH)]
    csv: PathBuf,

    /// SQLite database file
    #[arg(long, default_value = DEFAULT_DB_PATH)]
    db: PathBuf,

    /// Result table name
    #[arg(long, default_value = DEFAULT_TABLE_NAME)]
    table: String,

    /// Progress log file
    #[arg(long, default_value = DEFAULT_LOG_PATH)]
    log: PathBuf,

    /// Number of ranked rows to keep
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    top: usize,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30")]
    timeout_secs: u64,

    /// Also print the London, Berlin and New Delhi office reports
    #[arg(long)]
    offices: bool,

    /// Query output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => Self::Text,
            Format::Json => Self::Json,
        }
    }
}

impl RunArgs {
    fn into_config(self) -> PipelineConfig {
        let source = self
            .source_file
            .map_or(SourceLocation::Url(self.url), SourceLocation::File);

        let mut config = PipelineConfig {
            source,
            timeout: Duration::from_secs(self.timeout_secs),
            rates_path: self.rates,
            csv_path: self.csv,
            db_path: self.db,
            log_path: self.log,
            top_n: self.top,
            output_format: self.format.into(),
            ..PipelineConfig::default()
        }
        .with_table_name(self.table);

        if self.offices {
            config = config.with_office_queries();
        }
        config
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        None => run_pipeline(cli.run)?,
        Some(Commands::Run(args)) => run_pipeline(args)?,
        Some(Commands::Query { sql, db, format }) => run_query(&sql, db, format)?,
    }

    Ok(())
}

fn run_pipeline(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = Pipeline::new(args.into_config());
    let stdout = std::io::stdout();
    let report = pipeline.run_configured(stdout.lock())?;

    tracing::info!(
        banks = report.records.len(),
        skipped = report.skipped.len(),
        queries = report.query_results.len(),
        "run complete"
    );
    Ok(())
}

fn run_query(sql: &str, db: PathBuf, format: Format) -> Result<(), Box<dyn std::error::Error>> {
    if !db.exists() {
        return Err(format!("database {} does not exist; run the pipeline first", db.display()).into());
    }

    let store = BankStore::open(&db)?;
    let stdout = std::io::stdout();
    let mut runner = QueryRunner::new(&store, stdout.lock(), format.into());
    runner.run(sql)?;
    Ok(())
}
