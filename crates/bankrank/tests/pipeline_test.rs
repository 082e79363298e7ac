//! End-to-end tests of the ETL run against a synthetic page.

use approx::assert_relative_eq;
use bankrank::data::source::StaticSource;
use bankrank::data::{BankStore, Cell, DataError};
use bankrank::output::read_records_csv;
use bankrank::pipeline::messages;
use bankrank::{OutputFormat, Pipeline, PipelineConfig, PipelineError, SourceLocation};
use std::path::PathBuf;

const RATES: &str = "Currency,Rate\nEUR,0.92\nGBP,0.79\nINR,83.1\n";

/// Per-test scratch directory with the rate file in place.
struct Scratch {
    dir: PathBuf,
}

impl Scratch {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("bankrank_it_{name}"));
        std::fs::remove_dir_all(&dir).ok();
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("exchange_rate.csv"), RATES).unwrap();
        Self { dir }
    }

    fn config(&self) -> PipelineConfig {
        PipelineConfig {
            source: SourceLocation::File(self.dir.join("page.html")),
            rates_path: self.dir.join("exchange_rate.csv"),
            csv_path: self.dir.join("top_10_banks.csv"),
            db_path: self.dir.join("Banks.db"),
            log_path: self.dir.join("code_log.txt"),
            ..PipelineConfig::default()
        }
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.dir).ok();
    }
}

/// Twelve well-formed rows; the market caps are distinct and decreasing.
fn twelve_row_page() -> String {
    let mut html = String::from(
        "<html><body><table><tbody>\
         <tr><th>Rank</th><th>Bank name</th><th>Market cap (US$ billion)</th></tr>",
    );
    for rank in 1..=12 {
        let cap = 450.0 - f64::from(rank) * 23.17;
        html.push_str(&format!(
            "<tr><td>{rank}</td><td><a href=\"#\">Bank {rank}</a></td><td>{cap:.2}</td></tr>"
        ));
    }
    html.push_str("</tbody></table></body></html>");
    html
}

fn run(config: PipelineConfig) -> Result<(bankrank::PipelineReport, String), PipelineError> {
    let source = StaticSource::new(twelve_row_page());
    let mut out = Vec::new();
    let report = Pipeline::new(config).run(&source, &mut out)?;
    Ok((report, String::from_utf8(out).unwrap()))
}

#[test]
fn test_end_to_end_twelve_rows() {
    let scratch = Scratch::new("end_to_end");
    let config = scratch.config();
    let (report, printed) = run(config.clone()).unwrap();

    // Ten rows, ranks 1..=10
    let ranks: Vec<u32> = report.records.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, (1..=10).collect::<Vec<_>>());

    // Conversion of the rank-1 row
    let first = &report.records[0];
    assert_eq!(first.market_cap_usd, 426.83);
    assert_relative_eq!(
        first.market_cap_gbp,
        (first.market_cap_usd * 0.79 * 100.0).round() / 100.0
    );
    for record in &report.records {
        assert_relative_eq!(
            record.market_cap_eur,
            (record.market_cap_usd * 0.92 * 100.0).round() / 100.0
        );
        assert_relative_eq!(
            record.market_cap_inr,
            (record.market_cap_usd * 83.1 * 100.0).round() / 100.0
        );
    }

    // Query (b): average GBP
    let avg = report.query_results[1].scalar().and_then(Cell::as_f64).unwrap();
    let mean = report.records.iter().map(|r| r.market_cap_gbp).sum::<f64>() / 10.0;
    assert_relative_eq!(avg, mean, epsilon = 0.005);

    // Query (c): first five names by rank
    let names: Vec<&str> = report.query_results[2]
        .rows
        .iter()
        .filter_map(|row| row[0].as_str())
        .collect();
    assert_eq!(names, ["Bank 1", "Bank 2", "Bank 3", "Bank 4", "Bank 5"]);

    // Query (a): full dump
    assert_eq!(report.query_results[0].len(), 10);
    assert!(printed.contains("SELECT * FROM Largest_banks"));
    assert!(printed.contains("Bank 10"));

    // Both sinks hold the same rows
    assert_eq!(read_records_csv(&config.csv_path).unwrap(), report.records);
    let store = BankStore::open(&config.db_path).unwrap();
    assert_eq!(store.load_table("Largest_banks").unwrap(), report.records);
}

#[test]
fn test_rerun_is_idempotent() {
    let scratch = Scratch::new("idempotent");
    let config = scratch.config();

    run(config.clone()).unwrap();
    let csv_first = std::fs::read(&config.csv_path).unwrap();
    let db_first = BankStore::open(&config.db_path)
        .unwrap()
        .load_table("Largest_banks")
        .unwrap();

    run(config.clone()).unwrap();
    let csv_second = std::fs::read(&config.csv_path).unwrap();
    let db_second = BankStore::open(&config.db_path)
        .unwrap()
        .load_table("Largest_banks")
        .unwrap();

    assert_eq!(csv_first, csv_second);
    assert_eq!(db_first, db_second);
    assert_eq!(db_second.len(), 10);
}

#[test]
fn test_missing_rate_writes_no_sink() {
    let scratch = Scratch::new("missing_rate");
    let config = scratch.config();
    std::fs::write(&config.rates_path, "Currency,Rate\nEUR,0.92\nGBP,0.79\n").unwrap();

    let err = run(config.clone()).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Data(DataError::MissingRate(ref code)) if code == "INR"
    ));
    assert!(!config.csv_path.exists());
    assert!(!config.db_path.exists());
}

#[test]
fn test_non_numeric_rate_writes_no_sink() {
    let scratch = Scratch::new("bad_rate");
    let config = scratch.config();
    std::fs::write(
        &config.rates_path,
        "Currency,Rate\nEUR,0.92\nGBP,unknown\nINR,83.1\n",
    )
    .unwrap();

    let err = run(config.clone()).unwrap_err();
    assert!(matches!(err, PipelineError::Data(DataError::InvalidRate { .. })));
    assert!(!config.csv_path.exists());
}

#[test]
fn test_progress_log_lines() {
    let scratch = Scratch::new("progress_log");
    let config = scratch.config();

    run(config.clone()).unwrap();
    run(config.clone()).unwrap();

    let content = std::fs::read_to_string(&config.log_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 18);

    let expected = [
        messages::START,
        messages::EXTRACT_STARTED,
        messages::EXTRACTED,
        messages::TRANSFORMED,
        messages::CSV_SAVED,
        messages::DB_CONNECTED,
        messages::DB_LOADED,
        messages::COMPLETE,
        messages::DB_CLOSED,
    ];
    for (line, message) in lines.iter().zip(expected.iter().chain(expected.iter())) {
        let (timestamp, text) = line.split_once(',').unwrap();
        assert_eq!(timestamp.len(), "2024-01-01 00:00:00.000000".len());
        assert_eq!(text, *message);
    }
}

#[test]
fn test_no_table_fails_before_sinks() {
    let scratch = Scratch::new("no_table");
    let config = scratch.config();

    let source = StaticSource::new("<html><body>maintenance</body></html>");
    let err = Pipeline::new(config.clone())
        .run(&source, std::io::sink())
        .unwrap_err();

    assert!(matches!(err, PipelineError::Data(DataError::Parse(_))));
    assert!(!config.csv_path.exists());
}

#[test]
fn test_write_query_aborts_run() {
    let scratch = Scratch::new("write_query");
    let mut config = scratch.config();
    config
        .queries
        .push(bankrank::NamedQuery::new("cleanup", "DELETE FROM Largest_banks"));

    let err = run(config.clone()).unwrap_err();
    assert!(matches!(err, PipelineError::Query(_)));

    let store = BankStore::open(&config.db_path).unwrap();
    assert_eq!(store.load_table("Largest_banks").unwrap().len(), 10);
}

#[test]
fn test_file_source_and_office_queries_json() {
    let scratch = Scratch::new("file_source");
    let mut config = scratch.config().with_office_queries();
    config.output_format = OutputFormat::Json;
    std::fs::write(scratch.dir.join("page.html"), twelve_row_page()).unwrap();

    let mut out = Vec::new();
    let report = Pipeline::new(config).run_configured(&mut out).unwrap();

    assert_eq!(report.query_results.len(), 6);
    assert_eq!(report.query_results[3].columns, ["Bank_Name", "MC_GBP"]);
    assert_eq!(report.query_results[4].columns, ["Bank_Name", "MC_EUR"]);
    assert_eq!(report.query_results[5].columns, ["Bank_Name", "MC_INR"]);

    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("\"MC_INR\""));
}
