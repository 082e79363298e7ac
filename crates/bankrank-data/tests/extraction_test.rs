//! Integration tests for ranked-table extraction.

use bankrank_data::source::{DocumentSource, StaticSource};
use bankrank_data::{DataError, TableExtractor};

/// Build a page shaped like the archived "List of largest banks" article.
fn page(rows: &[(&str, &str, &str)]) -> String {
    let mut html = String::from(
        "<html><body><h2>By market capitalization</h2>\
         <table class=\"wikitable\"><tbody>\
         <tr><th>Rank</th><th>Bank name</th><th>Market cap<br/>(US$ billion)</th></tr>",
    );
    for (rank, name, cap) in rows {
        html.push_str(&format!(
            "<tr><td>{rank}\n</td><td><span class=\"flagicon\"></span> <a href=\"/wiki/x\">{name}</a>\n</td><td>{cap}\n</td></tr>"
        ));
    }
    html.push_str("</tbody></table>");
    html.push_str(
        "<table><tbody><tr><td>1</td><td>Other table</td><td>1.0</td></tr></tbody></table>",
    );
    html.push_str("</body></html>");
    html
}

fn well_formed(count: u32) -> Vec<(String, String, String)> {
    (1..=count)
        .map(|i| {
            (
                i.to_string(),
                format!("Bank {i}"),
                format!("{:.2}", 500.0 - f64::from(i) * 17.31),
            )
        })
        .collect()
}

fn as_refs(rows: &[(String, String, String)]) -> Vec<(&str, &str, &str)> {
    rows.iter()
        .map(|(a, b, c)| (a.as_str(), b.as_str(), c.as_str()))
        .collect()
}

#[test]
fn test_twelve_rows_yield_top_ten() {
    let rows = well_formed(12);
    let extraction = TableExtractor::new().extract(&page(&as_refs(&rows))).unwrap();

    let ranks: Vec<u32> = extraction.records.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, (1..=10).collect::<Vec<_>>());
    assert_eq!(extraction.records[0].name, "Bank 1");
    assert_eq!(extraction.records[0].market_cap_usd, 482.69);
    assert!(extraction.skipped.is_empty());
}

#[test]
fn test_rows_out_of_order_are_sorted() {
    let rows = [("3", "C", "30.0"), ("1", "A", "50.0"), ("2", "B", "40.0")];
    let extraction = TableExtractor::new().extract(&page(&rows)).unwrap();

    let names: Vec<&str> = extraction.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["A", "B", "C"]);
}

#[test]
fn test_first_n_encountered_are_kept_before_sorting() {
    // Rank 1 appears last and falls outside the limit.
    let rows = [("2", "B", "40.0"), ("3", "C", "30.0"), ("1", "A", "50.0")];
    let extraction = TableExtractor::with_limit(2).extract(&page(&rows)).unwrap();

    let ranks: Vec<u32> = extraction.records.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, [2, 3]);
}

#[test]
fn test_malformed_rows_are_dropped_not_fatal() {
    let rows = [
        ("1", "A", "50.0"),
        ("2", "B", "n/a"),
        ("?", "C", "30.0"),
        ("4", "D", "20.0"),
    ];
    let extraction = TableExtractor::new().extract(&page(&rows)).unwrap();

    let ranks: Vec<u32> = extraction.records.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, [1, 4]);
    assert_eq!(extraction.skipped.len(), 2);
    assert_eq!(extraction.skipped[0].row, 1);
    assert_eq!(extraction.skipped[1].row, 2);
}

#[test]
fn test_malformed_rows_count_toward_limit() {
    let rows = [("1", "A", "50.0"), ("x", "B", "40.0"), ("3", "C", "30.0")];
    let extraction = TableExtractor::with_limit(2).extract(&page(&rows)).unwrap();

    assert_eq!(extraction.records.len(), 1);
    assert_eq!(extraction.skipped.len(), 1);
}

#[test]
fn test_fewer_rows_than_limit() {
    let rows = well_formed(4);
    let extraction = TableExtractor::new().extract(&page(&as_refs(&rows))).unwrap();
    assert_eq!(extraction.records.len(), 4);
}

#[test]
fn test_empty_table_body() {
    let extraction = TableExtractor::new().extract(&page(&[])).unwrap();
    assert!(extraction.records.is_empty());
}

#[test]
fn test_no_table_is_parse_error() {
    let source = StaticSource::new("<html><body><p>Page moved</p></body></html>");
    let markup = source.fetch().unwrap();
    assert!(matches!(
        TableExtractor::new().extract(&markup),
        Err(DataError::Parse(_))
    ));
}

#[test]
fn test_table_without_explicit_tbody_is_read() {
    let markup = "<html><body><table>\
                  <tr><th>Rank</th><th>Bank name</th><th>Market cap</th></tr>\
                  <tr><td>2</td><td>B</td><td>40.0</td></tr>\
                  <tr><td>1</td><td>A</td><td>50.0</td></tr>\
                  </table></body></html>";
    let extraction = TableExtractor::new().extract(markup).unwrap();

    let names: Vec<&str> = extraction.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["A", "B"]);
}

#[test]
fn test_source_ranks_are_kept_as_written() {
    let rows = [("1", "A", "50.0"), ("1", "A2", "45.0"), ("42", "Z", "40.0")];
    let extraction = TableExtractor::with_limit(3).extract(&page(&rows)).unwrap();

    let ranks: Vec<u32> = extraction.records.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, [1, 1, 42]);
    assert!(extraction.skipped.is_empty());
}
