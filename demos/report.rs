//! Write a small HTML report to stdout
//!
//! Run with: cargo run --example report
//! Set HTMLSTREAM_INDENT=4 (or `tab`, `none`) to change the indentation.

use htmlstream::{attributes, HtmlWriter, Table, WriterConfig};
use std::io::{self, BufWriter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut breakdown = Table::new();
    breakdown.set_header_row(false);
    breakdown.put(1, 1, "web");
    breakdown.put(1, 2, 410_i64);
    breakdown.put(2, 1, "api");
    breakdown.put(2, 2, 77_i64);

    let mut table = Table::new();
    table.set_attribute("class", "report");
    table.set_attribute("border", "1");
    table.put(1, 1, "Service");
    table.put(1, 2, "Requests");
    table.put(1, 3, "Errors");
    table.put(2, 1, "frontend");
    table.put(2, 2, breakdown);
    table.put(2, 3, 3_i64);
    table.put(3, 1, "backend");
    table.put_spanning(3, 2, 1, 2, "<i>offline</i>");
    table.set_row_attribute(3, "class", "down");

    let stdout = io::stdout();
    let mut html = HtmlWriter::with_config(BufWriter::new(stdout.lock()), WriterConfig::from_env());
    html.doctype()?
        .html()?
        .head()?
        .title("Service report")?
        .stylesheet("report.css")?
        .no_cache_meta_tags()?
        .end()?
        .body_with(&attributes([("class", "report-page")]))?
        .h1("Service report")?
        .p_class("summary", "Requests per service & error counts")?
        .render_table(&table)?
        .hr()?
        .href_with("https://example.com/status", Some("footer"), Some("_blank"), "Status page")?
        .end()?
        .end()?;
    html.finish()?;

    Ok(())
}
