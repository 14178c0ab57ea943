//! # htmlstream
//!
//! A streaming HTML/XML writer with a fluent API.
//!
//! ## Features
//!
//! - **Streaming Write**: Markup goes straight to any `std::io::Write` sink
//! - **Fluent API**: Every method returns the writer, so documents are one chain of calls
//! - **Well-formed Output**: An open-tag stack closes elements in the right order and
//!   rejects unbalanced calls
//! - **Readable Output**: Indentation follows nesting depth, inline elements stay on one line
//! - **Tables**: A sparse 1-based grid with row/column spanning and nested tables
//!
//! ## Quick Start
//!
//! ### Writing a document
//!
//! ```rust
//! use htmlstream::HtmlWriter;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut html = HtmlWriter::new(Vec::new());
//! html.doctype_html5()?
//!     .html()?
//!     .head()?
//!     .title("Status")?
//!     .end()?
//!     .body()?
//!     .p_class("ok", "Everything is fine")?
//!     .end()?
//!     .end()?;
//!
//! let page = String::from_utf8(html.finish()?)?;
//! assert!(page.starts_with("<!DOCTYPE html>\n<html>\n"));
//! # Ok(())
//! # }
//! ```
//!
//! ### Rendering a table
//!
//! ```rust
//! use htmlstream::{HtmlWriter, Table};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut table = Table::new();
//! table.set_attribute("class", "grid");
//! table.put(1, 1, "Region");
//! table.put(1, 2, "Sales");
//! table.put(2, 1, "North");
//! table.put(2, 2, 1200_i64);
//! table.put_spanning(3, 1, 1, 2, "<i>no data</i>");
//!
//! let mut html = HtmlWriter::new(Vec::new());
//! html.render_table(&table)?;
//!
//! let markup = String::from_utf8(html.finish()?)?;
//! assert!(markup.contains("<th>Region</th>"));
//! assert!(markup.contains("<td colspan=\"2\"><i>no data</i></td>"));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod html_writer;
pub mod table;
pub mod types;
pub mod xml_writer;

pub use config::{IndentStyle, WriterConfig};
pub use error::{MarkupError, Result};
pub use html_writer::HtmlWriter;
pub use table::{Cell, CellContents, Entry, Table};
pub use types::{attributes, Attributes};
pub use xml_writer::{escape, XmlWriter};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_imports() {
        // Test that all public types are accessible
        let _ = std::marker::PhantomData::<MarkupError>;
        let _ = std::marker::PhantomData::<HtmlWriter<Vec<u8>>>;
        let _ = std::marker::PhantomData::<XmlWriter<Vec<u8>>>;
        let _ = std::marker::PhantomData::<Table>;
    }
}
