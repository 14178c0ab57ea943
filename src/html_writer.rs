//! HTML writer with shorthand methods for common elements
//!
//! [`HtmlWriter`] wraps an [`XmlWriter`] and returns itself from every
//! method, so documents are written as one chain of calls. Elements that are
//! not covered by a shorthand can be written with the generic primitives
//! (`open_tag`, `attr`, `close_tag`, `tag`, `end`, ...), which are available on
//! `HtmlWriter` as well.

use crate::config::WriterConfig;
use crate::error::Result;
use crate::table::{Cell, CellContents, Entry, Table};
use crate::types::Attributes;
use crate::xml_writer::XmlWriter;
use log::debug;
use std::io::Write;

/// XHTML 1.0 Strict document type declaration
pub const XHTML_STRICT_DOCTYPE: &str = "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Strict//EN\" \n\"http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd\">";

/// Written for table slots without contents
pub const EMPTY_CELL: &str = "<td class=\"empty\">&nbsp;</td>";

const NO_CACHE_META_TAGS: [&str; 2] = [
    "<meta http-equiv=\"Pragma\" content=\"no-cache\"/>",
    "<meta http-equiv=\"Expires\" content=\"-1\"/>",
];

/// Fluent HTML document writer
///
/// # Examples
///
/// ```
/// use htmlstream::HtmlWriter;
///
/// # fn main() -> htmlstream::Result<()> {
/// let mut html = HtmlWriter::new(Vec::new());
/// html.html()?
///     .body()?
///     .h1("Report")?
///     .p("All systems nominal.")?
///     .end()?
///     .end()?;
///
/// let page = String::from_utf8(html.finish()?).unwrap();
/// assert!(page.contains("    <h1>Report</h1>\n"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HtmlWriter<W: Write> {
    inner: XmlWriter<W>,
}

impl<W: Write> HtmlWriter<W> {
    pub fn new(writer: W) -> Self {
        HtmlWriter {
            inner: XmlWriter::new(writer),
        }
    }

    pub fn with_config(writer: W, config: WriterConfig) -> Self {
        HtmlWriter {
            inner: XmlWriter::with_config(writer, config),
        }
    }

    /// The underlying XML writer
    pub fn xml(&mut self) -> &mut XmlWriter<W> {
        &mut self.inner
    }

    pub fn depth(&self) -> usize {
        self.inner.depth()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()
    }

    /// See [`XmlWriter::finish`]
    pub fn finish(self) -> Result<W> {
        self.inner.finish()
    }

    pub fn into_inner(self) -> W {
        self.inner.into_inner()
    }

    // Generic primitives

    pub fn open_tag(&mut self, name: &str) -> Result<&mut Self> {
        self.inner.open_tag(name)?;
        Ok(self)
    }

    pub fn attribute(&mut self, key: &str, value: Option<&str>) -> Result<&mut Self> {
        self.inner.attribute(key, value)?;
        Ok(self)
    }

    pub fn attr(&mut self, key: &str, value: &str) -> Result<&mut Self> {
        self.inner.attr(key, value)?;
        Ok(self)
    }

    pub fn attributes(&mut self, attributes: &Attributes) -> Result<&mut Self> {
        self.inner.attributes(attributes)?;
        Ok(self)
    }

    pub fn close_tag(&mut self) -> Result<&mut Self> {
        self.inner.close_tag()?;
        Ok(self)
    }

    pub fn close_empty_tag(&mut self) -> Result<&mut Self> {
        self.inner.close_empty_tag()?;
        Ok(self)
    }

    pub fn end(&mut self) -> Result<&mut Self> {
        self.inner.end()?;
        Ok(self)
    }

    pub fn end_named(&mut self, name: &str) -> Result<&mut Self> {
        self.inner.end_named(name)?;
        Ok(self)
    }

    pub fn tag(&mut self, name: &str) -> Result<&mut Self> {
        self.inner.tag(name)?;
        Ok(self)
    }

    pub fn tag_with(&mut self, name: &str, attributes: &Attributes) -> Result<&mut Self> {
        self.inner.tag_with(name, attributes)?;
        Ok(self)
    }

    pub fn empty_tag(&mut self, name: &str) -> Result<&mut Self> {
        self.inner.empty_tag(name)?;
        Ok(self)
    }

    pub fn empty_tag_with(&mut self, name: &str, attributes: &Attributes) -> Result<&mut Self> {
        self.inner.empty_tag_with(name, attributes)?;
        Ok(self)
    }

    pub fn tagged(&mut self, name: &str, text: &str, escape: bool) -> Result<&mut Self> {
        self.inner.tagged(name, text, escape)?;
        Ok(self)
    }

    pub fn tagged_with(
        &mut self,
        name: &str,
        attributes: &Attributes,
        text: &str,
        escape: bool,
    ) -> Result<&mut Self> {
        self.inner.tagged_with(name, attributes, text, escape)?;
        Ok(self)
    }

    pub fn raw(&mut self, text: &str, newline: bool) -> Result<&mut Self> {
        self.inner.raw(text, newline)?;
        Ok(self)
    }

    pub fn line_break(&mut self) -> Result<&mut Self> {
        self.inner.line_break()?;
        Ok(self)
    }

    pub fn indent(&mut self) -> Result<&mut Self> {
        self.inner.indent()?;
        Ok(self)
    }

    pub fn print(&mut self, text: &str) -> Result<&mut Self> {
        self.inner.print(text)?;
        Ok(self)
    }

    // Document structure

    /// XHTML 1.0 Strict doctype
    pub fn doctype(&mut self) -> Result<&mut Self> {
        self.raw(XHTML_STRICT_DOCTYPE, true)
    }

    /// `<!DOCTYPE html>`
    pub fn doctype_html5(&mut self) -> Result<&mut Self> {
        self.raw("<!DOCTYPE html>", true)
    }

    /// `<html>`; close with `end()`
    pub fn html(&mut self) -> Result<&mut Self> {
        self.tag("html")
    }

    /// `<head>`; close with `end()`
    pub fn head(&mut self) -> Result<&mut Self> {
        self.tag("head")
    }

    /// `<body>`; close with `end()`
    pub fn body(&mut self) -> Result<&mut Self> {
        self.tag("body")
    }

    pub fn body_with(&mut self, attributes: &Attributes) -> Result<&mut Self> {
        self.tag_with("body", attributes)
    }

    pub fn title(&mut self, title: &str) -> Result<&mut Self> {
        self.tagged("title", title, true)
    }

    /// `<base href="..."/>`, the base URL for relative links
    pub fn base(&mut self, href: &str) -> Result<&mut Self> {
        self.inner.empty_tag_with("base", [("href", href)])?;
        Ok(self)
    }

    /// Meta tags that keep browsers from caching the page
    pub fn no_cache_meta_tags(&mut self) -> Result<&mut Self> {
        for meta in NO_CACHE_META_TAGS {
            self.indent()?.raw(meta, true)?;
        }
        Ok(self)
    }

    /// `<link type="text/css" rel="stylesheet" href="..."/>`
    pub fn stylesheet(&mut self, href: &str) -> Result<&mut Self> {
        self.open_tag("link")?
            .attr("type", "text/css")?
            .attr("rel", "stylesheet")?
            .attr("href", href)?
            .close_empty_tag()
    }

    // Text

    pub fn bold(&mut self, content: &str) -> Result<&mut Self> {
        self.tagged("b", content, true)
    }

    /// `<h{level}>content</h{level}>`
    pub fn h(&mut self, level: u8, content: &str) -> Result<&mut Self> {
        let mut buffer = itoa::Buffer::new();
        let mut name = String::from("h");
        name.push_str(buffer.format(level));
        self.tagged(&name, content, true)
    }

    pub fn h1(&mut self, content: &str) -> Result<&mut Self> {
        self.h(1, content)
    }

    pub fn h2(&mut self, content: &str) -> Result<&mut Self> {
        self.h(2, content)
    }

    pub fn h3(&mut self, content: &str) -> Result<&mut Self> {
        self.h(3, content)
    }

    pub fn p(&mut self, content: &str) -> Result<&mut Self> {
        self.tagged("p", content, true)
    }

    /// `<p class="...">content</p>`
    pub fn p_class(&mut self, style_class: &str, content: &str) -> Result<&mut Self> {
        self.inner
            .tagged_with("p", [("class", style_class)], content, true)?;
        Ok(self)
    }

    pub fn nbsp(&mut self) -> Result<&mut Self> {
        self.indent()?.raw("&nbsp;", false)?.line_break()
    }

    // Links and media

    /// Named anchor `<a name="..."/>`
    pub fn anchor(&mut self, name: &str) -> Result<&mut Self> {
        self.inner.empty_tag_with("a", [("name", name)])?;
        Ok(self)
    }

    /// `<a href="url">title</a>`
    pub fn href(&mut self, url: &str, title: &str) -> Result<&mut Self> {
        self.href_with(url, None, None, title)
    }

    /// Hyperlink with optional style class and target
    pub fn href_with(
        &mut self,
        url: &str,
        style_class: Option<&str>,
        target: Option<&str>,
        title: &str,
    ) -> Result<&mut Self> {
        self.open_tag("a")?
            .attr("href", url)?
            .attribute("target", target)?
            .attribute("class", style_class)?
            .close_tag()?
            .print(title)?
            .end()
    }

    /// `<img src="..." alt="..."/>`
    pub fn img(&mut self, src: &str, alt: &str) -> Result<&mut Self> {
        self.inner.empty_tag_with("img", [("src", src), ("alt", alt)])?;
        Ok(self)
    }

    pub fn br(&mut self) -> Result<&mut Self> {
        self.empty_tag("br")
    }

    pub fn hr(&mut self) -> Result<&mut Self> {
        self.empty_tag("hr")
    }

    // Containers

    /// `<ul>`; close with `end()`
    pub fn ul(&mut self) -> Result<&mut Self> {
        self.tag("ul")
    }

    /// `<li>`; close with `end()`
    pub fn li(&mut self) -> Result<&mut Self> {
        self.tag("li")
    }

    /// `<div ...>`; close with `end()`
    pub fn div_with(&mut self, attributes: &Attributes) -> Result<&mut Self> {
        self.tag_with("div", attributes)
    }

    /// `<div key="value">`; close with `end()`
    pub fn div_attr(&mut self, key: &str, value: &str) -> Result<&mut Self> {
        self.inner.tag_with("div", [(key, value)])?;
        Ok(self)
    }

    // Forms

    /// `<button name=".." value=".." type=".." onclick=".." style="..">label</button>`
    ///
    /// Attributes passed as `None` are left out.
    pub fn button(
        &mut self,
        name: &str,
        value: Option<&str>,
        kind: Option<&str>,
        label: &str,
        onclick: Option<&str>,
        style: Option<&str>,
    ) -> Result<&mut Self> {
        self.open_tag("button")?
            .attr("name", name)?
            .attribute("value", value)?
            .attribute("type", kind)?
            .attribute("onclick", onclick)?
            .attribute("style", style)?
            .close_tag()?
            .print(label)?
            .end()
    }

    pub fn button_with(&mut self, attributes: &Attributes, label: &str) -> Result<&mut Self> {
        self.tag_with("button", attributes)?.print(label)?.end()
    }

    // Tables

    /// `<table>`; close with `end()` or `end_named("table")`
    pub fn table(&mut self) -> Result<&mut Self> {
        self.tag("table")
    }

    pub fn table_with(&mut self, attributes: &Attributes) -> Result<&mut Self> {
        self.tag_with("table", attributes)
    }

    /// `<tr>`; close with `end()`
    pub fn tr(&mut self) -> Result<&mut Self> {
        self.tag("tr")
    }

    pub fn tr_with(&mut self, attributes: &Attributes) -> Result<&mut Self> {
        self.tag_with("tr", attributes)
    }

    /// `<td>`; close with `end()`
    pub fn td(&mut self) -> Result<&mut Self> {
        self.tag("td")
    }

    pub fn td_with(&mut self, attributes: &Attributes) -> Result<&mut Self> {
        self.tag_with("td", attributes)
    }

    /// `<td>content</td>` with escaped content
    pub fn td_text(&mut self, content: &str) -> Result<&mut Self> {
        self.tagged("td", content, true)
    }

    pub fn td_with_text(&mut self, attributes: &Attributes, content: &str) -> Result<&mut Self> {
        self.tag_with("td", attributes)?.print(content)?.end()
    }

    /// `<th>`; close with `end()`
    pub fn th(&mut self) -> Result<&mut Self> {
        self.tag("th")
    }

    pub fn th_text(&mut self, content: &str) -> Result<&mut Self> {
        self.tagged("th", content, true)
    }

    pub fn th_with_text(&mut self, attributes: &Attributes, content: &str) -> Result<&mut Self> {
        self.tag_with("th", attributes)?.print(content)?.end()
    }

    pub fn td_cell(&mut self, cell: &Cell) -> Result<&mut Self> {
        self.write_cell("td", cell)
    }

    pub fn th_cell(&mut self, cell: &Cell) -> Result<&mut Self> {
        self.write_cell("th", cell)
    }

    /// Placeholder for a slot without contents
    pub fn empty_cell(&mut self) -> Result<&mut Self> {
        self.indent()?.raw(EMPTY_CELL, false)?.line_break()
    }

    /// Write a complete table
    ///
    /// Row `r` and column `c` run from 1 to the table's dimensions. Missing
    /// entries and cells without contents become [`EMPTY_CELL`], slots covered
    /// by a span are skipped, and a row that was never touched gets a single
    /// empty cell. Cell markup is written unescaped.
    pub fn render_table(&mut self, table: &Table) -> Result<&mut Self> {
        debug!(
            "rendering table with {} rows and {} columns",
            table.max_rows(),
            table.max_columns()
        );
        self.tag_with("table", table.attributes())?;

        for r in 1..=table.max_rows() {
            match table.row_attributes(r) {
                Some(attributes) => self.tag_with("tr", attributes)?,
                None => self.tag("tr")?,
            };

            let cell_tag = if r == 1 && table.header_row() {
                "th"
            } else {
                "td"
            };
            match table.row(r) {
                None => {
                    self.empty_cell()?;
                }
                Some(row) => {
                    for c in 1..=table.max_columns() {
                        match row.get(&c) {
                            Some(Entry::Spanned) => {}
                            Some(Entry::Cell(cell)) if cell.contents().is_some() => {
                                self.write_cell(cell_tag, cell)?;
                            }
                            _ => {
                                self.empty_cell()?;
                            }
                        }
                    }
                }
            }

            self.end()?; // tr
        }

        self.end() // table
    }

    fn write_cell(&mut self, name: &str, cell: &Cell) -> Result<&mut Self> {
        match cell.contents() {
            Some(CellContents::Table(table)) => {
                self.tag_with(name, cell.attributes())?;
                self.render_table(table)?;
                self.end()
            }
            Some(CellContents::Markup(markup)) => {
                self.tagged_with(name, cell.attributes(), markup, false)
            }
            None => self.tagged_with(name, cell.attributes(), "", false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MarkupError;
    use crate::types::attributes;

    fn render(table: &Table) -> String {
        let mut writer = HtmlWriter::new(Vec::new());
        writer.render_table(table).unwrap();
        String::from_utf8(writer.finish().unwrap()).unwrap()
    }

    fn body_table() -> Table {
        let mut table = Table::new();
        table.set_header_row(false);
        table
    }

    #[test]
    fn test_document_shorthands() {
        let mut html = HtmlWriter::new(Vec::new());
        html.doctype_html5()
            .unwrap()
            .html()
            .unwrap()
            .head()
            .unwrap()
            .title("T & U")
            .unwrap()
            .stylesheet("s.css")
            .unwrap()
            .end()
            .unwrap()
            .body()
            .unwrap()
            .h1("Hi")
            .unwrap()
            .p_class("intro", "x")
            .unwrap()
            .href("http://x", "go")
            .unwrap()
            .br()
            .unwrap()
            .end()
            .unwrap()
            .end()
            .unwrap();

        let expected = "<!DOCTYPE html>\n\
<html>\n\
\x20 <head>\n\
\x20   <title>T &amp; U</title>\n\
\x20   <link type=\"text/css\" rel=\"stylesheet\" href=\"s.css\"/>\n\
\x20 </head>\n\
\x20 <body>\n\
\x20   <h1>Hi</h1>\n\
\x20   <p class=\"intro\">x</p>\n\
\x20   <a href=\"http://x\">go</a>\n\
\x20   <br/>\n\
\x20 </body>\n\
</html>\n";
        assert_eq!(String::from_utf8(html.finish().unwrap()).unwrap(), expected);
    }

    #[test]
    fn test_href_with_optional_attributes() {
        let mut html = HtmlWriter::new(Vec::new());
        html.href_with("/home", Some("nav"), None, "Home").unwrap();
        html.href_with("/ext", None, Some("_blank"), "Out").unwrap();
        assert_eq!(
            String::from_utf8(html.into_inner()).unwrap(),
            "<a href=\"/home\" class=\"nav\">Home</a>\n<a href=\"/ext\" target=\"_blank\">Out</a>\n"
        );
    }

    #[test]
    fn test_self_closing_shorthands() {
        let mut html = HtmlWriter::new(Vec::new());
        html.img("a.png", "A")
            .unwrap()
            .hr()
            .unwrap()
            .base("http://example.com/")
            .unwrap()
            .anchor("top")
            .unwrap();
        assert_eq!(
            String::from_utf8(html.into_inner()).unwrap(),
            "<img src=\"a.png\" alt=\"A\"/>\n<hr/>\n<base href=\"http://example.com/\"/>\n<a name=\"top\"/>\n"
        );
    }

    #[test]
    fn test_heading_levels() {
        let mut html = HtmlWriter::new(Vec::new());
        html.h(4, "four").unwrap().h2("two").unwrap();
        assert_eq!(
            String::from_utf8(html.into_inner()).unwrap(),
            "<h4>four</h4>\n<h2>two</h2>\n"
        );
    }

    #[test]
    fn test_button() {
        let mut html = HtmlWriter::new(Vec::new());
        html.button("save", Some("1"), Some("submit"), "Save", None, None)
            .unwrap();
        assert_eq!(
            String::from_utf8(html.into_inner()).unwrap(),
            "<button name=\"save\" value=\"1\" type=\"submit\">\n  Save\n</button>\n"
        );
    }

    #[test]
    fn test_button_with_attributes() {
        let mut html = HtmlWriter::new(Vec::new());
        html.button_with(&attributes([("id", "go"), ("disabled", "disabled")]), "Go")
            .unwrap();
        assert_eq!(
            String::from_utf8(html.into_inner()).unwrap(),
            "<button id=\"go\" disabled=\"disabled\">\n  Go\n</button>\n"
        );
    }

    #[test]
    fn test_no_cache_meta_tags() {
        let mut html = HtmlWriter::new(Vec::new());
        html.head().unwrap().no_cache_meta_tags().unwrap().end().unwrap();
        assert_eq!(
            String::from_utf8(html.into_inner()).unwrap(),
            "<head>\n  <meta http-equiv=\"Pragma\" content=\"no-cache\"/>\n  <meta http-equiv=\"Expires\" content=\"-1\"/>\n</head>\n"
        );
    }

    #[test]
    fn test_render_header_row() {
        let mut table = Table::new();
        table.put(1, 1, "A");
        table.put(1, 2, "B");
        assert_eq!(
            render(&table),
            "<table>\n  <tr>\n    <th>A</th>\n    <th>B</th>\n  </tr>\n</table>\n"
        );
    }

    #[test]
    fn test_render_body_rows() {
        let mut table = body_table();
        table.put(1, 1, "A");
        table.put(1, 2, "B");
        assert_eq!(
            render(&table),
            "<table>\n  <tr>\n    <td>A</td>\n    <td>B</td>\n  </tr>\n</table>\n"
        );
    }

    #[test]
    fn test_render_fills_missing_cells() {
        let mut table = body_table();
        table.put(1, 1, "A");
        table.put(1, 3, "B");
        table.put(2, 2, Cell::new());
        assert_eq!(
            render(&table),
            "<table>\n  <tr>\n    <td>A</td>\n    <td class=\"empty\">&nbsp;</td>\n    <td>B</td>\n  </tr>\n  <tr>\n    <td class=\"empty\">&nbsp;</td>\n    <td class=\"empty\">&nbsp;</td>\n    <td class=\"empty\">&nbsp;</td>\n  </tr>\n</table>\n"
        );
    }

    #[test]
    fn test_render_skips_spanned_slots() {
        let mut table = body_table();
        table.put_spanning(1, 1, 2, 2, "X");
        table.put(1, 3, "a");
        table.put(2, 3, "b");
        assert_eq!(
            render(&table),
            "<table>\n  <tr>\n    <td colspan=\"2\" rowspan=\"2\">X</td>\n    <td>a</td>\n  </tr>\n  <tr>\n    <td>b</td>\n  </tr>\n</table>\n"
        );
    }

    #[test]
    fn test_render_empty_table() {
        let mut table = Table::new();
        table.set_attribute("class", "grid");
        assert_eq!(render(&table), "<table class=\"grid\">\n</table>\n");
    }

    #[test]
    fn test_render_untouched_row_with_attributes() {
        let mut table = body_table();
        table.put(1, 1, "A");
        table.put(3, 1, "C");
        table.set_row_attribute(2, "class", "odd");
        assert_eq!(
            render(&table),
            "<table>\n  <tr>\n    <td>A</td>\n  </tr>\n  <tr class=\"odd\">\n    <td class=\"empty\">&nbsp;</td>\n  </tr>\n  <tr>\n    <td>C</td>\n  </tr>\n</table>\n"
        );
    }

    #[test]
    fn test_render_inside_inline_element() {
        let mut table = body_table();
        table.put(1, 2, "A");

        let mut html = HtmlWriter::new(Vec::new());
        html.tag("span")
            .unwrap()
            .render_table(&table)
            .unwrap()
            .nbsp()
            .unwrap()
            .end()
            .unwrap();
        assert_eq!(
            String::from_utf8(html.finish().unwrap()).unwrap(),
            "<span><table><tr><td class=\"empty\">&nbsp;</td><td>A</td></tr></table>&nbsp;</span>\n"
        );
    }

    #[test]
    fn test_render_nested_table() {
        let mut inner = body_table();
        inner.put(1, 1, "x");
        let mut outer = body_table();
        outer.put(1, 1, inner);

        let expected = "<table>\n  <tr>\n    <td>\n      <table>\n        <tr>\n          <td>x</td>\n        </tr>\n      </table>\n    </td>\n  </tr>\n</table>\n";
        assert_eq!(render(&outer), expected);
    }

    #[test]
    fn test_render_markup_is_not_escaped() {
        let mut table = body_table();
        table.put(1, 1, "<b>bold</b> &amp; more");
        assert!(render(&table).contains("<td><b>bold</b> &amp; more</td>"));
    }

    #[test]
    fn test_render_is_repeatable() {
        let mut table = Table::new();
        table.set_attribute("border", "1");
        table.put(1, 1, "H1");
        table.put(1, 2, "H2");
        table.put_spanning(2, 1, 1, 2, "wide");
        table.put(4, 2, 7_i32);

        assert_eq!(render(&table), render(&table));
    }

    #[test]
    fn test_render_inside_document() {
        let mut table = body_table();
        table.put(1, 1, "A");

        let mut html = HtmlWriter::new(Vec::new());
        html.body().unwrap().render_table(&table).unwrap().end().unwrap();
        assert_eq!(
            String::from_utf8(html.finish().unwrap()).unwrap(),
            "<body>\n  <table>\n    <tr>\n      <td>A</td>\n    </tr>\n  </table>\n</body>\n"
        );
    }

    #[test]
    fn test_cell_shorthands() {
        let mut cell = Cell::with_contents("<i>x</i>");
        cell.set_attribute("align", "right");

        let mut html = HtmlWriter::new(Vec::new());
        html.td_cell(&cell)
            .unwrap()
            .th_cell(&Cell::new())
            .unwrap()
            .td_text("a < b")
            .unwrap();
        assert_eq!(
            String::from_utf8(html.into_inner()).unwrap(),
            "<td align=\"right\"><i>x</i></td>\n<th></th>\n<td>a &lt; b</td>\n"
        );
    }

    #[test]
    fn test_manual_table_with_end_named() {
        let mut html = HtmlWriter::new(Vec::new());
        html.table().unwrap().tr().unwrap().th_text("h").unwrap();
        assert!(matches!(
            html.end_named("table"),
            Err(MarkupError::TagMismatch { .. })
        ));
        assert!(matches!(html.end(), Err(MarkupError::Poisoned)));
    }
}
