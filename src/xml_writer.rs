//! Streaming XML writer with an open-tag stack and buffered attributes
//!
//! Output goes straight to the sink; wrap it in a `BufWriter` if the sink is
//! expensive to write to. The only thing held back is the attribute list of
//! the most recently opened tag, which is written when that tag is committed.

use crate::config::WriterConfig;
use crate::error::{MarkupError, Result};
use crate::types::{Attributes, Frame};
use log::{debug, trace, warn};
use std::borrow::Cow;
use std::io::Write;

/// Escape the five XML-significant characters
///
/// Returns the input unchanged (borrowed) when nothing needs escaping.
///
/// ```
/// use htmlstream::xml_writer::escape;
///
/// assert_eq!(escape("a < b & 'c'"), "a &lt; b &amp; &apos;c&apos;");
/// assert_eq!(escape("plain"), "plain");
/// ```
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text
        .bytes()
        .any(|b| matches!(b, b'&' | b'<' | b'>' | b'"' | b'\''))
    {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(MarkupError::EmptyTagName);
    }
    if name
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '<' | '>' | '"' | '\'' | '/' | '=' | '&'))
    {
        return Err(MarkupError::InvalidTagName(name.to_string()));
    }
    Ok(())
}

fn validate_attribute_name(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(MarkupError::EmptyAttributeName);
    }
    if key
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '<' | '>' | '"' | '\'' | '/' | '=' | '&'))
    {
        return Err(MarkupError::InvalidAttributeName(key.to_string()));
    }
    Ok(())
}

/// XML writer that tracks open tags and indents by nesting depth
///
/// Every operation returns `&mut Self` so calls can be chained with `?`:
///
/// ```
/// use htmlstream::xml_writer::XmlWriter;
///
/// # fn main() -> htmlstream::Result<()> {
/// let mut writer = XmlWriter::new(Vec::new());
/// writer
///     .open_tag("root")?
///     .attr("id", "1")?
///     .close_tag()?
///     .tagged("item", "a & b", true)?
///     .end()?;
///
/// let xml = String::from_utf8(writer.finish()?).unwrap();
/// assert_eq!(xml, "<root id=\"1\">\n  <item>a &amp; b</item>\n</root>\n");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct XmlWriter<W: Write> {
    writer: W,
    config: WriterConfig,
    indent_unit: String,
    stack: Vec<Frame>,
    pending: Attributes,
    inline_depth: usize,
    poisoned: bool,
}

impl<W: Write> XmlWriter<W> {
    pub fn new(writer: W) -> Self {
        Self::with_config(writer, WriterConfig::default())
    }

    pub fn with_config(writer: W, config: WriterConfig) -> Self {
        XmlWriter {
            writer,
            indent_unit: config.indent.unit(),
            config,
            stack: Vec::new(),
            pending: Attributes::new(),
            inline_depth: 0,
            poisoned: false,
        }
    }

    /// Write `<name` and push a new frame; attributes may follow until the
    /// tag is committed
    pub fn open_tag(&mut self, name: &str) -> Result<&mut Self> {
        self.check()?;
        validate_name(name)?;
        self.ensure_committed()?;

        let inline = self.config.is_inline(name);
        self.write_indent()?;
        self.write_raw(b"<")?;
        self.write_str(name)?;

        trace!("open <{}> at depth {}", name, self.stack.len());
        self.stack.push(Frame::new(name, inline));
        if inline {
            self.inline_depth += 1;
        }
        Ok(self)
    }

    /// Add an attribute to the pending tag; `None` is skipped silently
    pub fn attribute(&mut self, key: &str, value: Option<&str>) -> Result<&mut Self> {
        self.check()?;
        if !self.is_pending() {
            return self.fail(MarkupError::AttributeAfterCommit {
                key: key.to_string(),
            });
        }
        validate_attribute_name(key)?;
        if let Some(value) = value {
            self.pending.insert(key.to_string(), value.to_string());
        }
        Ok(self)
    }

    /// Add a required attribute to the pending tag
    #[inline]
    pub fn attr(&mut self, key: &str, value: &str) -> Result<&mut Self> {
        self.attribute(key, Some(value))
    }

    /// Add an attribute with an integer value
    pub fn attr_int(&mut self, key: &str, value: i64) -> Result<&mut Self> {
        let mut buffer = itoa::Buffer::new();
        self.attribute(key, Some(buffer.format(value)))
    }

    /// Add every key/value pair to the pending tag, in iteration order
    pub fn attributes<I, K, V>(&mut self, attributes: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in attributes {
            self.attribute(key.as_ref(), Some(value.as_ref()))?;
        }
        Ok(self)
    }

    /// Write the pending attributes and `>`; the element stays open
    pub fn close_tag(&mut self) -> Result<&mut Self> {
        self.check()?;
        if !self.is_pending() {
            return self.fail(MarkupError::NothingToCommit);
        }
        self.commit(false)?;
        Ok(self)
    }

    /// Write the pending attributes and `/>`, closing the element
    pub fn close_empty_tag(&mut self) -> Result<&mut Self> {
        self.check()?;
        if !self.is_pending() {
            return self.fail(MarkupError::NothingToCommit);
        }
        self.commit(true)?;
        Ok(self)
    }

    /// Close the innermost open element with `</name>`
    pub fn end(&mut self) -> Result<&mut Self> {
        self.check()?;
        self.ensure_committed()?;
        let Some(frame) = self.pop() else {
            return self.fail(MarkupError::NoOpenTag);
        };
        if !frame.inline {
            self.write_indent()?;
        }
        self.write_raw(b"</")?;
        self.write_str(&frame.name)?;
        self.write_raw(b">")?;
        self.write_line_break()?;
        Ok(self)
    }

    /// Like [`end`](Self::end), but only if `name` is the innermost open element
    pub fn end_named(&mut self, name: &str) -> Result<&mut Self> {
        self.check()?;
        match self.stack.last().map(|f| f.name.clone()) {
            None => self.fail(MarkupError::NoOpenTag),
            Some(found) if found == name => self.end(),
            Some(found) => self.fail(MarkupError::TagMismatch {
                expected: name.to_string(),
                found,
            }),
        }
    }

    /// `<name>`, left open for children
    pub fn tag(&mut self, name: &str) -> Result<&mut Self> {
        self.open_tag(name)?.close_tag()
    }

    /// `<name key="value" ...>`, left open for children
    pub fn tag_with<I, K, V>(&mut self, name: &str, attributes: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.open_tag(name)?.attributes(attributes)?.close_tag()
    }

    /// `<name/>`
    pub fn empty_tag(&mut self, name: &str) -> Result<&mut Self> {
        self.open_tag(name)?.close_empty_tag()
    }

    /// `<name key="value" .../>`
    pub fn empty_tag_with<I, K, V>(&mut self, name: &str, attributes: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.open_tag(name)?
            .attributes(attributes)?
            .close_empty_tag()
    }

    /// A complete `<name>text</name>` element on one line
    pub fn tagged(&mut self, name: &str, text: &str, escape: bool) -> Result<&mut Self> {
        self.tagged_with(name, std::iter::empty::<(&str, &str)>(), text, escape)
    }

    /// A complete `<name key="value" ...>text</name>` element on one line
    pub fn tagged_with<I, K, V>(
        &mut self,
        name: &str,
        attributes: I,
        text: &str,
        escape: bool,
    ) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.check()?;
        validate_name(name)?;
        let mut merged = Attributes::new();
        for (key, value) in attributes {
            validate_attribute_name(key.as_ref())?;
            merged.insert(key.as_ref().to_string(), value.as_ref().to_string());
        }
        self.ensure_committed()?;

        self.write_indent()?;
        self.write_raw(b"<")?;
        self.write_str(name)?;
        for (key, value) in &merged {
            self.write_attribute(key, value)?;
        }
        self.write_raw(b">")?;
        if escape {
            self.write_escaped(text)?;
        } else {
            self.write_str(text)?;
        }
        self.write_raw(b"</")?;
        self.write_str(name)?;
        self.write_raw(b">")?;
        self.write_line_break()?;
        Ok(self)
    }

    /// End the current line, unless inside an inline element
    pub fn line_break(&mut self) -> Result<&mut Self> {
        self.check()?;
        self.ensure_committed()?;
        self.write_line_break()?;
        Ok(self)
    }

    /// Write `text` as is, without escaping
    pub fn raw(&mut self, text: &str, newline: bool) -> Result<&mut Self> {
        self.check()?;
        self.ensure_committed()?;
        self.write_str(text)?;
        if newline {
            self.write_raw(b"\n")?;
        }
        Ok(self)
    }

    /// Write the indentation for the current depth
    pub fn indent(&mut self) -> Result<&mut Self> {
        self.check()?;
        self.ensure_committed()?;
        self.write_indent()?;
        Ok(self)
    }

    /// Write escaped text inside the current element
    pub fn print(&mut self, text: &str) -> Result<&mut Self> {
        self.check()?;
        self.ensure_committed()?;
        if self.in_inline() {
            self.write_escaped(text)?;
        } else {
            self.write_indent()?;
            self.write_escaped(text)?;
            self.write_raw(b"\n")?;
        }
        Ok(self)
    }

    /// Number of open elements
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Names of the open elements, outermost first
    pub fn open_tags(&self) -> Vec<&str> {
        self.stack.iter().map(|f| f.name.as_str()).collect()
    }

    /// True while the innermost opening tag still accepts attributes
    pub fn is_pending(&self) -> bool {
        self.stack.last().is_some_and(|f| f.pending)
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Flush the underlying sink
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Check that every element was closed, flush, and hand back the sink
    pub fn finish(mut self) -> Result<W> {
        self.check()?;
        if !self.stack.is_empty() {
            return Err(MarkupError::UnclosedTags {
                open: self.stack.iter().map(|f| f.name.clone()).collect(),
            });
        }
        self.flush()?;
        debug!("document finished");
        Ok(self.writer)
    }

    /// Hand back the sink without any checks
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn check(&self) -> Result<()> {
        if self.poisoned {
            return Err(MarkupError::Poisoned);
        }
        Ok(())
    }

    fn fail<T>(&mut self, err: MarkupError) -> Result<T> {
        if err.is_usage_error() {
            warn!("markup writer poisoned: {}", err);
            self.poisoned = true;
        }
        Err(err)
    }

    fn in_inline(&self) -> bool {
        self.inline_depth > 0
    }

    fn pop(&mut self) -> Option<Frame> {
        let frame = self.stack.pop()?;
        if frame.inline {
            self.inline_depth -= 1;
        }
        trace!("close <{}> at depth {}", frame.name, self.stack.len());
        Some(frame)
    }

    /// Commit a pending parent before anything is written inside it
    fn ensure_committed(&mut self) -> Result<()> {
        if self.is_pending() {
            self.commit(false)?;
        }
        Ok(())
    }

    fn commit(&mut self, empty: bool) -> Result<()> {
        let attributes = std::mem::take(&mut self.pending);
        for (key, value) in &attributes {
            self.write_attribute(key, value)?;
        }

        if empty {
            self.write_raw(b"/>")?;
            self.pop();
        } else {
            self.write_raw(b">")?;
            if let Some(frame) = self.stack.last_mut() {
                frame.pending = false;
            }
        }
        self.write_line_break()
    }

    #[inline]
    fn write_raw(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        Ok(())
    }

    #[inline]
    fn write_str(&mut self, s: &str) -> Result<()> {
        self.write_raw(s.as_bytes())
    }

    #[inline]
    fn write_escaped(&mut self, text: &str) -> Result<()> {
        let escaped = escape(text);
        self.write_str(&escaped)
    }

    fn write_attribute(&mut self, key: &str, value: &str) -> Result<()> {
        self.write_raw(b" ")?;
        self.write_str(key)?;
        self.write_raw(b"=\"")?;
        self.write_escaped(value)?;
        self.write_raw(b"\"")
    }

    fn write_indent(&mut self) -> Result<()> {
        if self.in_inline() || self.indent_unit.is_empty() {
            return Ok(());
        }
        for _ in 0..self.stack.len() {
            self.writer.write_all(self.indent_unit.as_bytes())?;
        }
        Ok(())
    }

    fn write_line_break(&mut self) -> Result<()> {
        if self.in_inline() {
            return Ok(());
        }
        self.write_raw(b"\n")
    }
}
