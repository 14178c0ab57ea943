//! Writer configuration: indentation and inline element classification

/// Environment variable read by [`WriterConfig::from_env`]
pub const INDENT_ENV_VAR: &str = "HTMLSTREAM_INDENT";

/// Elements laid out inline by default
pub const DEFAULT_INLINE_ELEMENTS: &[&str] =
    &["a", "b", "i", "em", "strong", "span", "code", "small", "label"];

/// Indentation unit written once per nesting level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IndentStyle {
    /// No indentation, line breaks only
    None,
    /// N spaces per level (default: 2)
    Spaces(u8),
    /// One tab per level
    Tab,
}

impl IndentStyle {
    /// Parse `none`, `tab` or a number of spaces
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "none" | "0" => Some(IndentStyle::None),
            "tab" | "tabs" => Some(IndentStyle::Tab),
            other => other.parse::<u8>().ok().map(IndentStyle::Spaces),
        }
    }

    /// The string written for one level
    pub fn unit(&self) -> String {
        match self {
            IndentStyle::None => String::new(),
            IndentStyle::Spaces(n) => " ".repeat(*n as usize),
            IndentStyle::Tab => "\t".to_string(),
        }
    }
}

impl Default for IndentStyle {
    fn default() -> Self {
        IndentStyle::Spaces(2)
    }
}

/// Layout options for [`XmlWriter`](crate::xml_writer::XmlWriter)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WriterConfig {
    pub indent: IndentStyle,
    pub inline_elements: Vec<String>,
}

impl Default for WriterConfig {
    fn default() -> Self {
        WriterConfig {
            indent: IndentStyle::default(),
            inline_elements: DEFAULT_INLINE_ELEMENTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl WriterConfig {
    /// Read the indent style from `HTMLSTREAM_INDENT`, falling back to the default
    pub fn from_env() -> Self {
        let indent = std::env::var(INDENT_ENV_VAR)
            .ok()
            .and_then(|s| IndentStyle::parse(&s))
            .unwrap_or_default();
        WriterConfig::default().indent(indent)
    }

    pub fn indent(mut self, indent: IndentStyle) -> Self {
        self.indent = indent;
        self
    }

    /// Treat every element as block level
    pub fn no_inline_elements(mut self) -> Self {
        self.inline_elements.clear();
        self
    }

    pub fn inline_element(mut self, name: &str) -> Self {
        if !self.is_inline(name) {
            self.inline_elements.push(name.to_string());
        }
        self
    }

    pub fn is_inline(&self, name: &str) -> bool {
        self.inline_elements
            .iter()
            .any(|e| e.eq_ignore_ascii_case(name))
    }
}
