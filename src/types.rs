//! Shared type definitions for the writers and the table model

use indexmap::IndexMap;

/// Ordered attribute map. Attributes are written in insertion order.
pub type Attributes = IndexMap<String, String>;

/// Build an attribute map from key/value pairs
///
/// # Examples
///
/// ```
/// use htmlstream::types::attributes;
///
/// let attrs = attributes([("src", "logo.png"), ("alt", "Logo")]);
/// assert_eq!(attrs.get_index(0), Some((&"src".to_string(), &"logo.png".to_string())));
/// ```
pub fn attributes<I, K, V>(pairs: I) -> Attributes
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// An element whose opening tag has been written but not yet its closing tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Tag name
    pub name: String,
    /// True until the opening tag's `>` (or `/>`) has been written
    pub pending: bool,
    /// Inline elements are laid out without indentation or line breaks
    pub inline: bool,
}

impl Frame {
    pub fn new(name: &str, inline: bool) -> Self {
        Frame {
            name: name.to_string(),
            pending: true,
            inline,
        }
    }
}
