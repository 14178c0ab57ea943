//! Error types for htmlstream

use thiserror::Error;

/// Result type alias for writer operations
pub type Result<T> = std::result::Result<T, MarkupError>;

/// Main error type for all markup writing operations
#[derive(Error, Debug)]
pub enum MarkupError {
    /// A tag was opened with an empty name
    #[error("Tag name must not be empty")]
    EmptyTagName,

    /// A tag name contains whitespace or markup characters
    #[error("Invalid tag name: '{0}'")]
    InvalidTagName(String),

    /// An attribute was added with an empty name
    #[error("Attribute name must not be empty")]
    EmptyAttributeName,

    /// An attribute name contains whitespace or markup characters
    #[error("Invalid attribute name: '{0}'")]
    InvalidAttributeName(String),

    /// `end()` was called with no open tag
    #[error("No open tag to close")]
    NoOpenTag,

    /// An attribute was added after the opening tag was committed
    #[error("Attribute '{key}' added after the opening tag was committed")]
    AttributeAfterCommit { key: String },

    /// `close_tag()` or `close_empty_tag()` without a pending opening tag
    #[error("No pending opening tag to commit")]
    NothingToCommit,

    /// `end_named()` found a different tag on top of the stack
    #[error("Expected to close <{expected}> but <{found}> is open")]
    TagMismatch { expected: String, found: String },

    /// `finish()` was called while tags were still open
    #[error("Document finished with unclosed tags: {}", .open.join(", "))]
    UnclosedTags { open: Vec<String> },

    /// A previous usage error left the writer in an undefined state
    #[error("Writer is unusable after an earlier usage error")]
    Poisoned,

    /// IO error wrapper
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl MarkupError {
    /// Usage errors corrupt the tag stack; everything else leaves it intact.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            MarkupError::NoOpenTag
                | MarkupError::AttributeAfterCommit { .. }
                | MarkupError::NothingToCommit
                | MarkupError::TagMismatch { .. }
        )
    }
}
