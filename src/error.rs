use thiserror::Error;

/// Failure to read list markup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarkupError {
    #[error("unexpected end of input inside the tag starting at byte {offset}")]
    UnexpectedEof { offset: usize },
    #[error("empty tag name at byte {offset}")]
    EmptyTagName { offset: usize },
    #[error("unterminated attribute value at byte {offset}")]
    UnterminatedAttribute { offset: usize },
    #[error("unterminated comment at byte {offset}")]
    UnterminatedComment { offset: usize },
    #[error("mismatched closing tag at byte {offset}: expected </{expected}>, found </{found}>")]
    MismatchedTag {
        expected: String,
        found: String,
        offset: usize,
    },
    #[error("closing tag </{tag}> at byte {offset} has no open element")]
    StrayClosingTag { tag: String, offset: usize },
    #[error("element <{tag}> is never closed")]
    UnclosedTag { tag: String },
}
