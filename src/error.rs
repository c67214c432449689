use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while validating the inputs of a transition, before any
/// diff or tween work happens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A line-number range, focus string or annotation target does not
    /// follow the range grammar, or has `end < start`.
    #[error("malformed range `{input}`: {reason}")]
    MalformedRange { input: String, reason: String },

    /// A declared line-number range covers a different number of lines than
    /// the code it numbers.
    #[error("line number range `{input}` covers {declared} lines but the code has {actual}")]
    RangeLengthMismatch {
        input: String,
        declared: usize,
        actual: usize,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn malformed(input: &str, reason: impl Into<String>) -> Self {
        Error::MalformedRange {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
