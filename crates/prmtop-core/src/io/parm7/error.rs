use std::io;
use thiserror::Error;

/// Errors raised while decoding a parm7 stream.
///
/// Every variant is fatal to the current parse; the decoder never returns a
/// partial topology.
#[derive(Debug, Error)]
pub enum Parm7Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Unexpected end of stream: {context}")]
    Truncated { context: &'static str },

    #[error("Malformed %FORMAT directive: '{line}'")]
    MalformedFormat { line: String },

    #[error("Invalid integer in {section} (value: '{value}')")]
    InvalidInt {
        section: &'static str,
        value: String,
    },

    #[error("Invalid float in {section} (value: '{value}')")]
    InvalidFloat {
        section: &'static str,
        value: String,
    },

    #[error("Section {section} has {actual} entries, expected {expected}")]
    SizeMismatch {
        section: &'static str,
        actual: usize,
        expected: usize,
    },

    #[error("Section {section} is required when {reason}")]
    MissingSection {
        section: &'static str,
        reason: &'static str,
    },

    #[error("Section {section} has {len} entries, not a multiple of {group}")]
    MalformedBondedGroup {
        section: &'static str,
        len: usize,
        group: usize,
    },
}
