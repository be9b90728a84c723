use thiserror::Error;

/// Fatal errors raised while constructing the linker.
///
/// These are configuration mistakes and are rejected eagerly; nothing in this
/// enum is ever produced mid-merge.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("invalid link config: {0}")]
    InvalidConfig(String),
}

/// Per-record extraction failures.
///
/// These are recovered inside [`merge`](crate::RecordLinker::merge): the
/// offending record is logged and degraded to an unmatched entry, so a
/// `RecordError` never escapes the engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("record payload is not a JSON object")]
    NotAnObject,
    #[error("path `{0}` does not resolve to an object")]
    BadRoot(String),
}
