//! Error types for VPD record packing, unpacking, and storage access.

use thiserror::Error;

/// Error during record unpacking.
///
/// Every variant is a corrupt-buffer condition: the declared length, the
/// NUL-terminated field layout, or a section sentinel did not hold. Unpack
/// aborts on the first violation and never yields a half-populated record.
/// A null payload is not an error (the mutating entry points take
/// `Option<&[u8]>` and treat `None` as a no-op).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnpackError {
    #[error("unexpected end of buffer while reading {context}")]
    UnexpectedEof { context: &'static str },

    #[error("declared length {declared} exceeds buffer size {actual}")]
    Truncated { declared: usize, actual: usize },

    #[error("{field} is not NUL-terminated before the declared length ({limit})")]
    UnterminatedString { field: &'static str, limit: usize },

    #[error("sentinel {sentinel:?} not found before the declared length")]
    MissingSentinel { sentinel: &'static str },

    #[error("invalid UTF-8 in {field}")]
    InvalidUtf8 { field: &'static str },
}

/// Error during record packing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackError {
    #[error("packed record size {size} exceeds the u32 length field")]
    RecordTooLarge { size: usize },

    #[error("failed to allocate {bytes} byte pack buffer")]
    Alloc { bytes: usize },
}

/// Error reported by a storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("store backend failed during {context}: {message}")]
    Backend {
        context: &'static str,
        message: String,
    },
}

/// Error while fetching and decoding a stored record.
///
/// An absent key and a corrupt payload are distinct variants: callers may
/// collapse them, the library never does.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("no record stored under key {key:?}")]
    NotFound { key: String },

    #[error("record stored under key {key:?} is corrupt: {source}")]
    Corrupt { key: String, source: UnpackError },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl FetchError {
    /// Returns the unpack error for corrupt payloads, if that is what this is.
    pub fn unpack_error(&self) -> Option<&UnpackError> {
        match self {
            FetchError::Corrupt { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Error while packing and persisting a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistError {
    #[error(transparent)]
    Pack(#[from] PackError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
