//! Provenance sources for attribute values.

/// Payload format of a source a collector reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceKind {
    #[default]
    Binary,
    Ascii,
}

/// Describes where an attribute value could be (or was) obtained.
///
/// Sources are in-memory bookkeeping for the collection layer; they are
/// never serialized into a packed record. An attribute keeps its sources
/// ordered by descending preference level.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Source {
    src_ref: String,
    data: String,
    origin: i32,
    kind: SourceKind,
    lines: i32,
    pref_level: i32,
}

impl Source {
    pub fn new(
        src_ref: impl Into<String>,
        data: impl Into<String>,
        origin: i32,
        kind: SourceKind,
        lines: i32,
        pref_level: i32,
    ) -> Self {
        Source {
            src_ref: src_ref.into(),
            data: data.into(),
            origin,
            kind,
            lines,
            pref_level,
        }
    }

    /// Identifier needed to access this source: a file path, an in-memory
    /// tag, or similar.
    pub fn src_ref(&self) -> &str {
        &self.src_ref
    }

    /// Free-form payload some collectors attach to the source.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Numeric sub-origin identifier (which collector family produced it).
    pub fn origin(&self) -> i32 {
        self.origin
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// Number of lines a file-backed source needs read to yield its data.
    pub fn lines(&self) -> i32 {
        self.lines
    }

    /// Rank used when inserting into an attribute's provenance list; values
    /// from higher-preference sources overwrite lower ones.
    pub fn pref_level(&self) -> i32 {
        self.pref_level
    }
}
