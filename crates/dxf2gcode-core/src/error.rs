//! Error handling for dxf2gcode
//!
//! Two families of problems come out of a conversion run:
//! - fatal errors ([`Error`]) that abort the run: malformed drawing
//!   structure, explicitly requested templates that cannot be read, I/O
//! - non-fatal [`Diagnostic`]s that are collected while the rest of the
//!   drawing is still converted: unsupported entities, degenerate geometry
//!
//! All error types use `thiserror`.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Identifies one entity in the source drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityLocator {
    /// Entity type name as written in the file (e.g. `LINE`, `TEXT`).
    pub entity_type: String,
    /// DXF handle (group 5), when the file carries one.
    pub handle: Option<String>,
    /// 1-based line of the entity's type marker.
    pub line: usize,
}

impl EntityLocator {
    pub fn new(entity_type: impl Into<String>, handle: Option<String>, line: usize) -> Self {
        Self {
            entity_type: entity_type.into(),
            handle,
            line,
        }
    }
}

impl fmt::Display for EntityLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.handle {
            Some(handle) => write!(
                f,
                "{} (handle {}) at line {}",
                self.entity_type, handle, self.line
            ),
            None => write!(f, "{} at line {}", self.entity_type, self.line),
        }
    }
}

/// Structural problems in a drawing file. Every variant is fatal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DrawingError {
    /// A group code line does not hold an integer
    #[error("invalid group code {raw:?} at line {line}")]
    InvalidGroupCode {
        /// The offending text.
        raw: String,
        /// 1-based line number.
        line: usize,
    },

    /// The file ends after a group code, without its value line
    #[error("group code {code} at line {line} has no value")]
    DanglingGroupCode {
        /// The group code left without a value.
        code: i32,
        /// 1-based line number of the code.
        line: usize,
    },

    /// The ENTITIES section is not closed by ENDSEC
    #[error("unterminated entity {entity}: end of file before ENDSEC")]
    UnterminatedEntity {
        /// The last entity opened before the file ended.
        entity: EntityLocator,
    },

    /// A group that the entity type requires is absent
    #[error("{entity} is missing mandatory group code {code}")]
    MissingGroup {
        /// The incomplete entity.
        entity: EntityLocator,
        /// The absent group code.
        code: i32,
    },

    /// A numeric group could not be parsed
    #[error("{entity} has invalid value {raw:?} for group code {code}")]
    InvalidValue {
        /// The entity holding the value.
        entity: EntityLocator,
        /// The group code of the value.
        code: i32,
        /// The raw value text.
        raw: String,
    },

    /// A polyline declares a different vertex count than it contains
    #[error("{entity} declares {declared} vertices but contains {found}")]
    VertexCountMismatch {
        /// The polyline entity.
        entity: EntityLocator,
        /// Count from group 90.
        declared: usize,
        /// Number of vertices read.
        found: usize,
    },

    /// Binary DXF is not read
    #[error("binary DXF files are not supported; export the drawing as ASCII DXF")]
    BinaryFormat,
}

impl DrawingError {
    /// The entity the error refers to, when there is one.
    pub fn entity(&self) -> Option<&EntityLocator> {
        match self {
            Self::UnterminatedEntity { entity }
            | Self::MissingGroup { entity, .. }
            | Self::InvalidValue { entity, .. }
            | Self::VertexCountMismatch { entity, .. } => Some(entity),
            Self::InvalidGroupCode { .. } | Self::DanglingGroupCode { .. } | Self::BinaryFormat => {
                None
            }
        }
    }
}

/// Which template a template error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Header,
    Footer,
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => write!(f, "header"),
            Self::Footer => write!(f, "footer"),
        }
    }
}

/// Main error type for a conversion run.
#[derive(Error, Debug)]
pub enum Error {
    /// The drawing's structural encoding is unparsable
    #[error("malformed input: {0}")]
    MalformedInput(#[from] DrawingError),

    /// An explicitly requested header/footer could not be read
    #[error("{kind} template {path:?} is unreadable: {source}")]
    TemplateUnreadable {
        /// Header or footer.
        kind: TemplateKind,
        /// The configured path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The conversion parameters are unusable
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error on the input drawing or the output program
    #[error("I/O error on {path:?}: {source}")]
    Io {
        /// The file being read or written.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Wrap an I/O failure on `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Check if this error came from the drawing itself
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Error::MalformedInput(_))
    }

    /// Check if this error came from a header/footer template
    pub fn is_template_error(&self) -> bool {
        matches!(self, Error::TemplateUnreadable { .. })
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

/// Kinds of non-fatal conversion findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A recognised entity type that the converter does not cut
    UnsupportedEntity,
    /// Zero-length or zero-radius geometry
    DegenerateGeometry,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedEntity => write!(f, "unsupported entity"),
            Self::DegenerateGeometry => write!(f, "degenerate geometry"),
        }
    }
}

/// A skipped entity and the reason it was skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub entity: EntityLocator,
    pub message: String,
}

impl Diagnostic {
    pub fn unsupported(entity: EntityLocator) -> Self {
        let message = format!("{} entities are not cut", entity.entity_type);
        Self {
            kind: DiagnosticKind::UnsupportedEntity,
            entity,
            message,
        }
    }

    pub fn degenerate(entity: EntityLocator, message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::DegenerateGeometry,
            entity,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.kind, self.entity, self.message)
    }
}
