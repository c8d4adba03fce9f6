#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("attribute {attribute} required")]
    MissingRequiredAttribute { attribute: String },

    #[error("attribute {attribute} only has {len} elements; can't get [{index}]")]
    ArityMismatch {
        attribute: String,
        len: usize,
        index: usize,
    },

    #[error("attribute {attribute}: {value:?} is not a valid {expected}")]
    TypeConversion {
        attribute: String,
        value: String,
        expected: &'static str,
    },

    #[error("attribute {attribute}: value {value:?} not in allowed set for {vocabulary}")]
    UnknownEnumValue {
        attribute: String,
        value: String,
        vocabulary: &'static str,
    },

    #[error("unknown object type ({tag}) for ID {id}")]
    UnknownObjectType { id: String, tag: String },

    #[error("element ID {id} missing TYPE attribute")]
    MissingTypeTag { id: String },

    #[error("malformed list: {0}")]
    MalformedList(#[from] tcllist::ListError),

    #[error("{0}")]
    Structural(String),

    #[error("file format version {version} is not supported (supported: {min}-{max})")]
    UnsupportedFormatVersion { version: i64, min: u32, max: u32 },

    #[error("multiple conflicting __MAPPER__ headers (version {previous}, then {found})")]
    ConflictingHeader { previous: i64, found: i64 },

    #[error("build supports map file formats {min}-{max}, but format {current} is current")]
    InvalidBuildConfiguration { current: u32, min: u32, max: u32 },

    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("object {id}: {source}")]
    InObject {
        id: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub(crate) fn at_line(self, line: usize) -> Self {
        Self::AtLine {
            line,
            source: Box::new(self),
        }
    }

    pub(crate) fn in_object(self, id: &str) -> Self {
        Self::InObject {
            id: id.to_string(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with line and object context stripped.
    pub fn root(&self) -> &Error {
        match self {
            Self::AtLine { source, .. } | Self::InObject { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn line(&self) -> Option<usize> {
        match self {
            Self::AtLine { line, .. } => Some(*line),
            Self::InObject { source, .. } => source.line(),
            _ => None,
        }
    }

    pub fn object_id(&self) -> Option<&str> {
        match self {
            Self::InObject { id, .. } => Some(id),
            Self::AtLine { source, .. } => source.object_id(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
