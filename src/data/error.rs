use thiserror::Error;

/// Failure to read the uploaded archive or one of its members.
///
/// Member-scoped variants never abort the other section: the extractor
/// stores them next to the member they belong to.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("archive could not be opened: {0}")]
    Open(#[source] zip::result::ZipError),

    #[error("member '{name}' could not be read: {source}")]
    Member {
        name: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("member '{name}' is not valid UTF-8")]
    Decode { name: String },

    #[error("I/O error while reading '{name}': {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Failure to interpret the text of a COHPCAR/COOPCAR file.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FormatError {
    #[error("no data header")]
    MissingHeader,

    #[error("no numeric rows after the data header")]
    NoNumericRows,

    #[error("line {line}: '{token}' is not a number")]
    InvalidNumber { line: usize, token: String },

    #[error("line {line}: expected {expected} columns, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
}
