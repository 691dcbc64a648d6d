//! # Error Types
//!
//! All fallible KML operations return [`KmlError`].

use geokit_core::NamespaceError;
use thiserror::Error;

/// Errors raised while building, rendering, or writing KML.
#[derive(Error, Debug)]
pub enum KmlError {
    /// An element parameter was rejected by its defaults map.
    #[error("element parameter rejected: {0}")]
    Namespace(#[from] NamespaceError<String>),

    /// A template slot has no value in the parameter snapshot.
    #[error("template field {0:?} has no value")]
    MissingField(String),

    /// A template is malformed (unterminated `{` or stray `}`).
    #[error("malformed template: {0}")]
    Template(String),

    /// A folder with this name is already part of the document.
    #[error("folder {0:?} is already in the document")]
    DuplicateFolder(String),

    /// No folder with this name exists in the document.
    #[error("folder {0:?} does not exist in the document")]
    UnknownFolder(String),

    /// Two different styles use the same id.
    #[error("style id {0:?} is used by two different styles")]
    ConflictingStyle(String),

    /// The output path ends in neither `.kml` nor `.kmz`.
    #[error("unsupported output extension {0:?}; expected \".kml\" or \".kmz\"")]
    UnsupportedExtension(String),

    /// Two attachments would be stored under the same file name.
    #[error("attachment {0:?} is already in the document")]
    DuplicateAttachment(String),

    /// An auxiliary file path has no file name component.
    #[error("auxiliary file {0:?} has no file name")]
    InvalidAttachment(String),

    /// The KMZ archive could not be written.
    #[error("kmz archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
