use thiserror::Error;

/// Failures of the write-side link operations.
///
/// Read-side functions (parsing, detection, validation) never fail; they
/// report absence through `Option` or warnings instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LinkError {
    #[error("Link destination is empty")]
    EmptyDestination,

    #[error("Cannot represent URL {0} as a wiki link destination")]
    UrlNotRepresentable(String),
}
