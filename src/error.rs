use thiserror::Error as ThisError;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors reported by tree operations and the collaborators built on them.
///
/// A missing key is not an error: `search` returns `None` and `delete`
/// returns `false`.
#[derive(Debug, ThisError)]
pub enum Error {
    /// The operation needs at least one key but the tree is empty.
    #[error("the tree is empty")]
    EmptyTree,

    /// Input that cannot be turned into keys.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Writing an export failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
