use thiserror::Error;

/// Alias for `core::result::Result<T, MerkleLogError>`.
pub type Result<T> = core::result::Result<T, MerkleLogError>;

/// Unified error type for Merkle log operations.
///
/// Failed proof *verification* is never an error — verifiers return plain
/// `false`, so "not included" / "not authentic" is a normal outcome.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MerkleLogError {
    /// Leaf index outside `[0, tree_size)`.
    #[error("leaf index {index} is out of range (tree_size={tree_size})")]
    InvalidIndex {
        /// The requested leaf index.
        index: u64,
        /// The record count of the snapshot the request ran against.
        tree_size: u64,
    },
    /// A proof was requested against a tree with no records.
    #[error("cannot generate a proof against an empty tree")]
    EmptyTree,
    /// The backing store failed or returned data inconsistent with the
    /// expected record count.
    #[error("store error: {0}")]
    StoreError(String),
    /// Invalid serialized proof data (deserialization, corruption).
    #[error("invalid data: {0}")]
    InvalidData(String),
}
