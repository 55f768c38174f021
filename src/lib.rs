//! RFC 6962-style Merkle transparency log — an append-only authenticated
//! data structure.
//!
//! This crate computes a deterministic root digest over an ordered record
//! sequence, generates inclusion ("audit") proofs that a record sits at a
//! given position under a given root, and generates non-existence proofs
//! over a digest-sorted record set. All hashing is Blake3 with domain
//! separation between leaves and internal nodes.
//!
//! # Core types
//!
//! - [`MerkleLog`] — the main log struct (append, root hash, proofs).
//! - [`AuditProof`] — inclusion proof (verify against a leaf digest + root).
//! - [`NonExistenceProof`] — pair of bracketing inclusion proofs showing a
//!   queried value is absent from a digest-sorted record set.
//!
//! # Store traits
//!
//! - [`RecordStore`] — append-only record storage by insertion index.
//! - [`MemStore`] — in-memory store (requires `mem_store` feature).

#![warn(missing_docs)]

mod error;
mod hash;
/// Split-point arithmetic for the tree-hash recursion.
pub(crate) mod helper;
/// In-memory record store (requires `mem_store` feature).
#[cfg(any(test, feature = "mem_store"))]
pub mod mem_store;
mod non_existence;
mod proof;
mod store;
mod tree;

pub use error::{MerkleLogError, Result};
pub use hash::{Digest, empty_root, leaf_hash, node_hash};
#[cfg(any(test, feature = "mem_store"))]
pub use mem_store::MemStore;
pub use non_existence::{NonExistence, NonExistenceProof};
pub use proof::AuditProof;
pub use store::RecordStore;
pub use tree::MerkleLog;
