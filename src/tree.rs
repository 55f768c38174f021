//! The append-only Merkle transparency log.

use crate::{
    AuditProof, Digest, MerkleLogError, NonExistence, NonExistenceProof, RecordStore, Result,
    hash::{empty_root, leaf_hash, node_hash},
    helper::{split_point, strictly_ascending},
    proof::audit_path,
};

/// An RFC 6962-style Merkle tree over an append-only record sequence.
///
/// `S` is the backing store (implements [`RecordStore`]). The log tracks its
/// own `tree_size` snapshot: every operation sees exactly the records
/// appended through this handle, so proofs are always generated against a
/// frozen record count. The root digest is a pure function of the ordered
/// record sequence — no node graph is retained; subtree digests are
/// recomputed by fresh recursion per operation.
pub struct MerkleLog<S> {
    store: S,
    tree_size: u64,
}

#[cfg(any(test, feature = "mem_store"))]
impl MerkleLog<crate::MemStore> {
    /// Create an empty log backed by a fresh in-memory store.
    pub fn new() -> Self {
        MerkleLog {
            store: crate::MemStore::new(),
            tree_size: 0,
        }
    }
}

#[cfg(any(test, feature = "mem_store"))]
impl Default for MerkleLog<crate::MemStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> MerkleLog<S> {
    /// The record count of the current snapshot.
    pub fn tree_size(&self) -> u64 {
        self.tree_size
    }

    /// Returns `true` if the log contains no records.
    pub fn is_empty(&self) -> bool {
        self.tree_size == 0
    }

    /// Return a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: RecordStore> MerkleLog<S> {
    /// Open a log backed by `store`, resuming at the store's record count.
    pub fn with_store(store: S) -> Result<Self> {
        let tree_size = store.record_count()?;
        Ok(MerkleLog { store, tree_size })
    }

    /// Append a record and return its 0-based insertion index.
    pub fn append(&mut self, record: &[u8]) -> Result<u64> {
        let index = self.store.append(record)?;
        if index != self.tree_size {
            return Err(MerkleLogError::StoreError(format!(
                "store appended at index {} but snapshot expected {}",
                index, self.tree_size
            )));
        }
        self.tree_size += 1;
        Ok(index)
    }

    /// Retrieve the record bytes at `index`.
    ///
    /// Returns `None` for indices beyond the snapshot. Returns an error if
    /// the index is within the snapshot but the store has no record for it
    /// (store inconsistency).
    pub fn record(&self, index: u64) -> Result<Option<Vec<u8>>> {
        if index >= self.tree_size {
            return Ok(None);
        }
        let record = self.store.record(index)?.ok_or_else(|| {
            MerkleLogError::StoreError(format!(
                "expected record at index {} but found none (tree_size={})",
                index, self.tree_size
            ))
        })?;
        Ok(Some(record))
    }

    /// Compute the root digest of the current snapshot.
    ///
    /// The empty tree has the well-defined root `blake3("")`. Rebuilding
    /// from the same record sequence always yields the same root.
    pub fn root_hash(&self) -> Result<Digest> {
        Ok(subtree_root(&self.leaf_digests()?))
    }

    /// Generate an inclusion proof that the record at `index` sits under
    /// the current root.
    ///
    /// The proof is bound to the snapshot's `tree_size` and is meaningless
    /// against any other snapshot.
    pub fn generate_audit_proof(&self, index: u64) -> Result<AuditProof> {
        if self.tree_size == 0 {
            return Err(MerkleLogError::EmptyTree);
        }
        if index >= self.tree_size {
            return Err(MerkleLogError::InvalidIndex {
                index,
                tree_size: self.tree_size,
            });
        }
        let digests = self.leaf_digests()?;
        Ok(AuditProof::new(
            index,
            self.tree_size,
            digests[index as usize],
            audit_path(&digests, index),
        ))
    }

    /// Prove that `query` is absent from the record set, or report that it
    /// exists.
    ///
    /// Precondition: records must be kept in ascending order of leaf digest
    /// (check with [`digests_sorted`](Self::digests_sorted)). The core does
    /// not enforce this on append; if violated, results are unreliable.
    pub fn prove_non_existence(&self, query: &[u8]) -> Result<NonExistence> {
        if self.tree_size == 0 {
            return Err(MerkleLogError::EmptyTree);
        }
        let digests = self.leaf_digests()?;
        let query_hash = leaf_hash(query);

        let mut insertion_pos = digests.len();
        for (index, digest) in digests.iter().enumerate() {
            if *digest == query_hash {
                return Ok(NonExistence::Exists {
                    index: index as u64,
                });
            }
            if *digest > query_hash && index < insertion_pos {
                insertion_pos = index;
            }
        }

        let bound_proof = |index: usize| {
            AuditProof::new(
                index as u64,
                self.tree_size,
                digests[index],
                audit_path(&digests, index as u64),
            )
        };
        let left = (insertion_pos > 0).then(|| bound_proof(insertion_pos - 1));
        let right = (insertion_pos < digests.len()).then(|| bound_proof(insertion_pos));
        Ok(NonExistence::Absent(NonExistenceProof::new(left, right)))
    }

    /// Returns `true` if the snapshot's leaf digests are strictly ascending.
    ///
    /// Non-existence proofs are only meaningful when this holds; appends
    /// themselves never check it.
    pub fn digests_sorted(&self) -> Result<bool> {
        Ok(strictly_ascending(&self.leaf_digests()?))
    }

    // Hash every record of the snapshot. Computed once per operation;
    // subtree roots are then recomputed over this vector.
    fn leaf_digests(&self) -> Result<Vec<Digest>> {
        let mut digests = Vec::with_capacity(self.tree_size as usize);
        for index in 0..self.tree_size {
            let record = self.store.record(index)?.ok_or_else(|| {
                MerkleLogError::StoreError(format!(
                    "expected record at index {} but found none (tree_size={})",
                    index, self.tree_size
                ))
            })?;
            digests.push(leaf_hash(&record));
        }
        Ok(digests)
    }
}

/// RFC 6962 MTH over precomputed leaf digests.
///
/// - 0 leaves: `blake3("")`
/// - 1 leaf: the leaf digest itself
/// - n leaves: `node_hash(MTH(d[0..k]), MTH(d[k..n]))` with k the largest
///   power of two strictly below n
pub(crate) fn subtree_root(digests: &[Digest]) -> Digest {
    match digests.len() {
        0 => empty_root(),
        1 => digests[0],
        n => {
            let k = split_point(n as u64) as usize;
            node_hash(&subtree_root(&digests[..k]), &subtree_root(&digests[k..]))
        }
    }
}
