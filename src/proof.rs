//! Inclusion (audit) proofs for the Merkle log.
//!
//! An [`AuditProof`] carries the ordered sibling digests needed to recompute
//! the root from one leaf. The path holds the RFC 6962 PATH digest set but
//! ordered root-to-leaf (outermost split's sibling first), so verification
//! must consume it in reverse. A verifier that walks the path leaf-to-root in generation
//! order still passes for many power-of-two tree sizes while silently
//! producing wrong results for ragged sizes; the recursion below combines on
//! the unwind so the reversal cannot be skipped.

use bincode::{Decode, Encode};

use crate::{
    Digest, MerkleLogError, Result,
    hash::node_hash,
    helper::{audit_path_len, split_point},
    tree::subtree_root,
};

/// An inclusion proof that one record sits at `leaf_index` in a tree of
/// `tree_size` records under a given root.
///
/// Generated by [`MerkleLog::generate_audit_proof`]
/// (crate::MerkleLog::generate_audit_proof) against a frozen `tree_size`
/// snapshot; the proof is meaningless against any other snapshot and is
/// never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct AuditProof {
    leaf_index: u64,
    tree_size: u64,
    leaf_hash: Digest,
    path: Vec<Digest>,
}

impl AuditProof {
    pub(crate) fn new(leaf_index: u64, tree_size: u64, leaf_hash: Digest, path: Vec<Digest>) -> Self {
        AuditProof {
            leaf_index,
            tree_size,
            leaf_hash,
            path,
        }
    }

    /// The 0-based index of the proved leaf.
    pub fn leaf_index(&self) -> u64 {
        self.leaf_index
    }

    /// The record count of the snapshot this proof was generated against.
    pub fn tree_size(&self) -> u64 {
        self.tree_size
    }

    /// The domain-separated digest of the proved record.
    pub fn leaf_hash(&self) -> &Digest {
        &self.leaf_hash
    }

    /// The sibling digests, ordered from the outermost split down to the
    /// leaf's immediate sibling.
    pub fn path(&self) -> &[Digest] {
        &self.path
    }

    /// Verify this proof against a leaf digest and an expected root.
    ///
    /// Returns `false` on any digest mismatch — "not included" is a normal
    /// outcome, never an error. Malformed proofs (index out of range, empty
    /// tree, wrong path length for the `(tree_size, leaf_index)` pair) are
    /// rejected before any hashing work, also yielding `false`.
    pub fn verify(&self, leaf_hash: &Digest, root_hash: &Digest) -> bool {
        if self.tree_size == 0 || self.leaf_index >= self.tree_size {
            return false;
        }
        if self.path.len() != audit_path_len(self.leaf_index, self.tree_size) {
            return false;
        }
        match climb(self.leaf_index, self.tree_size, leaf_hash, &self.path) {
            Some(computed) => computed == *root_hash,
            None => false,
        }
    }

    /// Serialize this proof to bytes using bincode.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_no_limit();
        bincode::encode_to_vec(self, config)
            .map_err(|e| MerkleLogError::InvalidData(format!("failed to encode AuditProof: {}", e)))
    }

    /// Deserialize a proof from bytes.
    ///
    /// The bincode size limit is capped at 100 MiB to prevent crafted length
    /// headers from causing huge allocations. Structurally inconsistent
    /// proofs (index out of range, path length not matching the split count)
    /// are rejected here rather than left for `verify` to fail on.
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_limit::<{ 100 * 1024 * 1024 }>();
        let (proof, _): (Self, _) = bincode::decode_from_slice(bytes, config)
            .map_err(|e| MerkleLogError::InvalidData(format!("failed to decode AuditProof: {}", e)))?;
        proof.validate()?;
        Ok(proof)
    }

    /// Structural consistency checks applied to every decoded proof,
    /// standalone or embedded as a non-existence bound.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.tree_size == 0 {
            return Err(MerkleLogError::InvalidData(
                "proof has tree_size 0".into(),
            ));
        }
        if self.leaf_index >= self.tree_size {
            return Err(MerkleLogError::InvalidData(format!(
                "leaf index {} out of range for tree_size {}",
                self.leaf_index, self.tree_size
            )));
        }
        let expected_len = audit_path_len(self.leaf_index, self.tree_size);
        if self.path.len() != expected_len {
            return Err(MerkleLogError::InvalidData(format!(
                "path length {} does not match the {} splits for (tree_size={}, leaf_index={})",
                self.path.len(),
                expected_len,
                self.tree_size,
                self.leaf_index
            )));
        }
        Ok(())
    }
}

/// Recompute the candidate root from a leaf digest and a root-to-leaf path.
///
/// Descends with split-point tracking — k is the largest power of two below
/// the current subtree size; `index < k` means the current node is a left
/// child — and combines digests on the unwind, so the path is consumed from
/// its last element back to its first. Index parity says nothing here: for
/// ragged subtree sizes the parity rule picks the wrong side.
///
/// Returns `None` if the path length does not match the descent (no hashing
/// has happened by that point).
fn climb(index: u64, size: u64, leaf: &Digest, path: &[Digest]) -> Option<Digest> {
    if size == 1 {
        return path.is_empty().then_some(*leaf);
    }
    let (sibling, rest) = path.split_first()?;
    let k = split_point(size);
    if index < k {
        let child = climb(index, k, leaf, rest)?;
        Some(node_hash(&child, sibling))
    } else {
        let child = climb(index - k, size - k, leaf, rest)?;
        Some(node_hash(sibling, &child))
    }
}

/// Audit path over precomputed leaf digests: the sibling digest sequence
/// from the outermost split down to the immediate sibling of leaf `index`.
pub(crate) fn audit_path(digests: &[Digest], index: u64) -> Vec<Digest> {
    let mut path = Vec::with_capacity(audit_path_len(index, digests.len() as u64));
    collect_path(digests, index, &mut path);
    path
}

fn collect_path(digests: &[Digest], index: u64, path: &mut Vec<Digest>) {
    if digests.len() <= 1 {
        return;
    }
    let k = split_point(digests.len() as u64) as usize;
    if (index as usize) < k {
        path.push(subtree_root(&digests[k..]));
        collect_path(&digests[..k], index, path);
    } else {
        path.push(subtree_root(&digests[..k]));
        collect_path(&digests[k..], index - k as u64, path);
    }
}
