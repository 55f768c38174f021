//! Non-existence proofs over a digest-sorted record set.
//!
//! A [`NonExistenceProof`] shows that a queried value is absent by
//! bracketing its insertion point with inclusion proofs for the neighboring
//! records. Meaningful only when records are kept in ascending order of
//! leaf digest — the core never enforces that on append (see
//! [`MerkleLog::digests_sorted`](crate::MerkleLog::digests_sorted)).

use bincode::{Decode, Encode};

use crate::{AuditProof, Digest, MerkleLogError, Result, hash::leaf_hash};

/// Outcome of a non-existence query.
#[derive(Debug, Clone)]
pub enum NonExistence {
    /// The queried bytes are present in the record set; absence cannot be
    /// proven.
    Exists {
        /// Index of the record whose leaf digest equals the query's.
        index: u64,
    },
    /// The queried bytes are absent; the proof brackets the insertion point.
    Absent(NonExistenceProof),
}

/// A pair of bracketing inclusion proofs showing a queried value is absent
/// from a digest-sorted record set.
///
/// The left bound is the record immediately below the query's leaf digest
/// (absent when the query sorts below every record), the right bound the
/// record immediately above (absent when the query sorts above every
/// record). At least one bound always exists for a non-empty tree.
#[derive(Debug, Clone, Encode, Decode)]
pub struct NonExistenceProof {
    left: Option<AuditProof>,
    right: Option<AuditProof>,
}

impl NonExistenceProof {
    pub(crate) fn new(left: Option<AuditProof>, right: Option<AuditProof>) -> Self {
        NonExistenceProof { left, right }
    }

    /// The inclusion proof for the record just below the query, if any.
    pub fn left(&self) -> Option<&AuditProof> {
        self.left.as_ref()
    }

    /// The inclusion proof for the record just above the query, if any.
    pub fn right(&self) -> Option<&AuditProof> {
        self.right.as_ref()
    }

    /// Verify that this proof shows `query` to be absent from the tree
    /// under `root_hash`.
    ///
    /// Checks, all of which must pass:
    /// - at least one bound is present, and both carry the same `tree_size`;
    /// - the bounds sit on adjacent leaf indices (a missing left bound
    ///   requires the right bound at index 0; a missing right bound requires
    ///   the left bound at the last index);
    /// - each bound independently passes audit-proof verification against
    ///   `root_hash`;
    /// - `left.leaf_hash < leaf_hash(query) < right.leaf_hash` for the
    ///   bounds present.
    ///
    /// Returns `false` when any check fails — indistinguishable from "no
    /// proof produced". If the record set violated the sortedness
    /// precondition at generation time, a passing result is not meaningful.
    pub fn verify(&self, query: &[u8], root_hash: &Digest) -> bool {
        let structurally_sound = match (&self.left, &self.right) {
            (None, None) => false,
            // Bracketing is only sound for adjacent leaves of one snapshot.
            // checked_add keeps a crafted leaf_index of u64::MAX on the
            // `false` path instead of overflowing.
            (Some(left), Some(right)) => {
                left.tree_size() == right.tree_size()
                    && left.leaf_index().checked_add(1) == Some(right.leaf_index())
            }
            // A one-sided proof must sit at the edge of the tree, otherwise
            // a neighbor on the open side was omitted.
            (Some(left), None) => left.leaf_index().checked_add(1) == Some(left.tree_size()),
            (None, Some(right)) => right.leaf_index() == 0,
        };
        if !structurally_sound {
            return false;
        }

        let query_hash = leaf_hash(query);
        if let Some(left) = &self.left {
            if *left.leaf_hash() >= query_hash {
                return false;
            }
            if !left.verify(left.leaf_hash(), root_hash) {
                return false;
            }
        }
        if let Some(right) = &self.right {
            if *right.leaf_hash() <= query_hash {
                return false;
            }
            if !right.verify(right.leaf_hash(), root_hash) {
                return false;
            }
        }
        true
    }

    /// Serialize this proof to bytes using bincode.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_no_limit();
        bincode::encode_to_vec(self, config).map_err(|e| {
            MerkleLogError::InvalidData(format!("failed to encode NonExistenceProof: {}", e))
        })
    }

    /// Deserialize a proof from bytes.
    ///
    /// The bincode size limit is capped at 100 MiB. A proof with neither
    /// bound is rejected here, and each bound present must pass the same
    /// structural checks a standalone decoded [`AuditProof`] does; the
    /// bound relationships (adjacency, edges) are left for `verify`.
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_limit::<{ 100 * 1024 * 1024 }>();
        let (proof, _): (Self, _) = bincode::decode_from_slice(bytes, config).map_err(|e| {
            MerkleLogError::InvalidData(format!("failed to decode NonExistenceProof: {}", e))
        })?;
        if proof.left.is_none() && proof.right.is_none() {
            return Err(MerkleLogError::InvalidData(
                "non-existence proof carries no bounds".into(),
            ));
        }
        for bound in proof.left.iter().chain(&proof.right) {
            bound.validate()?;
        }
        Ok(proof)
    }
}
