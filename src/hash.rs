//! Leaf and internal node hashing with Blake3 domain separation.
//!
//! Hash scheme (RFC 6962 §2.1):
//! - Leaf digests:          `blake3(0x00 || record_bytes)`
//! - Internal node digests: `blake3(0x01 || left || right)`
//! - Empty-tree root:       `blake3("")`
//!
//! The 0x00/0x01 domain tags prevent second-preimage attacks where a
//! crafted record could produce the same digest as an internal node.

/// A 32-byte Blake3 digest.
pub type Digest = [u8; 32];

/// Domain tag prepended to leaf hash inputs: `blake3(LEAF_TAG || record)`.
const LEAF_TAG: u8 = 0x00;
/// Domain tag prepended to internal node hash inputs:
/// `blake3(NODE_TAG || left || right)`.
const NODE_TAG: u8 = 0x01;

/// Compute the domain-separated leaf digest: `blake3(0x00 || record)`.
pub fn leaf_hash(record: &[u8]) -> Digest {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&[LEAF_TAG]);
    hasher.update(record);
    *hasher.finalize().as_bytes()
}

/// Compute an internal node digest: `blake3(0x01 || left || right)`.
pub fn node_hash(left: &Digest, right: &Digest) -> Digest {
    let mut input = [0u8; 65];
    input[0] = NODE_TAG;
    input[1..33].copy_from_slice(left);
    input[33..65].copy_from_slice(right);
    *blake3::hash(&input).as_bytes()
}

/// The root digest of the empty tree: `blake3("")`, no domain tag.
pub fn empty_root() -> Digest {
    *blake3::hash(&[]).as_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_hash_uses_domain_tag() {
        // Leaf digest is blake3(0x00 || record), not plain blake3(record)
        let record = b"test record";

        let mut hasher = blake3::Hasher::new();
        hasher.update(&[0x00]);
        hasher.update(record);
        let expected = *hasher.finalize().as_bytes();

        assert_eq!(leaf_hash(record), expected);

        let plain = *blake3::hash(record).as_bytes();
        assert_ne!(
            leaf_hash(record),
            plain,
            "leaf digest must differ from plain blake3(record)"
        );
    }

    #[test]
    fn test_node_hash_uses_domain_tag() {
        let left = [0xAAu8; 32];
        let right = [0xBBu8; 32];

        let mut input = [0u8; 65];
        input[0] = 0x01;
        input[1..33].copy_from_slice(&left);
        input[33..65].copy_from_slice(&right);
        let expected = *blake3::hash(&input).as_bytes();

        assert_eq!(node_hash(&left, &right), expected);

        let mut plain_input = [0u8; 64];
        plain_input[..32].copy_from_slice(&left);
        plain_input[32..].copy_from_slice(&right);
        let plain = *blake3::hash(&plain_input).as_bytes();
        assert_ne!(
            node_hash(&left, &right),
            plain,
            "node digest must differ from plain blake3(left || right)"
        );
    }

    #[test]
    fn test_node_hash_is_order_sensitive() {
        let left = leaf_hash(b"left");
        let right = leaf_hash(b"right");
        assert_ne!(node_hash(&left, &right), node_hash(&right, &left));
    }

    #[test]
    fn test_domain_separation_leaf_vs_node() {
        // A record crafted from two child digests must not collide with the
        // internal node built from those digests.
        let left = [0xAAu8; 32];
        let right = [0xBBu8; 32];

        let mut fake_record = Vec::with_capacity(64);
        fake_record.extend_from_slice(&left);
        fake_record.extend_from_slice(&right);

        assert_ne!(
            node_hash(&left, &right),
            leaf_hash(&fake_record),
            "domain separation must prevent leaf/internal digest collision"
        );
    }

    #[test]
    fn test_empty_root_is_plain_empty_hash() {
        assert_eq!(empty_root(), *blake3::hash(&[]).as_bytes());
        // Not the digest of an empty *leaf* — the empty tree has no leaves.
        assert_ne!(empty_root(), leaf_hash(&[]));
    }
}
