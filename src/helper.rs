use crate::Digest;

/// Largest power of two strictly less than `n`.
///
/// This is the split point `k` of the RFC 6962 tree-hash recursion: a tree
/// of `n` leaves splits into a maximal left subtree of `k` leaves (always
/// itself a power of two) and a right subtree of `n - k` leaves.
///
/// `n` must be at least 2; a subtree of one leaf has no split.
pub(crate) fn split_point(n: u64) -> u64 {
    debug_assert!(n >= 2, "no split point for n < 2");
    1u64 << (63 - (n - 1).leading_zeros())
}

/// Number of tree-hash splits between the root and leaf `index` in a tree
/// of `size` leaves — equal to the audit path length for `(size, index)`.
///
/// 0 iff `size == 1`. Equals `ceil(log2 size)` when `size` is a power of
/// two; shorter for some leaves of ragged sizes (the rightmost subtrees of
/// the recursion are shallower).
pub(crate) fn audit_path_len(mut index: u64, mut size: u64) -> usize {
    let mut len = 0;
    while size > 1 {
        let k = split_point(size);
        if index < k {
            size = k;
        } else {
            index -= k;
            size -= k;
        }
        len += 1;
    }
    len
}

/// Returns `true` if `digests` is strictly ascending.
///
/// Non-existence proofs are meaningful only over a strictly ascending
/// leaf-digest sequence; this is the check callers can run before serving
/// absence queries.
pub(crate) fn strictly_ascending(digests: &[Digest]) -> bool {
    digests.windows(2).all(|pair| pair[0] < pair[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_point() {
        assert_eq!(split_point(2), 1);
        assert_eq!(split_point(3), 2);
        assert_eq!(split_point(4), 2);
        assert_eq!(split_point(5), 4);
        assert_eq!(split_point(7), 4);
        assert_eq!(split_point(8), 4);
        assert_eq!(split_point(9), 8);
        assert_eq!(split_point(u64::MAX), 1 << 63);
    }

    #[test]
    fn test_split_point_is_max_power_of_two_below() {
        for n in 2u64..=1024 {
            let k = split_point(n);
            assert!(k.is_power_of_two());
            assert!(k < n, "k={} must be strictly below n={}", k, n);
            assert!(2 * k >= n, "k={} must be the largest such power for n={}", k, n);
        }
    }

    #[test]
    fn test_audit_path_len_power_of_two_sizes() {
        for h in 0..10u32 {
            let size = 1u64 << h;
            for index in 0..size {
                assert_eq!(audit_path_len(index, size), h as usize);
            }
        }
    }

    #[test]
    fn test_audit_path_len_ragged_sizes() {
        assert_eq!(audit_path_len(0, 1), 0);
        // size 3: leaves 0,1 sit two splits deep, leaf 2 only one
        assert_eq!(audit_path_len(0, 3), 2);
        assert_eq!(audit_path_len(1, 3), 2);
        assert_eq!(audit_path_len(2, 3), 1);
        // size 7: leaf 6 short-circuits through the size-3 right subtree
        assert_eq!(audit_path_len(0, 7), 3);
        assert_eq!(audit_path_len(5, 7), 3);
        assert_eq!(audit_path_len(6, 7), 2);
    }

    #[test]
    fn test_strictly_ascending() {
        let a = [0u8; 32];
        let mut b = [0u8; 32];
        b[31] = 1;
        let c = [0xFFu8; 32];
        assert!(strictly_ascending(&[]));
        assert!(strictly_ascending(&[a]));
        assert!(strictly_ascending(&[a, b, c]));
        assert!(!strictly_ascending(&[a, c, b]));
        assert!(!strictly_ascending(&[a, a]), "duplicates are not ascending");
    }
}
