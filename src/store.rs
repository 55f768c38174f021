use crate::Result;

/// Abstract append-only storage for log records.
///
/// Records are identified by their 0-based insertion index and are immutable
/// once appended — the only mutation a store ever sees is `append`. Uses
/// `&self` (interior mutability) so a store can be shared with the proof
/// machinery without exclusive borrows.
pub trait RecordStore {
    /// Number of records appended so far.
    fn record_count(&self) -> Result<u64>;

    /// Retrieve the record at `index`, or `None` if it was never appended.
    fn record(&self, index: u64) -> Result<Option<Vec<u8>>>;

    /// Append a record, returning its 0-based insertion index.
    fn append(&self, record: &[u8]) -> Result<u64>;
}
