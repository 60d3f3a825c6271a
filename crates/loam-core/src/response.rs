use serde::Serialize;

///
/// Page
///
/// One page of records plus the predicate-wide total. `current` is
/// 1-based. Produced once per paged query; immutable value object.
///

#[derive(Clone, Debug, Serialize)]
pub struct Page<E> {
    pub records: Vec<E>,
    pub total: u64,
    pub current: u32,
    pub size: u32,
}

impl<E> Page<E> {
    #[must_use]
    pub const fn new(records: Vec<E>, total: u64, current: u32, size: u32) -> Self {
        Self {
            records,
            total,
            current,
            size,
        }
    }

    /// Number of records on this page, not the predicate-wide total.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
