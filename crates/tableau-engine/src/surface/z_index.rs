/// Draw order of a visual within its group.
///
/// Higher values appear on top of lower values; equal values fall back to
/// the order in which visuals were attached.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct ZIndex(pub i32);

impl ZIndex {
    #[inline]
    pub const fn new(v: i32) -> Self {
        Self(v)
    }

    /// Z-index for the `i`-th item of a pile, saturating at `i32::MAX`.
    #[inline]
    pub fn from_index(i: usize) -> Self {
        Self(i32::try_from(i).unwrap_or(i32::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_index_saturates() {
        assert_eq!(ZIndex::from_index(7), ZIndex::new(7));
        assert_eq!(ZIndex::from_index(usize::MAX), ZIndex::new(i32::MAX));
        assert!(ZIndex::new(2) > ZIndex::new(1));
    }
}
