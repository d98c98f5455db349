//! Offset pagination for list operations.

/// `skip`/`limit` window over an ordered listing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    /// rows to skip from the start
    pub skip: u64,
    /// maximum rows returned
    pub limit: u64,
}

impl Page {
    pub const DEFAULT_LIMIT: u64 = 100;
    pub const MAX_LIMIT: u64 = 1000;
    /// SQL offsets are signed 64-bit.
    pub const MAX_SKIP: u64 = i64::MAX as u64;

    pub fn new(skip: Option<u64>, limit: Option<u64>) -> Self {
        Self { skip: skip.unwrap_or(0), limit: limit.unwrap_or(Self::DEFAULT_LIMIT) }
    }

    /// Clamp both bounds and return `(offset, limit)`
    pub fn normalize(self) -> (u64, u64) {
        (self.skip.min(Self::MAX_SKIP), self.limit.min(Self::MAX_LIMIT))
    }
}

impl Default for Page {
    fn default() -> Self { Self { skip: 0, limit: Self::DEFAULT_LIMIT } }
}

#[cfg(test)]
mod tests {
    use super::Page;

    #[test]
    fn missing_values_use_defaults() {
        assert_eq!(Page::new(None, None), Page::default());
        assert_eq!(Page::default().normalize(), (0, 100));
    }

    #[test]
    fn normalize_clamps_upper_bound() {
        let (skip, limit) = Page::new(Some(5), Some(50_000)).normalize();
        assert_eq!(skip, 5);
        assert_eq!(limit, Page::MAX_LIMIT);
    }

    #[test]
    fn normalize_caps_skip_at_signed_range() {
        assert_eq!(Page::new(Some(u64::MAX), Some(5)).normalize(), (Page::MAX_SKIP, 5));
        assert_eq!(Page::new(Some(1u64 << 63), None).normalize().0, i64::MAX as u64);
        assert!(i64::try_from(Page::MAX_SKIP).is_ok());
    }

    #[test]
    fn zero_limit_is_kept() {
        assert_eq!(Page::new(Some(0), Some(0)).normalize(), (0, 0));
    }
}
