//! Normalised pagination requests.

use crate::config::PaginationConfig;

/// One-based page request, normalised against [`PaginationConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    number: u32,
    size: u32,
}

impl PageRequest {
    /// Creates a normalised page request.
    ///
    /// Page `0` is treated as page `1`; size `0` selects the configured
    /// default and larger sizes are clamped to the configured maximum.
    #[must_use]
    pub fn new(number: u32, size: u32, config: &PaginationConfig) -> Self {
        let resolved = if size == 0 {
            config.default_page_size
        } else {
            size.min(config.max_page_size)
        };
        Self {
            number: number.max(1),
            size: resolved.max(1),
        }
    }

    /// Returns the first page using the configured default size.
    #[must_use]
    pub fn first(config: &PaginationConfig) -> Self {
        Self::new(1, 0, config)
    }

    /// Returns the one-based page number.
    #[must_use]
    pub const fn number(self) -> u32 {
        self.number
    }

    /// Returns the page size.
    #[must_use]
    pub const fn size(self) -> u32 {
        self.size
    }

    /// Returns the number of items preceding this page.
    #[must_use]
    pub fn offset(self) -> u64 {
        u64::from(self.number - 1) * u64::from(self.size)
    }

    /// Selects this page from an already ordered sequence.
    #[must_use]
    pub fn slice<T>(self, items: Vec<T>) -> Vec<T> {
        let skip = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(self.size).unwrap_or(usize::MAX);
        items.into_iter().skip(skip).take(take).collect()
    }
}
