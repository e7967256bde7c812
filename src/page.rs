//! Shared pagination contract for store listing operations.
//!
//! Listing operations return a bounded window of items together with an
//! unbounded total count computed over the same filter. The count is never
//! limited by the page window, so clients can render page controls without
//! issuing a second query.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page size applied when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Error returned for out-of-domain pagination parameters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("page size must be at least 1")]
pub struct InvalidPageSize;

/// A validated pagination request: zero-based page number plus page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    number: u32,
    size: u32,
}

impl PageRequest {
    /// Creates a validated page request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPageSize`] when `size` is zero.
    pub const fn new(number: u32, size: u32) -> Result<Self, InvalidPageSize> {
        if size == 0 {
            return Err(InvalidPageSize);
        }
        Ok(Self { number, size })
    }

    /// Returns the zero-based page number.
    #[must_use]
    pub const fn number(self) -> u32 {
        self.number
    }

    /// Returns the page size.
    #[must_use]
    pub const fn size(self) -> u32 {
        self.size
    }

    /// Returns the number of items to skip before this page starts.
    #[must_use]
    pub const fn offset(self) -> usize {
        (self.number as usize).saturating_mul(self.size as usize)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            number: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results plus the unbounded total count over the same filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items within the requested window.
    pub items: Vec<T>,
    /// Total matching items, not limited by the window.
    pub total_count: u64,
    /// Zero-based page number the window corresponds to.
    pub number: u32,
    /// Requested page size.
    pub size: u32,
}

impl<T> Page<T> {
    /// Windows a fully filtered result set into one page.
    ///
    /// The total count is taken from the unwindowed input length, preserving
    /// the bounded-page/unbounded-count contract.
    #[must_use]
    pub fn from_filtered(filtered: Vec<T>, request: PageRequest) -> Self {
        let total_count = filtered.len() as u64;
        let items = filtered
            .into_iter()
            .skip(request.offset())
            .take(request.size() as usize)
            .collect();
        Self {
            items,
            total_count,
            number: request.number(),
            size: request.size(),
        }
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
mod tests {
    use super::{DEFAULT_PAGE_SIZE, InvalidPageSize, Page, PageRequest};

    #[test]
    fn default_request_uses_first_page_of_twenty() {
        let request = PageRequest::default();
        assert_eq!(request.number(), 0);
        assert_eq!(request.size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert_eq!(PageRequest::new(3, 0), Err(InvalidPageSize));
    }

    #[test]
    fn windowing_preserves_unbounded_total_count() {
        let request = PageRequest::new(1, 3).expect("valid page request");
        let page = Page::from_filtered((0..10).collect::<Vec<_>>(), request);

        assert_eq!(page.items, vec![3, 4, 5]);
        assert_eq!(page.total_count, 10);
        assert_eq!(page.number, 1);
        assert_eq!(page.size, 3);
    }

    #[test]
    fn window_past_the_end_is_empty_but_counted() {
        let request = PageRequest::new(5, 4).expect("valid page request");
        let page = Page::from_filtered(vec!['a', 'b'], request);

        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 2);
    }
}
