//! Pagination request value object.
//!
//! Pages are zero-based. Results are sorted by a stable key (creation
//! order) and sliced at `[page * size, page * size + size)`; a page
//! shorter than `size` signals the last page.

use std::fmt;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: usize = 100;

/// A validated pagination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    page: usize,
    size: usize,
}

impl Page {
    /// Create a pagination request.
    ///
    /// # Errors
    ///
    /// Returns error if `size` is zero or exceeds [`MAX_PAGE_SIZE`].
    pub fn new(page: usize, size: usize) -> Result<Self, PageError> {
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(PageError { size });
        }
        Ok(Self { page, size })
    }

    /// Zero-based page index.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Requested page size.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Index of the first record on this page.
    ///
    /// Saturates on overflow; an offset past the end of any result set
    /// yields an empty page.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }

    /// Slice a stably-sorted result set down to this page.
    #[must_use]
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset())
            .take(self.size)
            .collect()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self { page: 0, size: 20 }
    }
}

/// Invalid page size requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageError {
    /// The rejected size.
    pub size: usize,
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "page size must be between 1 and {MAX_PAGE_SIZE}, got {}",
            self.size
        )
    }
}

impl std::error::Error for PageError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_slice_middle() {
        let page = Page::new(1, 3).unwrap();
        let items: Vec<i32> = (0..10).collect();
        assert_eq!(page.slice(items), vec![3, 4, 5]);
    }

    #[test]
    fn page_slice_short_last_page() {
        let page = Page::new(3, 3).unwrap();
        let items: Vec<i32> = (0..10).collect();
        assert_eq!(page.slice(items), vec![9]);
    }

    #[test]
    fn page_slice_past_end_is_empty() {
        let page = Page::new(5, 3).unwrap();
        let items: Vec<i32> = (0..10).collect();
        assert!(page.slice(items).is_empty());
    }

    #[test]
    fn huge_page_index_yields_empty_page() {
        let page = Page::new(usize::MAX, 20).unwrap();
        assert_eq!(page.offset(), usize::MAX);
        let items: Vec<i32> = (0..10).collect();
        assert!(page.slice(items).is_empty());
    }

    #[test]
    fn zero_size_rejected() {
        assert!(Page::new(0, 0).is_err());
    }

    #[test]
    fn oversized_page_rejected() {
        assert!(Page::new(0, MAX_PAGE_SIZE + 1).is_err());
        assert!(Page::new(0, MAX_PAGE_SIZE).is_ok());
    }

    #[test]
    fn default_page() {
        let page = Page::default();
        assert_eq!(page.page(), 0);
        assert_eq!(page.size(), 20);
        assert_eq!(page.offset(), 0);
    }
}
