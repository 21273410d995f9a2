//! Page-number pagination primitives shared by the Pantrie backend.
//!
//! Listing endpoints accept a one-based page number and a page size. The
//! [`PageRequest`] type validates both against [`PageLimits`] and exposes the
//! offset/limit pair that storage adapters need, while [`Page`] is the
//! envelope returned to callers together with the total number of matches.
//!
//! ```
//! use pagination::{Page, PageLimits, PageRequest};
//!
//! let request = PageRequest::new(Some(2), Some(10), PageLimits::default()).unwrap();
//! assert_eq!(request.offset(), 10);
//!
//! let page = Page::new(vec!["a", "b"], 12, request);
//! assert_eq!(page.total_pages, 2);
//! ```

use serde::{Deserialize, Serialize};

/// Default number of items returned per page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Errors raised while validating pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// Page numbers are one-based.
    #[error("page must be at least 1")]
    PageOutOfRange,
    /// Page size must be between one and the configured maximum.
    #[error("page size must be between 1 and {max}")]
    PageSizeOutOfRange {
        /// Configured maximum page size.
        max: u32,
    },
}

/// Bounds applied to caller-supplied page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    default_size: u32,
    max_size: u32,
}

impl PageLimits {
    /// Build limits from a default and a maximum page size.
    ///
    /// The default is clamped into `1..=max_size`.
    #[must_use]
    pub fn new(default_size: u32, max_size: u32) -> Self {
        let max_size = max_size.max(1);
        Self {
            default_size: default_size.clamp(1, max_size),
            max_size,
        }
    }

    /// Page size used when the caller does not provide one.
    #[must_use]
    pub const fn default_size(&self) -> u32 {
        self.default_size
    }

    /// Largest accepted page size.
    #[must_use]
    pub const fn max_size(&self) -> u32 {
        self.max_size
    }
}

impl Default for PageLimits {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE)
    }
}

/// Validated one-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Validate optional caller input against `limits`.
    ///
    /// Missing values fall back to page 1 and the default page size.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] when the page is zero or the page size is
    /// outside `1..=limits.max_size()`.
    pub fn new(
        page: Option<u32>,
        page_size: Option<u32>,
        limits: PageLimits,
    ) -> Result<Self, PageRequestError> {
        let page = page.unwrap_or(1);
        if page == 0 {
            return Err(PageRequestError::PageOutOfRange);
        }
        let page_size = page_size.unwrap_or(limits.default_size);
        if page_size == 0 || page_size > limits.max_size {
            return Err(PageRequestError::PageSizeOutOfRange {
                max: limits.max_size,
            });
        }
        Ok(Self { page, page_size })
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Number of items per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of items to skip before this page starts.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)).saturating_mul(u64::from(self.page_size))
    }

    /// Maximum number of items on this page.
    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// A single page of results plus the information needed to navigate the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Total number of matching items across all pages.
    pub total: u64,
    /// One-based page number.
    pub page: u32,
    /// Requested page size.
    pub page_size: u32,
    /// Number of pages needed to show `total` items.
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Wrap `items` for the given request and total match count.
    #[must_use]
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            page_size: request.page_size,
            total_pages: total.div_ceil(u64::from(request.page_size)),
        }
    }

    /// Transform every item while keeping the page metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }
}
