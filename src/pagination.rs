//! Page requests and paged results for list operations.

use crate::error::{Classify, ErrorKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validated page window. Pages are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

/// Errors returned while building a [`PageRequest`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PageRequestError {
    /// Page numbers start at 1.
    #[error("page must be at least 1, got {0}")]
    InvalidPage(u32),

    /// The page size is zero or above the configured maximum.
    #[error("per_page must be between 1 and {max}, got {value}")]
    InvalidPerPage {
        /// Requested page size.
        value: u32,
        /// Largest accepted page size.
        max: u32,
    },
}

impl Classify for PageRequestError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

impl PageRequest {
    /// Page returned when the caller does not name one.
    pub const DEFAULT_PAGE: u32 = 1;
    /// Page size used when the caller does not name one.
    pub const DEFAULT_PER_PAGE: u32 = 10;
    /// Largest page size accepted by [`PageRequest::new`].
    pub const MAX_PER_PAGE: u32 = 100;

    /// Creates a page request bounded by [`Self::MAX_PER_PAGE`].
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] when `page` is zero or `per_page` is out
    /// of range.
    pub const fn new(page: u32, per_page: u32) -> Result<Self, PageRequestError> {
        Self::bounded(page, per_page, Self::MAX_PER_PAGE)
    }

    /// Creates a page request with an explicit page-size ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] when `page` is zero or `per_page` is not
    /// in `1..=max_per_page`.
    pub const fn bounded(
        page: u32,
        per_page: u32,
        max_per_page: u32,
    ) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::InvalidPage(page));
        }
        if per_page == 0 || per_page > max_per_page {
            return Err(PageRequestError::InvalidPerPage {
                value: per_page,
                max: max_per_page,
            });
        }
        Ok(Self { page, per_page })
    }

    /// Returns the 1-based page number.
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn per_page(self) -> u32 {
        self.per_page
    }

    /// Number of rows skipped before this page.
    #[must_use]
    pub fn offset(self) -> u64 {
        (u64::from(self.page) - 1) * u64::from(self.per_page)
    }

    /// Returns the rows of `items` that fall inside this page.
    ///
    /// Pages past the end yield an empty vector.
    #[must_use]
    pub fn slice<T: Clone>(self, items: &[T]) -> Vec<T> {
        let skip = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(self.per_page).unwrap_or(usize::MAX);
        items.iter().skip(skip).take(take).cloned().collect()
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            per_page: Self::DEFAULT_PER_PAGE,
        }
    }
}

/// One page of results plus the total number of matching rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Rows on this page.
    pub items: Vec<T>,
    /// Total rows across all pages.
    pub total: u64,
}

impl<T> Page<T> {
    /// Creates a page from its rows and the overall total.
    #[must_use]
    pub const fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    /// Creates an empty page.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    /// Converts each row while keeping the total.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}
