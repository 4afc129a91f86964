//! Pagination types for list operations.

use serde::{Deserialize, Serialize};

/// Default page size.
const DEFAULT_PAGE_SIZE: u64 = 25;
/// Maximum page size.
const MAX_PAGE_SIZE: u64 = 100;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Number of items per page.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl PageRequest {
    /// Create a new page request.
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Calculate the SQL `OFFSET` value.
    ///
    /// Normalized here rather than at construction, because deserialized
    /// requests bypass [`PageRequest::new`]. Capped so the value always
    /// fits a Postgres bigint.
    pub fn offset(&self) -> u64 {
        self.page
            .max(1)
            .saturating_sub(1)
            .saturating_mul(self.limit())
            .min(i64::MAX as u64)
    }

    /// Return the SQL `LIMIT` value, clamped to the page-size bounds.
    pub fn limit(&self) -> u64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
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

/// Paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T: Serialize> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Current page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub page_size: u64,
    /// Total number of items across all pages.
    pub total_items: u64,
}

impl<T: Serialize> PageResponse<T> {
    /// Create a new paginated response.
    pub fn new(items: Vec<T>, page: u64, page_size: u64, total_items: u64) -> Self {
        Self {
            items,
            page,
            page_size,
            total_items,
        }
    }
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(PageRequest::new(1, 25).offset(), 0);
        assert_eq!(PageRequest::new(3, 10).offset(), 20);
    }

    #[test]
    fn page_size_is_clamped() {
        assert_eq!(PageRequest::new(1, 10_000).page_size, 100);
        assert_eq!(PageRequest::new(0, 0).page, 1);
    }

    #[test]
    fn wire_values_are_normalized_without_the_constructor() {
        // Field construction stands in for serde, which fills the fields
        // directly and skips `new`.
        let oversized = PageRequest {
            page: 1,
            page_size: u64::MAX,
        };
        assert_eq!(oversized.limit(), 100);
        assert_eq!(oversized.offset(), 0);

        let huge_page = PageRequest {
            page: u64::MAX,
            page_size: 25,
        };
        assert!(huge_page.offset() <= i64::MAX as u64);

        let zeroes = PageRequest {
            page: 0,
            page_size: 0,
        };
        assert_eq!(zeroes.limit(), 1);
        assert_eq!(zeroes.offset(), 0);
    }
}
