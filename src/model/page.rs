//! Pagination for list queries.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// A 1-based page request. Out-of-range values are normalized, never
/// rejected: `page < 1` becomes 1 and a size of 0 or above
/// [`MAX_PAGE_SIZE`] becomes [`DEFAULT_PAGE_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }.normalized()
    }

    pub fn normalized(self) -> Self {
        Self {
            page: self.page.max(1),
            size: if self.size == 0 || self.size > MAX_PAGE_SIZE {
                DEFAULT_PAGE_SIZE
            } else {
                self.size
            },
        }
    }

    /// Cuts one page out of `items`, counting the total on the way.
    pub fn slice<T>(self, items: impl Iterator<Item = T>) -> Page<T> {
        let request = self.normalized();
        let offset = (request.page as usize - 1) * request.size as usize;
        let mut total = 0;
        let mut page = Vec::new();
        for (index, item) in items.enumerate() {
            if index >= offset && page.len() < request.size as usize {
                page.push(item);
            }
            total += 1;
        }
        Page {
            items: page,
            page: request.page,
            size: request.size,
            total,
        }
    }
}

/// One page of a list result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub size: u32,
    /// Number of matching items across all pages.
    pub total: u64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_requests_are_normalized() {
        assert_eq!(PageRequest::new(0, 0), PageRequest { page: 1, size: 20 });
        assert_eq!(PageRequest::new(3, 101), PageRequest { page: 3, size: 20 });
        assert_eq!(PageRequest::new(2, 100), PageRequest { page: 2, size: 100 });
    }

    #[test]
    fn test_slice_reports_total() {
        let page = PageRequest { page: 2, size: 3 }.slice(1..=8);
        assert_eq!(page.items, vec![4, 5, 6]);
        assert_eq!(page.total, 8);

        let past_end = PageRequest { page: 5, size: 3 }.slice(1..=8);
        assert!(past_end.items.is_empty());
        assert_eq!(past_end.total, 8);
    }
}
