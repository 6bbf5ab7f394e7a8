//! Pagination for list endpoints.
//!
//! 1-based page plus page size; out-of-range pages yield an empty page,
//! never an error.

use serde::Deserialize;

/// Pagination parameters as they arrive from the query string.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Pagination {
    /// 1-based page index
    #[serde(default = "default_page")]
    pub page: u32,
    /// items per page
    #[serde(default = "default_limit", alias = "per_page")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

impl Pagination {
    /// Clamp to sane bounds: page 0 becomes 1, limit is capped at 100.
    pub fn normalize(self) -> (usize, usize) {
        let page = if self.page == 0 { 1 } else { self.page };
        let limit = self.limit.clamp(1, 100);
        ((page - 1) as usize, limit as usize)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: default_page(), limit: default_limit() }
    }
}

/// The slice `[(page-1)*limit, page*limit)` of `items`.
pub fn page_slice<T: Clone>(items: &[T], p: Pagination) -> Vec<T> {
    let (page_idx, limit) = p.normalize();
    let start = page_idx.saturating_mul(limit);
    if start >= items.len() {
        return Vec::new();
    }
    let end = (start + limit).min(items.len());
    items[start..end].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_clamps_zero_and_upper_bound() {
        let (idx, limit) = Pagination { page: 0, limit: 0 }.normalize();
        assert_eq!((idx, limit), (0, 1));

        let (idx, limit) = Pagination { page: 5, limit: 1000 }.normalize();
        assert_eq!((idx, limit), (4, 100));
    }

    #[test]
    fn first_page_of_a_small_collection_is_the_whole_collection() {
        let items = vec![1, 2, 3];
        assert_eq!(page_slice(&items, Pagination { page: 1, limit: 10 }), vec![1, 2, 3]);
    }

    #[test]
    fn out_of_range_page_is_empty_not_an_error() {
        let items = vec![1, 2, 3];
        assert!(page_slice(&items, Pagination { page: 2, limit: 10 }).is_empty());
        assert!(page_slice(&items, Pagination { page: 99, limit: 10 }).is_empty());
    }

    #[test]
    fn pages_partition_the_sequence() {
        let items: Vec<_> = (1..=7).collect();
        assert_eq!(page_slice(&items, Pagination { page: 1, limit: 3 }), vec![1, 2, 3]);
        assert_eq!(page_slice(&items, Pagination { page: 2, limit: 3 }), vec![4, 5, 6]);
        assert_eq!(page_slice(&items, Pagination { page: 3, limit: 3 }), vec![7]);
    }
}
