//! Page/limit normalisation and pagination metadata shared by every list endpoint.

use serde::Serialize;

/// Requests never get more than this many items per page.
pub const MAX_LIMIT: u32 = 100;

/// A clamped page request: `page >= 1`, `1 <= limit <= MAX_LIMIT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: page.clamp(1, u32::MAX as i64) as u32,
            limit: limit.clamp(1, MAX_LIMIT as i64) as u32,
        }
    }

    pub fn first(limit: u32) -> Self {
        Self::new(1, limit as i64)
    }

    pub fn page(&self) -> u32 { self.page }
    pub fn limit(&self) -> u32 { self.limit }

    pub fn offset(&self) -> usize {
        (self.page as usize - 1).saturating_mul(self.limit as usize)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub current_page: u32,
    pub total_pages: usize,
    pub total_items: usize,
    pub items_per_page: u32,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PaginationInfo {
    pub fn new(total_items: usize, request: PageRequest) -> Self {
        let total_pages = total_items.div_ceil(request.limit as usize);
        Self {
            current_page: request.page,
            total_pages,
            total_items,
            items_per_page: request.limit,
            has_next_page: (request.page as usize) < total_pages,
            has_previous_page: request.page > 1,
        }
    }
}

/// One page of results plus metadata computed from the full, unpaginated set.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: PaginationInfo,
}

pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let pagination = PaginationInfo::new(items.len(), request);
    let items = items.into_iter().skip(request.offset()).take(request.limit as usize).collect();
    Page { items, pagination }
}
