// src/request/pagination.rs

/// Page-size/page-number pair selecting one response page.
///
/// Positivity and range checks happen upstream, where raw request parameters
/// are parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaginationParameters {
    pub per_page: u64,
    pub page: u64,
}

impl PaginationParameters {
    pub fn new(per_page: u64, page: u64) -> Self {
        Self { per_page, page }
    }

    /// Offset of the first row of this page.
    pub fn row_offset(&self) -> u64 {
        self.per_page * self.page.saturating_sub(1)
    }
}
