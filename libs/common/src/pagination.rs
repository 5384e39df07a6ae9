//! Pagination and sorting helpers
//!
//! Raw query parameters are sanitized here before they reach a repository.
//! Page sizes are clamped rather than rejected, unknown sort fields fall back
//! to the first allowed field, and unknown directions fall back to ascending.

use serde::Serialize;

/// Page size used when the caller does not ask for one
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Smallest page size handed to a repository
pub const MIN_PAGE_SIZE: u32 = 1;
/// Largest page size handed to a repository
pub const MAX_PAGE_SIZE: u32 = 100;
/// Sort field used when the allow-list is empty
pub const DEFAULT_SORT_FIELD: &str = "id";

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse `asc`/`desc` in any case; anything else is ascending
    pub fn from_param(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    /// SQL keyword for this direction
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Clamp a requested page size into `[MIN_PAGE_SIZE, MAX_PAGE_SIZE]`
pub fn validate_size(size: i64) -> u32 {
    size.clamp(MIN_PAGE_SIZE as i64, MAX_PAGE_SIZE as i64) as u32
}

/// Zero-based page index; negative values become the first page
pub fn validate_page(page: i64) -> u32 {
    page.clamp(0, u32::MAX as i64) as u32
}

/// Keep `sort_by` if it is allowed, otherwise use the first allowed field
pub fn validate_sort_by<'a>(sort_by: &str, allowed: &[&'a str]) -> &'a str {
    let sort_by = sort_by.trim();
    allowed
        .iter()
        .copied()
        .find(|field| *field == sort_by)
        .or_else(|| allowed.first().copied())
        .unwrap_or(DEFAULT_SORT_FIELD)
}

/// Alias for [`SortDirection::from_param`]
pub fn validate_direction(direction: &str) -> SortDirection {
    SortDirection::from_param(direction)
}

/// A sanitized page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index
    pub page: u32,
    pub size: u32,
    pub sort_by: String,
    pub direction: SortDirection,
}

impl PageRequest {
    /// Build a page request from optional raw parameters
    pub fn from_params(
        page: Option<i64>,
        size: Option<i64>,
        sort_by: Option<&str>,
        direction: Option<&str>,
        allowed_sort_fields: &[&str],
    ) -> Self {
        Self {
            page: validate_page(page.unwrap_or(0)),
            size: size.map(validate_size).unwrap_or(DEFAULT_PAGE_SIZE),
            sort_by: validate_sort_by(sort_by.unwrap_or(DEFAULT_SORT_FIELD), allowed_sort_fields)
                .to_string(),
            direction: direction.map(validate_direction).unwrap_or_default(),
        }
    }

    /// Number of rows to skip
    pub fn offset(&self) -> i64 {
        self.page as i64 * self.size as i64
    }

    pub fn limit(&self) -> i64 {
        self.size as i64
    }
}

/// Page envelope returned by list endpoints
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_pages: u32,
    pub total_elements: i64,
    pub size: u32,
    pub number: u32,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> Page<T> {
    /// Wrap one page of rows together with the total row count
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: i64) -> Self {
        let size = request.size.max(MIN_PAGE_SIZE);
        let total = total_elements.max(0) as u64;
        let total_pages = total.div_ceil(size as u64).min(u32::MAX as u64) as u32;

        Self {
            number_of_elements: content.len(),
            empty: content.is_empty(),
            content,
            total_pages,
            total_elements,
            size,
            number: request.page,
            first: request.page == 0,
            last: request.page as u64 + 1 >= total_pages as u64,
        }
    }

    /// Convert the content while keeping the page metadata
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_pages: self.total_pages,
            total_elements: self.total_elements,
            size: self.size,
            number: self.number,
            number_of_elements: self.number_of_elements,
            first: self.first,
            last: self.last,
            empty: self.empty,
        }
    }
}
