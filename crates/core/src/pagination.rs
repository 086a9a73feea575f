//! Pagination clamps shared by list endpoints.

/// Default page size when the client sends none.
pub const DEFAULT_LIMIT: i64 = 10;

/// Upper bound on page size.
pub const MAX_LIMIT: i64 = 100;

/// Clamp a 1-based page number: anything below 1 becomes 1.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Clamp a page size into `[1, MAX_LIMIT]`, defaulting to [`DEFAULT_LIMIT`].
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    match limit {
        Some(l) if l >= 1 && l <= MAX_LIMIT => l,
        Some(_) => DEFAULT_LIMIT,
        None => DEFAULT_LIMIT,
    }
}

/// Offset for a clamped (page, limit) pair.
pub fn offset(page: i64, limit: i64) -> i64 {
    (page - 1) * limit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults_to_one() {
        assert_eq!(clamp_page(None), 1);
        assert_eq!(clamp_page(Some(0)), 1);
        assert_eq!(clamp_page(Some(-3)), 1);
        assert_eq!(clamp_page(Some(7)), 7);
    }

    #[test]
    fn limit_defaults_and_bounds() {
        assert_eq!(clamp_limit(None), DEFAULT_LIMIT);
        assert_eq!(clamp_limit(Some(0)), DEFAULT_LIMIT);
        assert_eq!(clamp_limit(Some(MAX_LIMIT + 1)), DEFAULT_LIMIT);
        assert_eq!(clamp_limit(Some(25)), 25);
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(offset(1, 10), 0);
        assert_eq!(offset(3, 10), 20);
    }
}
