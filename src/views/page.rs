use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: i64, page: i64, page_size: i64) -> Self {
        let total_pages = if page_size > 0 {
            (total_count + page_size - 1) / page_size
        } else {
            0
        };

        Self {
            items,
            total_count,
            page,
            page_size,
            total_pages,
        }
    }

    /// Rows to skip for a 1-based `page`; `None` when it does not fit in i64.
    pub fn offset(page: i64, page_size: i64) -> Option<i64> {
        page.saturating_sub(1).max(0).checked_mul(page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(Page::<u8>::new(vec![], 0, 1, 20).total_pages, 0);
        assert_eq!(Page::<u8>::new(vec![], 20, 1, 20).total_pages, 1);
        assert_eq!(Page::<u8>::new(vec![], 21, 1, 20).total_pages, 2);
    }

    #[test]
    fn test_offset() {
        assert_eq!(Page::<u8>::offset(1, 20), Some(0));
        assert_eq!(Page::<u8>::offset(3, 20), Some(40));
    }

    #[test]
    fn test_offset_overflow() {
        assert_eq!(Page::<u8>::offset(i64::MAX, 100), None);
        assert_eq!(Page::<u8>::offset(i64::MIN, 100), Some(0));
    }
}
