//! 分页计算
//!
//! 页码从 1 开始

use std::ops::{Range, RangeInclusive};

/// 页码窗口最多显示的按钮数
pub const WINDOW_SIZE: usize = 5;

/// 总页数 = ceil(count / page_size)
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// 将页码限制在 [1, total_pages]；没有记录时为 1
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// 当前页在集合中的下标范围 [(page-1)*size, min(page*size, count))
pub fn page_bounds(page: usize, page_size: usize, count: usize) -> Range<usize> {
    let start = page.saturating_sub(1).saturating_mul(page_size).min(count);
    let end = start.saturating_add(page_size).min(count);
    start..end
}

/// 页码窗口：起点 max(1, current-2)，终点 min(total, start+4)
pub fn page_window(current: usize, total_pages: usize) -> RangeInclusive<usize> {
    let start = current.saturating_sub(2).max(1);
    let end = total_pages.min(start + WINDOW_SIZE - 1);
    start..=end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(120, 10), 12);
    }

    #[test]
    fn test_page_bounds() {
        assert_eq!(page_bounds(1, 10, 25), 0..10);
        assert_eq!(page_bounds(2, 10, 25), 10..20);
        assert_eq!(page_bounds(3, 10, 25), 20..25);
        // 越界页码得到空切片而不是 panic
        assert_eq!(page_bounds(4, 10, 25), 25..25);
    }

    #[test]
    fn test_page_window() {
        assert_eq!(page_window(1, 10), 1..=5);
        assert_eq!(page_window(2, 10), 1..=5);
        assert_eq!(page_window(8, 10), 6..=10);
        assert_eq!(page_window(10, 10), 8..=10);
        assert_eq!(page_window(2, 3), 1..=3);
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(9, 3), 3);
        assert_eq!(clamp_page(4, 0), 1);
    }
}
