//! Offset arithmetic behind cursor pagination.
//!
//! A cursor wraps the offset of the edge it was handed out for. Paging after
//! (or before) a cursor continues at the following offset.

use super::args::*;
use crate::relay::Cursor;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageFlags {
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

/// Store offset to fetch from. Absent without a cursor or for negative offsets.
pub fn fetch_offset(cursor: Option<&Cursor>) -> Option<u64> {
    cursor
        .filter(|cursor| cursor.index >= 0)
        .map(|cursor| (cursor.index as u64).saturating_add(1))
}

/// Offset of the first edge of the page.
pub fn start_index(cursor: Option<&Cursor>) -> i64 {
    cursor
        .map(|cursor| cursor.index.saturating_add(1))
        .unwrap_or(0)
}

/// Page flags for a page of `page_size` starting after `cursor`, out of
/// `total` matching records. Both flags are `false` without a page size.
///
/// For backward pages the flags are swapped.
pub fn page_flags(
    cursor: Option<&Cursor>,
    page_size: Option<PageSize>,
    total: u64,
) -> PageFlags {
    let Some(PageSize { size, backward }) = page_size else {
        return PageFlags::default();
    };
    let index = i128::from(start_index(cursor));
    let size = i128::from(size);
    let has_next_page = index + 1 + size <= i128::from(total);
    let has_previous_page = index - size >= 0;
    if backward {
        PageFlags {
            has_next_page: has_previous_page,
            has_previous_page: has_next_page,
        }
    } else {
        PageFlags {
            has_next_page,
            has_previous_page,
        }
    }
}
