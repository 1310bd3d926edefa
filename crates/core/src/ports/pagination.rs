//! Cursor pagination for connection queries.
//!
//! These types implement Relay-style cursor pagination. Client arguments
//! are first normalized into a closed [`Direction`] so that an illegal
//! combination can never silently fall through to unpaginated behavior,
//! then a fetched [`Page`] is assembled into a [`Connection`].
//!
//! Cursors carry the item's own stable identifier; there is no opaque
//! or encoded cursor scheme.

use crate::error::{PaginationError, PaginationResult};

// =============================================================================
// Client Arguments
// =============================================================================

/// Cursor for pagination.
///
/// The value is always the identifier of the item the cursor points at,
/// but clients should still treat it as opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub value: String,
}

impl Cursor {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// Raw pagination arguments as supplied by the client.
///
/// Supports forward pagination (`first`/`after`) and backward
/// pagination (`last`/`before`). The combination rules are enforced by
/// [`PageArgs::resolve`], not here.
#[derive(Debug, Clone, Default)]
pub struct PageArgs {
    /// Number of items to fetch from the start (forward pagination).
    pub first: Option<u32>,
    /// Cursor to start after (forward pagination).
    pub after: Option<Cursor>,
    /// Number of items to fetch from the end (backward pagination).
    pub last: Option<u32>,
    /// Cursor to end before (backward pagination).
    pub before: Option<Cursor>,
}

impl PageArgs {
    /// Normalize the four optional arguments into a [`Direction`].
    ///
    /// Rules, checked in order, first violation wins:
    ///
    /// 1. `first` and `last` both set -> error
    /// 2. `after` set while `first` is unset -> error
    /// 3. `before` set while `last` is unset -> error
    /// 4. `first` set -> forward
    /// 5. `last` set -> backward
    /// 6. neither set -> full (unpaginated)
    ///
    /// Pure: performs no I/O and never touches a fetcher.
    pub fn resolve(self) -> PaginationResult<Direction> {
        if self.first.is_some() && self.last.is_some() {
            return Err(PaginationError::FirstAndLast);
        }
        if self.after.is_some() && self.first.is_none() {
            return Err(PaginationError::AfterWithoutFirst);
        }
        if self.before.is_some() && self.last.is_none() {
            return Err(PaginationError::BeforeWithoutLast);
        }

        if let Some(limit) = self.first {
            Ok(Direction::Forward {
                limit,
                after: self.after,
            })
        } else if let Some(limit) = self.last {
            Ok(Direction::Backward {
                limit,
                before: self.before,
            })
        } else {
            Ok(Direction::Full)
        }
    }
}

/// Resolved pagination direction consumed by fetchers and the assembler.
///
/// This is the single source of truth for "which way is this query
/// paging"; nothing downstream re-derives it from the raw arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Direction {
    /// Unpaginated full fetch, no limit.
    Full,
    /// Paging from the start using `first`/`after`.
    Forward { limit: u32, after: Option<Cursor> },
    /// Paging from the end using `last`/`before`.
    Backward {
        limit: u32,
        before: Option<Cursor>,
    },
}

// =============================================================================
// Fetched Page
// =============================================================================

/// One ordered page of records as returned by an upstream fetcher.
///
/// Items are always in ascending display order, even for backward
/// fetches: the fetcher performs any reversal needed. Only the flag
/// matching the active direction is meaningful; the other is false by
/// convention and ignored.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Records in display order.
    pub items: Vec<T>,
    /// More items exist after this page (forward fetches only).
    pub has_next: bool,
    /// More items exist before this page (backward fetches only).
    pub has_prev: bool,
}

impl<T> Page<T> {
    /// A page with every item and no further pages in either direction.
    pub fn full(items: Vec<T>) -> Self {
        Self {
            items,
            has_next: false,
            has_prev: false,
        }
    }

    /// Replace the items while keeping the boundary flags.
    pub fn map_items<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            has_next: self.has_next,
            has_prev: self.has_prev,
        }
    }
}

// =============================================================================
// Connection Shape
// =============================================================================

/// A cursor paired with one item in a connection.
#[derive(Debug, Clone)]
pub struct Edge<T> {
    /// The actual item.
    pub node: T,
    /// The item's own identifier, usable to resume paging here.
    pub cursor: Cursor,
}

/// Boundary metadata for a connection.
///
/// `has_next_page` is populated only when the page was fetched forward;
/// `has_previous_page` only when fetched backward. An unpaginated fetch
/// populates neither.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    /// Cursor of the first edge in this page.
    pub start_cursor: Option<Cursor>,
    /// Cursor of the last edge in this page.
    pub end_cursor: Option<Cursor>,
    /// Whether more items exist after this page.
    pub has_next_page: Option<bool>,
    /// Whether more items exist before this page.
    pub has_previous_page: Option<bool>,
}

/// Paginated result set with edges and page info.
#[derive(Debug, Clone)]
pub struct Connection<T> {
    /// List of edges (node + cursor pairs) in display order.
    pub edges: Vec<Edge<T>>,
    /// Information about the current page.
    pub page_info: PageInfo,
    /// Number of items in *this page*. Never a global count.
    pub total_count: i64,
}

// =============================================================================
// Assembly
// =============================================================================

/// Anything that can anchor a cursor.
pub trait Identified {
    /// Stable identifier of this item.
    fn id(&self) -> &str;
}

/// Assemble a fetched page into a connection.
///
/// Input order is preserved; the assembler never re-sorts. The empty
/// page is a fixed case: zero edges, default [`PageInfo`], zero count.
/// This function cannot fail on well-formed input.
pub fn assemble<T: Identified>(direction: &Direction, page: Page<T>) -> Connection<T> {
    if page.items.is_empty() {
        return Connection {
            edges: Vec::new(),
            page_info: PageInfo::default(),
            total_count: 0,
        };
    }

    let edges: Vec<Edge<T>> = page
        .items
        .into_iter()
        .map(|item| Edge {
            cursor: Cursor::new(item.id()),
            node: item,
        })
        .collect();

    let page_info = PageInfo {
        start_cursor: edges.first().map(|e| e.cursor.clone()),
        end_cursor: edges.last().map(|e| e.cursor.clone()),
        has_next_page: match direction {
            Direction::Forward { .. } => Some(page.has_next),
            _ => None,
        },
        has_previous_page: match direction {
            Direction::Backward { .. } => Some(page.has_prev),
            _ => None,
        },
    };

    let total_count = edges.len() as i64;

    Connection {
        edges,
        page_info,
        total_count,
    }
}

/// Assemble a child collection into a nested connection.
///
/// Child collections are never independently paginated, so this is
/// [`assemble`] with the direction fixed to [`Direction::Full`].
pub fn assemble_full<T: Identified>(items: Vec<T>) -> Connection<T> {
    assemble(&Direction::Full, Page::full(items))
}

// =============================================================================
// Tests
// =============================================================================
