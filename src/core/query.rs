//! # Query Context
//!
//! Describes one fetch: which remote operation, the term that produced it,
//! and where its pagination cursor sits.
//!
//! ```text
//! Name { term, page }          page   is 1-based
//! Id { id }                    no cursor
//! IdentityNumber { number }    no cursor (kind Id)
//! Relations { id, offset }     offset is 0-based
//! History { page }             page   is 1-based
//! ```
//!
//! Stepping below the floor clamps: page 1 stays page 1, offset 0 stays
//! offset 0. The same fetch is re-issued at the floor value.

/// The four query kinds the session routes completions by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Name,
    Id,
    Relations,
    History,
}

/// Pagination direction: `n` is Next, `p` is Previous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

pub const FIRST_PAGE: u32 = 1;
pub const FIRST_OFFSET: u32 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryContext {
    Name { term: String, page: u32 },
    Id { id: i64 },
    IdentityNumber { number: String },
    Relations { id: i64, offset: u32 },
    History { page: u32 },
}

impl QueryContext {
    pub fn name(term: impl Into<String>) -> Self {
        QueryContext::Name {
            term: term.into(),
            page: FIRST_PAGE,
        }
    }

    pub fn history() -> Self {
        QueryContext::History { page: FIRST_PAGE }
    }

    pub fn relations(id: i64) -> Self {
        QueryContext::Relations {
            id,
            offset: FIRST_OFFSET,
        }
    }

    pub fn kind(&self) -> QueryKind {
        match self {
            QueryContext::Name { .. } => QueryKind::Name,
            QueryContext::Id { .. } | QueryContext::IdentityNumber { .. } => QueryKind::Id,
            QueryContext::Relations { .. } => QueryKind::Relations,
            QueryContext::History { .. } => QueryKind::History,
        }
    }

    /// The search term, rendered as text for ids.
    pub fn term(&self) -> String {
        match self {
            QueryContext::Name { term, .. } => term.clone(),
            QueryContext::IdentityNumber { number } => number.clone(),
            QueryContext::Id { id } | QueryContext::Relations { id, .. } => id.to_string(),
            QueryContext::History { .. } => String::new(),
        }
    }

    pub fn page(&self) -> Option<u32> {
        match self {
            QueryContext::Name { page, .. } | QueryContext::History { page } => Some(*page),
            _ => None,
        }
    }

    pub fn offset(&self) -> Option<u32> {
        match self {
            QueryContext::Relations { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    /// The context for the neighbouring page. The term is kept; only the
    /// cursor moves. Kinds without a cursor are returned unchanged.
    pub fn step(&self, direction: Direction) -> Self {
        match self {
            QueryContext::Name { term, page } => QueryContext::Name {
                term: term.clone(),
                page: move_cursor(*page, direction, FIRST_PAGE),
            },
            QueryContext::History { page } => QueryContext::History {
                page: move_cursor(*page, direction, FIRST_PAGE),
            },
            QueryContext::Relations { id, offset } => QueryContext::Relations {
                id: *id,
                offset: move_cursor(*offset, direction, FIRST_OFFSET),
            },
            other => other.clone(),
        }
    }
}

fn move_cursor(value: u32, direction: Direction, floor: u32) -> u32 {
    match direction {
        Direction::Next => value.saturating_add(1),
        Direction::Previous => value.saturating_sub(1).max(floor),
    }
}
