//! # Trace Service API
//!
//! The remote person-lookup service: wire types, the [`TraceService`]
//! trait the rest of the crate programs against, and its HTTP
//! implementation.

pub mod client;
pub mod service;
pub mod types;

pub use client::HttpTraceService;
pub use service::{ApiError, TraceService};
pub use types::{Account, HistoryEntry, NameRecord, PersonRecord, Relation, Subscription};
