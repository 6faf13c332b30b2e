//! # Core Application Logic
//!
//! This module contains the session's business logic.
//! It knows nothing about any specific UI technology or transport.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • App (session model)  │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No terminal. No HTTP.  │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │ Scheduler  │      │ Credential │
//!     │  Adapter   │      │ (tokio +   │      │   store    │
//!     │ (ratatui)  │      │  reqwest)  │      │   (json)   │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all session state in one place
//! - [`action`]: The `Action` enum and the `update()` transition function
//! - [`query`]: `QueryContext`: what a fetch asks for and its page cursor
//! - [`input`]: bounded single-line text buffers
//! - [`config`]: config file loading and resolution
//! - [`credentials`]: token persistence

pub mod action;
pub mod config;
pub mod credentials;
pub mod input;
pub mod query;
pub mod state;
