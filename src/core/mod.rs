//! # Core Navigation Logic
//!
//! The browser's state machine. It knows nothing about terminals; it talks
//! to the dataset only through the `CardStore` trait.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • App (state)          │
//!                    │  • Action / Effect      │
//!                    │  • update() (reducer)   │
//!                    │  • Browser (runtime)    │
//!                    └───────────┬─────────────┘
//!                                │
//!                ┌───────────────┴───────────────┐
//!                ▼                               ▼
//!         ┌────────────┐                  ┌────────────┐
//!         │    TUI     │                  │   Store    │
//!         │  Adapter   │                  │  (SQLite)  │
//!         │ (ratatui)  │                  │            │
//!         └────────────┘                  └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`card`]: Card, Link and DisplayNumber types
//! - [`links`]: See-also label cleanup and quick-select numbering
//! - [`state`]: The `App` struct and paging arithmetic
//! - [`action`]: `Action`, `Effect` and the pure `update()` reducer
//! - [`runtime`]: `Browser`, which owns the store and runs effects
//! - [`config`]: Settings resolution

pub mod action;
pub mod card;
pub mod config;
pub mod links;
pub mod runtime;
pub mod state;
