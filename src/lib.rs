//! # theater-workbench
//!
//! Back-office core for a theater's reservation workbench.
//!
//! The crate classifies option holds (temporary reservations that lapse
//! at a deadline), serves the built-in tag catalog, filters reservation
//! lists, and computes the dashboard's statistics and focus items. All
//! domain logic is synchronous and takes the current time explicitly;
//! the HTTP layer reads it from an injected [`domain::Clock`].
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── WorkbenchService (service/)
//!     │       Clock + ConfigProvider + TagCatalog
//!     │
//!     └── Domain (domain/)
//!             option_lifecycle, option_report, query_engine,
//!             tag_catalog, tagging, reservation
//! ```
//!
//! Reservations are passed in with each request; persistence belongs to
//! the caller.

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
