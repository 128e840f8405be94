//! Service layer: workbench orchestration.
//!
//! [`WorkbenchService`] reads the injected clock and configuration and
//! delegates to the pure functions in [`super::domain`].

pub mod workbench_service;

pub use workbench_service::WorkbenchService;
