//! Data Transfer Objects for REST request/response serialization.
//!
//! Field names are camelCase to match the reservation records the
//! back-office stores.

pub mod option_dto;
pub mod reservation_dto;
pub mod tag_dto;

pub use option_dto::*;
pub use reservation_dto::*;
pub use tag_dto::*;
