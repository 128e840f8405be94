//! Domain layer: reservations, option holds, tags and workbench queries.
//!
//! Everything here is synchronous and takes `now` explicitly. The clock and
//! the booking-rule configuration are injected through the [`Clock`] and
//! [`ConfigProvider`] traits.

pub mod clock;
pub mod option_lifecycle;
pub mod option_report;
pub mod query_engine;
pub mod reservation;
pub mod settings;
pub mod tag_catalog;
pub mod tagging;

pub use clock::{Clock, FixedClock, SystemClock};
pub use option_lifecycle::OptionState;
pub use option_report::{ExpirySweepPlan, OptionReport};
pub use query_engine::{QueryEngine, ReservationQuery};
pub use reservation::{EventSummary, Reservation, ReservationStatus, TagReference};
pub use settings::{ConfigProvider, StaticConfig, Thresholds};
pub use tag_catalog::TagCatalog;
