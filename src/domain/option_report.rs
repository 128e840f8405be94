//! Option summary report and the expired-option cancellation plan.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::option_lifecycle::{self, is_expired};
use super::reservation::Reservation;

/// Aggregate view of the options still holding capacity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptionReport {
    /// Options with an expiry that has not been reached.
    pub total_active: usize,
    /// Active options expiring within the report window.
    pub expiring_soon: usize,
    /// Active options the admin already followed up.
    pub followed_up: usize,
    /// Active options nobody followed up yet.
    pub not_followed_up: usize,
    /// Earliest placement time among active options.
    pub oldest_option_placed_at: Option<DateTime<Utc>>,
    /// Guests held by active options.
    pub capacity_reserved: u64,
}

/// One option that must be cancelled because its expiry passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlannedCancellation {
    /// Reservation id.
    pub id: String,
    /// Contact person.
    pub customer_name: String,
    /// Event date, when known.
    pub event_date: Option<DateTime<Utc>>,
    /// Party size.
    pub number_of_persons: u32,
    /// Expiry that was reached.
    pub expired_at: DateTime<Utc>,
}

/// Cancellations to carry out. Nothing is written here; the caller owns
/// the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpirySweepPlan {
    /// Option holds inspected.
    pub processed: usize,
    /// Options to cancel, in input order.
    pub cancellations: Vec<PlannedCancellation>,
}

impl ExpirySweepPlan {
    /// Ids of the options to cancel.
    #[must_use]
    pub fn option_ids(&self) -> Vec<&str> {
        self.cancellations.iter().map(|c| c.id.as_str()).collect()
    }
}

fn active_with_expiry(
    reservations: &[Reservation],
    now: DateTime<Utc>,
) -> impl Iterator<Item = &Reservation> {
    reservations
        .iter()
        .filter(move |r| r.option_expiry().is_some() && !is_expired(r, now))
}

/// Builds the option report. Options without an expiry are left out.
#[must_use]
pub fn option_report(
    reservations: &[Reservation],
    now: DateTime<Utc>,
    report_window_days: u32,
) -> OptionReport {
    let active: Vec<&Reservation> = active_with_expiry(reservations, now).collect();
    let followed_up = active.iter().filter(|r| r.option_followed_up).count();
    OptionReport {
        total_active: active.len(),
        expiring_soon: active
            .iter()
            .filter(|r| option_lifecycle::is_expiring_soon(r, report_window_days, now))
            .count(),
        followed_up,
        not_followed_up: active.len() - followed_up,
        oldest_option_placed_at: active.iter().filter_map(|r| r.option_placed_at).min(),
        capacity_reserved: active.iter().map(|r| u64::from(r.number_of_persons)).sum(),
    }
}

/// Lists every option hold whose expiry has been reached.
#[must_use]
pub fn plan_expired_cancellations(
    reservations: &[Reservation],
    now: DateTime<Utc>,
) -> ExpirySweepPlan {
    let cancellations = reservations
        .iter()
        .filter_map(|r| {
            let expired_at = r.option_expiry().filter(|expiry| now >= *expiry)?;
            Some(PlannedCancellation {
                id: r.id.clone(),
                customer_name: r.contact_person.clone(),
                event_date: r.event_date,
                number_of_persons: r.number_of_persons,
                expired_at,
            })
        })
        .collect();
    ExpirySweepPlan {
        processed: reservations.iter().filter(|r| r.is_option()).count(),
        cancellations,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::reservation::ReservationStatus;
    use chrono::{TimeDelta, TimeZone};

    fn now() -> DateTime<Utc> {
        let Some(ts) = Utc.with_ymd_and_hms(2025, 10, 15, 10, 0, 0).single() else {
            panic!("valid timestamp");
        };
        ts
    }

    fn option(id: &str, expires_in_hours: Option<i64>, persons: u32) -> Reservation {
        let mut r = Reservation::new(id, "EVT", ReservationStatus::OptionHold, now());
        r.contact_person = format!("Klant {id}");
        r.number_of_persons = persons;
        r.option_placed_at = Some(now() - TimeDelta::days(5));
        r.option_expires_at = expires_in_hours.map(|h| now() + TimeDelta::hours(h));
        r
    }

    #[test]
    fn report_counts_active_options() {
        let mut followed = option("A", Some(24), 10);
        followed.option_followed_up = true;
        followed.option_placed_at = Some(now() - TimeDelta::days(9));
        let data = vec![
            followed,
            option("B", Some(100), 4),
            option("C", Some(-1), 8),
            option("D", None, 20),
            {
                let mut r = option("E", Some(24), 50);
                r.status = ReservationStatus::Confirmed;
                r
            },
        ];
        let report = option_report(&data, now(), 3);
        assert_eq!(report.total_active, 2);
        assert_eq!(report.expiring_soon, 1);
        assert_eq!(report.followed_up, 1);
        assert_eq!(report.not_followed_up, 1);
        assert_eq!(report.capacity_reserved, 14);
        assert_eq!(
            report.oldest_option_placed_at,
            Some(now() - TimeDelta::days(9))
        );
    }

    #[test]
    fn empty_report() {
        assert_eq!(option_report(&[], now(), 3), OptionReport::default());
    }

    #[test]
    fn sweep_plans_only_reached_expiries() {
        let mut at_now = option("B", Some(0), 2);
        at_now.event_date = Some(now() + TimeDelta::days(30));
        let data = vec![
            option("A", Some(-48), 6),
            at_now,
            option("C", Some(1), 3),
            option("D", None, 3),
        ];
        let plan = plan_expired_cancellations(&data, now());
        assert_eq!(plan.processed, 4);
        assert_eq!(plan.option_ids(), vec!["A", "B"]);
        let Some(second) = plan.cancellations.get(1) else {
            panic!("two cancellations expected");
        };
        assert_eq!(second.customer_name, "Klant B");
        assert_eq!(second.expired_at, now());
        assert_eq!(second.event_date, Some(now() + TimeDelta::days(30)));
    }

    #[test]
    fn sweep_ignores_other_statuses() {
        let mut cancelled = option("X", Some(-10), 2);
        cancelled.status = ReservationStatus::Cancelled;
        let plan = plan_expired_cancellations(&[cancelled], now());
        assert_eq!(plan.processed, 0);
        assert!(plan.cancellations.is_empty());
    }
}
