//! Option-hold lifecycle: expiry arithmetic and classification.
//!
//! An option is a reservation with status `option` that holds capacity until
//! `optionExpiresAt`. Everything here is a pure function of the reservation
//! and an explicit `now`. Reservations that are not option holds, or that
//! have no expiry, are never an error: they classify as "not applicable".
//!
//! Boundary rule: an option whose expiry equals `now` is expired. The
//! expiring-soon window is the half-open interval `(now, now + window]`, so
//! every option with an expiry is in exactly one of active, expiring soon,
//! or expired.

use chrono::{DateTime, Days, TimeDelta, TimeZone, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::reservation::Reservation;
use crate::error::WorkbenchError;

/// Default option validity in days.
pub const DEFAULT_OPTION_DAYS: i64 = 7;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Classification of an option hold relative to `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum OptionState {
    /// Expiry is further away than the expiring-soon window, or unset.
    Active,
    /// Expiry falls within the expiring-soon window.
    ExpiringSoon,
    /// Expiry has been reached.
    Expired,
}

/// Rounds a time span up to whole days. Negative spans round toward zero,
/// so one hour overdue is day `0` and 25 hours overdue is day `-1`.
#[must_use]
pub fn ceil_days(span: TimeDelta) -> i64 {
    let ms = span.num_milliseconds();
    ms.div_euclid(DAY_MS) + i64::from(ms.rem_euclid(DAY_MS) != 0)
}

/// Rounds a time span down to whole days.
#[must_use]
pub fn floor_days(span: TimeDelta) -> i64 {
    span.num_milliseconds().div_euclid(DAY_MS)
}

fn shift_calendar_days<Tz: TimeZone>(
    ts: &DateTime<Tz>,
    days: i64,
) -> Result<DateTime<Tz>, WorkbenchError> {
    let step = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        ts.clone().checked_add_days(step)
    } else {
        ts.clone().checked_sub_days(step)
    };
    // A shifted wall-clock time can fall into a DST gap; use elapsed days then.
    shifted
        .or_else(|| {
            TimeDelta::try_days(days).and_then(|delta| ts.clone().checked_add_signed(delta))
        })
        .ok_or_else(|| {
            WorkbenchError::DateOutOfRange(format!("{} shifted by {days} days", ts.naive_utc()))
        })
}

/// Expiry date of an option placed at `placed_at` that is valid for `days`
/// calendar days. Time of day is preserved and month/year rollover is
/// normalized.
///
/// # Errors
///
/// Returns [`WorkbenchError::DateOutOfRange`] when the result is not
/// representable.
pub fn calculate_expiry_date<Tz: TimeZone>(
    placed_at: &DateTime<Tz>,
    days: i64,
) -> Result<DateTime<Tz>, WorkbenchError> {
    shift_calendar_days(placed_at, days)
}

/// Moves an existing expiry by `extra_days` calendar days. Negative values
/// shorten the hold.
///
/// # Errors
///
/// Returns [`WorkbenchError::DateOutOfRange`] when the result is not
/// representable.
pub fn extend_expiry_date<Tz: TimeZone>(
    current: &DateTime<Tz>,
    extra_days: i64,
) -> Result<DateTime<Tz>, WorkbenchError> {
    shift_calendar_days(current, extra_days)
}

fn window_end(now: DateTime<Utc>, window_days: u32) -> DateTime<Utc> {
    TimeDelta::try_days(i64::from(window_days))
        .and_then(|delta| now.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// `true` when `reservation` is an option hold whose expiry is at or before
/// `now`.
#[must_use]
pub fn is_expired(reservation: &Reservation, now: DateTime<Utc>) -> bool {
    reservation
        .option_expiry()
        .is_some_and(|expiry| now >= expiry)
}

/// `true` when `reservation` is an option hold expiring within
/// `(now, now + window_days]`.
#[must_use]
pub fn is_expiring_soon(reservation: &Reservation, window_days: u32, now: DateTime<Utc>) -> bool {
    reservation
        .option_expiry()
        .is_some_and(|expiry| now < expiry && expiry <= window_end(now, window_days))
}

/// Whole days until the option lapses, rounded up. Negative values count
/// days overdue. `None` for reservations that are not option holds or have
/// no expiry.
#[must_use]
pub fn days_until_expiry(reservation: &Reservation, now: DateTime<Utc>) -> Option<i64> {
    reservation
        .option_expiry()
        .map(|expiry| ceil_days(expiry - now))
}

/// Classifies an option hold. `None` for any other status.
#[must_use]
pub fn classify(
    reservation: &Reservation,
    now: DateTime<Utc>,
    window_days: u32,
) -> Option<OptionState> {
    if !reservation.is_option() {
        return None;
    }
    if is_expired(reservation, now) {
        Some(OptionState::Expired)
    } else if is_expiring_soon(reservation, window_days, now) {
        Some(OptionState::ExpiringSoon)
    } else {
        Some(OptionState::Active)
    }
}

/// Dutch status label shown next to an option in the workbench. Empty for
/// reservations that are not option holds.
#[must_use]
pub fn status_label(reservation: &Reservation, now: DateTime<Utc>, window_days: u32) -> String {
    let Some(state) = classify(reservation, now, window_days) else {
        return String::new();
    };
    let days = days_until_expiry(reservation, now);
    match (state, days) {
        (OptionState::Expired, _) => "VERLOPEN".to_string(),
        (OptionState::ExpiringSoon, Some(1)) => "Verloopt morgen".to_string(),
        (OptionState::ExpiringSoon, Some(n)) => format!("Verloopt over {n} dagen"),
        (OptionState::Active, Some(1)) => "Nog 1 dag".to_string(),
        (OptionState::Active, Some(n)) => format!("Nog {n} dagen"),
        (_, None) => "Optie actief".to_string(),
    }
}

/// Options that are expired or expiring soon and have not been followed up.
#[must_use]
pub fn filter_requiring_action(
    reservations: &[Reservation],
    now: DateTime<Utc>,
    window_days: u32,
) -> Vec<&Reservation> {
    reservations
        .iter()
        .filter(|r| !r.option_followed_up)
        .filter(|r| {
            matches!(
                classify(r, now, window_days),
                Some(OptionState::Expired | OptionState::ExpiringSoon)
            )
        })
        .collect()
}

/// Option holds that have not expired, including those without an expiry.
#[must_use]
pub fn filter_active(reservations: &[Reservation], now: DateTime<Utc>) -> Vec<&Reservation> {
    reservations
        .iter()
        .filter(|r| r.is_option() && !is_expired(r, now))
        .collect()
}

/// Option holds that have expired.
#[must_use]
pub fn filter_expired(reservations: &[Reservation], now: DateTime<Utc>) -> Vec<&Reservation> {
    reservations.iter().filter(|r| is_expired(r, now)).collect()
}

/// Orders reservations by option expiry, earliest first. Entries that are
/// not option holds or lack an expiry go last, keeping their input order.
#[must_use]
pub fn sort_by_expiry(mut reservations: Vec<&Reservation>) -> Vec<&Reservation> {
    reservations.sort_by_key(|r| {
        let expiry = r.option_expiry();
        (expiry.is_none(), expiry)
    });
    reservations
}
