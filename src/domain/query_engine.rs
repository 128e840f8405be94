//! Filtered reservation views, dashboard statistics and focus items.
//!
//! The engine works on a reservation slice the caller already loaded.
//! Waitlist entries are never part of any output: they have their own
//! screen outside the workbench.

use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::option_lifecycle::{self, floor_days};
use super::reservation::{EventSummary, PaymentStatus, Reservation, ReservationStatus};
use super::settings::Thresholds;

const ALL: &str = "all";

/// Status criterion. Strings that are not a known status match nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatusFilter {
    /// No status restriction.
    #[default]
    All,
    /// Only this status.
    Only(ReservationStatus),
    /// Unknown status string.
    Unrecognized(String),
}

impl StatusFilter {
    /// Whether `status` passes the filter.
    #[must_use]
    pub fn matches(&self, status: ReservationStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
            Self::Unrecognized(_) => false,
        }
    }
}

impl From<String> for StatusFilter {
    fn from(value: String) -> Self {
        if value.is_empty() || value == ALL {
            return Self::All;
        }
        match value.parse() {
            Ok(status) => Self::Only(status),
            Err(_) => Self::Unrecognized(value),
        }
    }
}

impl From<StatusFilter> for String {
    fn from(filter: StatusFilter) -> Self {
        filter.to_string()
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Only(status) => f.write_str(status.as_str()),
            Self::Unrecognized(raw) => f.write_str(raw),
        }
    }
}

/// Payment criterion. Strings that are not a known value match nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentFilter {
    /// No payment restriction.
    #[default]
    All,
    /// Paid reservations.
    Paid,
    /// Reservations awaiting payment.
    Pending,
    /// Awaiting payment past the due date.
    Overdue,
    /// Unknown payment filter string.
    Unrecognized(String),
}

impl PaymentFilter {
    /// Whether `reservation` passes the filter at `now`.
    #[must_use]
    pub fn matches(&self, reservation: &Reservation, now: DateTime<Utc>) -> bool {
        match self {
            Self::All => true,
            Self::Paid => reservation.payment_status == PaymentStatus::Paid,
            Self::Pending => reservation.payment_status == PaymentStatus::Pending,
            Self::Overdue => reservation.is_payment_overdue(now),
            Self::Unrecognized(_) => false,
        }
    }
}

impl From<String> for PaymentFilter {
    fn from(value: String) -> Self {
        match value.as_str() {
            "" | ALL => Self::All,
            "paid" => Self::Paid,
            "pending" => Self::Pending,
            "overdue" => Self::Overdue,
            _ => Self::Unrecognized(value),
        }
    }
}

impl From<PaymentFilter> for String {
    fn from(filter: PaymentFilter) -> Self {
        match filter {
            PaymentFilter::All => ALL.to_string(),
            PaymentFilter::Paid => "paid".to_string(),
            PaymentFilter::Pending => "pending".to_string(),
            PaymentFilter::Overdue => "overdue".to_string(),
            PaymentFilter::Unrecognized(raw) => raw,
        }
    }
}

/// Exact-match criterion on an identifier such as an event id or an
/// arrangement code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ScopeFilter {
    /// No restriction.
    #[default]
    All,
    /// Only this value.
    Only(String),
}

impl ScopeFilter {
    /// Whether `value` passes the filter. A missing value only passes `All`.
    #[must_use]
    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => value == Some(wanted.as_str()),
        }
    }
}

impl From<String> for ScopeFilter {
    fn from(value: String) -> Self {
        if value.is_empty() || value == ALL {
            Self::All
        } else {
            Self::Only(value)
        }
    }
}

impl From<ScopeFilter> for String {
    fn from(filter: ScopeFilter) -> Self {
        match filter {
            ScopeFilter::All => ALL.to_string(),
            ScopeFilter::Only(value) => value,
        }
    }
}

/// Criteria for the workbench reservation list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ReservationQuery {
    /// Status, or `"all"`.
    #[schema(value_type = String, example = "all")]
    pub status_filter: StatusFilter,
    /// `paid`, `pending`, `overdue`, or `"all"`.
    #[schema(value_type = String, example = "all")]
    pub payment_filter: PaymentFilter,
    /// Event id, or `"all"`.
    #[schema(value_type = String, example = "all")]
    pub event_id_filter: ScopeFilter,
    /// Arrangement code, or `"all"`.
    #[schema(value_type = String, example = "all")]
    pub arrangement_filter: ScopeFilter,
    /// Free-text search; empty disables it.
    pub search_query: String,
}

/// Filter preset sent along when navigating from the dashboard or the
/// customer screen into the workbench.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PresetFilter {
    /// Status to select.
    pub status: Option<ReservationStatus>,
    /// Payment filter to select.
    #[schema(value_type = Option<String>)]
    pub payment: Option<PaymentFilter>,
    /// Event to select.
    pub event_id: Option<String>,
    /// Customer email, applied as search text.
    pub customer_email: Option<String>,
}

impl ReservationQuery {
    /// Overlays the fields present in `preset`.
    #[must_use]
    pub fn with_preset(mut self, preset: PresetFilter) -> Self {
        if let Some(status) = preset.status {
            self.status_filter = StatusFilter::Only(status);
        }
        if let Some(payment) = preset.payment {
            self.payment_filter = payment;
        }
        if let Some(event_id) = preset.event_id {
            self.event_id_filter = ScopeFilter::from(event_id);
        }
        if let Some(email) = preset.customer_email {
            self.search_query = email;
        }
        self
    }

    fn matches(&self, reservation: &Reservation, needle: Option<&str>, now: DateTime<Utc>) -> bool {
        !reservation.is_waitlist()
            && self.status_filter.matches(reservation.status)
            && self.payment_filter.matches(reservation, now)
            && self.event_id_filter.matches(Some(&reservation.event_id))
            && self
                .arrangement_filter
                .matches(reservation.arrangement.as_deref())
            && needle.is_none_or(|n| reservation.matches_search(n))
    }
}

/// Headline numbers of the workbench dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Reservations excluding the waitlist.
    pub total_reservations: usize,
    /// Pending reservations.
    pub pending_count: usize,
    /// Confirmed or checked-in reservations.
    pub confirmed_count: usize,
    /// Option holds.
    pub option_count: usize,
    /// Cancelled reservations.
    pub cancelled_count: usize,
    /// Sum of prices of confirmed or checked-in reservations.
    pub total_revenue: f64,
    /// The paid part of `total_revenue`.
    pub paid_revenue: f64,
    /// The unpaid part of `total_revenue`.
    pub pending_revenue: f64,
    /// Guests across confirmed or checked-in reservations.
    pub total_persons: u64,
    /// `total_persons / confirmed_count`, or 0 without confirmed bookings.
    pub average_group_size: f64,
    /// Pending payments past their due date.
    pub payment_deadline_warnings: usize,
    /// Options that are expired or expiring soon.
    pub option_expiring_warnings: usize,
}

/// Totals for the currently filtered list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilteredSummary {
    /// Reservations in the list.
    pub count: usize,
    /// Price total of confirmed or checked-in entries.
    pub total_amount: f64,
    /// Guests in confirmed or checked-in entries.
    pub total_persons: u64,
}

/// What a focus item asks the admin to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum FocusKind {
    /// Option about to lapse.
    OptionExpiring,
    /// New request waiting for review.
    PendingRequest,
    /// Payment past its due date.
    PaymentOverdue,
}

/// Priority of a focus item; sorts high first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    /// Act today.
    High,
    /// Act soon.
    Medium,
    /// Informational.
    Low,
}

/// One entry of the dashboard's "needs attention" list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FocusItem {
    /// Reservation the item points at.
    pub reservation_id: String,
    /// Item kind.
    pub kind: FocusKind,
    /// Headline.
    pub title: String,
    /// Contact, event date and amount.
    pub subtitle: String,
    /// Priority.
    pub urgency: Urgency,
}

/// Formats an amount the way Dutch invoices do: `€ 1.234,50`.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    #[allow(clippy::cast_possible_truncation)]
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let euros = (cents / 100).to_string();
    let mut grouped = String::with_capacity(euros.len() + euros.len() / 3);
    for (i, digit) in euros.chars().enumerate() {
        if i > 0 && (euros.len() - i).is_multiple_of(3) {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    format!("€ {sign}{grouped},{:02}", cents % 100)
}

/// `dd-mm-yyyy - TYPE` from the matching event, or the bare date when only
/// the reservation carries one.
fn event_label(reservation: &Reservation, events: &[EventSummary]) -> String {
    let event = events.iter().find(|e| e.id == reservation.event_id);
    let Some(date) = event.map(|e| e.date).or(reservation.event_date) else {
        return "Event onbekend".to_string();
    };
    let date = date.format("%d-%m-%Y");
    let event_type = event.map_or("", |e| e.event_type.as_str());
    if event_type.is_empty() {
        date.to_string()
    } else {
        format!("{date} - {event_type}")
    }
}

/// Totals over an already filtered list.
#[must_use]
pub fn summarize(filtered: &[&Reservation]) -> FilteredSummary {
    let confirmed = || filtered.iter().filter(|r| r.is_confirmed_or_checked_in());
    FilteredSummary {
        count: filtered.len(),
        total_amount: confirmed().map(|r| r.total_price).sum(),
        total_persons: confirmed().map(|r| u64::from(r.number_of_persons)).sum(),
    }
}

/// Sorted distinct arrangement codes present outside the waitlist.
#[must_use]
pub fn unique_arrangements(reservations: &[Reservation]) -> Vec<String> {
    reservations
        .iter()
        .filter(|r| !r.is_waitlist())
        .filter_map(|r| r.arrangement.as_deref())
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Filtering, statistics and focus items over a reservation slice.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryEngine {
    thresholds: Thresholds,
}

impl QueryEngine {
    /// Creates an engine with the given thresholds.
    #[must_use]
    pub const fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Thresholds in effect.
    #[must_use]
    pub const fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Applies `query` and orders the result newest first. Waitlist entries
    /// are always dropped.
    #[must_use]
    pub fn filter<'a>(
        &self,
        reservations: &'a [Reservation],
        query: &ReservationQuery,
        now: DateTime<Utc>,
    ) -> Vec<&'a Reservation> {
        let needle = (!query.search_query.is_empty()).then(|| query.search_query.to_lowercase());
        let mut filtered: Vec<&Reservation> = reservations
            .iter()
            .filter(|r| query.matches(r, needle.as_deref(), now))
            .collect();
        filtered.sort_by_key(|r| Reverse(r.created_at));
        filtered
    }

    /// Dashboard statistics over every reservation outside the waitlist.
    #[must_use]
    pub fn stats(&self, reservations: &[Reservation], now: DateTime<Utc>) -> DashboardStats {
        let active = || reservations.iter().filter(|r| !r.is_waitlist());
        let count_status =
            |status: ReservationStatus| active().filter(|r| r.status == status).count();
        let confirmed = || active().filter(|r| r.is_confirmed_or_checked_in());

        let confirmed_count = confirmed().count();
        let total_revenue: f64 = confirmed().map(|r| r.total_price).sum();
        let paid_revenue: f64 = confirmed()
            .filter(|r| r.payment_status == PaymentStatus::Paid)
            .map(|r| r.total_price)
            .sum();
        let total_persons: u64 = confirmed().map(|r| u64::from(r.number_of_persons)).sum();
        #[allow(clippy::cast_precision_loss)]
        let average_group_size = if confirmed_count == 0 {
            0.0
        } else {
            total_persons as f64 / confirmed_count as f64
        };

        let window = self.thresholds.expiring_soon_days;
        DashboardStats {
            total_reservations: active().count(),
            pending_count: count_status(ReservationStatus::Pending),
            confirmed_count,
            option_count: count_status(ReservationStatus::OptionHold),
            cancelled_count: count_status(ReservationStatus::Cancelled),
            total_revenue,
            paid_revenue,
            pending_revenue: total_revenue - paid_revenue,
            total_persons,
            average_group_size,
            payment_deadline_warnings: active().filter(|r| r.is_payment_overdue(now)).count(),
            option_expiring_warnings: active()
                .filter(|r| {
                    option_lifecycle::is_expired(r, now)
                        || option_lifecycle::is_expiring_soon(r, window, now)
                })
                .count(),
        }
    }

    /// Prioritized "needs attention" list: options expiring soon, the first
    /// pending requests (capped), and overdue payments. High urgency first;
    /// input order is kept within a priority.
    #[must_use]
    pub fn focus_items(
        &self,
        reservations: &[Reservation],
        events: &[EventSummary],
        now: DateTime<Utc>,
    ) -> Vec<FocusItem> {
        let active = || reservations.iter().filter(|r| !r.is_waitlist());
        let window = self.thresholds.expiring_soon_days;
        let mut items = Vec::new();

        for r in active().filter(|r| option_lifecycle::is_expiring_soon(r, window, now)) {
            // Expiring soon means strictly in the future, so at least one day.
            let when = match option_lifecycle::days_until_expiry(r, now).unwrap_or(1) {
                1 => "morgen".to_string(),
                n => format!("over {n} dagen"),
            };
            items.push(FocusItem {
                reservation_id: r.id.clone(),
                kind: FocusKind::OptionExpiring,
                title: format!("Optie verloopt {when}"),
                subtitle: format!(
                    "{} • {} • {}",
                    r.contact_person,
                    event_label(r, events),
                    format_currency(r.total_price)
                ),
                urgency: Urgency::Medium,
            });
        }

        for r in active()
            .filter(|r| r.status == ReservationStatus::Pending)
            .take(self.thresholds.focus_pending_limit)
        {
            items.push(FocusItem {
                reservation_id: r.id.clone(),
                kind: FocusKind::PendingRequest,
                title: format!("Nieuwe aanvraag van {}", r.contact_person),
                subtitle: format!(
                    "{} personen • {} • {}",
                    r.number_of_persons,
                    event_label(r, events),
                    format_currency(r.total_price)
                ),
                urgency: Urgency::Medium,
            });
        }

        for r in active().filter(|r| r.is_payment_overdue(now)) {
            let days_overdue = r.payment_due_date.map_or(0, |due| floor_days(now - due));
            items.push(FocusItem {
                reservation_id: r.id.clone(),
                kind: FocusKind::PaymentOverdue,
                title: format!("Betaling {days_overdue} dagen te laat"),
                subtitle: format!(
                    "{} • {} • {}",
                    r.contact_person,
                    event_label(r, events),
                    format_currency(r.total_price)
                ),
                urgency: Urgency::High,
            });
        }

        items.sort_by_key(|item| item.urgency);
        items
    }
}
