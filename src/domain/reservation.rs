//! Reservation records as supplied by the external reservation store.
//!
//! The workbench never creates or persists reservations. It deserializes
//! the camelCase JSON the store produces, normalizes tag references once at
//! this boundary, and hands read-only records to the domain functions.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Lifecycle status of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ReservationStatus {
    /// New booking awaiting admin review.
    Pending,
    /// Confirmed booking.
    Confirmed,
    /// Guest has arrived.
    CheckedIn,
    /// Temporary capacity hold with an expiry date.
    #[serde(rename = "option")]
    OptionHold,
    /// Cancelled booking.
    Cancelled,
    /// Waitlist entry; handled by a separate view.
    Waitlist,
    /// Rejected request.
    Rejected,
    /// Request submitted over capacity.
    Request,
}

impl ReservationStatus {
    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::CheckedIn => "checked-in",
            Self::OptionHold => "option",
            Self::Cancelled => "cancelled",
            Self::Waitlist => "waitlist",
            Self::Rejected => "rejected",
            Self::Request => "request",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not a known status or payment status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized value: {0}")]
pub struct UnrecognizedValue(pub String);

impl FromStr for ReservationStatus {
    type Err = UnrecognizedValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "checked-in" => Ok(Self::CheckedIn),
            "option" => Ok(Self::OptionHold),
            "cancelled" => Ok(Self::Cancelled),
            "waitlist" => Ok(Self::Waitlist),
            "rejected" => Ok(Self::Rejected),
            "request" => Ok(Self::Request),
            other => Err(UnrecognizedValue(other.to_string())),
        }
    }
}

/// Payment state of a reservation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Fully paid.
    Paid,
    /// Awaiting payment.
    #[default]
    Pending,
    /// Refunded.
    Refunded,
}

/// Normalized reference to a tag in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct TagReference {
    /// Catalog identifier, e.g. `"VIP"`.
    pub id: String,
}

impl TagReference {
    /// Creates a reference to the tag `id`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Tag shapes found in stored reservations: a bare id, or an object
/// carrying an id and/or a label.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTag {
    Plain(String),
    Object {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        label: Option<String>,
    },
}

impl RawTag {
    fn normalize(self) -> Option<TagReference> {
        let id = match self {
            Self::Plain(id) => id,
            Self::Object { id, label } => id.or(label)?,
        };
        let id = id.trim();
        if id.is_empty() {
            return None;
        }
        Some(TagReference::new(id))
    }
}

/// Deserializes a tag list in any stored shape into [`TagReference`]s.
///
/// `null` or a missing list yields an empty vector. Entries without a
/// usable id are dropped.
///
/// # Errors
///
/// Returns a deserializer error when the value is not a list of strings
/// or objects.
pub fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<TagReference>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<RawTag>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(RawTag::normalize)
        .collect())
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<f64> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or(0.0))
}

/// Optional drink add-on (pre-drink or after-party).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AddOn {
    /// Whether the add-on was selected.
    pub enabled: bool,
    /// Number of persons it applies to.
    pub quantity: u32,
}

impl AddOn {
    /// `true` when the add-on is selected for at least one person.
    #[must_use]
    pub const fn is_booked(&self) -> bool {
        self.enabled && self.quantity > 0
    }
}

/// One merchandise line on a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MerchandiseLine {
    /// Merchandise item identifier.
    pub item_id: String,
    /// Ordered quantity.
    #[serde(default)]
    pub quantity: u32,
}

/// A reservation as loaded from the external store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    /// Opaque unique identifier.
    pub id: String,
    /// Event this reservation belongs to.
    pub event_id: String,
    /// Date of the event, when denormalized onto the reservation.
    #[serde(default)]
    pub event_date: Option<DateTime<Utc>>,
    /// Lifecycle status.
    pub status: ReservationStatus,
    /// Payment state.
    #[serde(default)]
    pub payment_status: PaymentStatus,
    /// When payment is expected.
    #[serde(default)]
    pub payment_due_date: Option<DateTime<Utc>>,
    /// Total price in euros, computed upstream.
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub total_price: f64,
    /// Party size.
    #[serde(default)]
    pub number_of_persons: u32,
    /// Name of the contact person.
    #[serde(default)]
    pub contact_person: String,
    /// Contact email address.
    #[serde(default)]
    pub email: String,
    /// Company name for business bookings.
    #[serde(default)]
    pub company_name: Option<String>,
    /// Arrangement code, e.g. `BWF` or `BWFM`. Options may not have one yet.
    #[serde(default)]
    pub arrangement: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Normalized tag references.
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<TagReference>,
    /// When the option hold was placed.
    #[serde(default)]
    pub option_placed_at: Option<DateTime<Utc>>,
    /// When the option hold lapses. Only meaningful for option holds.
    #[serde(default)]
    pub option_expires_at: Option<DateTime<Utc>>,
    /// Whether an admin already followed up on the option.
    #[serde(default)]
    pub option_followed_up: bool,
    /// Pre-drink add-on.
    #[serde(default)]
    pub pre_drink: Option<AddOn>,
    /// After-party add-on.
    #[serde(default)]
    pub after_party: Option<AddOn>,
    /// Merchandise lines.
    #[serde(default)]
    pub merchandise: Vec<MerchandiseLine>,
}

impl Reservation {
    /// Creates a minimal reservation; all optional fields are empty.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        event_id: impl Into<String>,
        status: ReservationStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            event_id: event_id.into(),
            event_date: None,
            status,
            payment_status: PaymentStatus::default(),
            payment_due_date: None,
            total_price: 0.0,
            number_of_persons: 1,
            contact_person: String::new(),
            email: String::new(),
            company_name: None,
            arrangement: None,
            created_at,
            tags: Vec::new(),
            option_placed_at: None,
            option_expires_at: None,
            option_followed_up: false,
            pre_drink: None,
            after_party: None,
            merchandise: Vec::new(),
        }
    }

    /// `true` for option holds.
    #[must_use]
    pub fn is_option(&self) -> bool {
        self.status == ReservationStatus::OptionHold
    }

    /// `true` for waitlist entries.
    #[must_use]
    pub fn is_waitlist(&self) -> bool {
        self.status == ReservationStatus::Waitlist
    }

    /// `true` for confirmed or checked-in bookings.
    #[must_use]
    pub fn is_confirmed_or_checked_in(&self) -> bool {
        matches!(
            self.status,
            ReservationStatus::Confirmed | ReservationStatus::CheckedIn
        )
    }

    /// Expiry of the option hold, only when this is an option hold.
    #[must_use]
    pub fn option_expiry(&self) -> Option<DateTime<Utc>> {
        if self.is_option() {
            self.option_expires_at
        } else {
            None
        }
    }

    /// Payment is pending and its due date has passed.
    #[must_use]
    pub fn is_payment_overdue(&self, now: DateTime<Utc>) -> bool {
        self.payment_status == PaymentStatus::Pending
            && self.payment_due_date.is_some_and(|due| due < now)
    }

    /// Case-insensitive substring match on contact person, email, company
    /// name and id. `needle` must already be lowercase.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        let contains = |field: &str| field.to_lowercase().contains(needle);
        contains(&self.contact_person)
            || contains(&self.email)
            || self.company_name.as_deref().is_some_and(contains)
            || contains(&self.id)
    }
}

/// Event data the caller supplies for display joins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    /// Event identifier.
    pub id: String,
    /// Event date.
    pub date: DateTime<Utc>,
    /// Event type key, e.g. `"REGULAR"`.
    #[serde(rename = "type", default)]
    pub event_type: String,
}
