//! Automatic tags, bulk tag edits and tag reconciliation.
//!
//! Three tags are derived from reservation content instead of being picked
//! by hand: `DELUXE`, `BORREL` and `MERCHANDISE`. Reconciliation replaces
//! any stale automatic tags with freshly derived ones and keeps manual tags
//! untouched.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::reservation::{AddOn, Reservation, TagReference};

/// Tag for the BWFM arrangement.
pub const DELUXE: &str = "DELUXE";
/// Tag for a booked pre-drink or after-party.
pub const BORREL: &str = "BORREL";
/// Tag for reservations with merchandise.
pub const MERCHANDISE: &str = "MERCHANDISE";

/// Ids that are always derived, never picked by hand.
pub const AUTOMATIC_TAG_IDS: [&str; 3] = [DELUXE, BORREL, MERCHANDISE];

const DELUXE_ARRANGEMENT: &str = "BWFM";

/// How a bulk tag edit combines with existing tags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BulkTagMode {
    /// Union with existing tags.
    #[default]
    Add,
    /// Discard existing tags.
    Replace,
}

/// Before/after view of a tag reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagMigration {
    /// Reservation id.
    pub reservation_id: String,
    /// Tags currently stored.
    pub current: Vec<TagReference>,
    /// Tags after reconciliation.
    pub proposed: Vec<TagReference>,
    /// Tags added by the reconciliation.
    pub added: Vec<TagReference>,
    /// Tags removed by the reconciliation.
    pub removed: Vec<TagReference>,
    /// Whether the stored tags must be rewritten.
    pub changed: bool,
}

/// Tags implied by the reservation's arrangement and extras.
#[must_use]
pub fn automatic_tags(reservation: &Reservation) -> Vec<TagReference> {
    let mut tags = Vec::new();
    if reservation.arrangement.as_deref() == Some(DELUXE_ARRANGEMENT) {
        tags.push(TagReference::new(DELUXE));
    }
    let booked = |addon: Option<&AddOn>| addon.is_some_and(AddOn::is_booked);
    if booked(reservation.pre_drink.as_ref()) || booked(reservation.after_party.as_ref()) {
        tags.push(TagReference::new(BORREL));
    }
    if !reservation.merchandise.is_empty() {
        tags.push(TagReference::new(MERCHANDISE));
    }
    tags
}

fn push_unique(target: &mut Vec<TagReference>, tag: TagReference) {
    if !target.contains(&tag) {
        target.push(tag);
    }
}

/// Combines `incoming` with `existing` according to `mode`.
///
/// `Add` keeps existing order and appends new ids once; `Replace` returns
/// `incoming` with duplicates removed.
#[must_use]
pub fn apply_bulk_tags(
    existing: &[TagReference],
    incoming: &[TagReference],
    mode: BulkTagMode,
) -> Vec<TagReference> {
    let base: &[TagReference] = match mode {
        BulkTagMode::Add => existing,
        BulkTagMode::Replace => &[],
    };
    let mut merged = Vec::with_capacity(base.len() + incoming.len());
    for tag in base.iter().chain(incoming) {
        push_unique(&mut merged, tag.clone());
    }
    merged
}

/// Recomputes the automatic tags of `reservation`.
///
/// The proposal is the manual tags followed by the derived tags.
/// `changed` compares tag sets, so reordering alone is not a change.
#[must_use]
pub fn reconcile_tags(reservation: &Reservation) -> TagMigration {
    let current = reservation.tags.clone();
    let mut proposed = Vec::with_capacity(current.len() + AUTOMATIC_TAG_IDS.len());
    for tag in current
        .iter()
        .filter(|t| !AUTOMATIC_TAG_IDS.contains(&t.id.as_str()))
    {
        push_unique(&mut proposed, tag.clone());
    }
    for tag in automatic_tags(reservation) {
        push_unique(&mut proposed, tag);
    }

    let added: Vec<TagReference> = proposed
        .iter()
        .filter(|t| !current.contains(t))
        .cloned()
        .collect();
    let removed: Vec<TagReference> = current
        .iter()
        .filter(|t| !proposed.contains(t))
        .cloned()
        .collect();
    let changed = !added.is_empty() || !removed.is_empty();

    TagMigration {
        reservation_id: reservation.id.clone(),
        current,
        proposed,
        added,
        removed,
        changed,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::reservation::{MerchandiseLine, ReservationStatus};
    use chrono::{TimeZone, Utc};

    fn reservation() -> Reservation {
        let Some(created) = Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0).single() else {
            panic!("valid timestamp");
        };
        Reservation::new("R-1", "E-1", ReservationStatus::Confirmed, created)
    }

    fn ids(tags: &[TagReference]) -> Vec<&str> {
        tags.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn automatic_tags_from_content() {
        let mut r = reservation();
        assert!(automatic_tags(&r).is_empty());

        r.arrangement = Some("BWFM".into());
        r.after_party = Some(AddOn {
            enabled: true,
            quantity: 4,
        });
        r.merchandise = vec![MerchandiseLine {
            item_id: "programmaboek".into(),
            quantity: 1,
        }];
        assert_eq!(ids(&automatic_tags(&r)), vec![DELUXE, BORREL, MERCHANDISE]);
    }

    #[test]
    fn addon_without_quantity_is_not_borrel() {
        let mut r = reservation();
        r.pre_drink = Some(AddOn {
            enabled: true,
            quantity: 0,
        });
        r.arrangement = Some("BWF".into());
        assert!(automatic_tags(&r).is_empty());
    }

    #[test]
    fn bulk_add_unions_in_order() {
        let existing = vec![TagReference::new("VIP"), TagReference::new("MPL")];
        let incoming = vec![TagReference::new("MPL"), TagReference::new("DIEET")];
        let merged = apply_bulk_tags(&existing, &incoming, BulkTagMode::Add);
        assert_eq!(ids(&merged), vec!["VIP", "MPL", "DIEET"]);
    }

    #[test]
    fn bulk_replace_discards_existing() {
        let existing = vec![TagReference::new("VIP")];
        let incoming = vec![TagReference::new("PERS"), TagReference::new("PERS")];
        let merged = apply_bulk_tags(&existing, &incoming, BulkTagMode::Replace);
        assert_eq!(ids(&merged), vec!["PERS"]);
    }

    #[test]
    fn reconcile_replaces_stale_automatic_tags() {
        let mut r = reservation();
        r.tags = vec![
            TagReference::new("DELUXE"),
            TagReference::new("VIP"),
            TagReference::new("VIP"),
        ];
        r.merchandise = vec![MerchandiseLine {
            item_id: "mok".into(),
            quantity: 2,
        }];
        let migration = reconcile_tags(&r);
        assert!(migration.changed);
        assert_eq!(ids(&migration.proposed), vec!["VIP", MERCHANDISE]);
        assert_eq!(ids(&migration.added), vec![MERCHANDISE]);
        assert_eq!(ids(&migration.removed), vec![DELUXE]);
    }

    #[test]
    fn reconcile_ignores_order_only_differences() {
        let mut r = reservation();
        r.arrangement = Some("BWFM".into());
        r.tags = vec![TagReference::new(DELUXE), TagReference::new("VIP")];
        let migration = reconcile_tags(&r);
        assert!(!migration.changed);
    }

    #[test]
    fn reconcile_without_any_tags_is_unchanged() {
        let migration = reconcile_tags(&reservation());
        assert!(!migration.changed);
        assert!(migration.proposed.is_empty());
    }
}
