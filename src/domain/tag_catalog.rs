//! Tag definitions, option-term presets and their display helpers.
//!
//! The catalog is static and read-only. Callers may supply their own tag
//! list (for example one edited in the admin UI), but nothing here writes
//! it back anywhere.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::option_lifecycle::{ceil_days, floor_days};
use super::settings::{ConfigProvider, FALLBACK_OPTION_TERM_DAYS, Thresholds};

/// Text color for light backgrounds.
pub const BLACK: &str = "#000000";
/// Text color for dark backgrounds.
pub const WHITE: &str = "#FFFFFF";

/// Preset id that asks the caller for an explicit date.
pub const CUSTOM_TERM_ID: &str = "custom";

/// Grouping used by the tag picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TagCategory {
    /// About the guest.
    Guest,
    /// Business bookings.
    Business,
    /// Special requests and seating.
    Special,
    /// Staff-only markers.
    Internal,
    /// Extra purchases.
    Purchase,
}

/// One entry of the tag catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagDefinition {
    /// Stable identifier stored on reservations.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Longer explanation for the picker tooltip.
    #[serde(default)]
    pub description: String,
    /// Background color as `#RRGGBB`.
    pub color: String,
    /// Text color; computed from `color` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    /// Icon name.
    #[serde(default)]
    pub icon: String,
    /// Picker grouping.
    pub category: TagCategory,
    /// Offered in the quick-pick set.
    #[serde(default)]
    pub is_default: bool,
    /// Soft-disable flag.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// A selectable option duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptionTermPreset {
    /// Preset identifier, e.g. `"1week"`.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Duration in days; `0` marks the custom-date preset.
    pub days: u32,
    /// Preselected in the option dialog.
    #[serde(default)]
    pub is_default: bool,
    /// Badge color.
    pub color: String,
}

/// Four-tier expiry severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ExpiryStatus {
    /// Past the expiry date.
    Expired,
    /// Within the expiring-soon window.
    ExpiringSoon,
    /// Within the warning tier.
    ExpiringWarning,
    /// Comfortably in the future.
    Safe,
}

/// Color and severity for an expiry date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ExpiryStatusColor {
    /// Hex color.
    pub color: String,
    /// Severity tier.
    pub status: ExpiryStatus,
}

#[allow(clippy::too_many_arguments)]
fn tag(
    id: &str,
    label: &str,
    description: &str,
    color: &str,
    icon: &str,
    category: TagCategory,
    is_default: bool,
    is_active: bool,
) -> TagDefinition {
    TagDefinition {
        id: id.to_string(),
        label: label.to_string(),
        description: description.to_string(),
        color: color.to_string(),
        text_color: None,
        icon: icon.to_string(),
        category,
        is_default,
        is_active,
    }
}

/// Built-in tag catalog.
#[must_use]
pub fn default_tag_definitions() -> Vec<TagDefinition> {
    use TagCategory::{Business, Guest, Internal, Purchase, Special};
    vec![
        tag("GENODIGDE", "Genodigde", "Gratis boeking - gast van het theater", "#8B5CF6", "Gift", Guest, true, true),
        tag("OPTIE", "Optie", "Optie/reservering - nog niet definitief", "#F59E0B", "Clock", Special, true, true),
        tag("MPL", "Mooie Plaatsen", "Premium seating - speciale zitplaatsen", "#EC4899", "Star", Special, true, true),
        tag("MERCHANDISE", "Merchandise", "Merchandise bestelling", "#3B82F6", "ShoppingBag", Purchase, true, true),
        tag("DIEET", "Dieet", "Speciale dieetwensen (vegetarisch, allergieën, etc.)", "#10B981", "UtensilsCrossed", Special, true, true),
        tag("VIERING", "Viering", "Iets te vieren (verjaardag, jubileum, etc.)", "#EF4444", "PartyPopper", Special, true, true),
        tag("DELUXE", "Deluxe", "BWFM arrangement", "#FBBF24", "Crown", Purchase, false, true),
        tag("BORREL", "Borrel", "Pre-drink of after-party geboekt", "#14B8A6", "Wine", Purchase, false, true),
        tag("VIP", "VIP", "Extra aandacht bij ontvangst", "#111827", "Award", Guest, false, true),
        tag("STAMGAST", "Stamgast", "Terugkerende gast", "#6366F1", "Repeat", Guest, false, true),
        tag("PERS", "Pers", "Pers of recensent", "#0EA5E9", "Newspaper", Guest, false, true),
        tag("ZAKELIJK", "Zakelijk", "Bedrijfsboeking met factuur", "#1F2937", "Briefcase", Business, false, true),
        tag("INTERN", "Intern", "Interne boeking of personeel", "#9CA3AF", "Lock", Internal, false, true),
        tag("ARCHIEF", "Archief", "Verouderde tag, niet meer in gebruik", "#D1D5DB", "Archive", Internal, false, false),
    ]
}

fn term(id: &str, label: &str, days: u32, is_default: bool, color: &str) -> OptionTermPreset {
    OptionTermPreset {
        id: id.to_string(),
        label: label.to_string(),
        days,
        is_default,
        color: color.to_string(),
    }
}

/// Built-in option durations; exactly one is the default.
#[must_use]
pub fn default_option_term_presets() -> Vec<OptionTermPreset> {
    vec![
        term("3days", "3 dagen", 3, false, "#EF4444"),
        term("1week", "1 week", 7, true, "#F59E0B"),
        term("2weeks", "2 weken", 14, false, "#10B981"),
        term("3weeks", "3 weken", 21, false, "#3B82F6"),
        term("1month", "1 maand", 30, false, "#8B5CF6"),
        term("2months", "2 maanden", 60, false, "#EC4899"),
        term(CUSTOM_TERM_ID, "Aangepast...", 0, false, "#6B7280"),
    ]
}

fn hex_channel(hex: &str, range: std::ops::Range<usize>) -> Option<f64> {
    hex.get(range)
        .and_then(|pair| u8::from_str_radix(pair, 16).ok())
        .map(f64::from)
}

/// Black or white text, whichever reads better on `background_hex`.
///
/// Uses perceived luminance `(0.299 R + 0.587 G + 0.114 B) / 255`. The
/// leading `#` is optional; unparseable input gets white text.
#[must_use]
pub fn contrast_text_color(background_hex: &str) -> &'static str {
    let hex = background_hex.trim().trim_start_matches('#');
    let channels = (
        hex_channel(hex, 0..2),
        hex_channel(hex, 2..4),
        hex_channel(hex, 4..6),
    );
    let (Some(r), Some(g), Some(b)) = channels else {
        return WHITE;
    };
    let luminance = (0.299 * r + 0.587 * g + 0.114 * b) / 255.0;
    if luminance > 0.5 { BLACK } else { WHITE }
}

/// Color tier for an option expiring at `expiry`.
///
/// An expiry at or before `now` is expired, matching
/// [`super::option_lifecycle::is_expired`]. Future expiries are tiered by
/// whole days remaining (rounded up): up to `expiring_soon_days` is
/// expiring soon, up to `warning_days` is a warning, anything later is safe.
#[must_use]
pub fn expiry_status_color(
    expiry: DateTime<Utc>,
    now: DateTime<Utc>,
    thresholds: &Thresholds,
) -> ExpiryStatusColor {
    let days = ceil_days(expiry - now);
    let (color, status) = if expiry <= now {
        ("#DC2626", ExpiryStatus::Expired)
    } else if days <= i64::from(thresholds.expiring_soon_days) {
        ("#EF4444", ExpiryStatus::ExpiringSoon)
    } else if days <= i64::from(thresholds.warning_days) {
        ("#F59E0B", ExpiryStatus::ExpiringWarning)
    } else {
        ("#10B981", ExpiryStatus::Safe)
    };
    ExpiryStatusColor {
        color: color.to_string(),
        status,
    }
}

/// Dutch description of the time left until `expiry`.
///
/// Lapsed options read `VERLOPEN`, with the number of whole days since
/// expiry once at least one day has passed.
#[must_use]
pub fn expiry_status_text(expiry: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if expiry <= now {
        return match floor_days(now - expiry) {
            0 => "VERLOPEN".to_string(),
            1 => "VERLOPEN 1 dag geleden".to_string(),
            ago => format!("VERLOPEN {ago} dagen geleden"),
        };
    }
    match ceil_days(expiry - now) {
        1 => "Verloopt morgen".to_string(),
        d => format!("Verloopt over {d} dagen"),
    }
}

/// Read-only lookup over a tag list and the option-term presets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCatalog {
    tags: Vec<TagDefinition>,
    option_terms: Vec<OptionTermPreset>,
}

impl Default for TagCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TagCatalog {
    /// Catalog with the built-in tags and presets.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            tags: default_tag_definitions(),
            option_terms: default_option_term_presets(),
        }
    }

    /// Catalog over caller-supplied tags and presets.
    #[must_use]
    pub fn new(tags: Vec<TagDefinition>, option_terms: Vec<OptionTermPreset>) -> Self {
        Self { tags, option_terms }
    }

    /// Catalog over caller-supplied tags with the built-in presets.
    #[must_use]
    pub fn with_tags(tags: Vec<TagDefinition>) -> Self {
        Self::new(tags, default_option_term_presets())
    }

    /// Every tag, active or not.
    #[must_use]
    pub fn tags(&self) -> &[TagDefinition] {
        &self.tags
    }

    /// Every option-term preset, including the custom one.
    #[must_use]
    pub fn option_terms(&self) -> &[OptionTermPreset] {
        &self.option_terms
    }

    /// Tag with the given id.
    #[must_use]
    pub fn lookup_tag(&self, id: &str) -> Option<&TagDefinition> {
        self.tags.iter().find(|t| t.id == id)
    }

    /// Active tags in `category`.
    #[must_use]
    pub fn tags_by_category(&self, category: TagCategory) -> Vec<&TagDefinition> {
        self.tags
            .iter()
            .filter(|t| t.category == category && t.is_active)
            .collect()
    }

    /// Active tags flagged for quick selection.
    #[must_use]
    pub fn default_quick_pick_tags(&self) -> Vec<&TagDefinition> {
        self.tags
            .iter()
            .filter(|t| t.is_default && t.is_active)
            .collect()
    }

    /// The tag's explicit text color, or the computed contrast color.
    #[must_use]
    pub fn resolve_text_color<'a>(&self, tag: &'a TagDefinition) -> &'a str {
        tag.text_color
            .as_deref()
            .unwrap_or_else(|| contrast_text_color(&tag.color))
    }

    /// Option-term preset with the given id.
    #[must_use]
    pub fn option_term_preset(&self, id: &str) -> Option<&OptionTermPreset> {
        self.option_terms.iter().find(|t| t.id == id)
    }

    /// Default option duration in days.
    ///
    /// Prefers a positive override from `config`, then the preset flagged
    /// default, then [`FALLBACK_OPTION_TERM_DAYS`].
    #[must_use]
    pub fn default_option_duration_days(&self, config: &dyn ConfigProvider) -> u32 {
        config
            .default_option_term_days()
            .filter(|days| *days > 0)
            .or_else(|| {
                self.option_terms
                    .iter()
                    .find(|t| t.is_default && t.days > 0)
                    .map(|t| t.days)
            })
            .unwrap_or(FALLBACK_OPTION_TERM_DAYS)
    }

    /// Presets with a fixed day count.
    #[must_use]
    pub fn available_option_durations(&self) -> Vec<&OptionTermPreset> {
        self.option_terms.iter().filter(|t| t.days > 0).collect()
    }

    /// Expiry for an option placed `now` with preset `term_id`.
    ///
    /// The custom preset returns `custom_date`. Unknown presets, and the
    /// custom preset without a date, return `None`.
    #[must_use]
    pub fn expiry_for_term(
        &self,
        term_id: &str,
        custom_date: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Option<DateTime<Utc>> {
        if term_id == CUSTOM_TERM_ID {
            return custom_date;
        }
        let preset = self.option_term_preset(term_id)?;
        if preset.days == 0 {
            return None;
        }
        TimeDelta::try_days(i64::from(preset.days)).and_then(|d| now.checked_add_signed(d))
    }
}
