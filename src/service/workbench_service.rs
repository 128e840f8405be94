//! Workbench service: binds the clock, configuration and tag catalog to the
//! pure domain functions.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::option_lifecycle::{self, OptionState};
use crate::domain::option_report::{self, ExpirySweepPlan, OptionReport};
use crate::domain::query_engine::{
    self, DashboardStats, FilteredSummary, FocusItem, PresetFilter, QueryEngine, ReservationQuery,
};
use crate::domain::tag_catalog::{
    self, CUSTOM_TERM_ID, ExpiryStatusColor, OptionTermPreset, TagCatalog, TagDefinition,
};
use crate::domain::tagging::{self, BulkTagMode, TagMigration};
use crate::domain::{Clock, ConfigProvider, EventSummary, Reservation, TagReference, Thresholds};
use crate::error::WorkbenchError;

/// Filtered workbench list with its totals.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueryOutcome {
    /// Matching reservations, newest first.
    pub reservations: Vec<Reservation>,
    /// Totals over `reservations`.
    pub summary: FilteredSummary,
    /// Arrangement codes present in the full input, for the filter menu.
    pub arrangements: Vec<String>,
}

/// Dashboard numbers plus the focus list.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Headline statistics.
    pub stats: DashboardStats,
    /// Items needing attention, most urgent first.
    pub focus_items: Vec<FocusItem>,
}

/// Option holds split by lifecycle, with the summary report.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptionsOverview {
    /// Expired or expiring-soon options nobody followed up, earliest first.
    pub requiring_action: Vec<Reservation>,
    /// Options that have not expired, earliest expiry first.
    pub active: Vec<Reservation>,
    /// Options past their expiry.
    pub expired: Vec<Reservation>,
    /// Aggregate report.
    pub report: OptionReport,
}

/// Lifecycle view of a single reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptionClassification {
    /// Reservation id.
    pub reservation_id: String,
    /// Lifecycle state; absent for reservations that are not option holds.
    pub state: Option<OptionState>,
    /// Label shown in the workbench list.
    pub label: String,
    /// Whole days left, rounded up.
    pub days_until_expiry: Option<i64>,
    /// Badge color for the expiry.
    pub expiry_color: Option<ExpiryStatusColor>,
    /// Long-form expiry description.
    pub expiry_text: Option<String>,
}

/// Tags a reservation would carry after a bulk edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkTagResult {
    /// Reservation id.
    pub reservation_id: String,
    /// Resulting tags.
    pub tags: Vec<TagReference>,
}

/// Reconciliation preview across many reservations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MigrationPreview {
    /// Reservations inspected.
    pub total: usize,
    /// Reservations whose stored tags are out of date.
    pub needs_update: usize,
    /// Changes for the reservations that need one.
    pub migrations: Vec<TagMigration>,
}

/// Entry point for every workbench operation.
///
/// Each call reads the clock once, so all results of one call agree on
/// `now`.
#[derive(Debug, Clone)]
pub struct WorkbenchService {
    clock: Arc<dyn Clock>,
    config: Arc<dyn ConfigProvider>,
    catalog: Arc<TagCatalog>,
    engine: QueryEngine,
}

impl WorkbenchService {
    /// Creates a service. Thresholds are read from `config` once.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        config: Arc<dyn ConfigProvider>,
        catalog: Arc<TagCatalog>,
    ) -> Self {
        let engine = QueryEngine::new(config.thresholds());
        Self {
            clock,
            config,
            catalog,
            engine,
        }
    }

    /// Current instant according to the injected clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Thresholds in effect.
    #[must_use]
    pub const fn thresholds(&self) -> &Thresholds {
        self.engine.thresholds()
    }

    /// The tag catalog.
    #[must_use]
    pub fn catalog(&self) -> &TagCatalog {
        &self.catalog
    }

    /// Filters `reservations` for the workbench list.
    #[must_use]
    pub fn query(
        &self,
        reservations: &[Reservation],
        query: ReservationQuery,
        preset: Option<PresetFilter>,
    ) -> QueryOutcome {
        let now = self.now();
        let query = match preset {
            Some(preset) => query.with_preset(preset),
            None => query,
        };
        let filtered = self.engine.filter(reservations, &query, now);
        let summary = query_engine::summarize(&filtered);
        tracing::debug!(
            input = reservations.len(),
            matched = filtered.len(),
            "reservation query"
        );
        QueryOutcome {
            reservations: filtered.into_iter().cloned().collect(),
            summary,
            arrangements: query_engine::unique_arrangements(reservations),
        }
    }

    /// Dashboard statistics and focus items.
    #[must_use]
    pub fn dashboard(&self, reservations: &[Reservation], events: &[EventSummary]) -> Dashboard {
        let now = self.now();
        let stats = self.engine.stats(reservations, now);
        let focus_items = self.engine.focus_items(reservations, events, now);
        tracing::debug!(
            input = reservations.len(),
            focus = focus_items.len(),
            "dashboard computed"
        );
        Dashboard { stats, focus_items }
    }

    /// Option holds grouped by lifecycle state.
    #[must_use]
    pub fn options_overview(&self, reservations: &[Reservation]) -> OptionsOverview {
        let now = self.now();
        let thresholds = self.thresholds();
        let by_expiry = |list: Vec<&Reservation>| {
            option_lifecycle::sort_by_expiry(list)
                .into_iter()
                .cloned()
                .collect::<Vec<_>>()
        };
        let overview = OptionsOverview {
            requiring_action: by_expiry(option_lifecycle::filter_requiring_action(
                reservations,
                now,
                thresholds.expiring_soon_days,
            )),
            active: by_expiry(option_lifecycle::filter_active(reservations, now)),
            expired: by_expiry(option_lifecycle::filter_expired(reservations, now)),
            report: option_report::option_report(reservations, now, thresholds.report_window_days),
        };
        tracing::debug!(
            input = reservations.len(),
            requiring_action = overview.requiring_action.len(),
            active = overview.active.len(),
            expired = overview.expired.len(),
            "options overview"
        );
        overview
    }

    /// Lifecycle state, label and expiry badge for one reservation.
    #[must_use]
    pub fn classify_option(&self, reservation: &Reservation) -> OptionClassification {
        let now = self.now();
        let thresholds = self.thresholds();
        let window = thresholds.expiring_soon_days;
        let expiry = reservation.option_expiry();
        OptionClassification {
            reservation_id: reservation.id.clone(),
            state: option_lifecycle::classify(reservation, now, window),
            label: option_lifecycle::status_label(reservation, now, window),
            days_until_expiry: option_lifecycle::days_until_expiry(reservation, now),
            expiry_color: expiry.map(|e| tag_catalog::expiry_status_color(e, now, thresholds)),
            expiry_text: expiry.map(|e| tag_catalog::expiry_status_text(e, now)),
        }
    }

    /// Options to cancel because their expiry passed.
    #[must_use]
    pub fn expiry_sweep_plan(&self, reservations: &[Reservation]) -> ExpirySweepPlan {
        let plan = option_report::plan_expired_cancellations(reservations, self.now());
        tracing::info!(
            processed = plan.processed,
            cancellations = plan.cancellations.len(),
            "expiry sweep planned"
        );
        plan
    }

    /// Default option duration in days.
    #[must_use]
    pub fn default_option_duration_days(&self) -> u32 {
        self.catalog.default_option_duration_days(self.config.as_ref())
    }

    /// Option-term presets, optionally without the custom entry.
    #[must_use]
    pub fn option_terms(&self, available_only: bool) -> Vec<OptionTermPreset> {
        if available_only {
            self.catalog
                .available_option_durations()
                .into_iter()
                .cloned()
                .collect()
        } else {
            self.catalog.option_terms().to_vec()
        }
    }

    /// Expiry for an option placed now with preset `term_id`.
    ///
    /// # Errors
    ///
    /// [`WorkbenchError::OptionTermNotFound`] for unknown presets and
    /// [`WorkbenchError::InvalidRequest`] when the custom preset has no
    /// date.
    pub fn expiry_for_term(
        &self,
        term_id: &str,
        custom_date: Option<DateTime<Utc>>,
    ) -> Result<DateTime<Utc>, WorkbenchError> {
        if term_id != CUSTOM_TERM_ID && self.catalog.option_term_preset(term_id).is_none() {
            return Err(WorkbenchError::OptionTermNotFound(term_id.to_string()));
        }
        self.catalog
            .expiry_for_term(term_id, custom_date, self.now())
            .ok_or_else(|| {
                WorkbenchError::InvalidRequest(format!("option term {term_id} needs a custom date"))
            })
    }

    /// Expiry of an option placed at `placed_at` (default now) for `days`
    /// (default the configured option duration).
    ///
    /// # Errors
    ///
    /// [`WorkbenchError::DateOutOfRange`] when the result is not
    /// representable.
    pub fn place_option(
        &self,
        placed_at: Option<DateTime<Utc>>,
        days: Option<u32>,
    ) -> Result<DateTime<Utc>, WorkbenchError> {
        let placed_at = placed_at.unwrap_or_else(|| self.now());
        let days = days.unwrap_or_else(|| self.default_option_duration_days());
        option_lifecycle::calculate_expiry_date(&placed_at, i64::from(days))
    }

    /// Moves an expiry by `extra_days` calendar days.
    ///
    /// # Errors
    ///
    /// [`WorkbenchError::DateOutOfRange`] when the result is not
    /// representable.
    pub fn extend_option(
        &self,
        current_expiry: DateTime<Utc>,
        extra_days: i64,
    ) -> Result<DateTime<Utc>, WorkbenchError> {
        let extended = option_lifecycle::extend_expiry_date(&current_expiry, extra_days)?;
        tracing::debug!(%current_expiry, extra_days, %extended, "option extended");
        Ok(extended)
    }

    /// Tag with the given id.
    ///
    /// # Errors
    ///
    /// [`WorkbenchError::TagNotFound`] when the catalog has no such tag.
    pub fn tag(&self, id: &str) -> Result<&TagDefinition, WorkbenchError> {
        self.catalog
            .lookup_tag(id)
            .ok_or_else(|| WorkbenchError::TagNotFound(id.to_string()))
    }

    /// Refuses a catalog write. The catalog is built in and has no store.
    #[must_use]
    pub fn reject_tag_update(&self, id: &str) -> WorkbenchError {
        tracing::warn!(tag = id, "rejected write to read-only tag catalog");
        WorkbenchError::CatalogReadOnly(id.to_string())
    }

    /// Tags each reservation would carry after a bulk edit.
    ///
    /// # Errors
    ///
    /// [`WorkbenchError::TagNotFound`] when a tag is not in the catalog.
    pub fn bulk_tags(
        &self,
        reservations: &[Reservation],
        tags: &[TagReference],
        mode: BulkTagMode,
    ) -> Result<Vec<BulkTagResult>, WorkbenchError> {
        if let Some(unknown) = tags.iter().find(|t| self.catalog.lookup_tag(&t.id).is_none()) {
            return Err(WorkbenchError::TagNotFound(unknown.id.clone()));
        }
        let results: Vec<BulkTagResult> = reservations
            .iter()
            .map(|r| BulkTagResult {
                reservation_id: r.id.clone(),
                tags: tagging::apply_bulk_tags(&r.tags, tags, mode),
            })
            .collect();
        tracing::debug!(reservations = results.len(), tags = tags.len(), ?mode, "bulk tags");
        Ok(results)
    }

    /// Automatic-tag reconciliation for every reservation.
    #[must_use]
    pub fn tag_migration_preview(&self, reservations: &[Reservation]) -> MigrationPreview {
        let migrations: Vec<TagMigration> = reservations
            .iter()
            .map(tagging::reconcile_tags)
            .filter(|m| m.changed)
            .collect();
        tracing::info!(
            total = reservations.len(),
            needs_update = migrations.len(),
            "tag migration preview"
        );
        MigrationPreview {
            total: reservations.len(),
            needs_update: migrations.len(),
            migrations,
        }
    }
}
