//! Progression engine
//!
//! Owns the whole game state and is the only thing that mutates it. Every
//! public operation first reconciles the day list with the clock, then
//! validates, mutates, hands a snapshot to the persistence gateway, and
//! finally notifies listeners of what changed.
//!
//! # Day lifecycle
//!
//! A day is created `Open` (or directly `Missed` when backfilled for a past
//! date) and ends either `Filled` by a save or `Missed` once its date is
//! behind the clock. Each created day takes the pending allowance, after
//! which the next pending allowance is projected from it:
//!
//! | Day allowance `L` vs maximum `M` | Next allowance |
//! |---|---|
//! | `L < M` | `min(2L, M)` |
//! | `L >= M`, ceiling | `M` |
//! | `L >= M`, reset-and-restart | start amount |
//!
//! Projection runs for backfilled missed days too, so the allowance keeps
//! growing across days the user never opened.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use super::calendar::{self, Clock, SystemClock};
use super::events::{EngineEvent, EventListener};
use super::{achievement, categories, fx, language_switch, streak};
use crate::error::{DreamSpendError, DreamSpendResult};
use crate::models::{
    Achievement, AchievementKind, DayEntry, DayStatus, Language, MaxBehavior, Money, Settings,
    SpendItem,
};
use crate::storage::{DraftBucket, PersistenceGateway, Snapshot};

/// Percentage of the allowance that may be spent on a day
const OVERSPEND_PERCENT: i64 = 105;

/// Maximum total that may be saved against an allowance (floor of +5%)
pub fn allowed_total(limit: Money) -> Money {
    limit.percent_floor(OVERSPEND_PERCENT)
}

/// Result of a successful save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub day_index: u32,
    pub total: Money,
    pub status: DayStatus,
    pub reached_maximum: bool,
    pub earned: Vec<AchievementKind>,
}

/// The game's state owner
pub struct ProgressionEngine<P: PersistenceGateway, C: Clock = SystemClock> {
    store: P,
    clock: C,
    settings: Settings,
    days: Vec<DayEntry>,
    achievements: Vec<Achievement>,
    streak: u32,
    pending_allowance: Money,
    pending_currency: String,
    pending_rate: Option<Decimal>,
    paused: bool,
    celebration_pending: bool,
    drafts: BTreeMap<u32, Vec<SpendItem>>,
    custom_categories: Vec<String>,
    listeners: Vec<EventListener>,
    queued_events: Vec<EngineEvent>,
    dirty: bool,
}

impl<P: PersistenceGateway, C: Clock> ProgressionEngine<P, C> {
    /// Load the saved game, or start a new one with default settings
    pub fn load(store: P, clock: C) -> Self {
        Self::load_or(store, clock, Settings::default)
    }

    /// Load the saved game, or start a new one with the given settings
    pub fn load_or(store: P, clock: C, defaults: impl FnOnce() -> Settings) -> Self {
        Self::load_with(store, clock, defaults, Vec::new())
    }

    /// Load with listeners attached before the startup reconciliation
    pub fn load_with(
        store: P,
        clock: C,
        defaults: impl FnOnce() -> Settings,
        listeners: Vec<EventListener>,
    ) -> Self {
        let snapshot = match store.load() {
            Some(snapshot) => snapshot,
            None => {
                tracing::info!("No saved game found, starting a new one");
                Snapshot::bootstrap(defaults())
            }
        };

        let mut engine = Self::from_snapshot(store, clock, snapshot);
        engine.listeners = listeners;
        engine.reconcile();
        engine.commit();
        engine
    }

    fn from_snapshot(store: P, clock: C, snapshot: Snapshot) -> Self {
        let mut settings = snapshot.settings;
        settings.normalize();

        let mut days = snapshot.days;
        days.sort_by_key(|d| d.day_index);

        Self {
            store,
            clock,
            settings,
            days,
            achievements: snapshot.achievements,
            streak: snapshot.streak,
            pending_allowance: snapshot.pending_allowance,
            pending_currency: snapshot.pending_currency,
            pending_rate: snapshot.pending_rate,
            paused: snapshot.paused,
            celebration_pending: snapshot.celebration_pending,
            drafts: snapshot
                .draft_buckets
                .into_iter()
                .filter(|b| !b.items.is_empty())
                .map(|b| (b.day_index, b.items))
                .collect(),
            custom_categories: categories::unique(snapshot.custom_categories),
            listeners: Vec::new(),
            queued_events: Vec::new(),
            // Settings normalization and legacy decoding are written back on first commit
            dirty: true,
        }
    }

    /// Register a listener for committed events
    pub fn subscribe(&mut self, listener: impl FnMut(&EngineEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Full persistable state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            schema_version: crate::storage::snapshot::SCHEMA_VERSION,
            settings: self.settings.clone(),
            days: self.days.clone(),
            achievements: self.achievements.clone(),
            streak: self.streak,
            pending_allowance: self.pending_allowance,
            pending_currency: self.pending_currency.clone(),
            pending_rate: self.pending_rate,
            paused: self.paused,
            celebration_pending: self.celebration_pending,
            draft_buckets: self
                .drafts
                .iter()
                .map(|(day_index, items)| DraftBucket {
                    day_index: *day_index,
                    items: items.clone(),
                })
                .collect(),
            custom_categories: self.custom_categories.clone(),
        }
    }

    // === Queries ===

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Days in `day_index` order
    pub fn days(&self) -> &[DayEntry] {
        &self.days
    }

    /// Days newest first
    pub fn history(&self) -> Vec<&DayEntry> {
        self.days.iter().rev().collect()
    }

    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Allowance of the next day to be created
    pub fn pending_allowance(&self) -> Money {
        self.pending_allowance
    }

    pub fn pending_currency(&self) -> &str {
        &self.pending_currency
    }

    pub fn pending_rate(&self) -> Option<Decimal> {
        self.pending_rate
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// A day at the maximum was saved and the celebration not yet dismissed
    pub fn celebration_pending(&self) -> bool {
        self.celebration_pending
    }

    pub fn custom_categories(&self) -> &[String] {
        &self.custom_categories
    }

    /// Built-in categories of the active language
    pub fn default_categories(&self) -> &'static [&'static str] {
        self.settings.language.default_categories()
    }

    /// Defaults followed by custom categories, without case-insensitive duplicates
    pub fn category_suggestions(&self) -> Vec<String> {
        categories::unique(
            self.default_categories()
                .iter()
                .copied()
                .chain(self.custom_categories.iter().map(String::as_str)),
        )
    }

    /// Today's entry as of the last reconciliation
    pub fn today_entry(&self) -> Option<&DayEntry> {
        let today = self.clock.today();
        self.days.iter().rev().find(|d| d.date == today)
    }

    /// Share of the active language's maximum reached by today's allowance (0..=1)
    pub fn progress_to_max(&self) -> f64 {
        let Some(today) = self.today_entry() else {
            return 0.0;
        };
        let max = self
            .settings
            .max_amount_for(self.settings.language)
            .at_least(1)
            .minor() as f64;
        (today.daily_limit.minor() as f64 / max).clamp(0.0, 1.0)
    }

    // === Day lifecycle ===

    /// Bring the day list up to date with the clock
    pub fn ensure_today(&mut self) {
        self.reconcile();
        self.commit();
    }

    /// Reconcile and return today's entry
    pub fn today(&mut self) -> Option<&DayEntry> {
        self.ensure_today();
        self.today_entry()
    }

    /// Save today's spending, marking the day filled
    pub fn save_today(&mut self, items: Vec<SpendItem>) -> DreamSpendResult<SaveOutcome> {
        self.reconcile();
        let result = self.save_today_inner(items);
        self.commit();
        result
    }

    fn save_today_inner(&mut self, items: Vec<SpendItem>) -> DreamSpendResult<SaveOutcome> {
        let index = self
            .today_position()
            .ok_or_else(|| DreamSpendError::day_not_found("today"))?;

        let items = prepare_items(items)?;
        if items.is_empty() {
            return Err(DreamSpendError::EmptySave);
        }
        check_allowance(&self.days[index], &items)?;

        Ok(self.fill_today(index, items))
    }

    /// Save the spending of any existing day
    ///
    /// Today's day behaves like [`save_today`](Self::save_today). A past day
    /// becomes filled, or missed when `items` is empty, without touching the
    /// streak or achievements.
    pub fn save_day(
        &mut self,
        day_index: u32,
        items: Vec<SpendItem>,
    ) -> DreamSpendResult<SaveOutcome> {
        self.reconcile();
        let result = self.save_day_inner(day_index, items);
        self.commit();
        result
    }

    fn save_day_inner(
        &mut self,
        day_index: u32,
        items: Vec<SpendItem>,
    ) -> DreamSpendResult<SaveOutcome> {
        let index = self
            .days
            .iter()
            .position(|d| d.day_index == day_index)
            .ok_or_else(|| DreamSpendError::day_not_found(day_index.to_string()))?;

        let items = prepare_items(items)?;
        check_allowance(&self.days[index], &items)?;

        if self.today_position() == Some(index) {
            if items.is_empty() {
                return Err(DreamSpendError::EmptySave);
            }
            return Ok(self.fill_today(index, items));
        }

        let status = if items.is_empty() {
            DayStatus::Missed
        } else {
            DayStatus::Filled
        };
        self.merge_categories(&items);

        let day = &mut self.days[index];
        day.items = items;
        day.status = status;
        let total = day.total_spent();
        self.drafts.remove(&day_index);

        self.queued_events.push(match status {
            DayStatus::Missed => EngineEvent::DayMissed { day_index },
            _ => EngineEvent::DayFilled { day_index, total },
        });
        self.dirty = true;
        tracing::info!(day_index, total = total.minor(), %status, "Saved past day");

        Ok(SaveOutcome {
            day_index,
            total,
            status,
            reached_maximum: false,
            earned: Vec::new(),
        })
    }

    /// Commit already-validated items to today's entry
    fn fill_today(&mut self, index: usize, items: Vec<SpendItem>) -> SaveOutcome {
        let now = self.clock.now().with_timezone(&Utc);
        self.merge_categories(&items);

        let day = &mut self.days[index];
        let was_filled = day.status == DayStatus::Filled;
        day.items = items;
        day.status = DayStatus::Filled;
        let day_index = day.day_index;
        let total = day.total_spent();
        self.drafts.remove(&day_index);

        if !was_filled {
            self.streak = streak::next_streak(self.streak, true);
        }

        let day = &self.days[index];
        let reached_maximum =
            day.daily_limit >= self.settings.max_amount_for_currency(&day.currency);
        let earned = achievement::evaluate(
            &mut self.achievements,
            self.streak,
            day,
            reached_maximum,
            now,
        );

        self.queued_events
            .push(EngineEvent::DayFilled { day_index, total });
        for kind in &earned {
            self.queued_events
                .push(EngineEvent::AchievementEarned { kind: *kind });
        }
        if reached_maximum {
            self.celebration_pending = true;
            self.queued_events
                .push(EngineEvent::ReachedMaximum { day_index });
        }
        self.dirty = true;
        tracing::info!(
            day_index,
            total = total.minor(),
            streak = self.streak,
            reached_maximum,
            "Saved today"
        );

        SaveOutcome {
            day_index,
            total,
            status: DayStatus::Filled,
            reached_maximum,
            earned,
        }
    }

    // === Drafts ===

    /// In-progress items for a day (empty when there is no draft)
    pub fn draft_items(&mut self, day_index: u32) -> Vec<SpendItem> {
        self.ensure_today();
        self.drafts.get(&day_index).cloned().unwrap_or_default()
    }

    /// Replace the draft of an open day; an empty list removes it
    pub fn set_draft_items(
        &mut self,
        day_index: u32,
        items: Vec<SpendItem>,
    ) -> DreamSpendResult<()> {
        self.reconcile();
        let result = self.set_draft_inner(day_index, items);
        self.commit();
        result
    }

    fn set_draft_inner(&mut self, day_index: u32, items: Vec<SpendItem>) -> DreamSpendResult<()> {
        let day = self
            .days
            .iter()
            .find(|d| d.day_index == day_index)
            .ok_or_else(|| DreamSpendError::day_not_found(day_index.to_string()))?;
        if !day.is_open() {
            return Err(DreamSpendError::DayNotOpen(day_index));
        }

        if items.is_empty() {
            if self.drafts.remove(&day_index).is_none() {
                return Ok(());
            }
        } else {
            let items = items.into_iter().map(SpendItem::normalized).collect();
            self.drafts.insert(day_index, items);
        }

        self.queued_events.push(EngineEvent::DraftChanged { day_index });
        self.dirty = true;
        Ok(())
    }

    // === Categories ===

    /// Add a custom category; returns false for blank or duplicate names
    pub fn add_custom_category(&mut self, category: &str) -> bool {
        self.reconcile();
        let value = categories::normalize(category);
        let changed = !value.is_empty() && {
            let merged = categories::unique(
                self.custom_categories
                    .iter()
                    .map(String::as_str)
                    .chain(std::iter::once(value.as_str())),
            );
            let grew = merged.len() != self.custom_categories.len();
            self.custom_categories = merged;
            grew
        };
        if changed {
            self.queued_events.push(EngineEvent::CategoriesChanged);
            self.dirty = true;
        }
        self.commit();
        changed
    }

    /// Remove a custom category (case-insensitive); returns whether it existed
    pub fn remove_custom_category(&mut self, category: &str) -> bool {
        self.reconcile();
        let removed = !category.trim().is_empty()
            && categories::remove(&mut self.custom_categories, category);
        if removed {
            self.queued_events.push(EngineEvent::CategoriesChanged);
            self.dirty = true;
        }
        self.commit();
        removed
    }

    fn merge_categories(&mut self, items: &[SpendItem]) {
        let merged = categories::merge_from_items(&self.custom_categories, items);
        if merged != self.custom_categories {
            self.custom_categories = merged;
            self.queued_events.push(EngineEvent::CategoriesChanged);
        }
    }

    // === Settings ===

    /// Switch the active language, converting the pending allowance
    pub fn switch_language(&mut self, language: Language) {
        self.reconcile();
        let previous = self.settings.language;
        if previous != language {
            let switch = language_switch::switch_language(
                self.pending_allowance,
                &self.pending_currency,
                language,
                &self.settings,
            );

            self.settings.language = language;
            self.pending_allowance = switch.amount;
            self.pending_currency = switch.currency;
            self.pending_rate = Some(switch.rate_used);

            tracing::info!(
                from = %previous,
                to = %language,
                pending = switch.amount.minor(),
                rate = %switch.rate_used,
                "Switched language"
            );
            self.queued_events.push(EngineEvent::LanguageSwitched {
                from: previous,
                to: language,
                pending_allowance: switch.amount,
                rate_used: switch.rate_used,
            });
            self.dirty = true;
        }
        self.commit();
    }

    /// Set the start allowance of a language (at least one minor unit)
    pub fn update_start_amount(&mut self, language: Language, amount: Money) {
        self.reconcile();
        self.settings
            .start_amount_by_language
            .insert(language, amount.at_least(1));
        self.queued_events
            .push(EngineEvent::AmountsChanged { language });
        self.dirty = true;
        self.commit();
    }

    /// Set the maximum allowance of a language (at least one minor unit)
    pub fn update_max_amount(&mut self, language: Language, amount: Money) {
        self.reconcile();
        self.settings
            .max_amount_by_language
            .insert(language, amount.at_least(1));
        self.queued_events
            .push(EngineEvent::AmountsChanged { language });
        self.dirty = true;
        self.commit();
    }

    pub fn update_max_behavior(&mut self, behavior: MaxBehavior) {
        self.reconcile();
        self.settings.max_behavior = behavior;
        self.queued_events
            .push(EngineEvent::MaxBehaviorChanged { behavior });
        self.dirty = true;
        self.commit();
    }

    /// Set the reminder time (clamped to 0-23 / 0-59) and enabled flag
    pub fn update_reminder(&mut self, hour: u8, minute: u8, enabled: bool) {
        self.reconcile();
        self.settings.reminder_hour = hour.min(23);
        self.settings.reminder_minute = minute.min(59);
        self.settings.notifications_enabled = enabled;
        self.queued_events.push(EngineEvent::ReminderChanged {
            hour: self.settings.reminder_hour,
            minute: self.settings.reminder_minute,
            enabled,
        });
        self.dirty = true;
        self.commit();
    }

    /// Set a directed FX rate (and its reciprocal when non-zero)
    pub fn update_fx_rate(&mut self, source: &str, target: &str, rate: Decimal) {
        self.reconcile();
        let source = source.trim().to_uppercase();
        let target = target.trim().to_uppercase();
        fx::update_table(&mut self.settings.approx_fx_table, &source, &target, rate);
        tracing::info!(%source, %target, %rate, "Updated FX rate");
        self.queued_events.push(EngineEvent::FxRateUpdated {
            source,
            target,
            rate,
        });
        self.dirty = true;
        self.commit();
    }

    /// Start over from day 1, keeping settings and custom categories
    pub fn restart(&mut self) {
        let language = self.settings.language;
        self.days.clear();
        self.streak = 0;
        self.paused = false;
        self.celebration_pending = false;
        self.drafts.clear();
        self.pending_allowance = self.settings.start_amount_for(language);
        self.pending_currency = self.settings.currency_for(language).to_string();
        self.pending_rate = None;
        self.achievements = achievement::bootstrap();
        self.queued_events.push(EngineEvent::GameRestarted);
        self.dirty = true;
        tracing::info!(%language, start = self.pending_allowance.minor(), "Restarted game");

        self.reconcile();
        self.commit();
    }

    /// Clear the "reached maximum" celebration flag
    pub fn dismiss_celebration(&mut self) {
        self.reconcile();
        if self.celebration_pending {
            self.celebration_pending = false;
            self.queued_events.push(EngineEvent::CelebrationDismissed);
            self.dirty = true;
        }
        self.commit();
    }

    // === Internals ===

    fn today_position(&self) -> Option<usize> {
        let today = self.clock.today();
        self.days.iter().rposition(|d| d.date == today)
    }

    /// Catch the day list up with the clock
    ///
    /// The streak reset only sees days dated before today; today's open entry
    /// is left out of the trailing pair.
    fn reconcile(&mut self) {
        if self.paused {
            tracing::debug!("Game paused, day list frozen");
            return;
        }

        let today = self.clock.today();
        self.days.sort_by_key(|d| d.day_index);

        let Some(last_date) = self.days.last().map(|d| d.date) else {
            self.create_day(today, DayStatus::Open);
            return;
        };

        for day in self.days.iter_mut().filter(|d| d.is_open() && d.date < today) {
            day.status = DayStatus::Missed;
            self.queued_events.push(EngineEvent::DayMissed {
                day_index: day.day_index,
            });
            self.dirty = true;
        }

        let distance = calendar::day_distance(last_date, today);
        for step in 1..=distance {
            let date = calendar::add_days(last_date, step);
            let status = if date == today {
                DayStatus::Open
            } else {
                DayStatus::Missed
            };
            self.create_day(date, status);
        }

        let settled = self.days.partition_point(|d| d.date < today);
        if streak::should_reset(&self.days[..settled]) && self.streak != 0 {
            tracing::debug!(streak = self.streak, "Two missed days, resetting streak");
            self.streak = 0;
            self.queued_events.push(EngineEvent::StreakReset);
            self.dirty = true;
        }

        self.purge_drafts();
    }

    fn create_day(&mut self, date: NaiveDate, status: DayStatus) {
        let day_index = self.days.last().map_or(1, |d| d.day_index + 1);
        let mut day = DayEntry::new(
            day_index,
            date,
            self.pending_currency.clone(),
            self.pending_allowance,
            status,
        );
        day.conversion_rate = self.pending_rate.take();
        self.pending_allowance = self.projected_allowance(day.daily_limit, &day.currency);

        tracing::debug!(
            day_index,
            %date,
            %status,
            allowance = day.daily_limit.minor(),
            next = self.pending_allowance.minor(),
            "Created day"
        );
        self.queued_events.push(EngineEvent::DayCreated {
            day_index,
            missed: status == DayStatus::Missed,
            allowance: day.daily_limit,
            currency: day.currency.clone(),
        });
        self.days.push(day);
        self.dirty = true;
    }

    /// Allowance for the day after one with allowance `limit` in `currency`
    fn projected_allowance(&self, limit: Money, currency: &str) -> Money {
        let max = self.settings.max_amount_for_currency(currency);
        if limit < max {
            return limit.doubled().min(max);
        }
        match self.settings.max_behavior {
            MaxBehavior::Ceiling => max,
            MaxBehavior::ResetAndRestart => self.settings.start_amount_for_currency(currency),
        }
    }

    fn purge_drafts(&mut self) {
        let days = &self.days;
        let before = self.drafts.len();
        self.drafts
            .retain(|day_index, _| days.iter().any(|d| d.day_index == *day_index && d.is_open()));
        if self.drafts.len() != before {
            self.dirty = true;
        }
    }

    /// Persist if anything changed, then deliver queued events
    fn commit(&mut self) {
        if self.dirty {
            self.store.save(&self.snapshot());
            self.dirty = false;
        }

        let events = std::mem::take(&mut self.queued_events);
        for event in &events {
            tracing::debug!(event = event.name(), "Engine event");
            for listener in self.listeners.iter_mut() {
                listener(event);
            }
        }
    }
}

fn prepare_items(items: Vec<SpendItem>) -> DreamSpendResult<Vec<SpendItem>> {
    items
        .into_iter()
        .map(SpendItem::normalized)
        .map(|item| {
            item.validate()
                .map(|_| item)
                .map_err(|e| DreamSpendError::Validation(e.to_string()))
        })
        .collect()
}

fn check_allowance(day: &DayEntry, items: &[SpendItem]) -> DreamSpendResult<()> {
    let total = crate::models::spend_item::total_of(items);
    let allowed = allowed_total(day.daily_limit);
    if total > allowed {
        return Err(DreamSpendError::Overspend {
            total: total.minor(),
            allowed: allowed.minor(),
        });
    }
    Ok(())
}
