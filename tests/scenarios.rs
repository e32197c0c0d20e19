//! End-to-end game scenarios against the file-backed store.

use chrono::NaiveDate;
use dreamspend::models::{AchievementKind, DayStatus, Language, Money, Settings, SpendItem};
use dreamspend::services::{ManualClock, ProgressionEngine};
use dreamspend::storage::{JsonFileStore, PersistenceGateway};
use rust_decimal_macros::dec;
use tempfile::TempDir;

fn clock() -> ManualClock {
    ManualClock::at_noon(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
}

fn item(title: &str, minor: i64) -> SpendItem {
    SpendItem::new(title, Money::from_minor(minor), None)
}

#[test]
fn test_full_fill_doubles_the_next_day() {
    let temp = TempDir::new().unwrap();
    let store = JsonFileStore::new(temp.path().join("snapshot.json"));
    let clock = clock();
    let mut engine =
        ProgressionEngine::load_or(store, clock.clone(), || Settings::for_language(Language::En));

    engine
        .save_today(vec![item("Lunch", 300), item("Coffee", 200)])
        .unwrap();
    clock.advance_days(1);

    let today = engine.today().unwrap();
    assert_eq!(today.day_index, 2);
    assert_eq!(today.daily_limit.minor(), 1000);
}

#[test]
fn test_language_switch_converts_next_allowance() {
    let temp = TempDir::new().unwrap();
    let store = JsonFileStore::new(temp.path().join("snapshot.json"));
    let clock = clock();
    let mut settings = Settings::for_language(Language::En);
    settings.start_amount_by_language.insert(Language::En, Money::from_minor(5_000));
    let mut engine = ProgressionEngine::load_or(store, clock.clone(), move || settings);
    engine.update_fx_rate("USD", "EUR", dec!(0.9));

    // Day 1 is 5000, so the next allowance is 10000 USD
    assert_eq!(engine.pending_allowance().minor(), 10_000);
    engine.switch_language(Language::De);
    assert_eq!(engine.pending_allowance().minor(), 9_000);
    assert_eq!(engine.pending_currency(), "EUR");
}

#[test]
fn test_two_missed_days_reset_the_streak() {
    let temp = TempDir::new().unwrap();
    let store = JsonFileStore::new(temp.path().join("snapshot.json"));
    let clock = clock();
    let mut engine =
        ProgressionEngine::load_or(store, clock.clone(), || Settings::for_language(Language::En));

    engine.save_today(vec![item("Book", 100)]).unwrap();
    assert_eq!(engine.streak(), 1);

    // Days 2 and 3 pass without a save
    clock.advance_days(3);
    engine.ensure_today();

    let statuses: Vec<_> = engine.days().iter().map(|d| d.status).collect();
    assert_eq!(
        statuses,
        vec![
            DayStatus::Filled,
            DayStatus::Missed,
            DayStatus::Missed,
            DayStatus::Open
        ]
    );
    assert_eq!(engine.streak(), 0);
}

#[test]
fn test_restart_uses_configured_start_amount() {
    let temp = TempDir::new().unwrap();
    let store = JsonFileStore::new(temp.path().join("snapshot.json"));
    let clock = clock();
    let mut engine =
        ProgressionEngine::load_or(store, clock.clone(), || Settings::for_language(Language::En));

    engine.update_start_amount(Language::En, Money::from_minor(12_345));
    engine.update_max_amount(Language::En, Money::from_minor(99_999));
    clock.advance_days(4);
    engine.restart();

    assert_eq!(engine.days().len(), 1);
    assert_eq!(engine.days()[0].daily_limit.minor(), 12_345);
    assert_eq!(engine.pending_allowance().minor(), 24_690);
}

#[test]
fn test_state_round_trips_through_the_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("snapshot.json");
    let clock = clock();

    {
        let mut engine = ProgressionEngine::load_or(
            JsonFileStore::new(path.clone()),
            clock.clone(),
            || Settings::for_language(Language::Ru),
        );
        engine
            .save_today(vec![SpendItem::new(
                "Кофе",
                Money::from_minor(50_000),
                Some("Еда"),
            )])
            .unwrap();
        engine.update_reminder(8, 5, true);
    }

    let stored = JsonFileStore::new(path.clone()).load().unwrap();
    assert_eq!(stored.streak, 1);
    assert_eq!(stored.settings.reminder_hour, 8);

    let engine = ProgressionEngine::load(JsonFileStore::new(path), clock);
    assert_eq!(engine.settings().language, Language::Ru);
    assert_eq!(engine.days()[0].status, DayStatus::Filled);
    assert_eq!(engine.custom_categories(), ["Еда"]);
    assert!(engine
        .achievements()
        .iter()
        .any(|a| a.kind == AchievementKind::PerfectFill && a.is_earned()));
}

#[test]
fn test_corrupt_snapshot_starts_fresh() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("snapshot.json");
    std::fs::write(&path, "{ definitely not json").unwrap();

    let engine = ProgressionEngine::load_or(JsonFileStore::new(path.clone()), clock(), || {
        Settings::for_language(Language::De)
    });
    assert_eq!(engine.days().len(), 1);
    assert_eq!(engine.days()[0].currency, "EUR");

    // The fresh game replaced the unreadable file
    let reloaded = JsonFileStore::new(path).load().unwrap();
    assert_eq!(reloaded.days.len(), 1);
}
