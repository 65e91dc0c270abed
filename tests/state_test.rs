use chrono::{Duration, Utc};

use forma::defaults;
use forma::models::{BodyMeasurement, DayMeals, WeeklyPlan};
use forma::state::AppState;
use forma::store::{KEY_MEALS, KEY_PLAN, KEY_SETTINGS, Store};

async fn fresh_store() -> Store {
    Store::open_in_memory().await.expect("in-memory store")
}

#[tokio::test]
async fn first_run_installs_the_default_template() {
    let state = AppState::load(fresh_store().await).await.unwrap();

    assert_eq!(state.plan().days.len(), defaults::PLAN_DAYS);
    assert!(state.measurements().is_empty());
    assert_eq!(*state.settings(), Default::default());
}

#[tokio::test]
async fn structurally_stale_plan_is_reset_and_removed() {
    let store = fresh_store().await;

    // A plan with a different day count than the template.
    let mut stale = defaults::default_plan();
    stale.id = "old-plan".into();
    stale.days.truncate(1);
    store.write(KEY_PLAN, &stale).await.unwrap();

    let state = AppState::load(store.clone()).await.unwrap();

    assert_eq!(state.plan().days.len(), defaults::PLAN_DAYS);
    assert_ne!(state.plan().id, "old-plan");

    // The stale entry is gone from storage, not just shadowed.
    assert!(store.read_raw(KEY_PLAN).await.unwrap().is_none());
}

#[tokio::test]
async fn malformed_stored_plan_falls_back_to_the_default() {
    let store = fresh_store().await;
    store.write_raw(KEY_PLAN, "{definitely not json").await.unwrap();

    let state = AppState::load(store).await.unwrap();
    assert_eq!(state.plan().days.len(), defaults::PLAN_DAYS);
}

#[tokio::test]
async fn partially_compatible_settings_merge_with_defaults() {
    let store = fresh_store().await;
    store.write_raw(KEY_SETTINGS, r#"{"theme":"dark"}"#).await.unwrap();

    let state = AppState::load(store).await.unwrap();
    assert_eq!(state.settings().theme, forma::models::Theme::Dark);
    // Fields absent from the stored value keep their defaults.
    assert!(state.settings().auto_suggest_weight);
    assert_eq!(state.settings().weight_unit, forma::models::WeightUnit::Kg);
}

#[tokio::test]
async fn meals_roll_over_to_a_new_day() {
    let store = fresh_store().await;

    let yesterday = Utc::now().date_naive() - Duration::days(1);
    let mut old = defaults::default_meals(yesterday);
    for meal in &mut old.meals {
        meal.eaten = true;
        meal.eaten_date = Some(yesterday);
    }
    store.write(KEY_MEALS, &old).await.unwrap();

    let state = AppState::load(store).await.unwrap();
    assert_eq!(state.meals().date, Utc::now().date_naive());
    assert!(state.meals().meals.iter().all(|m| !m.eaten));
}

#[tokio::test]
async fn todays_meals_are_kept() {
    let store = fresh_store().await;

    let today = Utc::now().date_naive();
    let mut meals = defaults::default_meals(today);
    meals.meals[0].eaten = true;
    store.write(KEY_MEALS, &meals).await.unwrap();

    let state = AppState::load(store).await.unwrap();
    assert!(state.meals().meals[0].eaten);
}

#[tokio::test]
async fn facade_mutations_are_persisted() {
    let store = fresh_store().await;
    let mut state = AppState::load(store.clone()).await.unwrap();

    let day_id = state.plan().days[0].id.clone();
    let ex_id = state.plan().days[0].exercises[0].id.clone();

    state.set_weight(&day_id, &ex_id, 0, 77.5).await.unwrap();

    // In memory...
    assert_eq!(state.plan().days[0].exercises[0].sets[0].weight, 77.5);

    // ...and on disk, in one step from the caller's point of view.
    let stored: WeeklyPlan = store.read(KEY_PLAN).await.unwrap().expect("plan persisted");
    assert_eq!(stored.days[0].exercises[0].sets[0].weight, 77.5);
}

#[tokio::test]
async fn measurements_prepend_newest_first() {
    let store = fresh_store().await;
    let mut state = AppState::load(store).await.unwrap();

    let entry = |id: &str, weight: f64| BodyMeasurement {
        id: id.into(),
        date: Utc::now().to_rfc3339(),
        weight,
        height: None,
        body_fat: None,
        measurements: None,
        notes: None,
    };

    state.add_measurement(entry("first", 80.0)).await.unwrap();
    state.add_measurement(entry("second", 79.5)).await.unwrap();

    let ids: Vec<&str> = state.measurements().iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["second", "first"]);
}

#[tokio::test]
async fn workout_state_is_ignored_for_a_different_day() {
    let store = fresh_store().await;
    let state = AppState::load(store).await.unwrap();

    let ws = forma::models::WorkoutState {
        day_id: "day-push".into(),
        exercise_index: 1,
        set_index: 2,
        phase: forma::models::WorkoutPhase::Rest,
    };
    state.save_workout_state(&ws).await.unwrap();

    assert!(state.workout_state("day-pull").await.unwrap().is_none());

    let restored = state.workout_state("day-push").await.unwrap().expect("same day restores");
    assert_eq!(restored, ws);

    state.clear_workout_state().await.unwrap();
    assert!(state.any_workout_state().await.unwrap().is_none());
}

#[tokio::test]
async fn meal_checklist_reset_keeps_yesterdays_record_out() {
    // Saving a meal state always restamps with today's date, so a stale
    // checklist can never be written back.
    let store = fresh_store().await;
    let mut state = AppState::load(store.clone()).await.unwrap();

    let mut meals = state.meals().meals.clone();
    meals[1].eaten = true;
    state.save_meals(meals).await.unwrap();

    let stored: DayMeals = store.read(KEY_MEALS).await.unwrap().expect("meals persisted");
    assert_eq!(stored.date, Utc::now().date_naive());
    assert!(stored.meals[1].eaten);
}
