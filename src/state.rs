use anyhow::Result;
use tracing::{debug, warn};

use crate::defaults;
use crate::models::{
    BodyMeasurement, DayMeals, Meal, Settings, WeeklyPlan, WorkoutState,
};
use crate::plan;
use crate::store::{
    KEY_MEALS, KEY_MEASUREMENTS, KEY_PLAN, KEY_SETTINGS, KEY_WORKOUT, Store,
};
use crate::utils;

/// The single read/write surface over the persisted store. Owns in-memory
/// copies of every record; every mutation applies the pure transform, writes
/// the result to the store, then installs it in memory. The `&mut self`
/// receivers are the single-writer policy: nothing can mutate the plan while
/// a reconciliation run holds the exclusive borrow.
pub struct AppState {
    store: Store,
    plan: WeeklyPlan,
    meals: DayMeals,
    settings: Settings,
    measurements: Vec<BodyMeasurement>,
}

impl AppState {
    /// Load every record from the store, substituting defaults where a value
    /// is absent, malformed, or stale.
    pub async fn load(store: Store) -> Result<Self> {
        let today = utils::today();

        // Plan, with the structural-staleness check: a stored plan whose day
        // count disagrees with the template is discarded, never merged.
        let plan = match store.read::<WeeklyPlan>(KEY_PLAN).await? {
            Some(stored) if stored.days.len() == defaults::PLAN_DAYS => stored,
            Some(stored) => {
                warn!(
                    stored_days = stored.days.len(),
                    expected = defaults::PLAN_DAYS,
                    "stored plan is structurally stale, resetting to template"
                );
                store.remove(KEY_PLAN).await?;
                defaults::default_plan()
            }
            None => defaults::default_plan(),
        };

        // Meals roll over at midnight: yesterday's checklist is replaced by a
        // fresh one instead of being carried forward.
        let meals = match store.read::<DayMeals>(KEY_MEALS).await? {
            Some(stored) if stored.date == today => stored,
            Some(_) => {
                debug!("meal checklist is from a previous day, resetting");
                defaults::default_meals(today)
            }
            None => defaults::default_meals(today),
        };

        let settings = store
            .read::<Settings>(KEY_SETTINGS)
            .await?
            .unwrap_or_default();

        let measurements = store
            .read::<Vec<BodyMeasurement>>(KEY_MEASUREMENTS)
            .await?
            .unwrap_or_default();

        Ok(Self {
            store,
            plan,
            meals,
            settings,
            measurements,
        })
    }

    pub fn plan(&self) -> &WeeklyPlan {
        &self.plan
    }

    pub fn meals(&self) -> &DayMeals {
        &self.meals
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn measurements(&self) -> &[BodyMeasurement] {
        &self.measurements
    }

    async fn commit_plan(&mut self, next: WeeklyPlan) -> Result<()> {
        self.store.write(KEY_PLAN, &next).await?;
        self.plan = next;
        Ok(())
    }

    pub async fn set_weight(
        &mut self,
        day_id: &str,
        exercise_id: &str,
        set_index: usize,
        weight: f64,
    ) -> Result<()> {
        let next = plan::set_weight(self.plan.clone(), day_id, exercise_id, set_index, weight);
        self.commit_plan(next).await
    }

    pub async fn set_reps(
        &mut self,
        day_id: &str,
        exercise_id: &str,
        set_index: usize,
        reps: u32,
    ) -> Result<()> {
        let next = plan::set_reps(self.plan.clone(), day_id, exercise_id, set_index, reps);
        self.commit_plan(next).await
    }

    pub async fn complete_set(
        &mut self,
        day_id: &str,
        exercise_id: &str,
        set_index: usize,
    ) -> Result<()> {
        let next = plan::complete_set(self.plan.clone(), day_id, exercise_id, set_index);
        self.commit_plan(next).await
    }

    pub async fn toggle_exercise(&mut self, day_id: &str, exercise_id: &str) -> Result<()> {
        let next = plan::toggle_exercise_manual(self.plan.clone(), day_id, exercise_id);
        self.commit_plan(next).await
    }

    pub async fn set_notes(&mut self, day_id: &str, exercise_id: &str, text: &str) -> Result<()> {
        let next = plan::set_notes(self.plan.clone(), day_id, exercise_id, text);
        self.commit_plan(next).await
    }

    /// Unconditional whole-plan replacement, used by the reconciliation
    /// engine and by snapshot import.
    pub async fn replace_plan(&mut self, next: WeeklyPlan) -> Result<()> {
        self.commit_plan(next).await
    }

    /// Reset to the built-in template, dropping all recorded progress.
    pub async fn reset_plan(&mut self) -> Result<()> {
        self.commit_plan(defaults::default_plan()).await
    }

    /// Persist today's meal checklist, restamping it with today's date.
    pub async fn save_meals(&mut self, meals: Vec<Meal>) -> Result<()> {
        let next = DayMeals {
            date: utils::today(),
            meals,
        };
        self.store.write(KEY_MEALS, &next).await?;
        self.meals = next;
        Ok(())
    }

    pub async fn update_settings(&mut self, next: Settings) -> Result<()> {
        self.store.write(KEY_SETTINGS, &next).await?;
        self.settings = next;
        Ok(())
    }

    /// Prepend a measurement: the list is newest first by insertion.
    pub async fn add_measurement(&mut self, measurement: BodyMeasurement) -> Result<()> {
        let mut next = Vec::with_capacity(self.measurements.len() + 1);
        next.push(measurement);
        next.extend(self.measurements.iter().cloned());
        self.store.write(KEY_MEASUREMENTS, &next).await?;
        self.measurements = next;
        Ok(())
    }

    /// Wholesale replacement, used by the reconciliation engine.
    pub async fn replace_measurements(&mut self, next: Vec<BodyMeasurement>) -> Result<()> {
        self.store.write(KEY_MEASUREMENTS, &next).await?;
        self.measurements = next;
        Ok(())
    }

    /// Restore an in-progress workout for `day_id`. A saved state belonging
    /// to a different day is ignored (the stale entry stays until the next
    /// save or clear overwrites it).
    pub async fn workout_state(&self, day_id: &str) -> Result<Option<WorkoutState>> {
        Ok(self
            .store
            .read::<WorkoutState>(KEY_WORKOUT)
            .await?
            .filter(|s| s.day_id == day_id))
    }

    /// Current workout position regardless of day, for `workout status`.
    pub async fn any_workout_state(&self) -> Result<Option<WorkoutState>> {
        self.store.read::<WorkoutState>(KEY_WORKOUT).await
    }

    pub async fn save_workout_state(&self, state: &WorkoutState) -> Result<()> {
        self.store.write(KEY_WORKOUT, state).await
    }

    pub async fn clear_workout_state(&self) -> Result<()> {
        self.store.remove(KEY_WORKOUT).await
    }
}
