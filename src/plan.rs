use chrono::Utc;

use crate::models::{Exercise, WeeklyPlan};

// Pure transforms over a WeeklyPlan value. Every function takes the plan by
// value and returns the (possibly unchanged) next plan; committing the result
// to storage is the facade's job. Unknown day/exercise ids and out-of-range
// set indices are silent no-ops: callers operate on values they just read
// from the same store.

fn exercise_mut<'a>(
    plan: &'a mut WeeklyPlan,
    day_id: &str,
    exercise_id: &str,
) -> Option<&'a mut Exercise> {
    plan.days
        .iter_mut()
        .find(|d| d.id == day_id)?
        .exercises
        .iter_mut()
        .find(|e| e.id == exercise_id)
}

/// Replace the weight of one set and stamp the exercise.
pub fn set_weight(
    mut plan: WeeklyPlan,
    day_id: &str,
    exercise_id: &str,
    set_index: usize,
    weight: f64,
) -> WeeklyPlan {
    if let Some(exercise) = exercise_mut(&mut plan, day_id, exercise_id) {
        if let Some(set) = exercise.sets.get_mut(set_index) {
            set.weight = weight;
            exercise.last_updated = Utc::now();
        }
    }
    plan
}

/// Replace the rep target of one set and stamp the exercise.
pub fn set_reps(
    mut plan: WeeklyPlan,
    day_id: &str,
    exercise_id: &str,
    set_index: usize,
    reps: u32,
) -> WeeklyPlan {
    if let Some(exercise) = exercise_mut(&mut plan, day_id, exercise_id) {
        if let Some(set) = exercise.sets.get_mut(set_index) {
            set.reps = reps;
            exercise.last_updated = Utc::now();
        }
    }
    plan
}

/// Mark one set completed. Monotonic: a completed set never reverts. When
/// the last open set closes, the exercise is marked completed as well; an
/// exercise completion already set (derived or manual) is never cleared here.
pub fn complete_set(
    mut plan: WeeklyPlan,
    day_id: &str,
    exercise_id: &str,
    set_index: usize,
) -> WeeklyPlan {
    if let Some(exercise) = exercise_mut(&mut plan, day_id, exercise_id) {
        if let Some(set) = exercise.sets.get_mut(set_index) {
            set.completed = true;
            exercise.last_updated = Utc::now();

            if exercise.all_sets_completed() {
                exercise.completed = true;
            }
        }
    }
    plan
}

/// Flip the exercise-level completion flag independent of set state. This is
/// the manual override path; it deliberately does not touch `last_updated`
/// and does not reconcile the underlying sets.
pub fn toggle_exercise_manual(
    mut plan: WeeklyPlan,
    day_id: &str,
    exercise_id: &str,
) -> WeeklyPlan {
    if let Some(exercise) = exercise_mut(&mut plan, day_id, exercise_id) {
        exercise.completed = !exercise.completed;
    }
    plan
}

/// Overwrite the free-form notes on an exercise and stamp it.
pub fn set_notes(
    mut plan: WeeklyPlan,
    day_id: &str,
    exercise_id: &str,
    text: &str,
) -> WeeklyPlan {
    if let Some(exercise) = exercise_mut(&mut plan, day_id, exercise_id) {
        exercise.notes = Some(text.to_string());
        exercise.last_updated = Utc::now();
    }
    plan
}
