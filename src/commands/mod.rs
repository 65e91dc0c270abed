use colored::Colorize;

use crate::models::{Exercise, TrainingDay, WeeklyPlan};
use crate::types::closest_match;

pub mod config;
pub mod db;
pub mod meals;
pub mod measure;
pub mod plan;
pub mod settings;
pub mod status;
pub mod sync;
pub mod workout;

/// Resolve a training day from a 1-based index, id or (case-insensitive)
/// name. Human input is resolved here, at the CLI boundary; the mutators
/// below this layer only ever see ids.
pub(crate) fn resolve_day<'a>(plan: &'a WeeklyPlan, key: &str) -> Option<&'a TrainingDay> {
    if let Ok(idx) = key.parse::<usize>() {
        return idx.checked_sub(1).and_then(|i| plan.days.get(i));
    }

    plan.days
        .iter()
        .find(|d| d.id == key || d.name.eq_ignore_ascii_case(key))
}

pub(crate) fn resolve_exercise<'a>(day: &'a TrainingDay, key: &str) -> Option<&'a Exercise> {
    if let Ok(idx) = key.parse::<usize>() {
        return idx.checked_sub(1).and_then(|i| day.exercises.get(i));
    }

    day.exercises
        .iter()
        .find(|e| e.id == key || e.name.eq_ignore_ascii_case(key))
}

pub(crate) fn warn_unknown_day(plan: &WeeklyPlan, key: &str) {
    let names = plan.days.iter().map(|d| d.name.as_str());
    match closest_match(key, names) {
        Some(suggestion) => println!(
            "{} no day `{}` -- did you mean: `{}`?",
            "error:".red().bold(),
            key,
            suggestion.green()
        ),
        None => println!("{} no day `{}` in the current plan", "error:".red().bold(), key),
    }
}

pub(crate) fn warn_unknown_exercise(day: &TrainingDay, key: &str) {
    let names = day.exercises.iter().map(|e| e.name.as_str());
    match closest_match(key, names) {
        Some(suggestion) => println!(
            "{} no exercise `{}` in `{}` -- did you mean: `{}`?",
            "error:".red().bold(),
            key,
            day.name,
            suggestion.green()
        ),
        None => println!(
            "{} no exercise `{}` in `{}`",
            "error:".red().bold(),
            key,
            day.name
        ),
    }
}
