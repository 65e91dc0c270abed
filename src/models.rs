use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single set within an exercise. Weight is stored in the unit the user
/// configured; completion is monotonic for the lifetime of the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSet {
    pub reps: u32,
    pub weight: f64,
    #[serde(default)]
    pub completed: bool,
}

/// An exercise inside a training day.
/// `completed` is either derived (every set done) or manually toggled;
/// `last_updated` moves on every field mutation except the manual toggle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub sets: Vec<ExerciseSet>,
    pub rest_seconds: u32,
    pub target_muscle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub completed: bool,
    pub last_updated: DateTime<Utc>,
}

impl Exercise {
    /// True when every set in the exercise has been completed.
    pub fn all_sets_completed(&self) -> bool {
        self.sets.iter().all(|s| s.completed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingDay {
    pub id: String,
    pub name: String,
    pub exercises: Vec<Exercise>,
    pub completed: bool,
}

/// The full weekly training structure. The day count is fixed once created;
/// a persisted plan whose day count disagrees with the built-in template is
/// structurally stale and gets discarded, never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPlan {
    pub id: String,
    pub name: String,
    pub days: Vec<TrainingDay>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: String,
    pub name: String,
    pub calories: u32,
    pub protein: u32,
    pub eaten: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eaten_date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub meal_type: MealType,
}

/// Today's meal checklist. Resets to defaults whenever the persisted date
/// differs from the current date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayMeals {
    pub date: NaiveDate,
    pub meals: Vec<Meal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Kg,
    Lbs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Pl,
    En,
}

/// App settings. Every field carries a serde default so a stored value from
/// an older schema still merges with the current defaults instead of being
/// thrown away wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_theme")]
    pub theme: Theme,
    #[serde(default)]
    pub notifications: bool,
    #[serde(default = "default_true")]
    pub auto_suggest_weight: bool,
    #[serde(default = "default_unit")]
    pub weight_unit: WeightUnit,
    #[serde(default = "default_language")]
    pub language: Language,
}

fn default_theme() -> Theme {
    Theme::Light
}

fn default_true() -> bool {
    true
}

fn default_unit() -> WeightUnit {
    WeightUnit::Kg
}

fn default_language() -> Language {
    Language::Pl
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            notifications: false,
            auto_suggest_weight: true,
            weight_unit: WeightUnit::Kg,
            language: Language::Pl,
        }
    }
}

/// Body girths, all in cm. Only what the user actually measured.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyParts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chest: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waist: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hips: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thighs: Option<f64>,
}

impl BodyParts {
    pub fn is_empty(&self) -> bool {
        self.chest.is_none()
            && self.waist.is_none()
            && self.hips.is_none()
            && self.arms.is_none()
            && self.thighs.is_none()
    }
}

/// One body-measurement entry. The list is append-only, newest first by
/// insertion. `date` is an opaque ISO string so remote rows round-trip
/// whether the backend stores plain dates or full timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyMeasurement {
    pub id: String,
    pub date: String,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_fat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurements: Option<BodyParts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutPhase {
    Exercise,
    Rest,
    Complete,
}

/// Position inside an in-progress workout, persisted so a workout survives
/// process restarts. Ignored on restore when the day id does not match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutState {
    pub day_id: String,
    pub exercise_index: usize,
    pub set_index: usize,
    pub phase: WorkoutPhase,
}
