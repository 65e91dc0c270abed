use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::models::{
    DayMeals, Exercise, ExerciseSet, Meal, MealType, TrainingDay, WeeklyPlan,
};

/// Number of days in the canonical template. A persisted plan with a
/// different day count is structurally stale.
pub const PLAN_DAYS: usize = 3;

fn sets(count: usize, reps: u32, weight: f64) -> Vec<ExerciseSet> {
    (0..count)
        .map(|_| ExerciseSet {
            reps,
            weight,
            completed: false,
        })
        .collect()
}

fn exercise(
    id: &str,
    name: &str,
    muscle: &str,
    set_list: Vec<ExerciseSet>,
    rest_seconds: u32,
) -> Exercise {
    Exercise {
        id: id.into(),
        name: name.into(),
        sets: set_list,
        rest_seconds,
        target_muscle: muscle.into(),
        notes: None,
        completed: false,
        last_updated: Utc::now(),
    }
}

/// The built-in push/pull/legs template installed on first run and after an
/// explicit reset.
pub fn default_plan() -> WeeklyPlan {
    let now = Utc::now();
    WeeklyPlan {
        id: Uuid::new_v4().to_string(),
        name: "Push / Pull / Legs".into(),
        days: vec![
            TrainingDay {
                id: "day-push".into(),
                name: "Push".into(),
                completed: false,
                exercises: vec![
                    exercise("ex-bench", "Bench Press", "chest", sets(4, 8, 60.0), 180),
                    exercise("ex-ohp", "Overhead Press", "shoulders", sets(3, 10, 35.0), 150),
                    exercise("ex-incline-db", "Incline Dumbbell Press", "chest", sets(3, 10, 22.5), 120),
                    exercise("ex-pushdown", "Triceps Pushdown", "triceps", sets(3, 12, 25.0), 90),
                ],
            },
            TrainingDay {
                id: "day-pull".into(),
                name: "Pull".into(),
                completed: false,
                exercises: vec![
                    exercise("ex-deadlift", "Deadlift", "back", sets(3, 5, 100.0), 240),
                    exercise("ex-row", "Barbell Row", "back", sets(4, 8, 55.0), 150),
                    exercise("ex-pulldown", "Lat Pulldown", "back", sets(3, 10, 50.0), 120),
                    exercise("ex-curl", "Barbell Curl", "biceps", sets(3, 12, 25.0), 90),
                ],
            },
            TrainingDay {
                id: "day-legs".into(),
                name: "Legs".into(),
                completed: false,
                exercises: vec![
                    exercise("ex-squat", "Back Squat", "quads", sets(4, 6, 80.0), 240),
                    exercise("ex-rdl", "Romanian Deadlift", "hamstrings", sets(3, 10, 70.0), 180),
                    exercise("ex-legpress", "Leg Press", "quads", sets(3, 12, 120.0), 120),
                    exercise("ex-calf", "Standing Calf Raise", "calves", sets(4, 15, 60.0), 60),
                ],
            },
        ],
        created_at: now,
        updated_at: now,
    }
}

fn meal(id: &str, name: &str, calories: u32, protein: u32, meal_type: MealType) -> Meal {
    Meal {
        id: id.into(),
        name: name.into(),
        calories,
        protein,
        eaten: false,
        eaten_date: None,
        meal_type,
    }
}

/// Fresh meal checklist for `date`, all meals uneaten.
pub fn default_meals(date: NaiveDate) -> DayMeals {
    DayMeals {
        date,
        meals: vec![
            meal("meal-breakfast", "Oats with whey and banana", 520, 38, MealType::Breakfast),
            meal("meal-lunch", "Chicken, rice and vegetables", 680, 52, MealType::Lunch),
            meal("meal-dinner", "Salmon with potatoes", 610, 40, MealType::Dinner),
            meal("meal-snack", "Skyr with nuts", 310, 24, MealType::Snack),
        ],
    }
}
