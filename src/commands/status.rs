use anyhow::Result;
use colored::Colorize;
use itertools::Itertools;
use serde::Serialize;

use crate::models::Exercise;
use crate::state::AppState;
use crate::types::{OutputFmt, best_muscle_suggestion, canonical_muscle, emit};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MuscleJson {
    muscle: String,
    completed: usize,
    total: usize,
    completed_sets: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TopExerciseJson {
    name: String,
    max_weight: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusJson {
    completed_exercises: usize,
    total_exercises: usize,
    total_sets: usize,
    total_reps: u64,
    tonnage: f64,
    workout_days: usize,
    muscles: Vec<MuscleJson>,
    top_exercises: Vec<TopExerciseJson>,
    latest_weight: Option<f64>,
}

fn completed_sets(exercise: &Exercise) -> impl Iterator<Item = &crate::models::ExerciseSet> {
    exercise.sets.iter().filter(|s| s.completed)
}

fn build_status(state: &AppState, muscle: Option<&str>) -> StatusJson {
    let all: Vec<&Exercise> = state
        .plan()
        .days
        .iter()
        .flat_map(|d| d.exercises.iter())
        .filter(|e| muscle.is_none_or(|m| e.target_muscle == m))
        .collect();

    let completed: Vec<&&Exercise> = all.iter().filter(|e| e.completed).collect();

    let total_sets: usize = completed.iter().map(|e| completed_sets(e).count()).sum();
    let total_reps: u64 = completed
        .iter()
        .flat_map(|e| completed_sets(e))
        .map(|s| u64::from(s.reps))
        .sum();
    let tonnage: f64 = completed
        .iter()
        .flat_map(|e| completed_sets(e))
        .map(|s| s.weight * f64::from(s.reps))
        .sum();

    let workout_days = state
        .plan()
        .days
        .iter()
        .filter(|d| d.exercises.iter().any(|e| e.completed))
        .count();

    let muscles = all
        .iter()
        .map(|e| (e.target_muscle.clone(), *e))
        .into_group_map()
        .into_iter()
        .map(|(muscle, exercises)| MuscleJson {
            completed: exercises.iter().filter(|e| e.completed).count(),
            completed_sets: exercises.iter().map(|e| completed_sets(e).count()).sum(),
            total: exercises.len(),
            muscle,
        })
        .sorted_by(|a, b| a.muscle.cmp(&b.muscle))
        .collect();

    let top_exercises = all
        .iter()
        .map(|e| TopExerciseJson {
            name: e.name.clone(),
            max_weight: e.sets.iter().map(|s| s.weight).fold(0.0, f64::max),
        })
        .filter(|t| t.max_weight > 0.0)
        .sorted_by(|a, b| b.max_weight.total_cmp(&a.max_weight))
        .take(5)
        .collect();

    StatusJson {
        completed_exercises: completed.len(),
        total_exercises: all.len(),
        total_sets,
        total_reps,
        tonnage,
        workout_days,
        muscles,
        top_exercises,
        latest_weight: state.measurements().first().map(|m| m.weight),
    }
}

fn print_status(status: &StatusJson, muscle: Option<&str>) {
    match muscle {
        Some(m) => println!("{} {}", "Muscle Group Progress:".cyan().bold(), m.bold()),
        None => println!("{}", "Training Status".cyan().bold()),
    }
    println!();

    let progress = if status.total_exercises > 0 {
        status.completed_exercises as f64 / status.total_exercises as f64 * 100.0
    } else {
        0.0
    };

    println!(
        "{}: {}/{} ({:.0}%)",
        "Exercises completed".cyan().bold(),
        status.completed_exercises,
        status.total_exercises,
        progress
    );
    println!("{}: {} sets", "Total volume".cyan().bold(), status.total_sets);
    println!("{}: {} reps", "Total reps".cyan().bold(), status.total_reps);
    println!("{}: {:.0} kg", "Total tonnage".cyan().bold(), status.tonnage);
    println!("{}: {}", "Days trained".cyan().bold(), status.workout_days);

    if let Some(w) = status.latest_weight {
        println!("{}: {:.1}", "Latest body weight".cyan().bold(), w);
    }

    if muscle.is_none() && !status.muscles.is_empty() {
        println!("\n{}", "By muscle group:".cyan().bold());
        for m in &status.muscles {
            let marker = if m.total > 0 && m.completed == m.total {
                "✓".green()
            } else {
                "•".normal()
            };
            println!(
                "  {} {} — {}/{} exercises, {} sets done",
                marker,
                m.muscle.bold(),
                m.completed,
                m.total,
                m.completed_sets
            );
        }
    }

    if !status.top_exercises.is_empty() {
        println!("\n{}", "Top exercises by weight:".cyan().bold());
        for t in &status.top_exercises {
            println!("  {} — {} kg", t.name.bold(), t.max_weight);
        }
    }
}

pub fn handle(muscle: Option<String>, state: &AppState, fmt: OutputFmt) -> Result<()> {
    let muscle = match muscle {
        Some(raw) => match canonical_muscle(&raw) {
            Some(m) => Some(m),
            None => {
                match best_muscle_suggestion(&raw) {
                    Some(sug) => println!(
                        "{} unknown muscle `{}` -- did you mean: `{}`?",
                        "warning:".yellow().bold(),
                        raw,
                        sug.green()
                    ),
                    None => println!("{} unknown muscle `{}`", "warning:".yellow().bold(), raw),
                }
                return Ok(());
            }
        },
        None => None,
    };

    let status = build_status(state, muscle.as_deref());
    emit(fmt, &status, || print_status(&status, muscle.as_deref()));

    Ok(())
}
