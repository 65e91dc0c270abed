use anyhow::Result;
use colored::Colorize;

use crate::cli::WorkoutCmd;
use crate::models::{TrainingDay, WorkoutPhase, WorkoutState};
use crate::state::AppState;

use super::{resolve_day, warn_unknown_day};

fn day_by_id<'a>(state: &'a AppState, day_id: &str) -> Option<&'a TrainingDay> {
    state.plan().days.iter().find(|d| d.id == day_id)
}

fn print_position(state: &AppState, ws: &WorkoutState) {
    let Some(day) = day_by_id(state, &ws.day_id) else {
        println!(
            "{} the saved workout points at a day that is no longer in the plan",
            "warning:".yellow().bold()
        );
        return;
    };

    if ws.phase == WorkoutPhase::Complete {
        println!("{} {} — workout complete 🎉", "Workout:".cyan().bold(), day.name.bold());
        return;
    }

    let Some(exercise) = day.exercises.get(ws.exercise_index) else {
        return;
    };

    println!(
        "{} {} — exercise {}/{}",
        "Workout:".cyan().bold(),
        day.name.bold(),
        ws.exercise_index + 1,
        day.exercises.len()
    );
    println!(
        "  {} {}",
        exercise.name.bold(),
        format!("({})", exercise.target_muscle).dimmed()
    );

    match ws.phase {
        WorkoutPhase::Rest => println!(
            "  resting ({}s), then set {}/{}",
            exercise.rest_seconds,
            ws.set_index + 2,
            exercise.sets.len()
        ),
        _ => {
            if let Some(set) = exercise.sets.get(ws.set_index) {
                println!(
                    "  set {}/{}: {} × {}",
                    ws.set_index + 1,
                    exercise.sets.len(),
                    set.weight,
                    set.reps
                );
            }
        }
    }
}

pub async fn handle(cmd: WorkoutCmd, state: &mut AppState) -> Result<()> {
    match cmd {
        WorkoutCmd::Start { day } => {
            let Some(d) = resolve_day(state.plan(), &day) else {
                warn_unknown_day(state.plan(), &day);
                return Ok(());
            };
            let day_id = d.id.clone();

            // Resume a saved position only when it belongs to this day; a
            // mismatched entry is simply ignored.
            let ws = match state.workout_state(&day_id).await? {
                Some(saved) => {
                    println!("{} resuming saved workout", "info:".blue().bold());
                    saved
                }
                None => WorkoutState {
                    day_id: day_id.clone(),
                    exercise_index: 0,
                    set_index: 0,
                    phase: WorkoutPhase::Exercise,
                },
            };

            state.save_workout_state(&ws).await?;
            print_position(state, &ws);
        }

        WorkoutCmd::Status => match state.any_workout_state().await? {
            Some(ws) => print_position(state, &ws),
            None => println!("{} no workout in progress", "info:".blue().bold()),
        },

        WorkoutCmd::Done => {
            let Some(mut ws) = state.any_workout_state().await? else {
                println!("{} no workout in progress", "info:".blue().bold());
                return Ok(());
            };

            if ws.phase != WorkoutPhase::Exercise {
                println!(
                    "{} not mid-set — use `workout rest` to continue",
                    "warning:".yellow().bold()
                );
                return Ok(());
            }

            let Some(day) = day_by_id(state, &ws.day_id) else {
                println!(
                    "{} the plan changed under the saved workout, clearing it",
                    "warning:".yellow().bold()
                );
                state.clear_workout_state().await?;
                return Ok(());
            };

            let Some(exercise) = day.exercises.get(ws.exercise_index) else {
                state.clear_workout_state().await?;
                return Ok(());
            };

            let day_id = day.id.clone();
            let ex_id = exercise.id.clone();
            let ex_name = exercise.name.clone();
            let rest_seconds = exercise.rest_seconds;
            let set_count = exercise.sets.len();
            let exercise_count = day.exercises.len();

            state.complete_set(&day_id, &ex_id, ws.set_index).await?;
            println!(
                "{} {} set {}/{} done",
                "ok:".green().bold(),
                ex_name.bold(),
                ws.set_index + 1,
                set_count
            );

            if ws.set_index + 1 < set_count {
                ws.phase = WorkoutPhase::Rest;
                state.save_workout_state(&ws).await?;
                println!(
                    "{} rest {}s, then `workout rest` to continue",
                    "info:".blue().bold(),
                    rest_seconds
                );
            } else if ws.exercise_index + 1 < exercise_count {
                ws.exercise_index += 1;
                ws.set_index = 0;
                ws.phase = WorkoutPhase::Exercise;
                state.save_workout_state(&ws).await?;
                println!("{} next exercise:", "info:".blue().bold());
                print_position(state, &ws);
            } else {
                // Last set of the last exercise: the workout is over and the
                // saved position is cleared.
                state.clear_workout_state().await?;
                println!("{} workout complete 🎉", "ok:".green().bold());
            }
        }

        WorkoutCmd::Rest => {
            let Some(mut ws) = state.any_workout_state().await? else {
                println!("{} no workout in progress", "info:".blue().bold());
                return Ok(());
            };

            if ws.phase != WorkoutPhase::Rest {
                println!("{} you are not resting", "warning:".yellow().bold());
                return Ok(());
            }

            ws.set_index += 1;
            ws.phase = WorkoutPhase::Exercise;
            state.save_workout_state(&ws).await?;
            print_position(state, &ws);
        }

        WorkoutCmd::Next | WorkoutCmd::Prev => {
            let forward = matches!(cmd, WorkoutCmd::Next);

            let Some(mut ws) = state.any_workout_state().await? else {
                println!("{} no workout in progress", "info:".blue().bold());
                return Ok(());
            };

            let Some(day) = day_by_id(state, &ws.day_id) else {
                state.clear_workout_state().await?;
                return Ok(());
            };

            let last = day.exercises.len().saturating_sub(1);
            let target = if forward {
                (ws.exercise_index + 1).min(last)
            } else {
                ws.exercise_index.saturating_sub(1)
            };

            if target == ws.exercise_index {
                println!("{} already at the {} exercise", "info:".blue().bold(), if forward { "last" } else { "first" });
                return Ok(());
            }

            ws.exercise_index = target;
            ws.set_index = 0;
            ws.phase = WorkoutPhase::Exercise;
            state.save_workout_state(&ws).await?;
            print_position(state, &ws);
        }

        WorkoutCmd::Exit => {
            state.clear_workout_state().await?;
            println!("{} left workout mode", "ok:".green().bold());
        }
    }

    Ok(())
}
