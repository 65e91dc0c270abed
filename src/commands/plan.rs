use anyhow::Result;
use colored::Colorize;

use crate::cli::PlanCmd;
use crate::models::{TrainingDay, WeightUnit};
use crate::state::AppState;
use crate::types::{OutputFmt, emit};

use super::{resolve_day, resolve_exercise, warn_unknown_day, warn_unknown_exercise};

fn unit_label(unit: WeightUnit) -> &'static str {
    match unit {
        WeightUnit::Kg => "kg",
        WeightUnit::Lbs => "lbs",
    }
}

fn print_week(state: &AppState) {
    let plan = state.plan();
    println!("{} {}", "Plan:".cyan().bold(), plan.name.bold());

    for (i, day) in plan.days.iter().enumerate() {
        let done = day.exercises.iter().filter(|e| e.completed).count();
        let total = day.exercises.len();

        let marker = if total > 0 && done == total {
            "✓".green()
        } else {
            "•".normal()
        };

        println!(
            " {} {} {} {}",
            format!("{}", i + 1).yellow(),
            marker,
            day.name.bold(),
            format!("({done}/{total} exercises)").dimmed()
        );
    }
}

fn print_day(day: &TrainingDay, unit: WeightUnit) {
    println!("{} {}", "Day:".cyan().bold(), day.name.bold());

    for (i, exercise) in day.exercises.iter().enumerate() {
        let idx = format!("{}", i + 1).yellow();
        let marker = if exercise.completed {
            "✓".green().bold().to_string()
        } else {
            " ".to_string()
        };

        println!(
            "{} {} {} {}",
            idx,
            marker,
            exercise.name.bold(),
            format!("({}, rest {}s)", exercise.target_muscle, exercise.rest_seconds).dimmed()
        );

        for (s, set) in exercise.sets.iter().enumerate() {
            let set_marker = if set.completed { "✓".green() } else { "·".dimmed() };
            println!(
                "    {} set {}: {} {} × {}",
                set_marker,
                s + 1,
                set.weight,
                unit_label(unit),
                set.reps
            );
        }

        if let Some(notes) = &exercise.notes {
            println!("    {}", format!("note: {notes}").dimmed());
        }
    }
}

pub async fn handle(cmd: PlanCmd, state: &mut AppState, fmt: OutputFmt) -> Result<()> {
    match cmd {
        PlanCmd::Show { day: None } => {
            emit(fmt, state.plan(), || print_week(state));
        }

        PlanCmd::Show { day: Some(key) } => {
            let Some(day) = resolve_day(state.plan(), &key) else {
                warn_unknown_day(state.plan(), &key);
                return Ok(());
            };
            let unit = state.settings().weight_unit;
            emit(fmt, day, || print_day(day, unit));
        }

        PlanCmd::SetWeight {
            day,
            exercise,
            set,
            weight,
        } => {
            if weight < 0.0 {
                println!("{} weight must be ≥ 0", "error:".red().bold());
                return Ok(());
            }

            let Some((day_id, ex_id, ex_name)) = locate(state, &day, &exercise, set) else {
                return Ok(());
            };

            state.set_weight(&day_id, &ex_id, set - 1, weight).await?;
            println!(
                "{} {} set {} → {} {}",
                "ok:".green().bold(),
                ex_name.bold(),
                set,
                weight,
                unit_label(state.settings().weight_unit)
            );
        }

        PlanCmd::SetReps {
            day,
            exercise,
            set,
            reps,
        } => {
            if reps == 0 {
                println!("{} reps must be > 0", "error:".red().bold());
                return Ok(());
            }

            let Some((day_id, ex_id, ex_name)) = locate(state, &day, &exercise, set) else {
                return Ok(());
            };

            state.set_reps(&day_id, &ex_id, set - 1, reps).await?;
            println!(
                "{} {} set {} → {} reps",
                "ok:".green().bold(),
                ex_name.bold(),
                set,
                reps
            );
        }

        PlanCmd::Done { day, exercise, set } => {
            let Some((day_id, ex_id, ex_name)) = locate(state, &day, &exercise, set) else {
                return Ok(());
            };

            state.complete_set(&day_id, &ex_id, set - 1).await?;
            println!("{} {} set {} completed", "ok:".green().bold(), ex_name.bold(), set);

            let finished = resolve_day(state.plan(), &day_id)
                .and_then(|d| d.exercises.iter().find(|e| e.id == ex_id))
                .is_some_and(|e| e.completed);
            if finished {
                println!("{} {} is done for the week", "info:".blue().bold(), ex_name.bold());
            }
        }

        PlanCmd::Toggle { day, exercise } => {
            let Some(d) = resolve_day(state.plan(), &day) else {
                warn_unknown_day(state.plan(), &day);
                return Ok(());
            };
            let Some(e) = resolve_exercise(d, &exercise) else {
                warn_unknown_exercise(d, &exercise);
                return Ok(());
            };
            let (day_id, ex_id, ex_name) = (d.id.clone(), e.id.clone(), e.name.clone());

            state.toggle_exercise(&day_id, &ex_id).await?;

            let now_completed = resolve_day(state.plan(), &day_id)
                .and_then(|d| d.exercises.iter().find(|e| e.id == ex_id))
                .is_some_and(|e| e.completed);
            let label = if now_completed { "completed" } else { "not completed" };
            println!("{} {} marked {}", "ok:".green().bold(), ex_name.bold(), label);
        }

        PlanCmd::Note { day, exercise, note } => {
            let Some(d) = resolve_day(state.plan(), &day) else {
                warn_unknown_day(state.plan(), &day);
                return Ok(());
            };
            let Some(e) = resolve_exercise(d, &exercise) else {
                warn_unknown_exercise(d, &exercise);
                return Ok(());
            };
            let (day_id, ex_id, ex_name) = (d.id.clone(), e.id.clone(), e.name.clone());

            state.set_notes(&day_id, &ex_id, &note).await?;
            println!("{} note saved on {}", "ok:".green().bold(), ex_name.bold());
        }

        PlanCmd::Reset { yes } => {
            if !yes {
                println!(
                    "{} this drops all recorded progress — re-run with `--yes` to confirm",
                    "warning:".yellow().bold()
                );
                return Ok(());
            }

            state.reset_plan().await?;
            println!("{} plan reset to the built-in template", "ok:".green().bold());
        }
    }

    Ok(())
}

/// Resolve day + exercise + 1-based set number into owned ids, printing the
/// appropriate error on any miss.
fn locate(
    state: &AppState,
    day_key: &str,
    exercise_key: &str,
    set: usize,
) -> Option<(String, String, String)> {
    let Some(day) = resolve_day(state.plan(), day_key) else {
        warn_unknown_day(state.plan(), day_key);
        return None;
    };
    let Some(exercise) = resolve_exercise(day, exercise_key) else {
        warn_unknown_exercise(day, exercise_key);
        return None;
    };

    if set == 0 || set > exercise.sets.len() {
        println!(
            "{} `{}` has {} sets (asked for set {})",
            "error:".red().bold(),
            exercise.name,
            exercise.sets.len(),
            set
        );
        return None;
    }

    Some((day.id.clone(), exercise.id.clone(), exercise.name.clone()))
}
