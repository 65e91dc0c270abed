use chrono::{Duration, Utc};

use forma::models::{Exercise, ExerciseSet, TrainingDay, WeeklyPlan};
use forma::plan;

fn sample_plan() -> WeeklyPlan {
    let yesterday = Utc::now() - Duration::days(1);
    WeeklyPlan {
        id: "p1".into(),
        name: "Test Plan".into(),
        days: vec![TrainingDay {
            id: "d1".into(),
            name: "Day One".into(),
            completed: false,
            exercises: vec![Exercise {
                id: "e1".into(),
                name: "Bench Press".into(),
                sets: vec![
                    ExerciseSet {
                        reps: 10,
                        weight: 20.0,
                        completed: false,
                    },
                    ExerciseSet {
                        reps: 10,
                        weight: 20.0,
                        completed: false,
                    },
                ],
                rest_seconds: 120,
                target_muscle: "chest".into(),
                notes: None,
                completed: false,
                last_updated: yesterday,
            }],
        }],
        created_at: yesterday,
        updated_at: yesterday,
    }
}

fn exercise(plan: &WeeklyPlan) -> &Exercise {
    &plan.days[0].exercises[0]
}

#[test]
fn set_weight_updates_target_set_and_stamps_exercise() {
    let before = sample_plan();
    let stamp = exercise(&before).last_updated;

    let after = plan::set_weight(before, "d1", "e1", 1, 42.5);

    assert_eq!(exercise(&after).sets[1].weight, 42.5);
    assert_eq!(exercise(&after).sets[0].weight, 20.0);
    assert!(exercise(&after).last_updated > stamp);
}

#[test]
fn set_reps_updates_target_set() {
    let after = plan::set_reps(sample_plan(), "d1", "e1", 0, 8);
    assert_eq!(exercise(&after).sets[0].reps, 8);
    assert_eq!(exercise(&after).sets[1].reps, 10);
}

#[test]
fn unresolved_ids_are_silent_noops() {
    let original = sample_plan();

    let after = plan::set_weight(original.clone(), "no-such-day", "e1", 0, 99.0);
    assert_eq!(after, original);

    let after = plan::set_reps(original.clone(), "d1", "no-such-exercise", 0, 1);
    assert_eq!(after, original);

    let after = plan::complete_set(original.clone(), "d1", "e1", 7);
    assert_eq!(after, original);

    let after = plan::set_notes(original.clone(), "d1", "ghost", "text");
    assert_eq!(after, original);
}

#[test]
fn complete_set_is_monotonic() {
    let p = plan::complete_set(sample_plan(), "d1", "e1", 0);
    assert!(exercise(&p).sets[0].completed);

    // Completing the same set again never reverts it.
    let p = plan::complete_set(p, "d1", "e1", 0);
    assert!(exercise(&p).sets[0].completed);
}

#[test]
fn exercise_completion_is_derived_from_all_sets() {
    // Scenario: two incomplete sets; the exercise flips to completed only
    // after the second set closes, and the stamp moves on both calls.
    let original = sample_plan();
    let stamp0 = exercise(&original).last_updated;

    let p = plan::complete_set(original, "d1", "e1", 0);
    let stamp1 = exercise(&p).last_updated;
    assert!(!exercise(&p).completed);
    assert!(stamp1 > stamp0);

    let p = plan::complete_set(p, "d1", "e1", 1);
    let stamp2 = exercise(&p).last_updated;
    assert!(exercise(&p).completed);
    assert!(stamp2 >= stamp1);
}

#[test]
fn manual_toggle_flips_without_stamping() {
    let original = sample_plan();
    let stamp = exercise(&original).last_updated;

    let p = plan::toggle_exercise_manual(original, "d1", "e1");
    assert!(exercise(&p).completed);
    assert!(!exercise(&p).sets.iter().any(|s| s.completed));
    assert_eq!(exercise(&p).last_updated, stamp);

    let p = plan::toggle_exercise_manual(p, "d1", "e1");
    assert!(!exercise(&p).completed);
}

#[test]
fn manual_completion_survives_later_set_completions() {
    // The documented asymmetry: a manual "done" is not reconciled against
    // set state, and completing the remaining sets never clears it.
    let p = plan::toggle_exercise_manual(sample_plan(), "d1", "e1");
    assert!(exercise(&p).completed);

    let p = plan::complete_set(p, "d1", "e1", 0);
    assert!(exercise(&p).completed);

    let p = plan::complete_set(p, "d1", "e1", 1);
    assert!(exercise(&p).completed);
}

#[test]
fn set_notes_overwrites() {
    let p = plan::set_notes(sample_plan(), "d1", "e1", "felt heavy");
    assert_eq!(exercise(&p).notes.as_deref(), Some("felt heavy"));

    let p = plan::set_notes(p, "d1", "e1", "better today");
    assert_eq!(exercise(&p).notes.as_deref(), Some("better today"));
}
