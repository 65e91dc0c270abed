use std::sync::Mutex;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use forma::models::{BodyMeasurement, Exercise, ExerciseSet, TrainingDay, WeeklyPlan};
use forma::remote::{RemoteMeasurementRow, RemotePlanRow, RemoteStore};
use forma::state::AppState;
use forma::store::{KEY_PLAN, Store};
use forma::sync::{SyncEngine, SyncOutcome};

/// In-memory stand-in for the remote table service.
#[derive(Default)]
struct MockRemote {
    plan_row: Mutex<Option<RemotePlanRow>>,
    inserted_plans: Mutex<Vec<(String, WeeklyPlan)>>,
    measurement_rows: Mutex<Vec<RemoteMeasurementRow>>,
    inserted_measurements: Mutex<Vec<(String, Vec<BodyMeasurement>)>>,
    fail_plan_fetch: bool,
    fail_measurement_fetch: bool,
}

#[async_trait]
impl RemoteStore for MockRemote {
    async fn latest_plan(&self, _user_id: &str) -> Result<Option<RemotePlanRow>> {
        if self.fail_plan_fetch {
            return Err(anyhow!("503 service unavailable"));
        }
        Ok(self.plan_row.lock().unwrap().clone())
    }

    async fn insert_plan(&self, user_id: &str, plan: &WeeklyPlan) -> Result<()> {
        self.inserted_plans
            .lock()
            .unwrap()
            .push((user_id.to_string(), plan.clone()));
        Ok(())
    }

    async fn measurements_by_date_desc(
        &self,
        _user_id: &str,
    ) -> Result<Vec<RemoteMeasurementRow>> {
        if self.fail_measurement_fetch {
            return Err(anyhow!("503 service unavailable"));
        }
        Ok(self.measurement_rows.lock().unwrap().clone())
    }

    async fn insert_measurements(&self, user_id: &str, items: &[BodyMeasurement]) -> Result<()> {
        self.inserted_measurements
            .lock()
            .unwrap()
            .push((user_id.to_string(), items.to_vec()));
        Ok(())
    }
}

fn local_plan() -> WeeklyPlan {
    let t = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    WeeklyPlan {
        id: "p1".into(),
        name: "Local Plan".into(),
        days: vec![TrainingDay {
            id: "d1".into(),
            name: "Day One".into(),
            completed: false,
            exercises: vec![Exercise {
                id: "e1".into(),
                name: "Squat".into(),
                sets: vec![ExerciseSet {
                    reps: 5,
                    weight: 100.0,
                    completed: false,
                }],
                rest_seconds: 180,
                target_muscle: "quads".into(),
                notes: None,
                completed: false,
                last_updated: t,
            }],
        }],
        created_at: t,
        updated_at: t,
    }
}

fn remote_days() -> Vec<TrainingDay> {
    let t = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
    vec![TrainingDay {
        id: "rd1".into(),
        name: "Remote Day".into(),
        completed: false,
        exercises: vec![Exercise {
            id: "re1".into(),
            name: "Deadlift".into(),
            sets: vec![ExerciseSet {
                reps: 3,
                weight: 140.0,
                completed: false,
            }],
            rest_seconds: 240,
            target_muscle: "back".into(),
            notes: None,
            completed: false,
            last_updated: t,
        }],
    }]
}

async fn state_with_local_plan() -> (Store, AppState) {
    let store = Store::open_in_memory().await.unwrap();
    let mut state = AppState::load(store.clone()).await.unwrap();
    state.replace_plan(local_plan()).await.unwrap();
    (store, state)
}

#[tokio::test]
async fn remote_plan_wins_unconditionally() {
    let (_store, mut state) = state_with_local_plan().await;

    let updated = Utc.with_ymd_and_hms(2024, 6, 2, 10, 0, 0).unwrap();
    let remote = MockRemote::default();
    *remote.plan_row.lock().unwrap() = Some(RemotePlanRow {
        id: Some("cloud-plan".into()),
        name: Some("Cloud Plan".into()),
        days: Some(remote_days()),
        created_at: Some(updated),
        updated_at: Some(updated),
    });

    let report = SyncEngine::new(remote)
        .run_initial_sync("user-1", &mut state)
        .await;

    assert_eq!(report.plan, SyncOutcome::Pulled);
    assert_eq!(state.plan().id, "cloud-plan");
    assert_eq!(state.plan().name, "Cloud Plan");
    assert_eq!(state.plan().days, remote_days());
    assert_eq!(state.plan().updated_at, updated);
}

#[tokio::test]
async fn remote_plan_with_missing_columns_falls_back_to_local_fields() {
    let (_store, mut state) = state_with_local_plan().await;

    let remote = MockRemote::default();
    *remote.plan_row.lock().unwrap() = Some(RemotePlanRow {
        id: None,
        name: Some(String::new()),
        days: Some(remote_days()),
        created_at: None,
        updated_at: None,
    });

    SyncEngine::new(remote)
        .run_initial_sync("user-1", &mut state)
        .await;

    // Remote days install; everything the row lacked stays local.
    assert_eq!(state.plan().days, remote_days());
    assert_eq!(state.plan().id, "p1");
    assert_eq!(state.plan().name, "Local Plan");
    assert_eq!(state.plan().created_at, local_plan().created_at);
}

#[tokio::test]
async fn empty_remote_is_seeded_with_the_local_plan() {
    let (store, mut state) = state_with_local_plan().await;
    let raw_before = store.read_raw(KEY_PLAN).await.unwrap();

    let remote = MockRemote::default();
    let mut engine = SyncEngine::new(remote);
    let report = engine.run_initial_sync("user-1", &mut state).await;

    assert_eq!(report.plan, SyncOutcome::Seeded);

    // Exactly one row, carrying the user id and the untouched local plan.
    {
        let engine_remote = engine.remote();
        let inserted = engine_remote.inserted_plans.lock().unwrap();
        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0].0, "user-1");
        assert_eq!(inserted[0].1, local_plan());
    }

    // The local key was not rewritten by the seeding path.
    assert_eq!(store.read_raw(KEY_PLAN).await.unwrap(), raw_before);
}

#[tokio::test]
async fn engine_runs_at_most_once_per_session() {
    let (_store, mut state) = state_with_local_plan().await;

    let remote = MockRemote::default();
    *remote.plan_row.lock().unwrap() = Some(RemotePlanRow {
        id: Some("cloud-plan".into()),
        name: Some("Cloud Plan".into()),
        days: Some(remote_days()),
        created_at: None,
        updated_at: None,
    });

    let mut engine = SyncEngine::new(remote);
    engine.run_initial_sync("user-1", &mut state).await;
    let plan_after_first = state.plan().clone();

    let report = engine.run_initial_sync("user-1", &mut state).await;
    assert_eq!(report.plan, SyncOutcome::Skipped);
    assert_eq!(report.measurements, SyncOutcome::Skipped);
    assert_eq!(*state.plan(), plan_after_first);
}

#[tokio::test]
async fn reconciliation_is_idempotent_across_sessions() {
    // A fresh engine against an unchanged remote lands on the same state.
    let (_store, mut state) = state_with_local_plan().await;

    let row = RemotePlanRow {
        id: Some("cloud-plan".into()),
        name: Some("Cloud Plan".into()),
        days: Some(remote_days()),
        created_at: None,
        updated_at: None,
    };

    let remote = MockRemote::default();
    *remote.plan_row.lock().unwrap() = Some(row.clone());
    SyncEngine::new(remote).run_initial_sync("user-1", &mut state).await;
    let after_first = state.plan().clone();

    let remote = MockRemote::default();
    *remote.plan_row.lock().unwrap() = Some(row);
    SyncEngine::new(remote).run_initial_sync("user-1", &mut state).await;

    assert_eq!(*state.plan(), after_first);
}

#[tokio::test]
async fn remote_measurements_replace_local_and_map_field_names() {
    let (_store, mut state) = state_with_local_plan().await;

    // Raw JSON exercises the lenient decoding: integer id, stringly weight,
    // snake_case body_fat.
    let row: RemoteMeasurementRow = serde_json::from_value(serde_json::json!({
        "id": 17,
        "date": "2024-01-01",
        "weight": "80",
        "body_fat": 18.5,
        "measurements": {"waist": 82.0},
        "notes": null
    }))
    .unwrap();

    let remote = MockRemote::default();
    remote.measurement_rows.lock().unwrap().push(row);

    let report = SyncEngine::new(remote)
        .run_initial_sync("user-1", &mut state)
        .await;

    assert_eq!(report.measurements, SyncOutcome::Pulled);
    assert_eq!(state.measurements().len(), 1);

    let m = &state.measurements()[0];
    assert_eq!(m.id, "17");
    assert_eq!(m.date, "2024-01-01");
    assert_eq!(m.weight, 80.0);
    assert_eq!(m.body_fat, Some(18.5));
    assert_eq!(m.measurements.as_ref().and_then(|p| p.waist), Some(82.0));

    // And the camelCase mapping holds on the wire format.
    let json = serde_json::to_value(m).unwrap();
    assert_eq!(json["bodyFat"], serde_json::json!(18.5));
    assert!(json.get("body_fat").is_none());
}

#[tokio::test]
async fn local_measurements_seed_an_empty_remote() {
    let (_store, mut state) = state_with_local_plan().await;

    let local = BodyMeasurement {
        id: "1700000000000".into(),
        date: "2024-02-02".into(),
        weight: 81.2,
        height: None,
        body_fat: None,
        measurements: None,
        notes: Some("morning".into()),
    };
    state.add_measurement(local.clone()).await.unwrap();

    let mut engine = SyncEngine::new(MockRemote::default());
    let report = engine.run_initial_sync("user-1", &mut state).await;

    assert_eq!(report.measurements, SyncOutcome::Seeded);
    assert_eq!(state.measurements(), &[local.clone()]);

    let engine_remote = engine.remote();
    let inserted = engine_remote.inserted_measurements.lock().unwrap();
    assert_eq!(inserted.len(), 1);
    assert_eq!(inserted[0].0, "user-1");
    assert_eq!(inserted[0].1, vec![local]);
}

#[tokio::test]
async fn both_sides_empty_is_a_noop() {
    let (_store, mut state) = state_with_local_plan().await;

    let mut engine = SyncEngine::new(MockRemote::default());
    let report = engine.run_initial_sync("user-1", &mut state).await;

    assert_eq!(report.measurements, SyncOutcome::Unchanged);
    assert!(state.measurements().is_empty());
    assert!(
        engine
            .remote()
            .inserted_measurements
            .lock()
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn a_failing_plan_step_does_not_block_measurements() {
    let (_store, mut state) = state_with_local_plan().await;
    let plan_before = state.plan().clone();

    let remote = MockRemote {
        fail_plan_fetch: true,
        ..Default::default()
    };
    remote.measurement_rows.lock().unwrap().push(
        serde_json::from_value(serde_json::json!({
            "id": "m1",
            "date": "2024-01-01",
            "weight": 80.0
        }))
        .unwrap(),
    );

    let report = SyncEngine::new(remote)
        .run_initial_sync("user-1", &mut state)
        .await;

    assert_eq!(report.plan, SyncOutcome::Failed);
    assert_eq!(report.measurements, SyncOutcome::Pulled);

    // The failed step left local state untouched; the other ran anyway.
    assert_eq!(*state.plan(), plan_before);
    assert_eq!(state.measurements().len(), 1);
}

#[tokio::test]
async fn a_failing_measurement_step_does_not_block_the_plan() {
    let (_store, mut state) = state_with_local_plan().await;

    let remote = MockRemote {
        fail_measurement_fetch: true,
        ..Default::default()
    };
    *remote.plan_row.lock().unwrap() = Some(RemotePlanRow {
        id: Some("cloud-plan".into()),
        name: Some("Cloud Plan".into()),
        days: Some(remote_days()),
        created_at: None,
        updated_at: None,
    });

    let report = SyncEngine::new(remote)
        .run_initial_sync("user-1", &mut state)
        .await;

    assert_eq!(report.plan, SyncOutcome::Pulled);
    assert_eq!(report.measurements, SyncOutcome::Failed);
    assert_eq!(state.plan().id, "cloud-plan");
    assert!(state.measurements().is_empty());
}
