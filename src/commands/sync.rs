use anyhow::Result;
use colored::Colorize;

use crate::remote::SupabaseRemote;
use crate::state::AppState;
use crate::sync::{SyncEngine, SyncOutcome};
use crate::types::{CFG_REMOTE_KEY, CFG_REMOTE_URL, CFG_USER_ID, Config};

fn outcome_line(entity: &str, outcome: SyncOutcome) {
    match outcome {
        SyncOutcome::Pulled => println!(
            "{} {} — cloud copy installed locally",
            "ok:".green().bold(),
            entity
        ),
        SyncOutcome::Seeded => println!(
            "{} {} — local copy pushed to the cloud",
            "ok:".green().bold(),
            entity
        ),
        SyncOutcome::Unchanged => println!("{} {} — nothing to sync", "info:".blue().bold(), entity),
        SyncOutcome::Failed => println!(
            "{} {} — sync failed, local data stays authoritative",
            "warning:".yellow().bold(),
            entity
        ),
        SyncOutcome::Skipped => println!("{} {} — already synced", "info:".blue().bold(), entity),
    }
}

pub async fn handle(config: &Config, state: &mut AppState) -> Result<()> {
    let url = config.map.get(CFG_REMOTE_URL);
    let key = config.map.get(CFG_REMOTE_KEY);
    let user_id = config.map.get(CFG_USER_ID);

    let (Some(url), Some(key), Some(user_id)) = (url, key, user_id) else {
        println!(
            "{} no session — set `{}`, `{}` and `{}` with `forma config set`",
            "error:".red().bold(),
            CFG_REMOTE_URL,
            CFG_REMOTE_KEY,
            CFG_USER_ID
        );
        return Ok(());
    };

    let mut engine = SyncEngine::new(SupabaseRemote::new(url.clone(), key.clone()));
    let report = engine.run_initial_sync(user_id, state).await;

    outcome_line("plan", report.plan);
    outcome_line("measurements", report.measurements);

    Ok(())
}
