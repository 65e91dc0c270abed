use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::cli::DbCmd;
use crate::models::{Settings, WeeklyPlan};
use crate::state::AppState;
use crate::store::{KEY_PLAN, Store};
use crate::utils;

/// Whole-state backup file. Import reads the same shape but only the plan is
/// restored — settings travel for reference, not for overwrite.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot {
    plan: WeeklyPlan,
    settings: Option<Settings>,
    export_date: String,
}

pub async fn handle(cmd: DbCmd, state: &mut AppState, store: &Store) -> Result<()> {
    match cmd {
        DbCmd::Export { file } => {
            let snapshot = Snapshot {
                plan: state.plan().clone(),
                settings: Some(state.settings().clone()),
                export_date: Utc::now().to_rfc3339(),
            };

            let path = file.unwrap_or_else(|| format!("forma-backup-{}.json", utils::today()));
            let content = serde_json::to_string_pretty(&snapshot)?;
            tokio::fs::write(&path, content)
                .await
                .with_context(|| format!("Failed to write snapshot to `{}`", path))?;

            println!("{} exported to `{}`", "ok:".green().bold(), path);
        }

        DbCmd::Import { file } => {
            let content = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Could not read file: `{}`", file))?;

            let snapshot: Snapshot = serde_json::from_str(&content)
                .with_context(|| format!("Invalid snapshot file: `{}`", file))?;

            // Only the plan key is overwritten; the imported plan becomes
            // active on the next invocation (and goes through the usual
            // staleness check there).
            store.write(KEY_PLAN, &snapshot.plan).await?;

            println!(
                "{} plan imported from `{}` — it takes effect on the next run",
                "ok:".green().bold(),
                file
            );
        }
    }

    Ok(())
}
