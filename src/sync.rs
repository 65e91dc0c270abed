use serde::Serialize;
use tracing::{debug, info, warn};

use crate::remote::RemoteStore;
use crate::state::AppState;

/// What happened to one entity (plan or measurements) during a sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncOutcome {
    /// Remote had data; it replaced the local copy.
    Pulled,
    /// Remote was empty; the local copy was pushed as the first row(s).
    Seeded,
    /// Both sides empty, nothing to do.
    Unchanged,
    /// A remote or local error ended this step; local state stays
    /// authoritative.
    Failed,
    /// The engine already ran this session.
    Skipped,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SyncReport {
    pub plan: SyncOutcome,
    pub measurements: SyncOutcome,
}

/// One-shot local/remote reconciliation. Policy, deliberately simple:
/// whichever side is currently non-empty wins, and the first writer seeds the
/// other side. No field-level merging, no retries, no conflict UI — the most
/// recently updated whole snapshot is authoritative. Do not "improve" this
/// into a field merge; the behavior is the contract.
pub struct SyncEngine<R: RemoteStore> {
    remote: R,
    ran: bool,
}

impl<R: RemoteStore> SyncEngine<R> {
    pub fn new(remote: R) -> Self {
        Self { remote, ran: false }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Run the reconciliation once. A second call on the same engine is a
    /// no-op. The plan step and the measurement step absorb their own
    /// failures so one never blocks the other.
    pub async fn run_initial_sync(&mut self, user_id: &str, state: &mut AppState) -> SyncReport {
        if self.ran {
            debug!("initial sync already ran this session, skipping");
            return SyncReport {
                plan: SyncOutcome::Skipped,
                measurements: SyncOutcome::Skipped,
            };
        }
        self.ran = true;

        let plan = self.sync_plan(user_id, state).await;
        let measurements = self.sync_measurements(user_id, state).await;

        SyncReport { plan, measurements }
    }

    async fn sync_plan(&self, user_id: &str, state: &mut AppState) -> SyncOutcome {
        match self.remote.latest_plan(user_id).await {
            Ok(Some(row)) => {
                // Remote wins unconditionally; missing columns fall back to
                // the local plan's fields.
                let plan = row.into_plan(state.plan());
                match state.replace_plan(plan).await {
                    Ok(()) => {
                        info!("installed remote plan");
                        SyncOutcome::Pulled
                    }
                    Err(e) => {
                        warn!(error = %e, "could not persist remote plan");
                        SyncOutcome::Failed
                    }
                }
            }
            Ok(None) => match self.remote.insert_plan(user_id, state.plan()).await {
                Ok(()) => {
                    info!("seeded remote with local plan");
                    SyncOutcome::Seeded
                }
                Err(e) => {
                    warn!(error = %e, "plan seed failed, local plan stays authoritative");
                    SyncOutcome::Failed
                }
            },
            Err(e) => {
                warn!(error = %e, "plan fetch failed, local plan stays authoritative");
                SyncOutcome::Failed
            }
        }
    }

    async fn sync_measurements(&self, user_id: &str, state: &mut AppState) -> SyncOutcome {
        let remote = match self.remote.measurements_by_date_desc(user_id).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, "measurement fetch failed, local list stays authoritative");
                return SyncOutcome::Failed;
            }
        };

        if !remote.is_empty() {
            let mapped = remote.into_iter().map(|r| r.into_measurement()).collect();
            return match state.replace_measurements(mapped).await {
                Ok(()) => {
                    info!("installed remote measurements");
                    SyncOutcome::Pulled
                }
                Err(e) => {
                    warn!(error = %e, "could not persist remote measurements");
                    SyncOutcome::Failed
                }
            };
        }

        if state.measurements().is_empty() {
            return SyncOutcome::Unchanged;
        }

        match self
            .remote
            .insert_measurements(user_id, state.measurements())
            .await
        {
            Ok(()) => {
                info!(count = state.measurements().len(), "seeded remote measurements");
                SyncOutcome::Seeded
            }
            Err(e) => {
                warn!(error = %e, "measurement seed failed, local list stays authoritative");
                SyncOutcome::Failed
            }
        }
    }
}
