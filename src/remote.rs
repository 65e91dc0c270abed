use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{BodyMeasurement, BodyParts, TrainingDay, WeeklyPlan};
use crate::utils;

/// The two logical tables the reconciliation engine talks to, behind a seam
/// so the engine can be exercised against an in-memory fake.
#[async_trait]
pub trait RemoteStore {
    /// Most recently updated plan row for the user, if any.
    async fn latest_plan(&self, user_id: &str) -> Result<Option<RemotePlanRow>>;

    /// Insert the local plan as a new row (ids are server-assigned).
    async fn insert_plan(&self, user_id: &str, plan: &WeeklyPlan) -> Result<()>;

    /// All measurement rows for the user, newest date first.
    async fn measurements_by_date_desc(&self, user_id: &str)
    -> Result<Vec<RemoteMeasurementRow>>;

    /// Bulk-insert local measurements (ids are server-assigned).
    async fn insert_measurements(&self, user_id: &str, items: &[BodyMeasurement]) -> Result<()>;
}

// Remote rows are lenient on purpose: ids may be uuids or integers, numerics
// may arrive as JSON strings, timestamps may be missing. Anything missing
// falls back to the local plan's fields during normalization.

fn de_opt_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(d)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn de_f64_lenient<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(f64),
        Str(String),
    }

    match NumOrStr::deserialize(d)? {
        NumOrStr::Num(n) => Ok(n),
        NumOrStr::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn de_opt_f64_lenient<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(d)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn de_opt_datetime<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
    let value = Option::<String>::deserialize(d)?;
    Ok(value.and_then(|s| {
        DateTime::parse_from_rfc3339(&s)
            .map(|t| t.with_timezone(&Utc))
            .ok()
    }))
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemotePlanRow {
    #[serde(default, deserialize_with = "de_opt_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub days: Option<Vec<TrainingDay>>,
    #[serde(default, deserialize_with = "de_opt_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de_opt_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RemotePlanRow {
    /// Normalize into a full plan, defaulting any missing field to the local
    /// plan's counterpart. An empty remote name also falls back.
    pub fn into_plan(self, local: &WeeklyPlan) -> WeeklyPlan {
        WeeklyPlan {
            id: self.id.unwrap_or_else(|| local.id.clone()),
            name: self
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| local.name.clone()),
            days: self.days.unwrap_or_else(|| local.days.clone()),
            created_at: self.created_at.unwrap_or(local.created_at),
            updated_at: self.updated_at.unwrap_or(local.updated_at),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteMeasurementRow {
    #[serde(default, deserialize_with = "de_opt_id")]
    pub id: Option<String>,
    pub date: String,
    #[serde(deserialize_with = "de_f64_lenient")]
    pub weight: f64,
    #[serde(default, deserialize_with = "de_opt_f64_lenient")]
    pub height: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64_lenient")]
    pub body_fat: Option<f64>,
    #[serde(default)]
    pub measurements: Option<BodyParts>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl RemoteMeasurementRow {
    pub fn into_measurement(self) -> BodyMeasurement {
        BodyMeasurement {
            id: self.id.unwrap_or_else(utils::time_based_id),
            date: self.date,
            weight: self.weight,
            height: self.height,
            body_fat: self.body_fat,
            measurements: self.measurements,
            notes: self.notes,
        }
    }
}

#[derive(Serialize)]
struct NewPlanRow<'a> {
    user_id: &'a str,
    name: &'a str,
    days: &'a [TrainingDay],
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct NewMeasurementRow<'a> {
    user_id: &'a str,
    date: &'a str,
    weight: f64,
    height: Option<f64>,
    body_fat: Option<f64>,
    measurements: Option<&'a BodyParts>,
    notes: Option<&'a str>,
}

const PLANS_TABLE: &str = "training_plans";
const MEASUREMENTS_TABLE: &str = "body_measurements";

/// PostgREST-style table client. Authentication is the caller's problem: the
/// api key doubles as the bearer token, and rows are scoped by `user_id`.
pub struct SupabaseRemote {
    http: Client,
    base_url: String,
    api_key: String,
}

impl SupabaseRemote {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), table)
    }

    fn get(&self, table: &str) -> reqwest::RequestBuilder {
        self.http
            .get(self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    fn post(&self, table: &str) -> reqwest::RequestBuilder {
        self.http
            .post(self.table_url(table))
            .header("apikey", &self.api_key)
            .header("Prefer", "return=minimal")
            .bearer_auth(&self.api_key)
    }
}

#[async_trait]
impl RemoteStore for SupabaseRemote {
    async fn latest_plan(&self, user_id: &str) -> Result<Option<RemotePlanRow>> {
        let user_filter = format!("eq.{user_id}");
        let rows: Vec<RemotePlanRow> = self
            .get(PLANS_TABLE)
            .query(&[
                ("select", "id,name,days,created_at,updated_at"),
                ("user_id", user_filter.as_str()),
                ("order", "updated_at.desc"),
                ("limit", "1"),
            ])
            .send()
            .await
            .context("plan query failed")?
            .error_for_status()
            .context("plan query rejected")?
            .json()
            .await
            .context("plan response is not valid JSON")?;

        Ok(rows.into_iter().next())
    }

    async fn insert_plan(&self, user_id: &str, plan: &WeeklyPlan) -> Result<()> {
        let row = NewPlanRow {
            user_id,
            name: &plan.name,
            days: &plan.days,
            created_at: plan.created_at,
            updated_at: plan.updated_at,
        };

        self.post(PLANS_TABLE)
            .json(&row)
            .send()
            .await
            .context("plan insert failed")?
            .error_for_status()
            .context("plan insert rejected")?;

        Ok(())
    }

    async fn measurements_by_date_desc(
        &self,
        user_id: &str,
    ) -> Result<Vec<RemoteMeasurementRow>> {
        let user_filter = format!("eq.{user_id}");
        let rows = self
            .get(MEASUREMENTS_TABLE)
            .query(&[
                ("select", "id,date,weight,height,body_fat,measurements,notes"),
                ("user_id", user_filter.as_str()),
                ("order", "date.desc"),
            ])
            .send()
            .await
            .context("measurement query failed")?
            .error_for_status()
            .context("measurement query rejected")?
            .json()
            .await
            .context("measurement response is not valid JSON")?;

        Ok(rows)
    }

    async fn insert_measurements(&self, user_id: &str, items: &[BodyMeasurement]) -> Result<()> {
        let payload: Vec<NewMeasurementRow<'_>> = items
            .iter()
            .map(|m| NewMeasurementRow {
                user_id,
                date: &m.date,
                weight: m.weight,
                height: m.height,
                body_fat: m.body_fat,
                measurements: m.measurements.as_ref(),
                notes: m.notes.as_deref(),
            })
            .collect();

        self.post(MEASUREMENTS_TABLE)
            .json(&payload)
            .send()
            .await
            .context("measurement insert failed")?
            .error_for_status()
            .context("measurement insert rejected")?;

        Ok(())
    }
}
