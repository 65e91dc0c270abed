use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::Serialize;
use strsim::jaro_winkler;

/// Output format selected by the global `--json` flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFmt {
    Pretty,
    Json,
}

/// Print `rows` as JSON, or run the pretty printer.
pub fn emit<T: Serialize>(fmt: OutputFmt, rows: &T, pretty: impl FnOnce()) {
    match fmt {
        OutputFmt::Json => match serde_json::to_string_pretty(rows) {
            Ok(s) => println!("{}", s),
            Err(e) => tracing::warn!("could not serialize output: {e}"),
        },
        OutputFmt::Pretty => pretty(),
    }
}

/// Flat key/value CLI config persisted as TOML. Holds the sync credentials:
/// `remote.url`, `remote.key`, `user.id`.
#[derive(Debug, Default, Clone)]
pub struct Config {
    pub map: BTreeMap<String, String>,
}

pub const CFG_REMOTE_URL: &str = "remote.url";
pub const CFG_REMOTE_KEY: &str = "remote.key";
pub const CFG_USER_ID: &str = "user.id";

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join("forma").join("config"))
            .context("Could not determine config directory")
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let map = toml::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(Self { map })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let content = toml::to_string(&self.map)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}

pub static ALLOWED_MUSCLES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "biceps",
        "triceps",
        "forearms",
        "chest",
        "shoulders",
        "back",
        "quads",
        "hamstrings",
        "glutes",
        "calves",
        "abs",
    ])
});

/// Returns the canonical lowercase muscle name or `None` if not allowed.
pub fn canonical_muscle<S: AsRef<str>>(m: S) -> Option<String> {
    let m = m.as_ref().to_ascii_lowercase();
    if ALLOWED_MUSCLES.contains(m.as_str()) {
        Some(m)
    } else {
        None
    }
}

const MIN_SCORE: f64 = 0.80;
const GAP: f64 = 0.02;

/// Closest candidate for `input` if similarity ≥ 0.80 *and* clearly better
/// than the runner-up. Otherwise `None` (no suggestion shown).
pub fn closest_match<'a, I>(input: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let inp = input.to_ascii_lowercase();

    let mut scores: Vec<(&'a str, f64)> = candidates
        .into_iter()
        .map(|c| (c, jaro_winkler(&inp, &c.to_ascii_lowercase())))
        .collect();

    if scores.is_empty() {
        return None;
    }

    // Highest score first.
    scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let (best, best_score) = scores[0];
    let second_score = scores.get(1).map(|(_, s)| *s).unwrap_or(0.0);

    if best_score >= MIN_SCORE && best_score - second_score >= GAP {
        Some(best)
    } else {
        None
    }
}

/// Suggestion helper for muscle-group filters.
pub fn best_muscle_suggestion(input: &str) -> Option<&'static str> {
    closest_match(input, ALLOWED_MUSCLES.iter().copied())
}
