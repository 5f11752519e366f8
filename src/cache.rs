//! # Difficulty cache
//!
//! A flat JSON object `pid -> {difficulty, last_updated}` that is read once at
//! the start of a run and written back once at the end. A record is trusted
//! only while its `last_updated` date lies within the expiry window.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

pub const DEFAULT_CACHE_FILE: &str = "difficulty_cache.json";
pub const CACHE_EXPIRY_DAYS: i64 = 60;
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheRecord {
    #[serde(default, deserialize_with = "string_or_number")]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl CacheRecord {
    pub fn new(difficulty: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            difficulty: Some(difficulty.into()),
            last_updated: Some(date.format(DATE_FORMAT).to_string()),
        }
    }

    pub fn last_updated_date(&self) -> Option<NaiveDate> {
        let s = self.last_updated.as_deref()?;
        NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
    }

    /// Fresh when it carries a difficulty and no more than `expiry_days` have
    /// passed since `last_updated`. Records without a readable date are never
    /// fresh.
    pub fn is_fresh(&self, today: NaiveDate, expiry_days: i64) -> bool {
        self.difficulty.is_some()
            && self
                .last_updated_date()
                .is_some_and(|d| (today - d).num_days() <= expiry_days)
    }
}

// Older cache files stored ratings as bare numbers.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(i64),
    }
    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Str(s) => s,
        Raw::Num(n) => n.to_string(),
    }))
}

/// How `DifficultyCache::load` went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Missing,
    Loaded { records: usize },
    Reset { reason: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DifficultyCache {
    records: BTreeMap<String, CacheRecord>,
}

impl DifficultyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the cache file. A missing file gives an empty cache; an
    /// unreadable or corrupt one is reported and also gives an empty cache,
    /// to be overwritten by the next `save`. Individual records that do not
    /// fit the record shape are dropped and the rest kept.
    pub fn load(path: &Path) -> (Self, LoadOutcome) {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no difficulty cache yet");
                return (Self::new(), LoadOutcome::Missing);
            }
            Err(e) => {
                let reason = format!("failed to read {}: {}", path.display(), e);
                warn!(%reason, "resetting difficulty cache");
                return (Self::new(), LoadOutcome::Reset { reason });
            }
        };

        let raw = match serde_json::from_str::<BTreeMap<String, serde_json::Value>>(&text) {
            Ok(raw) => raw,
            Err(e) => {
                let reason = format!("failed to parse {}: {}", path.display(), e);
                warn!(%reason, "resetting difficulty cache");
                return (Self::new(), LoadOutcome::Reset { reason });
            }
        };

        // A malformed record only costs its own entry.
        let mut records = BTreeMap::new();
        for (pid, value) in raw {
            match serde_json::from_value::<CacheRecord>(value) {
                Ok(record) => {
                    records.insert(pid, record);
                }
                Err(e) => debug!(pid = %pid, error = %e, "dropping unreadable cache record"),
            }
        }
        let outcome = LoadOutcome::Loaded {
            records: records.len(),
        };
        debug!(path = %path.display(), records = records.len(), "difficulty cache loaded");
        (Self { records }, outcome)
    }

    /// Overwrites `path` with the whole cache as 4-space indented JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(
            &mut buf,
            serde_json::ser::PrettyFormatter::with_indent(b"    "),
        );
        self.records.serialize(&mut ser)?;
        buf.write_all(b"\n")?;
        fs::write(path, buf).with_context(|| format!("failed to write {}", path.display()))?;
        debug!(path = %path.display(), records = self.records.len(), "difficulty cache saved");
        Ok(())
    }

    pub fn get(&self, pid: &str) -> Option<&CacheRecord> {
        self.records.get(pid)
    }

    /// The cached difficulty for `pid` if its record is still fresh.
    pub fn fresh_difficulty(&self, pid: &str, today: NaiveDate, expiry_days: i64) -> Option<&str> {
        self.records
            .get(pid)
            .filter(|r| r.is_fresh(today, expiry_days))
            .and_then(|r| r.difficulty.as_deref())
    }

    /// Replaces whatever was stored for `pid`.
    pub fn merge(&mut self, pid: impl Into<String>, record: CacheRecord) {
        self.records.insert(pid.into(), record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
