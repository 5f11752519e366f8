use chrono::NaiveDate;
use tracing::debug;

use crate::cache::{CACHE_EXPIRY_DAYS, CacheRecord, DifficultyCache};
use crate::catalog::CatalogIndex;
use crate::problems::{fallback_display_name, parse_pid, search_query};

pub const PROBLEM_URL_BASE: &str = "https://codeforces.com/problemset/problem";
pub const SEARCH_URL_BASE: &str = "https://codeforces.com/problemset?search=";
pub const UNKNOWN_DIFFICULTY: &str = "N/A";

/// What gets rendered for one solution file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInfo {
    pub difficulty: String,
    pub url: String,
    pub name: String,
    pub code: String,
}

/// Output record plus the cache record the caller should merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub info: ResolvedInfo,
    pub record: CacheRecord,
}

pub struct Resolver<'a> {
    catalog: &'a CatalogIndex,
    today: NaiveDate,
    expiry_days: i64,
}

impl<'a> Resolver<'a> {
    pub fn new(catalog: &'a CatalogIndex, today: NaiveDate) -> Self {
        Self {
            catalog,
            today,
            expiry_days: CACHE_EXPIRY_DAYS,
        }
    }

    pub fn with_expiry_days(mut self, days: i64) -> Self {
        self.expiry_days = days;
        self
    }

    /// Resolves `pid` without touching `cache`. Never fails: identifiers the
    /// catalog does not know get a search URL and an "N/A" difficulty.
    pub fn resolve(&self, pid: &str, cache: &DifficultyCache) -> Resolution {
        let cached = cache
            .fresh_difficulty(pid, self.today, self.expiry_days)
            .map(str::to_string);

        let parsed = parse_pid(pid);
        let normalized = parsed.as_ref().map(|p| p.normalized_name());
        let entry = match (&parsed, &normalized) {
            (Some(p), Some(n)) => self.catalog.lookup(&p.index, n),
            _ => None,
        };

        let search_url = {
            let query = normalized
                .as_deref()
                .map(search_query)
                .filter(|q| !q.is_empty())
                .unwrap_or_else(|| pid.to_string());
            format!("{}{}", SEARCH_URL_BASE, query)
        };
        let name = match &parsed {
            Some(p) => p.display_name(),
            None => fallback_display_name(pid),
        };

        let (difficulty, url, code) = match entry {
            Some(entry) => {
                let difficulty = cached.unwrap_or_else(|| match entry.rating {
                    Some(r) => r.to_string(),
                    None => UNKNOWN_DIFFICULTY.to_string(),
                });
                match entry.contest_id {
                    Some(contest_id) => (
                        difficulty,
                        format!("{}/{}/{}", PROBLEM_URL_BASE, contest_id, entry.index),
                        format!("{}{}", contest_id, entry.index),
                    ),
                    None => (difficulty, search_url, pid.to_string()),
                }
            }
            None => {
                debug!(pid, "no catalog match");
                (
                    cached.unwrap_or_else(|| UNKNOWN_DIFFICULTY.to_string()),
                    search_url,
                    pid.to_string(),
                )
            }
        };

        let record = CacheRecord::new(difficulty.clone(), self.today);
        Resolution {
            info: ResolvedInfo {
                difficulty,
                url,
                name,
                code,
            },
            record,
        }
    }

    /// `resolve` followed by merging the new record into `cache`.
    pub fn resolve_into(&self, pid: &str, cache: &mut DifficultyCache) -> ResolvedInfo {
        let Resolution { info, record } = self.resolve(pid, cache);
        cache.merge(pid, record);
        info
    }

    pub fn difficulty(&self, pid: &str, cache: &mut DifficultyCache) -> String {
        self.resolve_into(pid, cache).difficulty
    }
}
