use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::DocsError;

pub const CODEFORCES_PROBLEMSET_URL: &str = "https://codeforces.com/api/problemset.problems";

/// One problem from the catalog. Entries without an index or a name never
/// make it this far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub contest_id: Option<i64>,
    pub index: String,
    pub name: String,
    pub rating: Option<i64>,
}

impl CatalogEntry {
    pub fn new(contest_id: i64, index: &str, name: &str, rating: Option<i64>) -> Self {
        Self {
            contest_id: Some(contest_id),
            index: index.to_string(),
            name: name.to_string(),
            rating,
        }
    }
}

/// Anything that can hand over the full problem list in one go.
pub trait CatalogSource {
    fn fetch(&self) -> Result<Vec<CatalogEntry>>;
}

#[derive(Deserialize)]
struct Envelope {
    status: String,
    #[serde(default)]
    comment: Option<String>,
    #[serde(default)]
    result: Option<ProblemsResult>,
}

#[derive(Deserialize)]
struct ProblemsResult {
    problems: Vec<RawProblem>,
}

#[derive(Deserialize)]
struct RawProblem {
    #[serde(rename = "contestId", default)]
    contest_id: Option<i64>,
    #[serde(default)]
    index: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    rating: Option<i64>,
}

/// Parses a `problemset.problems` payload.
pub fn parse_catalog(body: &str) -> Result<Vec<CatalogEntry>> {
    let envelope: Envelope =
        serde_json::from_str(body).context("Failed to parse catalog response")?;
    if envelope.status != "OK" {
        let status = match envelope.comment {
            Some(comment) => format!("{}: {}", envelope.status, comment),
            None => envelope.status,
        };
        return Err(DocsError::CatalogStatus { status }.into());
    }
    let result = envelope.result.ok_or(DocsError::CatalogMissingResult)?;

    let entries = result
        .problems
        .into_iter()
        .filter_map(|p| {
            let index = p.index.filter(|s| !s.is_empty())?;
            let name = p.name.filter(|s| !s.is_empty())?;
            Some(CatalogEntry {
                contest_id: p.contest_id,
                index,
                name,
                rating: p.rating,
            })
        })
        .collect();
    Ok(entries)
}

/// The live Codeforces API.
#[derive(Debug, Clone)]
pub struct CodeforcesApi {
    url: String,
}

impl CodeforcesApi {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Default for CodeforcesApi {
    fn default() -> Self {
        Self::new(CODEFORCES_PROBLEMSET_URL)
    }
}

impl CatalogSource for CodeforcesApi {
    #[cfg(feature = "reqwest")]
    fn fetch(&self) -> Result<Vec<CatalogEntry>> {
        let client = &*crate::client::BLOCKING_CLIENT;
        let res = client
            .get(&self.url)
            .send()
            .with_context(|| format!("Failed to GET {}", self.url))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().unwrap_or_default();
            anyhow::bail!("{} returned {}: {}", self.url, status, body);
        }

        let body = res.text().context("Failed to read catalog body")?;
        parse_catalog(&body)
    }

    #[cfg(not(feature = "reqwest"))]
    fn fetch(&self) -> Result<Vec<CatalogEntry>> {
        Err(DocsError::NetworkDisabled.into())
    }
}

/// A fixed in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    pub entries: Vec<CatalogEntry>,
}

impl StaticCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }
}

impl CatalogSource for StaticCatalog {
    fn fetch(&self) -> Result<Vec<CatalogEntry>> {
        Ok(self.entries.clone())
    }
}
