//! # Document generation
//!
//! Walks the solutions folder, resolves every recognized file and splices the
//! rendered rows into the README and the HTML index. Resolution records are
//! merged into the difficulty cache as they are produced, and the cache is
//! saved once after all documents are done.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, error, info};

use crate::cache::DifficultyCache;
use crate::error::DocsError;
use crate::languages::{self, Language};
use crate::render::{self, Links};
use crate::resolve::Resolver;
use crate::splice::{self, Markers};

/// A solution file whose extension is in the language map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionFile {
    pub file_name: String,
    pub pid: String,
    pub extension: String,
    pub language: &'static Language,
    pub badge_exempt: bool,
}

impl SolutionFile {
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (pid, ext) = languages::split_file_name(file_name);
        let language = languages::by_extension(ext)?;
        Some(Self {
            file_name: file_name.to_string(),
            pid: pid.to_string(),
            extension: ext.to_string(),
            language,
            badge_exempt: languages::is_badge_exempt(file_name),
        })
    }
}

/// Regular files in `dir` with a known extension, sorted by file name.
pub fn collect_solutions(dir: &Path) -> Result<Vec<SolutionFile>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| anyhow::Error::new(e).context(DocsError::SolutionsDir(dir.to_path_buf())))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to list {}", dir.display()))?;
        let path = entry.path();
        if !fs::metadata(&path).is_ok_and(|m| m.is_file()) {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            debug!(path = %path.display(), "skipping non-UTF-8 file name");
            continue;
        };
        match SolutionFile::from_file_name(&name) {
            Some(file) => files.push(file),
            None => debug!(file = %name, "skipping unrecognized extension"),
        }
    }
    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(files)
}

fn splice_or_keep<S: AsRef<str>>(doc: String, markers: Markers, body: &[S]) -> String {
    match splice::splice_between(&doc, markers, body) {
        Some(spliced) => spliced,
        None => {
            debug!(start = markers.start, end = markers.end, "markers not found, leaving region as is");
            doc
        }
    }
}

/// README text with the solved-stats block and the table of contents regenerated.
pub fn render_readme(
    doc: &str,
    files: &[SolutionFile],
    resolver: &Resolver,
    cache: &mut DifficultyCache,
    links: &Links,
) -> String {
    let mut rows: Vec<(&str, String)> = files
        .iter()
        .map(|file| {
            let info = resolver.resolve_into(&file.pid, cache);
            (file.pid.as_str(), render::readme_row(file, &info, links))
        })
        .collect();
    rows.sort_by(|a, b| a.0.cmp(b.0));
    let rows: Vec<String> = rows.into_iter().map(|(_, row)| row).collect();

    let doc = splice_or_keep(doc.to_string(), splice::SOLVED_STATS, &render::solved_stats_section(&rows));
    match splice::refresh_toc(&doc) {
        Some(with_toc) => with_toc,
        None => {
            debug!("table of contents markers not found, leaving region as is");
            doc
        }
    }
}

/// HTML text with the problem table regenerated, rows in listing order.
pub fn render_html(
    doc: &str,
    files: &[SolutionFile],
    resolver: &Resolver,
    cache: &mut DifficultyCache,
    links: &Links,
) -> String {
    // Skip resolution entirely when there is nowhere to put the rows.
    let lines: Vec<&str> = doc.split_inclusive('\n').collect();
    if splice::find_region(&lines, splice::PROBLEM_TABLE).is_none() {
        debug!("problem table markers not found, leaving document as is");
        return doc.to_string();
    }
    let rows: Vec<String> = files
        .iter()
        .map(|file| {
            let info = resolver.resolve_into(&file.pid, cache);
            render::html_row(file, &info, links)
        })
        .collect();
    splice_or_keep(doc.to_string(), splice::PROBLEM_TABLE, &rows)
}

type Renderer = fn(&str, &[SolutionFile], &Resolver, &mut DifficultyCache, &Links) -> String;

fn update_file(
    path: &Path,
    render: Renderer,
    files: &[SolutionFile],
    resolver: &Resolver,
    cache: &mut DifficultyCache,
    links: &Links,
) -> Result<bool> {
    let doc = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let updated = render(&doc, files, resolver, cache, links);
    if updated == doc {
        info!(path = %path.display(), "already up to date");
        return Ok(false);
    }
    fs::write(path, updated).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), problems = files.len(), "updated");
    Ok(true)
}

/// Rewrites the README in place. Returns whether its contents changed.
pub fn update_readme(
    path: &Path,
    files: &[SolutionFile],
    resolver: &Resolver,
    cache: &mut DifficultyCache,
    links: &Links,
) -> Result<bool> {
    update_file(path, render_readme, files, resolver, cache, links)
}

/// Rewrites the HTML index in place. Returns whether its contents changed.
pub fn update_html(
    path: &Path,
    files: &[SolutionFile],
    resolver: &Resolver,
    cache: &mut DifficultyCache,
    links: &Links,
) -> Result<bool> {
    update_file(path, render_html, files, resolver, cache, links)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Readme,
    Html,
}

/// One document to regenerate.
#[derive(Debug, Clone)]
pub struct Target {
    pub kind: DocumentKind,
    pub path: PathBuf,
    pub links: Links,
}

/// Updates every target, then saves `cache` to `cache_path` even when a
/// document failed, so difficulties resolved in this run are kept. Returns
/// the first document error, if any.
pub fn update_documents(
    targets: &[Target],
    files: &[SolutionFile],
    resolver: &Resolver,
    cache: &mut DifficultyCache,
    cache_path: &Path,
) -> Result<()> {
    let mut first_err = None;
    for target in targets {
        let result = match target.kind {
            DocumentKind::Readme => update_readme(&target.path, files, resolver, cache, &target.links),
            DocumentKind::Html => update_html(&target.path, files, resolver, cache, &target.links),
        };
        if let Err(e) = result {
            let reason = format!("{e:#}");
            error!(path = %target.path.display(), %reason, "document update failed");
            first_err.get_or_insert(e);
        }
    }

    let saved = cache.save(cache_path);
    match first_err {
        Some(e) => {
            if let Err(save_err) = saved {
                let reason = format!("{save_err:#}");
                error!(%reason, "difficulty cache not saved");
            }
            Err(e)
        }
        None => saved,
    }
}
