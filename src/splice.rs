//! Marker-delimited regions in text documents.
//!
//! A region is everything strictly between a line containing the start
//! marker and the next line containing the end marker. Splicing replaces
//! the region and keeps both marker lines.

use once_cell::sync::Lazy;
use regex::Regex;

pub const TOC_HEADING: &str = "## Table of Contents";
const HEADING_PREFIX: &str = "## ";

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").unwrap());

/// Start/end marker pair, e.g. `<!-- START_PROBLEM -->` / `<!-- END_PROBLEM -->`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markers {
    pub start: &'static str,
    pub end: &'static str,
}

pub const SOLVED_STATS: Markers = Markers {
    start: "<!-- START_SOLVED_STATS -->",
    end: "<!-- END_SOLVED_STATS -->",
};

pub const TABLE_OF_CONTENTS: Markers = Markers {
    start: "<!-- START_TABLE_OF_CONTENTS -->",
    end: "<!-- END_TABLE_OF_CONTENTS -->",
};

pub const PROBLEM_TABLE: Markers = Markers {
    start: "<!-- START_PROBLEM -->",
    end: "<!-- END_PROBLEM -->",
};

/// Line indices `(start, end)` of the marker lines. The scan stops at the
/// first end marker; the last start marker seen before it wins.
pub fn find_region(lines: &[&str], markers: Markers) -> Option<(usize, usize)> {
    let mut start = None;
    for (i, line) in lines.iter().enumerate() {
        if line.contains(markers.start) {
            start = Some(i);
        }
        if line.contains(markers.end) {
            return start.map(|s| (s, i));
        }
    }
    None
}

/// Replaces the region between `markers` with `body`. Every element of
/// `body` is written as-is, so each should end in a newline. Returns `None`
/// when either marker is missing.
pub fn splice_between<S: AsRef<str>>(doc: &str, markers: Markers, body: &[S]) -> Option<String> {
    let lines: Vec<&str> = doc.split_inclusive('\n').collect();
    let (start, end) = find_region(&lines, markers)?;

    let mut out = String::with_capacity(doc.len());
    for line in &lines[..=start] {
        out.push_str(line);
    }
    for chunk in body {
        out.push_str(chunk.as_ref());
    }
    for line in &lines[end..] {
        out.push_str(line);
    }
    Some(out)
}

/// Anchor for a `## ` heading: `Setup & Usage` -> `setup--usage`.
pub fn heading_slug(heading: &str) -> String {
    let text = heading.replace("##", "");
    let text = NON_WORD.replace_all(text.trim(), "");
    text.to_lowercase().replace(' ', "-")
}

/// Table of contents for every `## ` heading in `doc` except the TOC heading.
pub fn generate_toc(doc: &str) -> Vec<String> {
    let mut toc = vec![format!("{}\n", TOC_HEADING)];
    for line in doc.lines() {
        if line.starts_with(HEADING_PREFIX) && !line.starts_with(TOC_HEADING) {
            let text = line.trim().replace("##", "");
            let text = text.trim();
            toc.push(format!("- [{}](#{})\n", text, heading_slug(text)));
        }
    }
    toc
}

/// Rewrites the TOC region of `doc` from its headings.
pub fn refresh_toc(doc: &str) -> Option<String> {
    splice_between(doc, TABLE_OF_CONTENTS, &generate_toc(doc))
}
