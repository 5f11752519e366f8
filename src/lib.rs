// # cpdocs: documentation generator for a competitive-programming archive
//
// Scans a directory of solution files, resolves each file name against the
// Codeforces problem catalog (with a local difficulty cache), and rewrites the
// generated sections of the README and the HTML index page.
//
// The network client is gated behind the `reqwest` feature so the rest of the
// crate can be used (and tested) offline with a `StaticCatalog`.

/// Shared blocking HTTP client. Enabled with the `reqwest` feature.
#[cfg(feature = "reqwest")]
pub mod client;

/// Catalog records and the sources that produce them.
pub mod api;

/// Lookup table over the catalog, built once per run.
pub mod catalog;

/// Persisted difficulty cache.
pub mod cache;

/// Command-line options and resolved paths.
pub mod config;

/// Document generation: directory walk, README and HTML pipelines.
pub mod docs;

pub mod error;

/// Extension to language mapping and icon URLs.
pub mod languages;

pub mod logging;

/// Identifier parsing and problem-name normalization.
pub mod problems;

/// Markdown and HTML row rendering.
pub mod render;

/// Per-identifier metadata resolution.
pub mod resolve;

/// Marker-based document splicing and table-of-contents generation.
pub mod splice;

pub use error::DocsError;
