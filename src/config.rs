use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::api::CODEFORCES_PROBLEMSET_URL;
use crate::cache::{CACHE_EXPIRY_DAYS, DEFAULT_CACHE_FILE};
use crate::docs::{DocumentKind, Target};
use crate::logging::LogLevel;
use crate::render::Links;

pub const DEFAULT_README_REPO_URL: &str =
    "https://github.com/simonsejse/competitive-programming/tree/main/solutions";
pub const DEFAULT_HTML_REPO_URL: &str =
    "https://github.com/simonwinther/codeforces-cp/tree/main/solutions";

#[derive(Parser, Debug)]
#[command(name = "cpdocs", about = "Regenerate the solved-problem tables of README.md and docs/index.html")]
pub struct Cli {
    #[command(flatten)]
    pub config: SiteConfig,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Update the solved-stats table and the table of contents in the README
    Readme,
    /// Update the problem table in the HTML index
    Html,
    /// Update both documents with a single catalog fetch
    All,
}

impl Commands {
    pub fn readme(self) -> bool {
        matches!(self, Commands::Readme | Commands::All)
    }

    pub fn html(self) -> bool {
        matches!(self, Commands::Html | Commands::All)
    }
}

#[derive(Args, Debug, Clone)]
pub struct SiteConfig {
    /// Folder holding the solution files
    #[arg(long, global = true, default_value = "solutions")]
    pub solutions_dir: PathBuf,

    #[arg(long, global = true, default_value = "README.md")]
    pub readme: PathBuf,

    #[arg(long, global = true, default_value = "docs/index.html")]
    pub html: PathBuf,

    #[arg(long, global = true, default_value = DEFAULT_CACHE_FILE)]
    pub cache_file: PathBuf,

    /// Repository folder the README rows link to
    #[arg(long, global = true, default_value = DEFAULT_README_REPO_URL)]
    pub readme_repo_url: String,

    /// Repository folder the HTML language icons link to
    #[arg(long, global = true, default_value = DEFAULT_HTML_REPO_URL)]
    pub html_repo_url: String,

    #[arg(long, global = true, default_value = CODEFORCES_PROBLEMSET_URL)]
    pub catalog_url: String,

    /// Do not contact the catalog; rely on the cache only
    #[arg(long, global = true)]
    pub offline: bool,

    /// Days a cached difficulty stays trusted
    #[arg(long, global = true, default_value_t = CACHE_EXPIRY_DAYS)]
    pub expiry_days: i64,

    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

impl SiteConfig {
    /// Folder name used for relative links from the README.
    fn local_dir(&self) -> String {
        self.solutions_dir.to_string_lossy().replace('\\', "/")
    }

    pub fn readme_links(&self) -> Links {
        Links {
            repo_url: self.readme_repo_url.clone(),
            local_dir: self.local_dir(),
        }
    }

    pub fn html_links(&self) -> Links {
        Links {
            repo_url: self.html_repo_url.clone(),
            local_dir: self.local_dir(),
        }
    }

    /// Documents `cmd` asks for, README first.
    pub fn targets(&self, cmd: Commands) -> Vec<Target> {
        let mut targets = Vec::new();
        if cmd.readme() {
            targets.push(Target {
                kind: DocumentKind::Readme,
                path: self.readme.clone(),
                links: self.readme_links(),
            });
        }
        if cmd.html() {
            targets.push(Target {
                kind: DocumentKind::Html,
                path: self.html.clone(),
                links: self.html_links(),
            });
        }
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_archive_layout() {
        let cli = Cli::parse_from(["cpdocs", "all"]);
        assert_eq!(cli.cmd, Commands::All);
        assert_eq!(cli.config.solutions_dir, PathBuf::from("solutions"));
        assert_eq!(cli.config.html, PathBuf::from("docs/index.html"));
        assert_eq!(cli.config.cache_file, PathBuf::from("difficulty_cache.json"));
        assert_eq!(cli.config.expiry_days, 60);
        assert!(!cli.config.offline);
        assert_eq!(cli.config.readme_links().local_dir, "solutions");

        let kinds: Vec<DocumentKind> = cli.config.targets(cli.cmd).iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![DocumentKind::Readme, DocumentKind::Html]);
        assert_eq!(cli.config.targets(Commands::Html)[0].path, PathBuf::from("docs/index.html"));
    }

    #[test]
    fn options_after_subcommand() {
        let cli = Cli::parse_from(["cpdocs", "readme", "--offline", "--expiry-days", "7"]);
        assert!(cli.cmd.readme());
        assert!(!cli.cmd.html());
        assert!(cli.config.offline);
        assert_eq!(cli.config.expiry_days, 7);
    }
}
