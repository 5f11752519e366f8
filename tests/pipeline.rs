use std::fs;
use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;

use cpdocs::api::{CatalogEntry, StaticCatalog};
use cpdocs::cache::{CacheRecord, DifficultyCache};
use cpdocs::catalog::CatalogIndex;
use cpdocs::docs;
use cpdocs::render::Links;
use cpdocs::resolve::Resolver;

const README: &str = "# Competitive Programming

<!-- START_TABLE_OF_CONTENTS -->
stale toc
<!-- END_TABLE_OF_CONTENTS -->

## Setup

Clone the repo.

<!-- START_SOLVED_STATS -->
old stats
<!-- END_SOLVED_STATS -->
";

const HTML: &str = "<table>
    <tbody>
        <!-- START_PROBLEM -->
        <tr><td>old</td></tr>
        <!-- END_PROBLEM -->
    </tbody>
</table>
";

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

fn links() -> Links {
    Links {
        repo_url: "https://github.com/u/r/tree/main/solutions".into(),
        local_dir: "solutions".into(),
    }
}

fn setup(root: &Path) -> Result<()> {
    let solutions = root.join("solutions");
    fs::create_dir_all(&solutions)?;
    for name in [
        "z_unknown_problem.py",
        "a_beautiful_matrix.cpp",
        "weird.go",
        "testing_tool.py",
        "notes.md",
    ] {
        fs::write(solutions.join(name), "")?;
    }
    fs::write(root.join("README.md"), README)?;
    fs::write(root.join("index.html"), HTML)?;
    Ok(())
}

fn catalog() -> CatalogIndex {
    CatalogIndex::load(&StaticCatalog::new(vec![CatalogEntry::new(
        263,
        "A",
        "Beautiful Matrix",
        Some(1200),
    )]))
}

#[test]
fn readme_and_html_are_regenerated_and_stable() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let root = dir.path();
    setup(root)?;

    let index = catalog();
    let resolver = Resolver::new(&index, today());
    let mut cache = DifficultyCache::new();
    let files = docs::collect_solutions(&root.join("solutions"))?;
    assert_eq!(files.len(), 4);

    let readme = root.join("README.md");
    let html = root.join("index.html");
    assert!(docs::update_readme(&readme, &files, &resolver, &mut cache, &links())?);
    assert!(docs::update_html(&html, &files, &resolver, &mut cache, &links())?);

    let text = fs::read_to_string(&readme)?;
    assert!(text.contains("## Total problems solved: 4\n"));
    assert!(!text.contains("old stats"));
    assert!(text.contains(
        "| [A. Beautiful Matrix](https://codeforces.com/problemset/problem/263/A) | 1200 |"
    ));
    assert!(text.contains("[Z. Unknown Problem](https://codeforces.com/problemset?search=unknown+problem) | N/A |"));
    assert!(text.contains("| [Weird](https://codeforces.com/problemset?search=weird) | N/A |"));
    assert!(text.contains(
        "<!-- START_TABLE_OF_CONTENTS -->\n## Table of Contents\n- [Setup](#setup)\n- [Total problems solved: 4](#total-problems-solved-4)\n<!-- END_TABLE_OF_CONTENTS -->"
    ));

    // README rows are ordered by identifier.
    let a = text.find("a_beautiful_matrix.cpp").unwrap();
    let t = text.find("testing_tool.py").unwrap();
    let w = text.find("weird.go").unwrap();
    let z = text.find("z_unknown_problem.py").unwrap();
    assert!(a < t && t < w && w < z);

    let page = fs::read_to_string(&html)?;
    assert!(!page.contains("<td>old</td>"));
    assert!(page.contains("<td>263A</td>"));
    assert!(page.contains("<td>z_unknown_problem</td>"));
    assert!(page.contains("        </tr>\n        <!-- END_PROBLEM -->\n    </tbody>"));

    // One record per identifier, stamped today.
    assert_eq!(cache.len(), 4);
    assert_eq!(
        cache.get("a_beautiful_matrix"),
        Some(&CacheRecord::new("1200", today()))
    );

    // A second run with the same inputs changes nothing.
    assert!(!docs::update_readme(&readme, &files, &resolver, &mut cache, &links())?);
    assert!(!docs::update_html(&html, &files, &resolver, &mut cache, &links())?);
    assert_eq!(fs::read_to_string(&readme)?, text);
    assert_eq!(fs::read_to_string(&html)?, page);
    Ok(())
}

#[test]
fn cache_round_trip_keeps_difficulties_offline() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let root = dir.path();
    setup(root)?;
    let cache_file = root.join("difficulty_cache.json");
    let files = docs::collect_solutions(&root.join("solutions"))?;

    {
        let index = catalog();
        let resolver = Resolver::new(&index, today());
        let mut cache = DifficultyCache::new();
        docs::update_readme(&root.join("README.md"), &files, &resolver, &mut cache, &links())?;
        cache.save(&cache_file)?;
    }

    // Next month the catalog is down, but the cached rating is still fresh.
    let index = CatalogIndex::unavailable("offline");
    let resolver = Resolver::new(&index, today() + chrono::Duration::days(30));
    let (mut cache, _) = DifficultyCache::load(&cache_file);
    let readme = root.join("README.md");
    docs::update_readme(&readme, &files, &resolver, &mut cache, &links())?;

    let text = fs::read_to_string(&readme)?;
    assert!(text.contains(
        "[A. Beautiful Matrix](https://codeforces.com/problemset?search=beautiful+matrix) | 1200 |"
    ));
    Ok(())
}
