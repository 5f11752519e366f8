use crate::docs::SolutionFile;
use crate::languages::ICON_SIZE;
use crate::resolve::ResolvedInfo;

pub const README_NOTE: &str =
    "Note that the table below is auto-generated. There might be slight inaccuracies.";
pub const README_TABLE_HEADER: &str = "|Problem Name|Problem ID|Difficulty|Languages|";
pub const README_TABLE_ALIGN: &str = "|:---|:---|:---|:---|";

/// Where rows link to.
#[derive(Debug, Clone)]
pub struct Links {
    /// Browsable repository folder holding the solutions, without a trailing slash.
    pub repo_url: String,
    /// Path of the solutions folder relative to the document.
    pub local_dir: String,
}

impl Links {
    pub fn repo_file(&self, file_name: &str) -> String {
        format!("{}/{}", self.repo_url.trim_end_matches('/'), file_name)
    }

    pub fn local_file(&self, file_name: &str) -> String {
        let dir = self.local_dir.trim_end_matches('/');
        if dir.is_empty() {
            file_name.to_string()
        } else {
            format!("{}/{}", dir, file_name)
        }
    }
}

/// `|[a_bit.cpp](repo)| [A. Bit](url) | 800 | [![cpp](icon)](solutions/a_bit.cpp)|`
pub fn readme_row(file: &SolutionFile, info: &ResolvedInfo, links: &Links) -> String {
    let icon = if file.badge_exempt {
        String::new()
    } else {
        format!(
            "[![{}]({})]({})",
            file.extension,
            file.language.icon_url(ICON_SIZE),
            links.local_file(&file.file_name)
        )
    };
    format!(
        "|[{}]({})| [{}]({}) | {} | {}|\n",
        file.file_name,
        links.repo_file(&file.file_name),
        info.name,
        info.url,
        info.difficulty,
        icon
    )
}

/// Heading, note and table header followed by `rows`.
pub fn solved_stats_section(rows: &[String]) -> Vec<String> {
    let mut out = vec![
        format!("## Total problems solved: {}\n\n", rows.len()),
        format!("{}\n\n", README_NOTE),
        format!("{}\n", README_TABLE_HEADER),
        format!("{}\n", README_TABLE_ALIGN),
    ];
    out.extend(rows.iter().cloned());
    out
}

pub fn html_row(file: &SolutionFile, info: &ResolvedInfo, links: &Links) -> String {
    let icon = if file.badge_exempt {
        String::new()
    } else {
        format!(
            r#"<a href="{}" target="_blank"><img alt="{}" src="{}" /></a>"#,
            links.repo_file(&file.file_name),
            file.extension,
            file.language.icon_url(ICON_SIZE)
        )
    };
    format!(
        r#"        <tr>
            <td><a href="{url}">{name}</a></td>
            <td>{code}</td>
            <td>{difficulty}</td>
            <td class="language-icon">{icon}</td>
        </tr>
"#,
        url = info.url,
        name = info.name,
        code = info.code,
        difficulty = info.difficulty,
        icon = icon,
    )
}
