use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// An identifier such as `a_beautiful_matrix`, split into its problem index
/// (`A`) and the words of its name (`beautiful matrix`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPid {
    pub index: String,
    pub raw_name: String,
}

impl ParsedPid {
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.raw_name)
    }

    /// "A. Beautiful Matrix"
    pub fn display_name(&self) -> String {
        format!("{}. {}", self.index, pretty_name(&self.raw_name))
    }
}

/// Splits an identifier on underscores. Returns `None` unless there is a
/// non-empty index segment followed by a non-empty name.
pub fn parse_pid(pid: &str) -> Option<ParsedPid> {
    let mut parts = pid.split('_');
    let index = parts.next()?.to_uppercase();
    let raw_name = parts.join(" ");
    if index.is_empty() || raw_name.is_empty() {
        return None;
    }
    Some(ParsedPid { index, raw_name })
}

/// Lower-cases, turns every run of non-alphanumerics into one space and trims.
pub fn normalize_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let spaced = NON_ALNUM.replace_all(&lowered, " ");
    spaced.split_whitespace().join(" ")
}

/// Capitalizes each whitespace-separated word.
pub fn pretty_name(raw_name: &str) -> String {
    raw_name.split_whitespace().map(capitalize).join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Upper-cases every letter that follows a non-letter and lower-cases the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_letter = true;
        } else {
            out.push(c);
            prev_letter = false;
        }
    }
    out
}

/// Display name for identifiers that do not parse: `weird_one` -> `Weird One`.
pub fn fallback_display_name(pid: &str) -> String {
    title_case(&pid.replace('_', " "))
}

/// Query string for the problemset search page.
pub fn search_query(normalized_name: &str) -> String {
    normalized_name.replace(' ', "+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_pid_splits_index_and_name() {
        let p = parse_pid("a_beautiful_matrix").expect("should parse");
        assert_eq!(p.index, "A");
        assert_eq!(p.raw_name, "beautiful matrix");
        assert_eq!(p.display_name(), "A. Beautiful Matrix");

        let p = parse_pid("c1_guess_the_perm").expect("should parse");
        assert_eq!(p.index, "C1");
        assert_eq!(p.raw_name, "guess the perm");
    }

    #[test]
    fn parse_pid_rejects_malformed() {
        assert_eq!(parse_pid("weird"), None);
        assert_eq!(parse_pid(""), None);
        assert_eq!(parse_pid("a_"), None);
        assert_eq!(parse_pid("_matrix"), None);
    }

    #[test]
    fn normalize_ignores_case_punctuation_and_spacing() {
        assert_eq!(normalize_name("Beautiful Matrix"), "beautiful matrix");
        assert_eq!(normalize_name("  beautiful---MATRIX!! "), "beautiful matrix");
        assert_eq!(normalize_name("Petya and Strings"), normalize_name("petya_and_strings"));
        assert_eq!(normalize_name("K-th Not Divisible by n"), "k th not divisible by n");
        assert_eq!(normalize_name("!!!"), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        for s in ["Way Too Long Words", "Déjà vu?", "  a  b  ", "x__y", "A+B (Trial Problem)"] {
            let once = normalize_name(s);
            assert_eq!(normalize_name(&once), once);
        }
    }

    #[test]
    fn fallback_display_title_cases() {
        assert_eq!(fallback_display_name("weird"), "Weird");
        assert_eq!(fallback_display_name("x_"), "X ");
        assert_eq!(fallback_display_name("mIxEd"), "Mixed");
        assert_eq!(fallback_display_name(""), "");
    }

    #[test]
    fn pretty_name_collapses_spacing() {
        assert_eq!(pretty_name(" next  round"), "Next Round");
        assert_eq!(search_query("unknown problem"), "unknown+problem");
    }
}
