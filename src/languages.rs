use once_cell::sync::Lazy;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub extension: &'static str,
    pub name: &'static str,
}

const LANGUAGES_DATA: &[Language] = &[
    Language { extension: "py", name: "python" },
    Language { extension: "c", name: "c" },
    Language { extension: "cpp", name: "cpp" },
    Language { extension: "cs", name: "csharp" },
    Language { extension: "go", name: "go" },
    Language { extension: "hs", name: "haskell" },
    Language { extension: "java", name: "java" },
    Language { extension: "kt", name: "kotlin" },
    Language { extension: "php", name: "php" },
    Language { extension: "rb", name: "ruby" },
    Language { extension: "js", name: "javascript" },
];

/// Helper scripts that live next to the solutions but get no language badge.
pub const BADGE_EXEMPT_FILES: &[&str] = &["bnn_accuracy.py", "testing_tool.py", "unununion_find.py"];

pub const ICON_SIZE: u32 = 24;

static LANGUAGE_MAP: Lazy<HashMap<&'static str, &'static Language>> = Lazy::new(|| {
    let mut m = HashMap::new();
    for l in LANGUAGES_DATA.iter() {
        m.insert(l.extension, l);
    }
    m
});

pub fn all_languages() -> &'static [Language] {
    LANGUAGES_DATA
}

pub fn by_extension(ext: &str) -> Option<&'static Language> {
    LANGUAGE_MAP.get(ext).copied()
}

pub fn is_badge_exempt(file_name: &str) -> bool {
    BADGE_EXEMPT_FILES.contains(&file_name)
}

impl Language {
    pub fn icon_url(&self, size: u32) -> String {
        format!(
            "https://raw.githubusercontent.com/abrahamcalf/programming-languages-logos/master/src/{lang}/{lang}_{size}x{size}.png",
            lang = self.name,
            size = size,
        )
    }
}

/// `a_bit.cpp` -> (`a_bit`, `cpp`). A name without a dot is both stem and
/// extension.
pub fn split_file_name(file_name: &str) -> (&str, &str) {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) => (stem, ext),
        None => (file_name, file_name),
    }
}
