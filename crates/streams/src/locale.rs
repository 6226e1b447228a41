//! Locale preference used when picking audio renditions.

/// Answers whether a rendition language matches the active playback locale.
pub trait LocaleMatcher: Send + Sync {
    /// Whether the user explicitly asked for this locale.
    fn explicit(&self) -> bool;

    /// A missing language tag is considered equivalent.
    fn equivalent(&self, language: Option<&str>) -> bool;
}

// ISO 639-2 (bibliographic and terminologic) codes mapped to ISO 639-1.
const ALPHA3_ALIASES: &[(&str, &str)] = &[
    ("ara", "ar"),
    ("chi", "zh"),
    ("zho", "zh"),
    ("cze", "cs"),
    ("ces", "cs"),
    ("dan", "da"),
    ("dut", "nl"),
    ("nld", "nl"),
    ("eng", "en"),
    ("fin", "fi"),
    ("fre", "fr"),
    ("fra", "fr"),
    ("ger", "de"),
    ("deu", "de"),
    ("gre", "el"),
    ("ell", "el"),
    ("heb", "he"),
    ("hin", "hi"),
    ("hun", "hu"),
    ("ind", "id"),
    ("ita", "it"),
    ("jpn", "ja"),
    ("kor", "ko"),
    ("nor", "no"),
    ("pol", "pl"),
    ("por", "pt"),
    ("rum", "ro"),
    ("ron", "ro"),
    ("rus", "ru"),
    ("spa", "es"),
    ("swe", "sv"),
    ("tha", "th"),
    ("tur", "tr"),
    ("ukr", "uk"),
    ("vie", "vi"),
];

/// Normalizes a language tag (`ja`, `jpn`, `ja-JP`, `ja_JP`) to a lowercase
/// ISO 639-1 code when one is known, else to its lowercase primary subtag.
pub fn normalize_language(tag: &str) -> Option<String> {
    let primary = tag
        .split(['-', '_'])
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())?
        .to_ascii_lowercase();

    if !primary.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let code = ALPHA3_ALIASES
        .iter()
        .find(|(alpha3, _)| *alpha3 == primary)
        .map(|(_, alpha2)| (*alpha2).to_string())
        .unwrap_or(primary);
    Some(code)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Localization {
    language: String,
    country: Option<String>,
    explicit: bool,
}

impl Localization {
    pub const DEFAULT_LOCALE: &str = "en_US";

    /// A locale requested by the user. Falls back to [`Self::DEFAULT_LOCALE`]
    /// (still marked explicit) if the tag cannot be understood.
    pub fn requested(tag: &str) -> Self {
        let mut locale = Self::parse(tag).unwrap_or_else(Self::fallback);
        locale.explicit = true;
        locale
    }

    /// The locale of the environment (`LC_ALL`, `LC_MESSAGES`, `LANG`).
    pub fn from_env() -> Self {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|key| std::env::var(key).ok())
            .filter(|value| !value.is_empty() && value != "C" && value != "POSIX")
            .find_map(|value| {
                // strip encoding and modifier, e.g. "ja_JP.UTF-8@euro"
                let tag = value.split(['.', '@']).next().unwrap_or_default().to_string();
                Self::parse(&tag)
            })
            .unwrap_or_else(Self::fallback)
    }

    fn parse(tag: &str) -> Option<Self> {
        let language = normalize_language(tag)?;
        let country = tag
            .split(['-', '_'])
            .nth(1)
            .filter(|c| !c.is_empty())
            .map(str::to_ascii_uppercase);
        Some(Self {
            language,
            country,
            explicit: false,
        })
    }

    fn fallback() -> Self {
        Self {
            language: "en".to_string(),
            country: Some("US".to_string()),
            explicit: false,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }
}

impl Default for Localization {
    fn default() -> Self {
        Self::fallback()
    }
}

impl std::fmt::Display for Localization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.country {
            Some(country) => write!(f, "{}_{}", self.language, country),
            None => write!(f, "{}", self.language),
        }
    }
}

impl LocaleMatcher for Localization {
    fn explicit(&self) -> bool {
        self.explicit
    }

    fn equivalent(&self, language: Option<&str>) -> bool {
        match language {
            None => true,
            Some(tag) => normalize_language(tag).is_some_and(|code| code == self.language),
        }
    }
}
