//! External audio selection for a single variant.

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::locale::LocaleMatcher;
use crate::manifest::MediaRendition;

/// User audio preferences: language tags or rendition names, `*` for any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioSelect {
    tokens: FxHashSet<String>,
}

impl AudioSelect {
    pub const WILDCARD: &str = "*";

    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens
                .into_iter()
                .map(|token| {
                    let token: String = token.into();
                    token.trim().to_string()
                })
                .filter(|token| !token.is_empty())
                .collect(),
        }
    }

    /// Parses a comma separated list such as `"ja,en"`.
    pub fn parse(list: &str) -> Self {
        Self::new(list.split(','))
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    pub fn matches(&self, media: &MediaRendition) -> bool {
        self.contains(Self::WILDCARD)
            || media.language.as_deref().is_some_and(|l| self.contains(l))
            || media.name.as_deref().is_some_and(|n| self.contains(n))
    }
}

/// Candidates collected in one pass over a variant's audio renditions.
/// Borrows from the variant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioCandidates<'a> {
    pub preferred: Vec<&'a MediaRendition>,
    pub default: Option<&'a MediaRendition>,
    pub fallback: Option<&'a MediaRendition>,
}

/// The external audio chosen for a variant.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioSelection<'a> {
    /// No external audio; the variant is played as is.
    None,
    Default(&'a MediaRendition),
    Fallback(&'a MediaRendition),
    Preferred(Vec<&'a MediaRendition>),
}

impl<'a> AudioSelection<'a> {
    pub fn is_empty(&self) -> bool {
        matches!(self, AudioSelection::None)
    }

    pub fn renditions(&self) -> Vec<&'a MediaRendition> {
        match self {
            AudioSelection::None => Vec::new(),
            AudioSelection::Default(media) | AudioSelection::Fallback(media) => vec![*media],
            AudioSelection::Preferred(media) => media.clone(),
        }
    }

    pub fn uris(&self) -> Vec<String> {
        self.renditions()
            .into_iter()
            .filter_map(|media| media.uri.clone())
            .collect()
    }
}

impl<'a> AudioCandidates<'a> {
    pub fn selection(&self) -> AudioSelection<'a> {
        if !self.preferred.is_empty() {
            AudioSelection::Preferred(self.preferred.clone())
        } else if let Some(media) = self.default {
            AudioSelection::Default(media)
        } else if let Some(media) = self.fallback {
            AudioSelection::Fallback(media)
        } else {
            AudioSelection::None
        }
    }
}

/// Collects audio candidates from `renditions` in manifest order.
///
/// Non-audio renditions and renditions without a uri are ignored.
pub fn resolve<'a, I>(
    renditions: I,
    audio_select: &AudioSelect,
    locale: &dyn LocaleMatcher,
) -> AudioCandidates<'a>
where
    I: IntoIterator<Item = &'a MediaRendition>,
{
    let mut candidates = AudioCandidates::default();
    let mut first_with_uri: Option<&'a MediaRendition> = None;
    let mut token_matched = false;

    for media in renditions.into_iter().filter(|m| m.is_audio()) {
        if media.uri.is_none() {
            continue;
        }
        first_with_uri.get_or_insert(media);

        if candidates.fallback.is_none() && media.default {
            candidates.fallback = Some(media);
        }

        let equivalent = locale.equivalent(media.language.as_deref());

        if candidates.default.is_none() && media.autoselect && equivalent {
            candidates.default = Some(media);
        }

        if audio_select.matches(media) {
            token_matched = true;
            candidates.preferred.push(media);
        } else if !token_matched
            && locale.explicit()
            && equivalent
            && (candidates.preferred.is_empty() || media.default)
        {
            candidates.preferred.push(media);
        }

        trace!(
            "audio rendition language={:?} name={:?}: preferred={}, default={}, fallback={}",
            media.language,
            media.name,
            candidates.preferred.len(),
            candidates.default.is_some(),
            candidates.fallback.is_some()
        );
    }

    if candidates.fallback.is_none() {
        candidates.fallback = first_with_uri;
    }

    candidates
}
