//! Stream names: labels, templates and duplicate handling.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OptionsError;
use crate::manifest::VariantPlaylist;

/// Which label to prefer when no name template is configured.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NameKey {
    #[default]
    Name,
    Pixels,
    Bitrate,
}

impl NameKey {
    pub fn as_str(&self) -> &str {
        match self {
            NameKey::Name => "name",
            NameKey::Pixels => "pixels",
            NameKey::Bitrate => "bitrate",
        }
    }
}

impl Display for NameKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NameKey {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(NameKey::Name),
            "pixels" => Ok(NameKey::Pixels),
            "bitrate" => Ok(NameKey::Bitrate),
            _ => Err(OptionsError::UnknownNameKey(s.to_string())),
        }
    }
}

/// The candidate labels of one variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamNames {
    pub name: Option<String>,
    pub pixels: Option<String>,
    pub bitrate: Option<String>,
}

impl StreamNames {
    pub fn from_variant(variant: &VariantPlaylist) -> Self {
        Self {
            name: variant.video_name().map(String::from),
            pixels: variant
                .resolution
                .and_then(|r| pixels_label(r.height)),
            bitrate: variant.bandwidth.and_then(bitrate_label),
        }
    }

    pub fn get(&self, key: NameKey) -> Option<&str> {
        let value = match key {
            NameKey::Name => &self.name,
            NameKey::Pixels => &self.pixels,
            NameKey::Bitrate => &self.bitrate,
        };
        value.as_deref().filter(|v| !v.is_empty())
    }

    /// First non-empty label, starting with `key`.
    pub fn pick(&self, key: NameKey) -> Option<&str> {
        self.get(key)
            .or_else(|| self.get(NameKey::Name))
            .or_else(|| self.get(NameKey::Pixels))
            .or_else(|| self.get(NameKey::Bitrate))
    }
}

/// `"1080p"` for a height of 1080. Zero height has no label.
pub fn pixels_label(height: u64) -> Option<String> {
    (height > 0).then(|| format!("{height}p"))
}

/// Kilobit label: whole kilobits from 1000 bps up, fractional below.
pub fn bitrate_label(bandwidth: u64) -> Option<String> {
    match bandwidth {
        0 => None,
        bw if bw >= 1000 => Some(format!("{}k", bw / 1000)),
        bw => Some(format!("{}k", bw as f64 / 1000.0)),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(NameKey),
}

/// A `name_fmt` template over `{name}`, `{pixels}` and `{bitrate}`.
///
/// `{{` and `}}` produce literal braces. Missing labels render as nothing.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub struct NameTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl NameTemplate {
    pub fn parse(source: &str) -> Result<Self, OptionsError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut field = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        field.push(c);
                    }
                    if !closed {
                        return Err(OptionsError::UnclosedPlaceholder(source.to_string()));
                    }
                    let key = field
                        .parse::<NameKey>()
                        .map_err(|_| OptionsError::UnknownPlaceholder(field.clone()))?;
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(key));
                }
                c => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn render(&self, names: &StreamNames) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.as_str(),
                Segment::Field(key) => names.get(*key).unwrap_or_default(),
            })
            .collect()
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl FromStr for NameTemplate {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for NameTemplate {
    type Error = OptionsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<NameTemplate> for String {
    fn from(template: NameTemplate) -> Self {
        template.source
    }
}

/// Returns the name to insert `name` under, or `None` when the variant must
/// be dropped.
///
/// A taken name moves to the first free of `{name}_alt` and `{name}_alt2`.
/// At most two alternates exist per base name.
pub fn dedupe_name<'a, K>(name: &str, keys: K) -> Option<String>
where
    K: IntoIterator<Item = &'a str> + Clone,
{
    let exists = |candidate: &str| keys.clone().into_iter().any(|key| key == candidate);
    if !exists(name) {
        return Some(name.to_string());
    }

    let alt = format!("{name}_alt");
    let num_alts = keys
        .clone()
        .into_iter()
        .filter(|key| is_alternate_of(key, &alt))
        .count();

    if num_alts >= 2 {
        return None;
    }

    let alt2 = format!("{alt}2");
    [alt, alt2].into_iter().find(|candidate| !exists(candidate))
}

fn is_alternate_of(key: &str, alt: &str) -> bool {
    key.strip_prefix(alt)
        .is_some_and(|suffix| suffix.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dedupe(name: &str, taken: &[&str]) -> Option<String> {
        dedupe_name(name, taken.iter().copied())
    }

    #[test]
    fn test_bitrate_label() {
        assert_eq!(bitrate_label(5_000_000).as_deref(), Some("5000k"));
        assert_eq!(bitrate_label(3_000_000).as_deref(), Some("3000k"));
        assert_eq!(bitrate_label(1_499).as_deref(), Some("1k"));
        assert_eq!(bitrate_label(500).as_deref(), Some("0.5k"));
        assert_eq!(bitrate_label(1).as_deref(), Some("0.001k"));
        assert_eq!(bitrate_label(0), None);
    }

    #[test]
    fn test_pixels_label() {
        assert_eq!(pixels_label(1080).as_deref(), Some("1080p"));
        assert_eq!(pixels_label(0), None);
    }

    #[test]
    fn test_pick_order() {
        let names = StreamNames {
            name: Some("".to_string()),
            pixels: Some("720p".to_string()),
            bitrate: Some("3000k".to_string()),
        };
        assert_eq!(names.pick(NameKey::Name), Some("720p"));
        assert_eq!(names.pick(NameKey::Bitrate), Some("3000k"));
        assert_eq!(StreamNames::default().pick(NameKey::Pixels), None);
    }

    #[test]
    fn test_name_key_from_str() {
        assert_eq!("Pixels".parse::<NameKey>(), Ok(NameKey::Pixels));
        assert_eq!(
            "height".parse::<NameKey>(),
            Err(OptionsError::UnknownNameKey("height".to_string()))
        );
    }

    #[test]
    fn test_template_render() {
        let template = NameTemplate::parse("{pixels}_{bitrate} {{live}}").unwrap();
        let names = StreamNames {
            name: None,
            pixels: Some("1080p".to_string()),
            bitrate: Some("5000k".to_string()),
        };
        assert_eq!(template.render(&names), "1080p_5000k {live}");
        assert_eq!(template.as_str(), "{pixels}_{bitrate} {{live}}");

        let only_name = NameTemplate::parse("{name}").unwrap();
        assert_eq!(only_name.render(&names), "");
    }

    #[test]
    fn test_template_errors() {
        assert_eq!(
            NameTemplate::parse("{height}"),
            Err(OptionsError::UnknownPlaceholder("height".to_string()))
        );
        assert_eq!(
            NameTemplate::parse("{pixels"),
            Err(OptionsError::UnclosedPlaceholder("{pixels".to_string()))
        );
    }

    #[test]
    fn test_dedupe_sequence() {
        assert_eq!(dedupe("720p", &[]).as_deref(), Some("720p"));
        assert_eq!(dedupe("720p", &["720p"]).as_deref(), Some("720p_alt"));
        assert_eq!(
            dedupe("720p", &["720p", "720p_alt"]).as_deref(),
            Some("720p_alt2")
        );
        assert_eq!(dedupe("720p", &["720p", "720p_alt", "720p_alt2"]), None);
    }

    #[test]
    fn test_dedupe_uses_free_alternate_below_cap() {
        assert_eq!(
            dedupe("720p", &["720p_alt2", "720p"]).as_deref(),
            Some("720p_alt")
        );
        assert_eq!(
            dedupe("720p", &["720p", "720p_alt7"]).as_deref(),
            Some("720p_alt")
        );
        assert_eq!(dedupe("720p", &["720p_alt2", "720p", "720p_alt"]), None);
    }

    #[test]
    fn test_dedupe_ignores_unrelated_prefixes() {
        assert_eq!(
            dedupe("720p", &["720p", "720p_alternative"]).as_deref(),
            Some("720p_alt")
        );
    }
}
