use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Audio,
    Subtitles,
    Other(String),
}

/// An `EXT-X-MEDIA` rendition attached to a variant.
///
/// A rendition without `uri` is carried inside the variant stream itself and
/// can never be picked as an external track.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MediaRendition {
    pub kind: MediaKind,
    pub name: Option<String>,
    pub uri: Option<String>,
    pub language: Option<String>,
    pub default: bool,
    pub autoselect: bool,
}

impl MediaRendition {
    pub fn new(kind: MediaKind) -> Self {
        Self {
            kind,
            name: None,
            uri: None,
            language: None,
            default: false,
            autoselect: false,
        }
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_uri<S: Into<String>>(mut self, uri: S) -> Self {
        self.uri = Some(uri.into());
        self
    }

    pub fn with_language<S: Into<String>>(mut self, language: S) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_default(mut self, default: bool) -> Self {
        self.default = default;
        self
    }

    pub fn with_autoselect(mut self, autoselect: bool) -> Self {
        self.autoselect = autoselect;
        self
    }

    pub fn is_audio(&self) -> bool {
        self.kind == MediaKind::Audio
    }

    /// Name if present and non-empty.
    pub fn non_empty_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u64,
    pub height: u64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct VariantPlaylist {
    pub uri: String,
    pub is_iframe: bool,
    /// Peak bandwidth in bits per second.
    pub bandwidth: Option<u64>,
    pub resolution: Option<Resolution>,
    pub media: Vec<MediaRendition>,
}

impl VariantPlaylist {
    pub fn new<S: Into<String>>(uri: S) -> Self {
        Self {
            uri: uri.into(),
            is_iframe: false,
            bandwidth: None,
            resolution: None,
            media: Vec::new(),
        }
    }

    pub fn with_bandwidth(mut self, bandwidth: u64) -> Self {
        self.bandwidth = Some(bandwidth);
        self
    }

    pub fn with_resolution(mut self, width: u64, height: u64) -> Self {
        self.resolution = Some(Resolution { width, height });
        self
    }

    pub fn with_iframe(mut self, is_iframe: bool) -> Self {
        self.is_iframe = is_iframe;
        self
    }

    pub fn with_media(mut self, media: MediaRendition) -> Self {
        self.media.push(media);
        self
    }

    /// Name of the first VIDEO rendition carrying a non-empty name.
    pub fn video_name(&self) -> Option<&str> {
        self.media
            .iter()
            .filter(|m| m.kind == MediaKind::Video)
            .find_map(MediaRendition::non_empty_name)
    }

    pub fn audio_renditions(&self) -> impl Iterator<Item = &MediaRendition> {
        self.media.iter().filter(|m| m.is_audio())
    }
}

/// Variants in manifest declaration order.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct MultivariantPlaylist {
    pub variants: Vec<VariantPlaylist>,
}

impl MultivariantPlaylist {
    pub fn new(variants: Vec<VariantPlaylist>) -> Self {
        Self { variants }
    }
}
