use indexmap::IndexMap;
use serde::Serialize;

use crate::error::FactoryError;
use crate::options::{PlaybackOptions, TransportOptions};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    /// The variant playlist played on its own.
    Single,
    /// The variant playlist muxed with one or more external audio playlists.
    Muxed,
}

impl StreamKind {
    pub fn as_str(&self) -> &str {
        match self {
            StreamKind::Single => "single",
            StreamKind::Muxed => "muxed",
        }
    }
}

impl std::fmt::Display for StreamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A playable stream, keyed by `name` in a [`StreamMap`].
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NamedStream {
    pub name: String,
    pub kind: StreamKind,
    pub video_uri: String,
    /// Empty unless `kind` is [`StreamKind::Muxed`].
    pub audio_uris: Vec<String>,
    pub playback: PlaybackOptions,
    pub transport: TransportOptions,
}

impl NamedStream {
    pub fn is_muxed(&self) -> bool {
        self.kind == StreamKind::Muxed
    }
}

/// Stream name to stream, in manifest order.
pub type StreamMap = IndexMap<String, NamedStream>;

/// Builds stream descriptors. No selection happens here.
#[derive(Debug, Clone, Default)]
pub struct StreamFactory {
    playback: PlaybackOptions,
    transport: TransportOptions,
}

impl StreamFactory {
    pub fn new(playback: PlaybackOptions, transport: TransportOptions) -> Self {
        Self {
            playback,
            transport,
        }
    }

    /// A `Single` build drops `audio_uris`; a `Muxed` build requires at least one.
    pub fn build(
        &self,
        name: String,
        kind: StreamKind,
        video_uri: String,
        audio_uris: Vec<String>,
    ) -> Result<NamedStream, FactoryError> {
        let audio_uris = match kind {
            StreamKind::Single => Vec::new(),
            StreamKind::Muxed if audio_uris.is_empty() => {
                return Err(FactoryError::MuxedWithoutAudio { video_uri });
            }
            StreamKind::Muxed => audio_uris,
        };

        Ok(NamedStream {
            name,
            kind,
            video_uri,
            audio_uris,
            playback: self.playback.clone(),
            transport: self.transport.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factory() -> StreamFactory {
        StreamFactory::new(
            PlaybackOptions {
                force_restart: true,
                start_offset: 12.5,
                duration: Some(60.0),
            },
            TransportOptions::default().with_header("Referer", "https://sp.gch.jp/"),
        )
    }

    #[test]
    fn test_single_drops_audio() {
        let stream = factory()
            .build(
                "720p".to_string(),
                StreamKind::Single,
                "video.m3u8".to_string(),
                vec!["audio.m3u8".to_string()],
            )
            .unwrap();
        assert!(!stream.is_muxed());
        assert!(stream.audio_uris.is_empty());
        assert_eq!(stream.video_uri, "video.m3u8");
    }

    #[test]
    fn test_muxed_carries_audio_and_options() {
        let stream = factory()
            .build(
                "1080p".to_string(),
                StreamKind::Muxed,
                "video.m3u8".to_string(),
                vec!["ja.m3u8".to_string(), "en.m3u8".to_string()],
            )
            .unwrap();
        assert!(stream.is_muxed());
        assert_eq!(stream.audio_uris, vec!["ja.m3u8", "en.m3u8"]);
        assert!(stream.playback.force_restart);
        assert_eq!(stream.playback.start_offset, 12.5);
        assert_eq!(stream.playback.duration, Some(60.0));
        assert_eq!(
            stream.transport.headers.get("Referer").map(String::as_str),
            Some("https://sp.gch.jp/")
        );
    }

    #[test]
    fn test_muxed_without_audio_is_rejected() {
        let err = factory()
            .build(
                "1080p".to_string(),
                StreamKind::Muxed,
                "video.m3u8".to_string(),
                Vec::new(),
            )
            .unwrap_err();
        assert_eq!(
            err,
            FactoryError::MuxedWithoutAudio {
                video_uri: "video.m3u8".to_string()
            }
        );
    }
}
