//! Stream selection for HLS multivariant playlists.
//!
//! A [`VariantSelector`] walks the variants of a [`MultivariantPlaylist`],
//! picks external audio for each one according to the user's audio and locale
//! preferences, names and deduplicates the result and returns a [`StreamMap`]
//! of single-track or muxed stream descriptors.
//!
//! ```no_run
//! use std::sync::Arc;
//! use hls_streams::{AudioSelect, FfmpegMuxer, Localization, SelectOptions, VariantSelector};
//!
//! # async fn run(manifest: &[u8]) -> Result<(), hls_streams::SelectError> {
//! let selector = VariantSelector::new(
//!     SelectOptions::default(),
//!     Arc::new(Localization::requested("ja_JP")),
//!     Arc::new(FfmpegMuxer::new(None)),
//! )
//! .with_audio_select(AudioSelect::parse("ja,en"));
//!
//! for (name, stream) in selector.select_manifest(manifest, None).await? {
//!     println!("{name}: {} ({})", stream.video_uri, stream.kind);
//! }
//! # Ok(())
//! # }
//! ```

pub mod audio;
pub mod error;
pub mod locale;
pub mod manifest;
pub mod mux;
pub mod naming;
pub mod options;
pub mod probe;
pub mod selector;
pub mod stream;

#[cfg(test)]
mod test_utils;

pub use audio::{AudioCandidates, AudioSelect, AudioSelection};
pub use error::{FactoryError, ManifestError, OptionsError, ProbeError, SelectError};
pub use locale::{LocaleMatcher, Localization};
pub use manifest::{MediaKind, MediaRendition, MultivariantPlaylist, VariantPlaylist};
pub use mux::{FfmpegMuxer, MuxCapability};
pub use naming::{NameKey, NameTemplate};
pub use options::{PlaybackOptions, SelectOptions, TransportOptions};
pub use probe::{HttpProbe, StreamProbe};
pub use selector::VariantSelector;
pub use stream::{NamedStream, StreamFactory, StreamKind, StreamMap};
