use m3u8_rs::{AlternativeMedia, AlternativeMediaType, MasterPlaylist, Playlist, VariantStream};
use tracing::debug;
use url::Url;

use super::model::{MediaKind, MediaRendition, MultivariantPlaylist, Resolution, VariantPlaylist};
use crate::error::ManifestError;

/// Parses raw manifest bytes into a [`MultivariantPlaylist`].
///
/// Relative variant and rendition URIs are joined onto `base_url` when one is
/// given, otherwise they are kept as written.
pub fn parse_multivariant(
    data: &[u8],
    base_url: Option<&Url>,
) -> Result<MultivariantPlaylist, ManifestError> {
    let playlist =
        m3u8_rs::parse_playlist_res(data).map_err(|e| ManifestError::Parse(e.to_string()))?;

    match playlist {
        Playlist::MasterPlaylist(pl) => from_master_playlist(&pl, base_url),
        Playlist::MediaPlaylist(_) => Err(ManifestError::NotMultivariant),
    }
}

pub fn from_master_playlist(
    playlist: &MasterPlaylist,
    base_url: Option<&Url>,
) -> Result<MultivariantPlaylist, ManifestError> {
    let variants = playlist
        .variants
        .iter()
        .map(|variant| convert_variant(variant, &playlist.alternatives, base_url))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "parsed multivariant playlist: {} variants, {} renditions",
        variants.len(),
        playlist.alternatives.len()
    );
    Ok(MultivariantPlaylist::new(variants))
}

fn convert_variant(
    variant: &VariantStream,
    alternatives: &[AlternativeMedia],
    base_url: Option<&Url>,
) -> Result<VariantPlaylist, ManifestError> {
    if variant.uri.trim().is_empty() {
        return Err(ManifestError::EmptyVariantUri);
    }

    let media = alternatives
        .iter()
        .filter(|alt| belongs_to(variant, alt))
        .map(|alt| convert_media(alt, base_url))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(VariantPlaylist {
        uri: resolve_uri(&variant.uri, base_url)?,
        is_iframe: variant.is_i_frame,
        // a zero bandwidth carries no label
        bandwidth: Some(variant.bandwidth).filter(|bw| *bw > 0),
        resolution: variant
            .resolution
            .as_ref()
            .map(|r| Resolution {
                width: r.width,
                height: r.height,
            }),
        media,
    })
}

fn belongs_to(variant: &VariantStream, alt: &AlternativeMedia) -> bool {
    let group = match alt.media_type {
        AlternativeMediaType::Audio => variant.audio.as_deref(),
        AlternativeMediaType::Video => variant.video.as_deref(),
        AlternativeMediaType::Subtitles => variant.subtitles.as_deref(),
        _ => None,
    };
    group == Some(alt.group_id.as_str())
}

fn convert_media(
    alt: &AlternativeMedia,
    base_url: Option<&Url>,
) -> Result<MediaRendition, ManifestError> {
    let kind = match &alt.media_type {
        AlternativeMediaType::Audio => MediaKind::Audio,
        AlternativeMediaType::Video => MediaKind::Video,
        AlternativeMediaType::Subtitles => MediaKind::Subtitles,
        other => MediaKind::Other(other.to_string()),
    };

    let uri = alt
        .uri
        .as_deref()
        .filter(|uri| !uri.is_empty())
        .map(|uri| resolve_uri(uri, base_url))
        .transpose()?;

    Ok(MediaRendition {
        kind,
        name: Some(alt.name.clone()).filter(|name| !name.is_empty()),
        uri,
        language: alt.language.clone().filter(|lang| !lang.is_empty()),
        default: alt.default,
        autoselect: alt.autoselect,
    })
}

fn resolve_uri(uri: &str, base_url: Option<&Url>) -> Result<String, ManifestError> {
    match base_url {
        Some(base) => base
            .join(uri)
            .map(String::from)
            .map_err(|source| ManifestError::InvalidUri {
                uri: uri.to_string(),
                source,
            }),
        None => Ok(uri.to_string()),
    }
}
