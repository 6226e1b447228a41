use std::sync::Arc;

use tracing::{debug, warn};
use url::Url;

use crate::audio::{self, AudioSelect, AudioSelection};
use crate::error::SelectError;
use crate::locale::LocaleMatcher;
use crate::manifest::{MultivariantPlaylist, VariantPlaylist, parse_multivariant};
use crate::mux::MuxCapability;
use crate::naming::{StreamNames, dedupe_name};
use crate::options::SelectOptions;
use crate::probe::StreamProbe;
use crate::stream::{StreamFactory, StreamKind, StreamMap};

/// Turns a multivariant playlist into named streams.
///
/// Variants are visited in manifest order. I-frame variants, variants without
/// a usable name, duplicates beyond the second alternate and variants failing
/// the liveness probe are skipped without error.
pub struct VariantSelector {
    options: SelectOptions,
    audio_select: AudioSelect,
    locale: Arc<dyn LocaleMatcher>,
    muxer: Arc<dyn MuxCapability>,
    probe: Option<Arc<dyn StreamProbe>>,
    factory: StreamFactory,
}

impl VariantSelector {
    pub fn new(
        options: SelectOptions,
        locale: Arc<dyn LocaleMatcher>,
        muxer: Arc<dyn MuxCapability>,
    ) -> Self {
        let factory = StreamFactory::new(options.playback.clone(), options.transport.clone());
        Self {
            options,
            audio_select: AudioSelect::default(),
            locale,
            muxer,
            probe: None,
            factory,
        }
    }

    pub fn with_audio_select(mut self, audio_select: AudioSelect) -> Self {
        self.audio_select = audio_select;
        self
    }

    /// Probe used when `check_streams` is enabled.
    pub fn with_probe(mut self, probe: Arc<dyn StreamProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    pub fn options(&self) -> &SelectOptions {
        &self.options
    }

    /// Parses `data` and selects from the result.
    pub async fn select_manifest(
        &self,
        data: &[u8],
        base_url: Option<&Url>,
    ) -> Result<StreamMap, SelectError> {
        let playlist = parse_multivariant(data, base_url)?;
        self.select(&playlist).await
    }

    pub async fn select(&self, playlist: &MultivariantPlaylist) -> Result<StreamMap, SelectError> {
        if self.options.check_streams && self.probe.is_none() {
            warn!("stream checks requested but no probe is configured, accepting all variants");
        }

        let mut streams = StreamMap::new();

        for variant in playlist.variants.iter().filter(|v| !v.is_iframe) {
            let candidates = audio::resolve(
                variant.audio_renditions(),
                &self.audio_select,
                self.locale.as_ref(),
            );

            let names = StreamNames::from_variant(variant);
            let Some(name) = self.stream_name(&names) else {
                debug!("skipping unnamed variant {}", variant.uri);
                continue;
            };

            let Some(name) = dedupe_name(&name, streams.keys().map(String::as_str)) else {
                debug!("skipping variant {}: too many streams named {name}", variant.uri);
                continue;
            };

            if !self.is_alive(variant).await {
                continue;
            }

            let selection = candidates.selection();
            let kind = if !selection.is_empty() && self.muxer.is_usable() {
                debug!(
                    "Using external audio tracks for stream {name} {}",
                    describe_audio(&selection)
                );
                StreamKind::Muxed
            } else {
                StreamKind::Single
            };

            let stream =
                self.factory
                    .build(name.clone(), kind, variant.uri.clone(), selection.uris())?;
            streams.insert(name, stream);
        }

        debug!("selected {} streams", streams.len());
        Ok(streams)
    }

    fn stream_name(&self, names: &StreamNames) -> Option<String> {
        let name = match &self.options.name_fmt {
            Some(template) => template.render(names),
            None => names.pick(self.options.name_key)?.to_string(),
        };

        if name.is_empty() {
            return None;
        }
        Some(format!("{}{name}", self.options.name_prefix))
    }

    async fn is_alive(&self, variant: &VariantPlaylist) -> bool {
        if !self.options.check_streams {
            return true;
        }
        let Some(probe) = &self.probe else {
            return true;
        };

        match probe.probe(&variant.uri, &self.options.transport).await {
            Ok(()) => true,
            Err(e) => {
                debug!("skipping variant {}: {e}", variant.uri);
                false
            }
        }
    }
}

fn describe_audio(selection: &AudioSelection<'_>) -> String {
    selection
        .renditions()
        .iter()
        .map(|media| {
            format!(
                "(language={}, name={})",
                media.language.as_deref().unwrap_or("N/A"),
                media.name.as_deref().unwrap_or("N/A")
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}
