use thiserror::Error;

/// The multivariant playlist could not be interpreted.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("failed to parse playlist: {0}")]
    Parse(String),
    #[error("expected a multivariant playlist, got a media playlist")]
    NotMultivariant,
    #[error("variant stream without uri")]
    EmptyVariantUri,
    #[error("invalid uri {uri}: {source}")]
    InvalidUri {
        uri: String,
        #[source]
        source: url::ParseError,
    },
}

/// Raised when the selector asks the factory for something it cannot build.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FactoryError {
    #[error("muxed stream requested without audio for {video_uri}")]
    MuxedWithoutAudio { video_uri: String },
}

#[derive(Error, Debug)]
pub enum SelectError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),
    #[error(transparent)]
    Factory(#[from] FactoryError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    #[error("unknown name key: {0} (expected name, pixels or bitrate)")]
    UnknownNameKey(String),
    #[error("unknown placeholder in name format: {{{0}}}")]
    UnknownPlaceholder(String),
    #[error("unclosed placeholder in name format: {0}")]
    UnclosedPlaceholder(String),
}

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid header: {0}")]
    InvalidHeader(String),
    #[error("unexpected status: {0}")]
    Status(u16),
}
