use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::{debug, warn};

/// Whether the host can combine external audio with a video-only stream.
pub trait MuxCapability: Send + Sync {
    fn is_usable(&self) -> bool;
}

/// Muxing through an `ffmpeg` executable.
///
/// The executable is looked up once: the configured path if it exists,
/// otherwise `ffmpeg` on `PATH`.
#[derive(Debug, Default)]
pub struct FfmpegMuxer {
    path: Option<PathBuf>,
    disabled: bool,
    resolved: OnceLock<Option<PathBuf>>,
}

impl FfmpegMuxer {
    pub const DEFAULT_COMMAND: &str = "ffmpeg";

    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            disabled: false,
            resolved: OnceLock::new(),
        }
    }

    /// A muxer that never reports itself usable.
    pub fn disabled() -> Self {
        Self {
            path: None,
            disabled: true,
            resolved: OnceLock::new(),
        }
    }

    pub fn command(&self) -> Option<&Path> {
        if self.disabled {
            return None;
        }
        self.resolved
            .get_or_init(|| self.resolve())
            .as_deref()
    }

    fn resolve(&self) -> Option<PathBuf> {
        if let Some(path) = &self.path {
            if path.exists() {
                return Some(path.clone());
            }
            warn!(
                "configured ffmpeg path {} does not exist, searching PATH",
                path.display()
            );
        }

        match which::which(Self::DEFAULT_COMMAND) {
            Ok(path) => {
                debug!("using ffmpeg at {}", path.display());
                Some(path)
            }
            Err(e) => {
                warn!("ffmpeg not found, external audio will not be muxed: {e}");
                None
            }
        }
    }
}

impl MuxCapability for FfmpegMuxer {
    fn is_usable(&self) -> bool {
        self.command().is_some()
    }
}

impl MuxCapability for bool {
    fn is_usable(&self) -> bool {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_is_never_usable() {
        let muxer = FfmpegMuxer::disabled();
        assert!(!muxer.is_usable());
        assert!(muxer.command().is_none());
    }

    #[test]
    fn test_existing_configured_path_is_used() {
        let exe = std::env::current_exe().unwrap();
        let muxer = FfmpegMuxer::new(Some(exe.clone()));
        assert!(muxer.is_usable());
        assert_eq!(muxer.command(), Some(exe.as_path()));
    }

    #[test]
    fn test_lookup_is_memoized() {
        let muxer = FfmpegMuxer::new(Some(PathBuf::from("/nonexistent/ffmpeg")));
        let first = muxer.command().map(Path::to_path_buf);
        let second = muxer.command().map(Path::to_path_buf);
        assert_eq!(first, second);
    }

    #[test]
    fn test_bool_capability() {
        assert!(true.is_usable());
        assert!(!false.is_usable());
    }
}
