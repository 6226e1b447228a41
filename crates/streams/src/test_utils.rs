use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use rustc_hash::FxHashSet;

use crate::error::ProbeError;
use crate::locale::LocaleMatcher;
use crate::mux::MuxCapability;
use crate::options::TransportOptions;
use crate::probe::StreamProbe;

/// Locale that matches a single language tag literally.
pub struct FakeLocale {
    language: String,
    explicit: bool,
}

impl FakeLocale {
    pub fn explicit(language: &str) -> Self {
        Self {
            language: language.to_string(),
            explicit: true,
        }
    }

    pub fn implicit(language: &str) -> Self {
        Self {
            language: language.to_string(),
            explicit: false,
        }
    }
}

impl LocaleMatcher for FakeLocale {
    fn explicit(&self) -> bool {
        self.explicit
    }

    fn equivalent(&self, language: Option<&str>) -> bool {
        language.is_none_or(|l| l == self.language)
    }
}

/// Records how often the capability was queried.
pub struct FakeMuxer {
    usable: bool,
    calls: AtomicUsize,
}

impl FakeMuxer {
    pub fn new(usable: bool) -> Self {
        Self {
            usable,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MuxCapability for FakeMuxer {
    fn is_usable(&self) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.usable
    }
}

/// Fails for the given uris, succeeds otherwise.
#[derive(Default)]
pub struct FakeProbe {
    failing: FxHashSet<String>,
    probed: Mutex<Vec<String>>,
}

impl FakeProbe {
    pub fn failing<I: IntoIterator<Item = &'static str>>(uris: I) -> Self {
        Self {
            failing: uris.into_iter().map(String::from).collect(),
            probed: Mutex::new(Vec::new()),
        }
    }

    pub fn probed(&self) -> Vec<String> {
        self.probed.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl StreamProbe for FakeProbe {
    async fn probe(&self, uri: &str, _transport: &TransportOptions) -> Result<(), ProbeError> {
        if let Ok(mut probed) = self.probed.lock() {
            probed.push(uri.to_string());
        }
        if self.failing.contains(uri) {
            Err(ProbeError::Status(404))
        } else {
            Ok(())
        }
    }
}
