use arthist_core::thumbnail::{ThumbnailError, ThumbnailSource};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Initialize tracing for tests with proper test output handling
#[allow(dead_code)]
pub fn tracing_init() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_line_number(true)
        .with_target(false)
        .with_file(true)
        .try_init();
}

/// Releases every pending lookup of a [`GatedSource`] at once.
#[allow(dead_code)]
pub struct Gate(watch::Sender<bool>);

#[allow(dead_code)]
impl Gate {
    pub fn open(&self) {
        let _ = self.0.send(true);
    }
}

/// In-memory thumbnail source whose lookups block until the gate opens.
///
/// Titles listed in `images` resolve to their URL, titles starting with
/// `status:` fail with a 503, anything else has no image.
#[allow(dead_code)]
pub struct GatedSource {
    calls: AtomicUsize,
    images: HashMap<String, String>,
    gate: watch::Receiver<bool>,
}

#[allow(dead_code)]
impl GatedSource {
    pub fn new(images: &[(&str, &str)]) -> (Arc<Self>, Gate) {
        let (tx, rx) = watch::channel(false);
        let source = Self {
            calls: AtomicUsize::new(0),
            images: images
                .iter()
                .map(|(title, url)| (title.to_string(), url.to_string()))
                .collect(),
            gate: rx,
        };
        (Arc::new(source), Gate(tx))
    }

    /// Number of lookups started so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ThumbnailSource for GatedSource {
    async fn fetch_image_url(&self, page_title: &str) -> Result<String, ThumbnailError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let mut gate = self.gate.clone();
        let _ = gate.wait_for(|open| *open).await;

        if let Some(url) = self.images.get(page_title) {
            return Ok(url.clone());
        }
        if page_title.starts_with("status:") {
            return Err(ThumbnailError::Status(503));
        }
        Err(ThumbnailError::MissingImage)
    }
}

/// Source whose every lookup panics.
#[allow(dead_code)]
#[derive(Default)]
pub struct PanickingSource {
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl PanickingSource {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ThumbnailSource for PanickingSource {
    async fn fetch_image_url(&self, page_title: &str) -> Result<String, ThumbnailError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        panic!("summary lookup for '{}' blew up", page_title);
    }
}

/// Let spawned tasks run until `done` holds, or give up after a bounded number of yields.
#[allow(dead_code)]
pub async fn run_until(mut done: impl FnMut() -> bool) -> bool {
    for _ in 0..1000 {
        if done() {
            return true;
        }
        tokio::task::yield_now().await;
    }
    done()
}
