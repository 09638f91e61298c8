use futures::future::{join, join_all, FutureExt};
use futures::Stream;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard};
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::cache::KeyedAsyncCache;
use super::source::{ThumbnailError, ThumbnailSource, WikipediaClient};
use super::ThumbnailState;
use crate::config::Config;
use crate::timeline::TimelineItem;

/// Cache of settled image URLs. `None` means the lookup produced no image.
pub type ThumbnailCache = KeyedAsyncCache<Option<String>>;

/// Hands out thumbnail subscriptions backed by one shared cache.
///
/// At most one remote lookup is ever started per page title. Failures are
/// cached like successes and never retried.
#[derive(Clone)]
pub struct ThumbnailResolver {
    cache: Arc<ThumbnailCache>,
    source: Arc<dyn ThumbnailSource>,
}

impl ThumbnailResolver {
    pub fn new(source: Arc<dyn ThumbnailSource>) -> Self {
        Self::with_cache(source, Arc::new(ThumbnailCache::new()))
    }

    pub fn with_cache(source: Arc<dyn ThumbnailSource>, cache: Arc<ThumbnailCache>) -> Self {
        Self { cache, source }
    }

    /// Resolver backed by the Wikipedia summary endpoint from `config`.
    pub fn from_config(config: &Config) -> Result<Self, ThumbnailError> {
        let client = WikipediaClient::from_config(config)?;
        Ok(Self::new(Arc::new(client)))
    }

    pub fn cache(&self) -> &Arc<ThumbnailCache> {
        &self.cache
    }

    /// Subscribe to the thumbnail for `key`.
    ///
    /// Without a key the subscription is `Idle` and its stream yields that
    /// once. With a key it is `Loading` before this returns, then settles
    /// exactly once to `Loaded` or `Error`. Must be called inside a tokio
    /// runtime.
    pub fn subscribe(&self, key: Option<&str>) -> ThumbnailSubscription {
        let key = key.filter(|k| !k.is_empty());
        let (tx, rx) = mpsc::unbounded_channel();

        let Some(key) = key else {
            let _ = tx.send(ThumbnailState::Idle);
            let delivery = Delivery {
                state: ThumbnailState::Idle,
                tx: None,
                active: true,
            };
            return ThumbnailSubscription {
                key: None,
                delivery: Arc::new(Mutex::new(delivery)),
                rx,
                observer: None,
            };
        };

        let _ = tx.send(ThumbnailState::Loading);
        let delivery = Arc::new(Mutex::new(Delivery {
            state: ThumbnailState::Loading,
            tx: Some(tx),
            active: true,
        }));

        let (lookup, cached) = self.cache.get_or_start(key, || {
            let source = self.source.clone();
            let key = key.to_string();
            async move {
                // A panicking source settles as "no image" instead of poisoning the entry
                match AssertUnwindSafe(lookup_image(source.as_ref(), &key))
                    .catch_unwind()
                    .await
                {
                    Ok(url) => url,
                    Err(_) => {
                        warn!("Thumbnail lookup for '{}' panicked", key);
                        None
                    }
                }
            }
            .boxed()
        });
        if !cached {
            // Drive the shared lookup on its own task so it settles even if
            // every observer goes away first.
            tokio::spawn(lookup.clone());
        }

        let observer_delivery = delivery.clone();
        let observer = tokio::spawn(async move {
            let state = match lookup.await {
                Some(url) => ThumbnailState::Loaded(url),
                None => ThumbnailState::Error,
            };
            publish(&observer_delivery, state);
        });

        ThumbnailSubscription {
            key: Some(key.to_string()),
            delivery,
            rx,
            observer: Some(observer),
        }
    }

    /// Subscribe and wait for the subscription to settle.
    pub async fn resolve(&self, key: Option<&str>) -> ThumbnailState {
        self.subscribe(key).settled().await
    }

    /// Photo and artwork states for every artist of an era, in traversal
    /// order. All lookups run concurrently.
    pub async fn resolve_era(&self, era: &TimelineItem) -> Vec<(ThumbnailState, ThumbnailState)> {
        let lookups = era
            .art_movements
            .iter()
            .flat_map(|movement| &movement.countries)
            .flat_map(|group| &group.artists)
            .map(|artist| {
                let keys = artist.thumbnail_keys();
                join(self.resolve(keys.photo), self.resolve(keys.artwork))
            });
        join_all(lookups).await
    }
}

async fn lookup_image(source: &dyn ThumbnailSource, key: &str) -> Option<String> {
    match source.fetch_image_url(key).await {
        Ok(url) if url.is_empty() => {
            debug!("Empty image URL for '{}'", key);
            None
        }
        Ok(url) => {
            debug!("Thumbnail for '{}': {}", key, url);
            Some(url)
        }
        Err(ThumbnailError::MissingImage) => {
            debug!("No image on page '{}'", key);
            None
        }
        Err(e) => {
            warn!("Thumbnail lookup for '{}' failed: {}", key, e);
            None
        }
    }
}

struct Delivery {
    state: ThumbnailState,
    tx: Option<mpsc::UnboundedSender<ThumbnailState>>,
    active: bool,
}

fn lock(delivery: &Mutex<Delivery>) -> MutexGuard<'_, Delivery> {
    delivery.lock().unwrap_or_else(|e| e.into_inner())
}

/// Write `state` unless the subscriber has gone away. The stream closes
/// after a terminal state.
fn publish(delivery: &Mutex<Delivery>, state: ThumbnailState) {
    let mut delivery = lock(delivery);
    if !delivery.active {
        return;
    }
    if let Some(tx) = &delivery.tx {
        let _ = tx.send(state.clone());
    }
    if state.is_terminal() {
        delivery.tx = None;
    }
    delivery.state = state;
}

/// One consumer's view of a thumbnail lookup.
///
/// Also a `Stream` of state changes. Dropping it unsubscribes.
pub struct ThumbnailSubscription {
    key: Option<String>,
    delivery: Arc<Mutex<Delivery>>,
    rx: mpsc::UnboundedReceiver<ThumbnailState>,
    observer: Option<JoinHandle<()>>,
}

impl ThumbnailSubscription {
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Latest state delivered to this subscription.
    pub fn state(&self) -> ThumbnailState {
        lock(&self.delivery).state.clone()
    }

    pub fn is_active(&self) -> bool {
        lock(&self.delivery).active
    }

    /// Stop receiving updates. The underlying lookup keeps running and stays
    /// cached for other subscribers.
    pub fn unsubscribe(&mut self) {
        {
            let mut delivery = lock(&self.delivery);
            if !delivery.active {
                return;
            }
            delivery.active = false;
            delivery.tx = None;
        }
        if let Some(observer) = self.observer.take() {
            observer.abort();
        }
        if let Some(key) = &self.key {
            debug!("Unsubscribed from thumbnail '{}'", key);
        }
    }

    /// Wait until the stream ends and return the final state. For an
    /// unsubscribed lookup that is whatever it held at teardown.
    pub async fn settled(&mut self) -> ThumbnailState {
        while self.rx.recv().await.is_some() {}
        self.state()
    }
}

impl Stream for ThumbnailSubscription {
    type Item = ThumbnailState;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

impl Drop for ThumbnailSubscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

/// Holds the subscription for whatever key a consumer currently shows,
/// resubscribing when the key changes.
pub struct ThumbnailSlot {
    resolver: ThumbnailResolver,
    subscription: ThumbnailSubscription,
}

impl ThumbnailSlot {
    pub fn new(resolver: ThumbnailResolver, key: Option<&str>) -> Self {
        let subscription = resolver.subscribe(key);
        Self {
            resolver,
            subscription,
        }
    }

    /// Point the slot at `key`. Returns false when the key is unchanged.
    pub fn set_key(&mut self, key: Option<&str>) -> bool {
        let key = key.filter(|k| !k.is_empty());
        if self.subscription.key() == key {
            return false;
        }
        self.subscription.unsubscribe();
        self.subscription = self.resolver.subscribe(key);
        true
    }

    pub fn state(&self) -> ThumbnailState {
        self.subscription.state()
    }

    pub fn subscription_mut(&mut self) -> &mut ThumbnailSubscription {
        &mut self.subscription
    }
}
