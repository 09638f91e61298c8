//! Lazy thumbnail lookup
//!
//! Page titles are resolved to image URLs through a [`ThumbnailSource`]
//! (the Wikipedia summary API in production). Every title is fetched at most
//! once per process; results, including failures, are kept in a
//! [`KeyedAsyncCache`] for the rest of the session.

mod cache;
mod resolver;
mod source;

pub use cache::{KeyedAsyncCache, SharedLookup};
pub use resolver::{ThumbnailCache, ThumbnailResolver, ThumbnailSlot, ThumbnailSubscription};
pub use source::{ImageRef, PageSummary, ThumbnailError, ThumbnailSource, WikipediaClient};

/// Where a subscription's lookup stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThumbnailState {
    /// No lookup key was given
    Idle,
    Loading,
    Loaded(String),
    /// Lookup failed or the page has no image
    Error,
}

impl ThumbnailState {
    /// Loaded and Error never change again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ThumbnailState::Loaded(_) | ThumbnailState::Error)
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            ThumbnailState::Loaded(url) => Some(url),
            _ => None,
        }
    }

    /// The loaded URL, or `fallback` in every other state.
    pub fn url_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.url().unwrap_or(fallback)
    }
}
