//! Listing URL queue for the scrape phase

use crate::record::ProductUrlEntry;
use std::collections::VecDeque;

/// Listing URLs still to be scraped
///
/// URLs are consumed from the front. The queue is shuffled once when the
/// scrape phase starts and again whenever a listing answers 404.
#[derive(Debug, Clone, Default)]
pub struct UrlQueue {
    urls: VecDeque<String>,
}

impl UrlQueue {
    /// Creates a queue holding `urls` in the given order
    pub fn new(urls: impl IntoIterator<Item = String>) -> Self {
        Self {
            urls: urls.into_iter().collect(),
        }
    }

    /// Flattens discovered entries to bare URLs and shuffles them
    pub fn from_entries(entries: &[ProductUrlEntry], rng: &mut fastrand::Rng) -> Self {
        let mut queue = Self::new(entries.iter().map(|entry| entry.url.clone()));
        queue.shuffle(rng);
        queue
    }

    pub fn shuffle(&mut self, rng: &mut fastrand::Rng) {
        rng.shuffle(self.urls.make_contiguous());
    }

    pub fn front(&self) -> Option<&str> {
        self.urls.front().map(String::as_str)
    }

    pub fn pop_front(&mut self) -> Option<String> {
        self.urls.pop_front()
    }

    /// Removes the first occurrence of `url`
    ///
    /// Returns true if the URL was queued.
    pub fn remove(&mut self, url: &str) -> bool {
        match self.urls.iter().position(|queued| queued == url) {
            Some(index) => {
                self.urls.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }
}
