//! First-visit newsletter popup marker.

use std::time::Duration;

use crate::storage::{PersistentStore, keys};

/// How long after the first page load the popup appears.
pub const SHOW_DELAY: Duration = Duration::from_secs(5);

const SEEN_MARKER: &str = "true";

/// Tracks whether the shopper has already seen the welcome popup.
#[derive(Debug)]
pub struct WelcomePopup {
    seen: bool,
    store: PersistentStore,
}

impl WelcomePopup {
    /// Any stored marker counts as seen.
    #[must_use]
    pub fn hydrate(store: PersistentStore) -> Self {
        let seen = store
            .load_raw(keys::POPUP_SEEN)
            .is_some_and(|marker| !marker.is_empty());
        Self { seen, store }
    }

    /// Whether the popup should be scheduled for this visit.
    #[must_use]
    pub const fn should_show(&self) -> bool {
        !self.seen
    }

    /// Record that the popup was dismissed or the shopper subscribed.
    pub fn mark_seen(&mut self) {
        self.seen = true;
        self.store.save_raw(keys::POPUP_SEEN, SEEN_MARKER);
    }

    /// Write the marker if seen. Returns whether the write succeeded.
    pub fn persist(&self) -> bool {
        !self.seen || self.store.save_raw(keys::POPUP_SEEN, SEEN_MARKER)
    }
}
