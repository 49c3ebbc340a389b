//! Recent search terms shown when the search box is empty.

use std::collections::HashSet;

use tracing::debug;

use crate::storage::{PersistentStore, keys};

/// Maximum number of terms remembered.
pub const MAX_RECENT_SEARCHES: usize = 5;

/// Recent-searches state manager.
#[derive(Debug)]
pub struct RecentSearches {
    terms: Vec<String>,
    store: PersistentStore,
}

impl RecentSearches {
    #[must_use]
    pub fn hydrate(store: PersistentStore) -> Self {
        let mut terms: Vec<String> = store.load(keys::RECENT_SEARCHES).unwrap_or_default();
        let mut seen = HashSet::new();
        terms.retain(|t| !t.trim().is_empty() && seen.insert(t.clone()));
        terms.truncate(MAX_RECENT_SEARCHES);
        Self { terms, store }
    }

    /// Terms, most recent first.
    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Record a submitted search. Blank terms are ignored; a repeated term
    /// moves to the front.
    pub fn record(&mut self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return false;
        }

        self.terms.retain(|t| t != term);
        self.terms.insert(0, term.to_string());
        self.terms.truncate(MAX_RECENT_SEARCHES);
        debug!(term, "Recorded search term");
        self.store.save(keys::RECENT_SEARCHES, &self.terms);
        true
    }

    /// Forget all terms and delete the stored document.
    pub fn clear(&mut self) {
        self.terms.clear();
        self.store.remove(keys::RECENT_SEARCHES);
    }

    /// Write the current snapshot. Returns whether the write succeeded.
    pub fn persist(&self) -> bool {
        if self.terms.is_empty() {
            self.store.remove(keys::RECENT_SEARCHES)
        } else {
            self.store.save(keys::RECENT_SEARCHES, &self.terms)
        }
    }
}
