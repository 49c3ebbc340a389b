//! Quick-view preview state. Never persisted.
//!
//! Closing hides the preview immediately but keeps the product around for
//! [`CLOSE_DELAY`] so an exit transition can still render it. The delayed
//! clear carries the generation it was issued for; reopening bumps the
//! generation, so a stale clear can never wipe a newly opened product.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use akasha_core::Product;
use tokio::task::JoinHandle;
use tracing::debug;

/// Grace period between hiding the preview and releasing its product.
pub const CLOSE_DELAY: Duration = Duration::from_millis(200);

/// Proof of a `close()`; redeem with [`QuickView::finish_close`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "the product is only released by finish_close"]
pub struct CloseTicket {
    generation: u64,
}

/// Quick-view state manager.
#[derive(Debug, Default)]
pub struct QuickView {
    product: Option<Product>,
    visible: bool,
    generation: u64,
}

impl QuickView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `product` in the preview.
    pub fn open(&mut self, product: Product) {
        self.generation = self.generation.wrapping_add(1);
        debug!(product_id = %product.id, generation = self.generation, "Opened quick view");
        self.product = Some(product);
        self.visible = true;
    }

    /// Hide the preview. The product stays set until the returned ticket is
    /// redeemed.
    pub fn close(&mut self) -> CloseTicket {
        self.visible = false;
        CloseTicket {
            generation: self.generation,
        }
    }

    /// Release the product if nothing was opened since `ticket` was issued.
    ///
    /// Returns whether the product was cleared.
    pub fn finish_close(&mut self, ticket: CloseTicket) -> bool {
        if ticket.generation != self.generation || self.visible {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "Skipped stale quick view clear"
            );
            return false;
        }
        self.product = None;
        true
    }

    /// The product being previewed (or animating out).
    #[must_use]
    pub const fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.visible
    }
}

/// Thread-safe handle to a [`QuickView`] that can schedule the delayed
/// clear on the tokio runtime.
#[derive(Debug, Clone, Default)]
pub struct SharedQuickView {
    inner: Arc<Mutex<QuickView>>,
}

impl SharedQuickView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, QuickView> {
        // State is plain data; a panic mid-update cannot leave it torn.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn open(&self, product: Product) {
        self.lock().open(product);
    }

    /// Hide the preview and release its product after [`CLOSE_DELAY`].
    ///
    /// Must be called from within a tokio runtime. The task resolves to
    /// whether the product was actually cleared.
    pub fn close(&self) -> JoinHandle<bool> {
        self.close_after(CLOSE_DELAY)
    }

    /// Hide the preview and release its product after `delay`.
    pub fn close_after(&self, delay: Duration) -> JoinHandle<bool> {
        let ticket = self.lock().close();
        let handle = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            handle.lock().finish_close(ticket)
        })
    }

    /// A copy of the current product, if any.
    #[must_use]
    pub fn product(&self) -> Option<Product> {
        self.lock().product().cloned()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.lock().is_open()
    }
}
