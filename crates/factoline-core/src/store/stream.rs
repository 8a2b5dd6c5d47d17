// ── Listing subscription ──

use std::sync::Arc;

use tokio::sync::watch;

use super::Listing;

/// A subscription to storefront snapshots.
///
/// Provides point-in-time access plus change notification, either awaited
/// with [`changed`](Self::changed) or polled with
/// [`take_changed`](Self::take_changed) from a synchronous loop.
pub struct ListingStream {
    current: Arc<Listing>,
    receiver: watch::Receiver<Arc<Listing>>,
}

impl ListingStream {
    pub(crate) fn new(receiver: watch::Receiver<Arc<Listing>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// The snapshot seen by the last `changed` / `take_changed` call.
    pub fn current(&self) -> &Arc<Listing> {
        &self.current
    }

    /// The latest published snapshot (may be newer than `current`).
    pub fn latest(&self) -> Arc<Listing> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change, returning the new snapshot.
    /// Returns `None` once the storefront has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<Listing>> {
        self.receiver.changed().await.ok()?;
        Some(self.mark_seen())
    }

    /// Non-blocking: the new snapshot if one was published since the last
    /// call, `None` otherwise.
    pub fn take_changed(&mut self) -> Option<Arc<Listing>> {
        if self.receiver.has_changed().ok()? {
            Some(self.mark_seen())
        } else {
            None
        }
    }

    fn mark_seen(&mut self) -> Arc<Listing> {
        let snap = self.receiver.borrow_and_update().clone();
        self.current = Arc::clone(&snap);
        snap
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::catalog::Catalog;
    use crate::store::Storefront;

    #[test]
    fn take_changed_reports_each_change_once() {
        let mut store = Storefront::new(Catalog::builtin());
        let mut stream = store.subscribe();
        assert!(stream.take_changed().is_none());

        store.set_query("chêne");
        store.set_option("type", "beam", true);

        let seen = stream.take_changed().unwrap();
        assert_eq!(seen.version, 2);
        assert_eq!(seen.query, "chêne");
        assert!(stream.take_changed().is_none());
    }

    #[test]
    fn latest_tracks_storefront_without_marking_seen() {
        let mut store = Storefront::new(Catalog::builtin());
        let mut stream = store.subscribe();
        store.add_to_cart("1").unwrap();

        assert_eq!(stream.latest().cart.notifications(), 1);
        assert_eq!(stream.current().version, 0);
        assert!(stream.take_changed().is_some());
    }

    #[test]
    fn dropped_storefront_ends_stream() {
        let store = Storefront::new(Catalog::builtin());
        let mut stream = store.subscribe();
        drop(store);
        assert!(stream.take_changed().is_none());
    }
}
