//! Drops responses that were superseded by a newer request of the same kind.

use std::collections::HashMap;
use std::hash::Hash;

/// Keeps the latest `req_id` per key; anything older is stale.
#[derive(Debug)]
pub struct RequestTracker<K> {
    pending: HashMap<K, u64>,
}

impl<K: Eq + Hash> Default for RequestTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash> RequestTracker<K> {
    pub fn new() -> Self {
        Self {
            pending: HashMap::new(),
        }
    }

    /// Registers a new request, superseding any pending one for `key`.
    pub fn issue(&mut self, key: K, next_id_fn: impl FnOnce() -> u64) -> u64 {
        let id = next_id_fn();
        self.pending.insert(key, id);
        id
    }

    /// True only for the latest id of `key`; clears it on success.
    pub fn accept(&mut self, key: &K, req_id: u64) -> bool {
        match self.pending.get(key) {
            Some(&pending_id) if pending_id == req_id => {
                self.pending.remove(key);
                true
            }
            _ => false,
        }
    }

    /// Accepts `req_id` under whichever key still waits for it.
    ///
    /// Used for error replies, which do not say what kind of request failed.
    pub fn accept_any(&mut self, req_id: u64) -> Option<K>
    where
        K: Clone,
    {
        let key = self
            .pending
            .iter()
            .find(|(_, id)| **id == req_id)
            .map(|(k, _)| k.clone())?;
        self.pending.remove(&key);
        Some(key)
    }

    pub fn reset_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.contains_key(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKey {
    Init,
    Login,
    Logout,
    Playlists,
    PlaylistSongs,
    Import,
    /// Account playlists listed in the import picker
    SpotifyPlaylists,
    ExportCsv,
    TransferJobs,
    TransferJob,
    StartTransfer,
    /// Progress shown in the transfer modal
    ModalProgress,
    /// Progress of the job selected in the history view
    JobProgress,
    CancelTransfer,
    SpotifyStatus,
    SpotifyAuthUrl,
    SpotifyCallback,
    SpotifyDisconnect,
    YouTubeStatus,
    YouTubeConfigure,
    YouTubeTest,
    YouTubeDisconnect,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> impl FnMut() -> u64 {
        let mut next = 0u64;
        move || {
            next += 1;
            next
        }
    }

    #[test]
    fn issue_and_accept() {
        let mut tracker: RequestTracker<RequestKey> = RequestTracker::new();
        let mut ids = counter();

        let req_id = tracker.issue(RequestKey::Playlists, &mut ids);
        assert_eq!(req_id, 1);
        assert!(tracker.is_pending(&RequestKey::Playlists));

        assert!(tracker.accept(&RequestKey::Playlists, 1));
        assert!(!tracker.is_pending(&RequestKey::Playlists));
    }

    #[test]
    fn only_latest_is_accepted() {
        let mut tracker: RequestTracker<RequestKey> = RequestTracker::new();
        let mut ids = counter();

        let first = tracker.issue(RequestKey::JobProgress, &mut ids);
        let second = tracker.issue(RequestKey::JobProgress, &mut ids);

        assert!(!tracker.accept(&RequestKey::JobProgress, first));
        assert!(tracker.is_pending(&RequestKey::JobProgress));
        assert!(tracker.accept(&RequestKey::JobProgress, second));
    }

    #[test]
    fn accept_without_issue_is_rejected() {
        let mut tracker: RequestTracker<RequestKey> = RequestTracker::new();
        assert!(!tracker.accept(&RequestKey::Login, 999));
    }

    #[test]
    fn accept_any_finds_the_key() {
        let mut tracker: RequestTracker<RequestKey> = RequestTracker::new();
        let mut ids = counter();

        let import = tracker.issue(RequestKey::Import, &mut ids);
        tracker.issue(RequestKey::Playlists, &mut ids);

        assert_eq!(tracker.accept_any(import), Some(RequestKey::Import));
        assert_eq!(tracker.accept_any(import), None);
        assert!(tracker.is_pending(&RequestKey::Playlists));
    }

    #[test]
    fn reset_all_forgets_everything() {
        let mut tracker: RequestTracker<RequestKey> = RequestTracker::new();
        let mut ids = counter();

        tracker.issue(RequestKey::Playlists, &mut ids);
        tracker.issue(RequestKey::TransferJobs, &mut ids);
        tracker.reset_all();

        assert!(!tracker.is_pending(&RequestKey::Playlists));
        assert!(!tracker.is_pending(&RequestKey::TransferJobs));
    }
}
