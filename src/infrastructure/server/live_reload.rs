//! Live-reload channel
//!
//! Tasks bump a version counter after writing output; connected browsers
//! long-poll for a version newer than the one they loaded with.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

/// What the browser should do on reload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReloadKind {
    /// Full page reload
    #[default]
    Page,
    /// Swap stylesheets in place
    Css,
}

/// Latest reload notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct ReloadState {
    pub version: u64,
    pub kind: ReloadKind,
}

/// Cloneable handle to the reload channel. Notifying never blocks and
/// works from any thread, with or without connected clients.
#[derive(Debug, Clone)]
pub struct LiveReload {
    tx: Arc<watch::Sender<ReloadState>>,
}

impl Default for LiveReload {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveReload {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ReloadState::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn notify(&self, kind: ReloadKind) {
        self.tx.send_modify(|state| {
            state.version += 1;
            state.kind = kind;
        });
        tracing::debug!(version = self.version(), ?kind, "live reload notified");
    }

    pub fn current(&self) -> ReloadState {
        *self.tx.borrow()
    }

    pub fn version(&self) -> u64 {
        self.current().version
    }

    pub fn subscribe(&self) -> watch::Receiver<ReloadState> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notify_without_subscribers_bumps_version() {
        let reload = LiveReload::new();
        assert_eq!(reload.version(), 0);

        reload.notify(ReloadKind::Css);
        reload.notify(ReloadKind::Page);

        assert_eq!(reload.current().version, 2);
        assert_eq!(reload.current().kind, ReloadKind::Page);
    }

    #[test]
    fn clones_share_state() {
        let reload = LiveReload::new();
        let other = reload.clone();

        other.notify(ReloadKind::Css);

        assert_eq!(reload.current().kind, ReloadKind::Css);
        assert_eq!(reload.version(), 1);
    }

    #[test]
    fn subscriber_sees_change() {
        let reload = LiveReload::new();
        let mut rx = reload.subscribe();

        reload.notify(ReloadKind::Page);

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().version, 1);
    }

    #[test]
    fn state_serializes_lowercase_kind() {
        let json = serde_json::to_string(&ReloadState {
            version: 3,
            kind: ReloadKind::Css,
        })
        .unwrap();
        assert_eq!(json, r#"{"version":3,"kind":"css"}"#);
    }
}
