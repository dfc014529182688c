use tokio::sync::mpsc;

use crate::playback::item::ItemId;

/// Readiness status of a playback item, as the engine reports it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    /// Metadata not resolved yet; carries no more information than
    /// "still loading"
    Unknown,

    /// The required key set resolved; the item can be played
    ReadyToPlay,

    /// Resolution failed; terminal for this item
    Failed,
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemStatus::Unknown => write!(f, "unknown"),
            ItemStatus::ReadyToPlay => write!(f, "readyToPlay"),
            ItemStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Discrete status-change notification for one playback item
///
/// Delivered on the engine's notification channel, which may be fed from
/// engine-owned background threads; handlers run only where the session is
/// pumped. `error` is populated on failed transitions and is observable but
/// drives no automatic handling.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    /// Item the change belongs to
    pub item: ItemId,

    /// Status before the change
    pub old: ItemStatus,

    /// Status after the change
    pub new: ItemStatus,

    /// Failure description when `new` is [`ItemStatus::Failed`]
    pub error: Option<String>,
}

impl StatusChange {
    pub fn new(item: ItemId, old: ItemStatus, new: ItemStatus) -> Self {
        Self {
            item,
            old,
            new,
            error: None,
        }
    }

    pub fn failed(item: ItemId, old: ItemStatus, error: impl Into<String>) -> Self {
        Self {
            item,
            old,
            new: ItemStatus::Failed,
            error: Some(error.into()),
        }
    }
}

/// Session-level playback state derived from item status changes
///
/// `Ready` and `Failed` are terminal for a given item; a new
/// `prepare_to_play` call starts a fresh item back at `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No item has been prepared yet
    #[default]
    Idle,

    /// An item is registered and resolving its required keys
    Loading,

    /// The active item became ready and playback was started
    Ready,

    /// The active item failed; no corrective action is taken
    Failed,
}

/// Sending half of an engine's status-notification channel
pub type StatusSender = mpsc::UnboundedSender<StatusChange>;

/// Receiving half owned by the session
pub type StatusReceiver = mpsc::UnboundedReceiver<StatusChange>;

/// Create the status-notification channel a session and its engine share
pub fn status_channel() -> (StatusSender, StatusReceiver) {
    mpsc::unbounded_channel()
}
