use crate::playback::item::{ItemId, PlaybackItem};

/// Handle returned by a status subscription
///
/// Scoped to one item instance, so no out-of-band context token is needed
/// to tell subscriptions apart; pass it back to [`PlayerEngine::unsubscribe`]
/// to stop delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Transport command accepted by a render/playback engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransportCommand {
    Pause,
    /// Move the playhead to the given position in seconds
    Seek(f64),
    Play,
}

/// Seam to the render/playback engine
///
/// The engine decodes and displays a prepared item, resolves the item's
/// required keys asynchronously, and reports status changes on the
/// notification channel it was constructed over. Implementations may emit
/// from background threads; the session only handles events where it is
/// pumped, which is also the only context allowed to call the transport
/// methods.
pub trait PlayerEngine {
    /// Register `item` as the active item, entering loading immediately
    ///
    /// Replaces any previously loaded item; the engine stops resolving the
    /// old item but late notifications for it may still be in flight.
    fn load_item(&mut self, item: PlaybackItem);

    /// Identity of the currently loaded item
    fn current_item(&self) -> Option<ItemId>;

    /// Begin observing status changes of the given item
    fn subscribe(&mut self, item: ItemId) -> SubscriptionId;

    /// Stop observing the given item; every subscribe gets exactly one
    /// matching unsubscribe
    fn unsubscribe(&mut self, item: ItemId, subscription: SubscriptionId);

    /// Pause playback
    fn pause(&mut self);

    /// Move the playhead to the given position in seconds
    fn seek(&mut self, seconds: f64);

    /// Start or resume playback
    fn play(&mut self);
}
