use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info};

use crate::playback::engine::{PlayerEngine, SubscriptionId};
use crate::playback::item::{ItemId, PlaybackItem};
use crate::playback::status::{ItemStatus, StatusChange, StatusSender};

/// Decode-free player engine for running the demo end to end
///
/// Resolves every item's required keys successfully after a configurable
/// delay, emitting the readiness notification from a background task the
/// way a real engine would from its own threads. Transport commands move a
/// simulated playhead and are logged instead of rendered.
///
/// Requires a Tokio runtime; `load_item` spawns the readiness task.
pub struct SimulatedPlayer {
    status_tx: StatusSender,
    ready_delay: Duration,
    current: Option<PlaybackItem>,
    next_subscription: u64,
    active_subscriptions: u32,
    playhead: f64,
    playing: bool,
}

impl SimulatedPlayer {
    pub fn new(status_tx: StatusSender, ready_delay: Duration) -> Self {
        Self {
            status_tx,
            ready_delay,
            current: None,
            next_subscription: 0,
            active_subscriptions: 0,
            playhead: 0.0,
            playing: false,
        }
    }

    /// Simulated playhead position in seconds
    pub fn playhead(&self) -> f64 {
        self.playhead
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

impl PlayerEngine for SimulatedPlayer {
    fn load_item(&mut self, mut item: PlaybackItem) {
        item.set_status(ItemStatus::Unknown);
        let id = item.id();
        debug!(
            "Simulated load of {} (resolving keys {:?}, render {:?})",
            id,
            item.required_keys(),
            item.frame_pipeline().map(|p| p.render_size())
        );

        self.playing = false;
        self.playhead = 0.0;
        self.current = Some(item);

        let tx = self.status_tx.clone();
        let delay = self.ready_delay;
        tokio::spawn(async move {
            sleep(delay).await;
            // Send only fails when the session is gone; nothing to do then.
            let _ = tx.send(StatusChange::new(
                id,
                ItemStatus::Unknown,
                ItemStatus::ReadyToPlay,
            ));
        });
    }

    fn current_item(&self) -> Option<ItemId> {
        self.current.as_ref().map(|i| i.id())
    }

    fn subscribe(&mut self, item: ItemId) -> SubscriptionId {
        self.next_subscription += 1;
        self.active_subscriptions += 1;
        debug!(
            "Subscribed to {} ({} active subscriptions)",
            item, self.active_subscriptions
        );
        SubscriptionId::new(self.next_subscription)
    }

    fn unsubscribe(&mut self, item: ItemId, _subscription: SubscriptionId) {
        self.active_subscriptions = self.active_subscriptions.saturating_sub(1);
        debug!(
            "Unsubscribed from {} ({} active subscriptions)",
            item, self.active_subscriptions
        );
    }

    fn pause(&mut self) {
        self.playing = false;
        info!("Simulated player: pause at {:.3}s", self.playhead);
    }

    fn seek(&mut self, seconds: f64) {
        self.playhead = seconds;
        info!("Simulated player: seek to {:.3}s", seconds);
    }

    fn play(&mut self) {
        self.playing = true;
        info!("Simulated player: play from {:.3}s", self.playhead);
    }
}
