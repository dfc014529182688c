use tracing::{debug, error, info, warn};

use crate::asset::MediaAsset;
use crate::error::{PlaybackError, Result};
use crate::playback::engine::{PlayerEngine, SubscriptionId};
use crate::playback::item::{ItemId, PlaybackItem};
use crate::playback::status::{
    status_channel, ItemStatus, SessionState, StatusChange, StatusReceiver, StatusSender,
};
use crate::playback::surface::{PlayerLayer, SurfaceBounds};
use crate::timeline::build_timeline;

/// The one status observation a session holds at a time
#[derive(Debug, Clone, Copy)]
struct Observation {
    item: ItemId,
    subscription: SubscriptionId,
}

/// Singleton-per-surface playback session
///
/// Owns at most one engine instance (created lazily on the first
/// `prepare_to_play` and bound to the output layer) and the status
/// observation of the currently active item. Every further
/// `prepare_to_play` swaps a freshly built item into the existing engine
/// instead of creating a new one.
///
/// Status notifications may originate on engine-owned threads; they cross
/// into the session through a channel and are handled only by
/// [`pump_events`](Self::pump_events) or
/// [`pump_until_settled`](Self::pump_until_settled), so transport commands
/// always run on the thread that owns the surface and engine.
pub struct PlaybackSession<E, F>
where
    E: PlayerEngine,
    F: FnMut(StatusSender) -> E,
{
    surface_bounds: SurfaceBounds,
    engine_factory: F,
    layer: Option<PlayerLayer<E>>,
    observed: Option<Observation>,
    state: SessionState,
    last_error: Option<PlaybackError>,
    status_tx: StatusSender,
    status_rx: StatusReceiver,
}

impl<E, F> PlaybackSession<E, F>
where
    E: PlayerEngine,
    F: FnMut(StatusSender) -> E,
{
    /// Create an idle session for a surface of the given bounds
    ///
    /// `engine_factory` is invoked at most once, on the first
    /// `prepare_to_play`, and receives the sending half of the session's
    /// status channel.
    pub fn new(surface_bounds: SurfaceBounds, engine_factory: F) -> Self {
        let (status_tx, status_rx) = status_channel();
        Self {
            surface_bounds,
            engine_factory,
            layer: None,
            observed: None,
            state: SessionState::Idle,
            last_error: None,
            status_tx,
            status_rx,
        }
    }

    /// Build a fresh item from `asset` and make it the active one
    ///
    /// First call: creates the engine bound to the new item and attaches it
    /// to the output layer. Subsequent calls: removes the status
    /// observation from the previous item, then swaps the engine's active
    /// item, which re-enters loading. Either way the item's readiness
    /// transition later restarts playback from the head.
    ///
    /// Fails without touching existing playback state when the timeline
    /// cannot be built or when the layer has lost its player handle.
    pub fn prepare_to_play(&mut self, asset: &MediaAsset) -> Result<()> {
        let (timeline, pipeline) = build_timeline(asset)?;
        let item = PlaybackItem::new(timeline).with_frame_pipeline(pipeline);
        let item_id = item.id();

        if let Some(layer) = self.layer.as_mut() {
            let Some(player) = layer.player_mut() else {
                error!("No player found on the output layer");
                return Err(PlaybackError::NoEngine.into());
            };

            // Remove the old item's observation before the swap so a
            // replaced item can never keep a live subscription.
            if let Some(previous) = self.observed.take() {
                player.unsubscribe(previous.item, previous.subscription);
                debug!("Unsubscribed from replaced {}", previous.item);
            }

            player.load_item(item);
            let subscription = player.subscribe(item_id);
            self.observed = Some(Observation {
                item: item_id,
                subscription,
            });
            info!("Replaced current item with {}", item_id);
        } else {
            // First play: one engine, one layer, created here and reused
            // for the rest of the session.
            let mut engine = (self.engine_factory)(self.status_tx.clone());
            engine.load_item(item);
            let subscription = engine.subscribe(item_id);
            self.layer = Some(PlayerLayer::attached(self.surface_bounds, engine));
            self.observed = Some(Observation {
                item: item_id,
                subscription,
            });
            info!("Created player for {} on a fresh layer", item_id);
        }

        self.state = SessionState::Loading;
        Ok(())
    }

    /// Drain pending status notifications on the calling thread
    ///
    /// This is the UI-affinity mechanism: only the thread that owns the
    /// surface and engine is expected to call it. Returns the number of
    /// notifications handled.
    pub fn pump_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(change) = self.status_rx.try_recv() {
            self.handle_status_change(change);
            handled += 1;
        }
        handled
    }

    /// Await status notifications until the active item settles
    ///
    /// Resolves once the session reaches `Ready` or `Failed`. There is no
    /// readiness timeout: an item that never resolves leaves the future
    /// pending, matching the session's no-timeout contract.
    pub async fn pump_until_settled(&mut self) -> SessionState {
        while !matches!(self.state, SessionState::Ready | SessionState::Failed) {
            match self.status_rx.recv().await {
                Some(change) => self.handle_status_change(change),
                None => break,
            }
        }
        self.state
    }

    fn handle_status_change(&mut self, change: StatusChange) {
        // Guard against late notifications from a just-replaced item.
        if self.observed.map(|o| o.item) != Some(change.item) {
            debug!(
                "Ignoring status change {} -> {} from inactive {}",
                change.old, change.new, change.item
            );
            return;
        }

        match change.new {
            ItemStatus::ReadyToPlay => {
                let Some(player) = self.layer.as_mut().and_then(|l| l.player_mut()) else {
                    warn!("{} became ready but the layer has no player", change.item);
                    return;
                };

                // Restart from the head on every ready transition, the very
                // first play included.
                player.pause();
                player.seek(0.0);
                player.play();
                self.state = SessionState::Ready;
                info!("{} ready, playback restarted from the head", change.item);
            }
            ItemStatus::Failed => {
                // Observable, but deliberately not acted upon: no retry, no
                // user-facing escalation.
                let reason = change
                    .error
                    .unwrap_or_else(|| "no error reported".to_string());
                error!("{} failed: {}", change.item, reason);
                self.last_error = Some(PlaybackError::ItemFailed { reason });
                self.state = SessionState::Failed;
            }
            ItemStatus::Unknown => {
                debug!("{} still loading", change.item);
            }
        }
    }

    /// Tear the session down: unsubscribe, detach the player, drop the layer
    pub fn teardown(&mut self) {
        if let Some(observation) = self.observed.take() {
            if let Some(player) = self.layer.as_mut().and_then(|l| l.player_mut()) {
                player.unsubscribe(observation.item, observation.subscription);
                debug!("Unsubscribed from {} during teardown", observation.item);
            }
        }

        if let Some(mut layer) = self.layer.take() {
            layer.detach_player();
        }

        self.state = SessionState::Idle;
        info!("Session torn down");
    }

    /// Current session-level playback state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Identity of the item whose status is currently observed
    pub fn active_item(&self) -> Option<ItemId> {
        self.observed.map(|o| o.item)
    }

    /// Whether the engine and layer have been created yet
    pub fn is_attached(&self) -> bool {
        self.layer.is_some()
    }

    /// The output layer, once created
    pub fn layer(&self) -> Option<&PlayerLayer<E>> {
        self.layer.as_ref()
    }

    /// The most recent item failure, if any
    ///
    /// Recorded on failed transitions and kept until superseded; nothing in
    /// the session acts on it.
    pub fn last_error(&self) -> Option<&PlaybackError> {
        self.last_error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use crate::asset::{MediaAsset, MediaTrack, PixelSize};
    use crate::error::PlayerError;
    use crate::playback::engine::TransportCommand;

    #[derive(Debug, Default)]
    struct EngineLog {
        subscribes: u32,
        unsubscribes: u32,
        loads: Vec<ItemId>,
        transport: Vec<TransportCommand>,
    }

    struct MockEngine {
        log: Arc<Mutex<EngineLog>>,
        current: Option<PlaybackItem>,
        next_subscription: u64,
    }

    impl PlayerEngine for MockEngine {
        fn load_item(&mut self, item: PlaybackItem) {
            self.log.lock().unwrap().loads.push(item.id());
            self.current = Some(item);
        }

        fn current_item(&self) -> Option<ItemId> {
            self.current.as_ref().map(|i| i.id())
        }

        fn subscribe(&mut self, _item: ItemId) -> SubscriptionId {
            self.log.lock().unwrap().subscribes += 1;
            self.next_subscription += 1;
            SubscriptionId::new(self.next_subscription)
        }

        fn unsubscribe(&mut self, _item: ItemId, _subscription: SubscriptionId) {
            self.log.lock().unwrap().unsubscribes += 1;
        }

        fn pause(&mut self) {
            self.log.lock().unwrap().transport.push(TransportCommand::Pause);
        }

        fn seek(&mut self, seconds: f64) {
            self.log
                .lock()
                .unwrap()
                .transport
                .push(TransportCommand::Seek(seconds));
        }

        fn play(&mut self) {
            self.log.lock().unwrap().transport.push(TransportCommand::Play);
        }
    }

    type MockSession = PlaybackSession<MockEngine, Box<dyn FnMut(StatusSender) -> MockEngine>>;

    struct Fixture {
        session: MockSession,
        log: Arc<Mutex<EngineLog>>,
        sender: Arc<Mutex<Option<StatusSender>>>,
    }

    impl Fixture {
        fn new() -> Self {
            let log = Arc::new(Mutex::new(EngineLog::default()));
            let sender: Arc<Mutex<Option<StatusSender>>> = Arc::new(Mutex::new(None));

            let factory_log = log.clone();
            let factory_sender = sender.clone();
            let session = PlaybackSession::new(
                SurfaceBounds::new(1920.0, 1080.0),
                Box::new(move |tx: StatusSender| {
                    *factory_sender.lock().unwrap() = Some(tx);
                    MockEngine {
                        log: factory_log.clone(),
                        current: None,
                        next_subscription: 0,
                    }
                }) as Box<dyn FnMut(StatusSender) -> MockEngine>,
            );

            Self {
                session,
                log,
                sender,
            }
        }

        fn send_ready(&self, item: ItemId) {
            self.sender
                .lock()
                .unwrap()
                .as_ref()
                .expect("engine not created yet")
                .send(StatusChange::new(
                    item,
                    ItemStatus::Unknown,
                    ItemStatus::ReadyToPlay,
                ))
                .unwrap();
        }

        fn send_failed(&self, item: ItemId, reason: &str) {
            self.sender
                .lock()
                .unwrap()
                .as_ref()
                .expect("engine not created yet")
                .send(StatusChange::failed(item, ItemStatus::Unknown, reason))
                .unwrap();
        }

        fn transport(&self) -> Vec<TransportCommand> {
            self.log.lock().unwrap().transport.clone()
        }
    }

    fn test_asset() -> MediaAsset {
        MediaAsset::new(
            "puppy.mp4",
            10.0,
            vec![
                MediaTrack::video(1, "h264", PixelSize::new(640.0, 480.0)),
                MediaTrack::audio(2, "aac"),
            ],
        )
    }

    #[test]
    fn test_first_prepare_creates_engine_and_layer() {
        let mut fx = Fixture::new();
        assert!(!fx.session.is_attached());
        assert_eq!(fx.session.state(), SessionState::Idle);

        fx.session.prepare_to_play(&test_asset()).unwrap();

        assert!(fx.session.is_attached());
        assert_eq!(fx.session.state(), SessionState::Loading);
        assert!(fx.session.active_item().is_some());

        let log = fx.log.lock().unwrap();
        assert_eq!(log.loads.len(), 1);
        assert_eq!(log.subscribes, 1);
        assert_eq!(log.unsubscribes, 0);
    }

    #[test]
    fn test_ready_transition_restarts_from_head() {
        let mut fx = Fixture::new();
        fx.session.prepare_to_play(&test_asset()).unwrap();
        let item = fx.session.active_item().unwrap();

        fx.send_ready(item);
        assert_eq!(fx.session.pump_events(), 1);

        // Unconditional pause / seek-to-zero / play, even on first play
        assert_eq!(
            fx.transport(),
            vec![
                TransportCommand::Pause,
                TransportCommand::Seek(0.0),
                TransportCommand::Play,
            ]
        );
        assert_eq!(fx.session.state(), SessionState::Ready);
    }

    #[test]
    fn test_replacement_keeps_subscriptions_balanced() {
        let mut fx = Fixture::new();

        for replacements in 1..=5u32 {
            fx.session.prepare_to_play(&test_asset()).unwrap();
            let log = fx.log.lock().unwrap();
            assert_eq!(log.subscribes, replacements);
            assert_eq!(log.subscribes - log.unsubscribes, 1);
        }

        // Only one engine was ever created
        assert_eq!(fx.log.lock().unwrap().loads.len(), 5);
    }

    #[test]
    fn test_stale_ready_notification_is_ignored() {
        let mut fx = Fixture::new();
        fx.session.prepare_to_play(&test_asset()).unwrap();
        let first = fx.session.active_item().unwrap();

        fx.session.prepare_to_play(&test_asset()).unwrap();
        let second = fx.session.active_item().unwrap();
        assert_ne!(first, second);

        fx.send_ready(first);
        assert_eq!(fx.session.pump_events(), 1);

        assert!(fx.transport().is_empty());
        assert_eq!(fx.session.state(), SessionState::Loading);
    }

    #[test]
    fn test_second_item_drives_playback_after_double_prepare() {
        let mut fx = Fixture::new();
        fx.session.prepare_to_play(&test_asset()).unwrap();
        let first = fx.session.active_item().unwrap();
        fx.session.prepare_to_play(&test_asset()).unwrap();
        let second = fx.session.active_item().unwrap();

        // Late readiness of the replaced item, then the active one resolves
        fx.send_ready(first);
        fx.send_ready(second);
        assert_eq!(fx.session.pump_events(), 2);

        assert_eq!(
            fx.transport(),
            vec![
                TransportCommand::Pause,
                TransportCommand::Seek(0.0),
                TransportCommand::Play,
            ]
        );
        assert_eq!(fx.session.state(), SessionState::Ready);
    }

    #[test]
    fn test_every_ready_transition_replays_the_triple() {
        let mut fx = Fixture::new();

        for round in 1..=3usize {
            fx.session.prepare_to_play(&test_asset()).unwrap();
            let item = fx.session.active_item().unwrap();
            fx.send_ready(item);
            fx.session.pump_events();
            assert_eq!(fx.transport().len(), round * 3);
        }
    }

    #[test]
    fn test_failed_item_records_error_without_transport() {
        let mut fx = Fixture::new();
        fx.session.prepare_to_play(&test_asset()).unwrap();
        let item = fx.session.active_item().unwrap();

        fx.send_failed(item, "decoder gave up");
        fx.session.pump_events();

        assert_eq!(fx.session.state(), SessionState::Failed);
        assert!(fx.transport().is_empty());
        assert!(matches!(
            fx.session.last_error(),
            Some(PlaybackError::ItemFailed { reason }) if reason == "decoder gave up"
        ));
    }

    #[test]
    fn test_unknown_status_is_a_noop() {
        let mut fx = Fixture::new();
        fx.session.prepare_to_play(&test_asset()).unwrap();
        let item = fx.session.active_item().unwrap();

        fx.sender
            .lock()
            .unwrap()
            .as_ref()
            .unwrap()
            .send(StatusChange::new(
                item,
                ItemStatus::Unknown,
                ItemStatus::Unknown,
            ))
            .unwrap();
        fx.session.pump_events();

        assert_eq!(fx.session.state(), SessionState::Loading);
        assert!(fx.transport().is_empty());
    }

    #[test]
    fn test_detached_player_yields_no_engine_error() {
        let mut fx = Fixture::new();
        fx.session.prepare_to_play(&test_asset()).unwrap();

        // Simulate a layer that lost its player handle
        fx.session.layer.as_mut().unwrap().detach_player();

        let err = fx.session.prepare_to_play(&test_asset()).unwrap_err();
        assert!(matches!(
            err,
            PlayerError::Playback(PlaybackError::NoEngine)
        ));
    }

    #[test]
    fn test_prepare_failure_leaves_session_untouched() {
        let mut fx = Fixture::new();
        fx.session.prepare_to_play(&test_asset()).unwrap();
        let active = fx.session.active_item().unwrap();
        let state = fx.session.state();

        let no_video = MediaAsset::new("voice.mp4", 4.0, vec![MediaTrack::audio(1, "aac")]);
        assert!(fx.session.prepare_to_play(&no_video).is_err());

        // Existing playback state must be unaffected by the aborted call
        assert_eq!(fx.session.active_item(), Some(active));
        assert_eq!(fx.session.state(), state);
        let log = fx.log.lock().unwrap();
        assert_eq!(log.subscribes, 1);
        assert_eq!(log.unsubscribes, 0);
    }

    #[test]
    fn test_teardown_balances_subscriptions_and_detaches() {
        let mut fx = Fixture::new();
        fx.session.prepare_to_play(&test_asset()).unwrap();
        fx.session.prepare_to_play(&test_asset()).unwrap();

        fx.session.teardown();

        let log = fx.log.lock().unwrap();
        assert_eq!(log.subscribes, 2);
        assert_eq!(log.unsubscribes, 2);
        drop(log);

        assert!(!fx.session.is_attached());
        assert_eq!(fx.session.state(), SessionState::Idle);
        assert_eq!(fx.session.active_item(), None);
    }

    #[tokio::test]
    async fn test_pump_until_settled_awaits_readiness() {
        let mut fx = Fixture::new();
        fx.session.prepare_to_play(&test_asset()).unwrap();
        let item = fx.session.active_item().unwrap();

        let sender = fx.sender.lock().unwrap().clone().unwrap();
        tokio::spawn(async move {
            sender
                .send(StatusChange::new(
                    item,
                    ItemStatus::Unknown,
                    ItemStatus::ReadyToPlay,
                ))
                .unwrap();
        });

        let state = fx.session.pump_until_settled().await;
        assert_eq!(state, SessionState::Ready);
    }
}
