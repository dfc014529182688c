use std::sync::atomic::{AtomicU64, Ordering};

use crate::pipeline::FramePipeline;
use crate::playback::status::ItemStatus;
use crate::timeline::Timeline;

/// Asset keys that must resolve before an item can report ready
pub const REQUIRED_ASSET_KEYS: &[&str] = &["playable", "hasProtectedContent"];

static NEXT_ITEM_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a playback item
///
/// Stale status notifications are filtered by comparing ids, so every item
/// ever created gets a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u64);

impl ItemId {
    fn next() -> Self {
        Self(NEXT_ITEM_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Engine-facing unit of playback: a timeline ready to be played
///
/// Binds a freshly built timeline (and optionally its frame pipeline) to a
/// readiness status and the fixed key set the engine must resolve before
/// the status can become ready. Created once per `prepare_to_play` call and
/// replaced wholesale by the next one; `ReadyToPlay` and `Failed` are
/// terminal for an instance.
#[derive(Debug)]
pub struct PlaybackItem {
    id: ItemId,
    timeline: Timeline,
    frame_pipeline: Option<FramePipeline>,
    required_keys: &'static [&'static str],
    status: ItemStatus,
}

impl PlaybackItem {
    /// Wrap a timeline in a new item with a fresh identity
    pub fn new(timeline: Timeline) -> Self {
        Self {
            id: ItemId::next(),
            timeline,
            frame_pipeline: None,
            required_keys: REQUIRED_ASSET_KEYS,
            status: ItemStatus::Unknown,
        }
    }

    /// Attach the frame pipeline built alongside the timeline
    pub fn with_frame_pipeline(mut self, pipeline: FramePipeline) -> Self {
        self.frame_pipeline = Some(pipeline);
        self
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn frame_pipeline(&self) -> Option<&FramePipeline> {
        self.frame_pipeline.as_ref()
    }

    /// Keys the engine resolves asynchronously before readiness
    pub fn required_keys(&self) -> &'static [&'static str] {
        self.required_keys
    }

    pub fn status(&self) -> ItemStatus {
        self.status
    }

    /// Record a status transition; engines own this progression
    pub fn set_status(&mut self, status: ItemStatus) {
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_ids_are_unique() {
        let a = PlaybackItem::new(Timeline::new());
        let b = PlaybackItem::new(Timeline::new());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_new_item_starts_unknown_with_required_keys() {
        let item = PlaybackItem::new(Timeline::new());
        assert_eq!(item.status(), ItemStatus::Unknown);
        assert_eq!(item.required_keys(), &["playable", "hasProtectedContent"]);
        assert!(item.frame_pipeline().is_none());
    }

    #[test]
    fn test_pipeline_attachment() {
        use crate::asset::PixelSize;
        use crate::pipeline::FramePipeline;

        let item = PlaybackItem::new(Timeline::new())
            .with_frame_pipeline(FramePipeline::identity(PixelSize::new(640.0, 480.0)));
        assert!(item.frame_pipeline().is_some());
    }
}
