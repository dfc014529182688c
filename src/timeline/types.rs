use crate::asset::{MediaTrack, TimeRange, TrackKind};
use crate::error::TimelineError;

/// A source track segment placed on a timeline track
#[derive(Debug, Clone, PartialEq)]
pub struct TrackSegment {
    /// Copied source track (owned by the timeline from here on)
    pub source: MediaTrack,

    /// Source time range the segment covers
    pub range: TimeRange,

    /// Timeline position the segment is anchored at, in seconds
    pub at: f64,
}

/// One track slot of a timeline
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineTrack {
    /// Media kind this slot accepts
    pub kind: TrackKind,

    /// The inserted segment, once insertion has succeeded
    pub segment: Option<TrackSegment>,
}

/// An editable, composed arrangement of track segments
///
/// The playback-session use is deliberately narrow: one video slot whose
/// segment spans the full source duration anchored at time zero. The type
/// still checks insertions the way a real composition engine would, so an
/// incompatible source surfaces as [`TimelineError::InsertionRejected`]
/// instead of being silently dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    tracks: Vec<TimelineTrack>,
}

impl Timeline {
    /// Create a new empty timeline
    pub fn new() -> Self {
        Self { tracks: Vec::new() }
    }

    /// Add an empty track slot for the given media kind, returning its index
    pub fn add_track(&mut self, kind: TrackKind) -> usize {
        self.tracks.push(TimelineTrack {
            kind,
            segment: None,
        });
        self.tracks.len() - 1
    }

    /// Insert a copy of `source` into the slot at `slot_index`, covering
    /// `range` of the source, anchored at timeline position `at`
    ///
    /// Returns the inserted segment. Rejections mirror what an underlying
    /// engine refuses: unknown slot, media-kind mismatch, occupied slot.
    pub fn insert_track(
        &mut self,
        slot_index: usize,
        source: &MediaTrack,
        range: TimeRange,
        at: f64,
    ) -> Result<&TrackSegment, TimelineError> {
        let slot = self.tracks.get_mut(slot_index).ok_or_else(|| {
            TimelineError::InsertionRejected {
                reason: format!("no track slot at index {}", slot_index),
            }
        })?;

        if slot.kind != source.kind {
            return Err(TimelineError::InsertionRejected {
                reason: format!(
                    "cannot insert {} track {} into {} slot",
                    source.kind, source.id, slot.kind
                ),
            });
        }

        if slot.segment.is_some() {
            return Err(TimelineError::InsertionRejected {
                reason: format!("track slot {} already holds a segment", slot_index),
            });
        }

        Ok(slot.segment.insert(TrackSegment {
            source: source.clone(),
            range,
            at,
        }))
    }

    /// Track slot at the given index
    pub fn track(&self, slot_index: usize) -> Option<&TimelineTrack> {
        self.tracks.get(slot_index)
    }

    /// All track slots in order
    pub fn tracks(&self) -> &[TimelineTrack] {
        &self.tracks
    }

    /// The first video slot's segment, if one has been inserted
    pub fn video_segment(&self) -> Option<&TrackSegment> {
        self.tracks
            .iter()
            .find(|t| t.kind == TrackKind::Video)
            .and_then(|t| t.segment.as_ref())
    }

    /// Composed program duration: the furthest segment end across slots
    pub fn duration(&self) -> f64 {
        self.tracks
            .iter()
            .filter_map(|t| t.segment.as_ref())
            .map(|s| s.at + s.range.duration)
            .fold(0.0, f64::max)
    }

    /// A timeline with no inserted segments plays nothing
    pub fn is_empty(&self) -> bool {
        self.tracks.iter().all(|t| t.segment.is_none())
    }
}
