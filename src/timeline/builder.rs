use tracing::debug;

use crate::asset::{MediaAsset, TimeRange, TrackKind};
use crate::error::{Result, TimelineError};
use crate::pipeline::FramePipeline;
use crate::timeline::types::Timeline;

/// Build a playable program from a source asset
///
/// Produces a timeline holding the asset's first video track over the full
/// source range `[0, duration)` anchored at time zero (no trimming), and a
/// frame pipeline whose render size comes from the inserted track's
/// geometry. Both are immutable after construction and are superseded
/// together on the next build.
///
/// Errors are checked where the platform version would crash or silently
/// drop them: a source without video tracks, an insertion the composition
/// rejects, or a track with no natural size.
pub fn build_timeline(asset: &MediaAsset) -> Result<(Timeline, FramePipeline)> {
    // Work on a copy so later mutation of the caller's handle cannot
    // retroactively affect an in-flight timeline.
    let asset = asset.clone();

    let full_range = TimeRange::from_start(asset.duration());
    debug!(
        "Building timeline over {:?}: range [0, {:.3})",
        asset.path(),
        full_range.end()
    );

    let mut timeline = Timeline::new();
    let video_slot = timeline.add_track(TrackKind::Video);

    let source_track = asset
        .first_track_of(TrackKind::Video)
        .ok_or(TimelineError::NoVideoTrack)?;

    let render_size = {
        let inserted = timeline.insert_track(video_slot, source_track, full_range, 0.0)?;
        inserted
            .source
            .render_size()
            .ok_or(TimelineError::MissingGeometry {
                track: inserted.source.id,
            })?
    };

    debug!(
        "Timeline built: duration {:.3}s, render size {:.0}x{:.0}",
        timeline.duration(),
        render_size.width,
        render_size.height
    );

    Ok((timeline, FramePipeline::identity(render_size)))
}
