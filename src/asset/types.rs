use std::path::PathBuf;

/// Half-open time range `[start, start + duration)` in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    /// Range start in seconds
    pub start: f64,

    /// Range length in seconds
    pub duration: f64,
}

impl TimeRange {
    /// Create a range anchored at time zero spanning `duration` seconds
    pub fn from_start(duration: f64) -> Self {
        Self {
            start: 0.0,
            duration,
        }
    }

    /// Exclusive end of the range in seconds
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// A zero-duration range is valid but contains no time
    pub fn is_empty(&self) -> bool {
        self.duration <= 0.0
    }
}

/// Untransformed pixel dimensions of a track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelSize {
    pub width: f64,
    pub height: f64,
}

impl PixelSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// 2x3 affine geometry transform carried by a track as display metadata
///
/// Laid out as `[a b c d tx ty]`; a point maps as
/// `(a*x + c*y + tx, b*x + d*y + ty)`. Sizes go through the linear part
/// only, so translation never affects render dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreferredTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tx: f64,
    pub ty: f64,
}

impl PreferredTransform {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// Quarter turn clockwise, the common portrait-video transform
    pub const ROTATE_90: Self = Self {
        a: 0.0,
        b: 1.0,
        c: -1.0,
        d: 0.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub const ROTATE_180: Self = Self {
        a: -1.0,
        b: 0.0,
        c: 0.0,
        d: -1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub const ROTATE_270: Self = Self {
        a: 0.0,
        b: -1.0,
        c: 1.0,
        d: 0.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// Apply the linear part to a size; the result keeps its sign
    pub fn apply_to_size(&self, size: PixelSize) -> PixelSize {
        PixelSize {
            width: self.a * size.width + self.c * size.height,
            height: self.b * size.width + self.d * size.height,
        }
    }
}

impl Default for PreferredTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Kind of media stream a track carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    Video,
    Audio,
}

impl std::fmt::Display for TrackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackKind::Video => write!(f, "video"),
            TrackKind::Audio => write!(f, "audio"),
        }
    }
}

/// A single media stream within an asset
#[derive(Debug, Clone, PartialEq)]
pub struct MediaTrack {
    /// Track identifier, unique within its asset
    pub id: u32,

    /// Media kind of the stream
    pub kind: TrackKind,

    /// Codec name as reported by the source
    pub codec: String,

    /// Untransformed pixel dimensions; audio tracks carry none
    pub natural_size: Option<PixelSize>,

    /// Display-time geometry transform
    pub preferred_transform: PreferredTransform,
}

impl MediaTrack {
    /// Create a video track with the given geometry
    pub fn video(id: u32, codec: impl Into<String>, natural_size: PixelSize) -> Self {
        Self {
            id,
            kind: TrackKind::Video,
            codec: codec.into(),
            natural_size: Some(natural_size),
            preferred_transform: PreferredTransform::IDENTITY,
        }
    }

    /// Create an audio track (no geometry)
    pub fn audio(id: u32, codec: impl Into<String>) -> Self {
        Self {
            id,
            kind: TrackKind::Audio,
            codec: codec.into(),
            natural_size: None,
            preferred_transform: PreferredTransform::IDENTITY,
        }
    }

    /// Attach a non-identity preferred transform
    pub fn with_transform(mut self, transform: PreferredTransform) -> Self {
        self.preferred_transform = transform;
        self
    }

    /// On-screen dimensions: natural size through the preferred transform,
    /// absolute value of each resulting dimension
    ///
    /// Returns `None` when the track exposes no natural size.
    pub fn render_size(&self) -> Option<PixelSize> {
        let natural = self.natural_size?;
        let transformed = self.preferred_transform.apply_to_size(natural);
        Some(PixelSize {
            width: transformed.width.abs(),
            height: transformed.height.abs(),
        })
    }
}

/// Opaque handle to a decodable media source
///
/// Immutable once opened; owned by the caller and cloned (cheaply enough at
/// this metadata granularity) wherever a defensive copy is wanted.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaAsset {
    path: PathBuf,
    duration: f64,
    tracks: Vec<MediaTrack>,
}

impl MediaAsset {
    pub fn new<P: Into<PathBuf>>(path: P, duration: f64, tracks: Vec<MediaTrack>) -> Self {
        Self {
            path: path.into(),
            duration,
            tracks,
        }
    }

    /// Source file this asset was opened from
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Full duration in seconds
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// All tracks the source exposes
    pub fn tracks(&self) -> &[MediaTrack] {
        &self.tracks
    }

    /// Tracks of one media kind, in source order
    pub fn tracks_of(&self, kind: TrackKind) -> impl Iterator<Item = &MediaTrack> {
        self.tracks.iter().filter(move |t| t.kind == kind)
    }

    /// First track of the given kind, if any
    pub fn first_track_of(&self, kind: TrackKind) -> Option<&MediaTrack> {
        self.tracks_of(kind).next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_range_from_start() {
        let range = TimeRange::from_start(10.0);
        assert_eq!(range.start, 0.0);
        assert_eq!(range.duration, 10.0);
        assert_eq!(range.end(), 10.0);
        assert!(!range.is_empty());

        let empty = TimeRange::from_start(0.0);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_identity_transform_preserves_size() {
        let size = PixelSize::new(640.0, 480.0);
        let out = PreferredTransform::IDENTITY.apply_to_size(size);
        assert_eq!(out, size);
    }

    #[test]
    fn test_rotation_swaps_render_dimensions() {
        let track = MediaTrack::video(1, "h264", PixelSize::new(640.0, 480.0))
            .with_transform(PreferredTransform::ROTATE_90);

        // The raw transform produces a negative dimension; render_size
        // takes absolute values.
        let raw = PreferredTransform::ROTATE_90.apply_to_size(PixelSize::new(640.0, 480.0));
        assert_eq!(raw, PixelSize::new(-480.0, 640.0));

        assert_eq!(track.render_size(), Some(PixelSize::new(480.0, 640.0)));
    }

    #[test]
    fn test_render_size_requires_geometry() {
        let track = MediaTrack::audio(2, "aac");
        assert_eq!(track.render_size(), None);
    }

    #[test]
    fn test_first_track_of_kind() {
        let asset = MediaAsset::new(
            "clip.mp4",
            5.0,
            vec![
                MediaTrack::audio(1, "aac"),
                MediaTrack::video(2, "h264", PixelSize::new(1920.0, 1080.0)),
                MediaTrack::video(3, "h264", PixelSize::new(640.0, 480.0)),
            ],
        );

        let first_video = asset.first_track_of(TrackKind::Video).unwrap();
        assert_eq!(first_video.id, 2);
        assert_eq!(asset.tracks_of(TrackKind::Video).count(), 2);
    }
}
