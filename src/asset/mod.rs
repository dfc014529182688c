//! # Media Assets
//!
//! Opening media sources and exposing their decodable metadata: duration,
//! tracks, natural size, and preferred geometry transform.

pub mod library;
pub mod types;

pub use library::AssetLibrary;
pub use types::{
    MediaAsset, MediaTrack, PixelSize, PreferredTransform, TimeRange, TrackKind,
};
