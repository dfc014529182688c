//! # Timeline Construction
//!
//! Builds the playable program handed to the render engine: a composition
//! holding one full-range video segment plus the frame pipeline derived
//! from its geometry.

pub mod builder;
pub mod types;

pub use builder::build_timeline;
pub use types::{Timeline, TimelineTrack, TrackSegment};
