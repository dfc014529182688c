//! # Replayer
//!
//! Composition-based playback sessions: build a seekable, re-playable
//! timeline from a media asset, attach a per-frame processing pipeline, and
//! drive playback to ready-and-playing — restarting from the head every
//! time a new item is prepared.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use replayer::{
//!     asset::AssetLibrary,
//!     playback::{PlaybackSession, SimulatedPlayer, SurfaceBounds},
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let mut library = AssetLibrary::new("assets");
//! let asset = library.resolve("puppy", "mp4")?;
//!
//! let mut session = PlaybackSession::new(
//!     SurfaceBounds::new(1920.0, 1080.0),
//!     |tx| SimulatedPlayer::new(tx, Duration::from_millis(150)),
//! );
//!
//! session.prepare_to_play(&asset)?;
//! session.pump_until_settled().await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - [`asset`] - Media sources and their decodable metadata
//! - [`timeline`] - Building the playable program from an asset
//! - [`pipeline`] - The per-frame processing stage
//! - [`playback`] - Sessions, status state machine, engine seam
//! - [`config`] - Configuration management
//!
//! ## Custom Frame Filters
//!
//! The shipped pipeline is an identity passthrough. Other per-frame
//! processing plugs in through the [`FrameFilter`](pipeline::FrameFilter)
//! trait:
//!
//! ```rust,no_run
//! use replayer::error::Result;
//! use replayer::pipeline::{Frame, FrameFilter};
//!
//! struct Dim;
//!
//! impl FrameFilter for Dim {
//!     fn name(&self) -> &str {
//!         "dim"
//!     }
//!
//!     fn apply(&self, frame: &mut Frame) -> Result<()> {
//!         // Your per-frame processing
//!         Ok(())
//!     }
//! }
//! ```

pub mod asset;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod playback;
pub mod timeline;

// Re-export commonly used types for convenience
pub use crate::{
    asset::{AssetLibrary, MediaAsset},
    config::Config,
    error::{PlayerError, Result},
    pipeline::{FrameFilter, FramePipeline},
    playback::{PlaybackSession, PlayerEngine, SessionState},
    timeline::build_timeline,
};
