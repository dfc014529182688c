//! # Playback Sessions
//!
//! Drives a prepared timeline to ready-and-playing: the session manager
//! with its create-or-replace item handling, the status state machine, the
//! engine and surface seams, and a simulated engine for the demo binary.

pub mod engine;
pub mod item;
pub mod session;
pub mod sim;
pub mod status;
pub mod surface;

pub use engine::{PlayerEngine, SubscriptionId, TransportCommand};
pub use item::{ItemId, PlaybackItem, REQUIRED_ASSET_KEYS};
pub use session::PlaybackSession;
pub use sim::SimulatedPlayer;
pub use status::{
    status_channel, ItemStatus, SessionState, StatusChange, StatusReceiver, StatusSender,
};
pub use surface::{PlayerLayer, SurfaceBounds};
