//! # Frame Pipeline
//!
//! The per-frame processing stage a timeline hands to the render engine:
//! a render target size plus a filter applied to every frame. Ships with
//! the identity passthrough; other filters plug in via [`FrameFilter`].

pub mod filter;
pub mod frame;

pub use filter::{FrameFilter, FramePipeline, IdentityFilter};
pub use frame::Frame;
