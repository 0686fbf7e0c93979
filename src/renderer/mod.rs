//! Renderer-facing data
//!
//! The host page owns the draw pipeline; this module only shapes the
//! per-instance data it uploads each frame.

pub mod instance;

pub use instance::{InstanceBuffer, InstanceRaw};
