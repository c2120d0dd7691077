//! Audio Output Module
//!
//! Rendering and playback:
//! - Sample conditioning (alias rejection, bias removal, normalization)
//! - Streaming playback over the default output device

pub mod player;
pub mod render;

pub use player::Player;
pub use render::{audio_samples, queue_audio, queue_silence, RenderOptions};
