//! Audio Hotkey - cross-platform hotkey audio player
//!
//! This library exports core modules for testing and potential future reuse.

/// Audio playback dispatch
pub mod audio;
/// Configuration management
pub mod config;
/// Input handling (key events, chord matching)
pub mod input;
/// Telemetry and logging
pub mod telemetry;
