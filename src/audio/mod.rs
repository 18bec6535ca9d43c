//! Audio playback dispatch.

/// Strategy probing and fire-and-forget playback
pub mod dispatcher;
