//! Input handling: chord specification, key normalization, matching, and the
//! global key-event listener.

/// Chord specification built from config
pub mod chord;
/// Canonical key identities and normalization
pub mod keys;
/// Global key-event stream and routing
pub mod listener;
/// Held-key tracking and chord evaluation
pub mod matcher;
