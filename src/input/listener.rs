//! Global key-event stream and the routing from raw events to playback.
//!
//! `rdev::listen()` is a blocking OS-level call with no unsubscribe API, so
//! it runs on a dedicated OS thread for the process lifetime. Events cross to
//! the owner loop over a channel; after `stop()` the callback discards
//! further events and the thread idles until process exit, bounded by the OS
//! process model rather than by a join.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, error, info, trace};

use crate::audio::dispatcher::AudioDispatcher;
use crate::input::keys::normalize;
use crate::input::matcher::ChordMatcher;

/// Whether a raw event was a key going down or coming up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawKeyKind {
    /// Key pressed down
    Press,
    /// Key released
    Release,
}

/// One raw keyboard event from the platform stream
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    /// Press or release
    pub kind: RawKeyKind,
    /// The raw platform key
    pub key: rdev::Key,
}

/// Errors from starting the key-event stream
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    /// The dedicated listener thread could not be spawned
    #[error("failed to spawn key listener thread: {0}")]
    ThreadSpawn(String),
}

/// Handle to the dedicated thread that owns the global key subscription.
///
/// Dropping or stopping the handle makes the callback discard events; it does
/// not tear down the OS subscription mid-callback.
pub struct KeyEventStream {
    rx: Receiver<RawKeyEvent>,
    stopped: Arc<AtomicBool>,
}

impl KeyEventStream {
    /// Spawn the listener thread and start the global subscription.
    ///
    /// Subscription failures (missing permissions, no display server) are
    /// reported from the thread; the stream then simply yields no events.
    pub fn start() -> Result<Self, ListenerError> {
        let (tx, rx) = mpsc::channel();
        let stopped = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stopped);

        thread::Builder::new()
            .name("key-listener".to_owned())
            .spawn(move || {
                info!("key listener thread started");

                let result = rdev::listen(move |event| {
                    if stop_flag.load(Ordering::SeqCst) {
                        return;
                    }

                    let raw = match event.event_type {
                        rdev::EventType::KeyPress(key) => RawKeyEvent {
                            kind: RawKeyKind::Press,
                            key,
                        },
                        rdev::EventType::KeyRelease(key) => RawKeyEvent {
                            kind: RawKeyKind::Release,
                            key,
                        },
                        _ => return,
                    };

                    // Receiver gone means shutdown is in progress
                    if tx.send(raw).is_err() {
                        stop_flag.store(true, Ordering::SeqCst);
                    }
                });

                if let Err(e) = result {
                    error!(?e, "global key subscription failed - check input permissions");
                }
            })
            .map_err(|e| ListenerError::ThreadSpawn(e.to_string()))?;

        Ok(Self { rx, stopped })
    }

    /// Pull the next event if one is already queued
    pub fn try_next(&self) -> Option<RawKeyEvent> {
        self.rx.try_recv().ok()
    }

    /// Wait up to `timeout` for the next event.
    ///
    /// Returns `None` on timeout so the caller can check its stop condition;
    /// suspension happens only here.
    pub fn next_timeout(&self, timeout: Duration) -> Option<RawKeyEvent> {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Stop forwarding events. Idempotent.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

impl Drop for KeyEventStream {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Routes raw events through normalization and matching, firing playback on
/// each satisfied press. Owned by the single listener loop; never shared.
pub struct Listener {
    matcher: ChordMatcher,
    dispatcher: AudioDispatcher,
}

impl Listener {
    /// Pair a matcher with the dispatcher it triggers
    pub fn new(matcher: ChordMatcher, dispatcher: AudioDispatcher) -> Self {
        Self {
            matcher,
            dispatcher,
        }
    }

    /// Process one raw event; returns whether the chord fired.
    ///
    /// Unrecognized keys are dropped without touching matcher state.
    pub fn handle_event(&mut self, event: RawKeyEvent) -> bool {
        let Some(key) = normalize(event.key) else {
            trace!(key = ?event.key, "dropping unrecognized key event");
            return false;
        };

        match event.kind {
            RawKeyKind::Press => {
                if self.matcher.on_press(key) {
                    debug!("chord satisfied, firing playback");
                    self.dispatcher.fire();
                    return true;
                }
                false
            }
            RawKeyKind::Release => {
                self.matcher.on_release(&key);
                false
            }
        }
    }

    /// Discard held-key state (shutdown/restart)
    pub fn reset(&mut self) {
        self.matcher.reset();
    }
}
