//! Chord matching over the set of currently-held keys.

use std::collections::HashSet;

use crate::input::chord::ChordSpec;
use crate::input::keys::CanonicalKey;

/// Tracks held keys and decides, on every press, whether the chord fired.
///
/// The held set is owned exclusively by this matcher and is only touched from
/// the listener loop, so updates are serial and need no locking. Matching is
/// a pure conjunction: every required modifier class must have at least one
/// held member (either side), and the base key must be held as a plain
/// identity. The two checks are orthogonal; a base key that happens to be
/// spelled like a modifier name is never folded into the class check.
///
/// There is no fire latch: a chord that is satisfied fires on every
/// qualifying press event, so releasing and re-pressing the base key while
/// the modifiers stay down fires again.
#[derive(Debug)]
pub struct ChordMatcher {
    spec: ChordSpec,
    held: HashSet<CanonicalKey>,
}

impl ChordMatcher {
    /// Create a matcher for the given chord with an empty held set
    pub fn new(spec: ChordSpec) -> Self {
        Self {
            spec,
            held: HashSet::new(),
        }
    }

    /// Record a key press and report whether the chord is now satisfied
    pub fn on_press(&mut self, key: CanonicalKey) -> bool {
        self.held.insert(key);
        self.is_satisfied()
    }

    /// Record a key release. Releasing a key that is not held is a no-op.
    pub fn on_release(&mut self, key: &CanonicalKey) {
        self.held.remove(key);
    }

    /// Discard all held-key state (listener stop/restart)
    pub fn reset(&mut self) {
        self.held.clear();
    }

    /// Number of keys currently held
    pub fn held_count(&self) -> usize {
        self.held.len()
    }

    fn is_satisfied(&self) -> bool {
        let classes_active = self.spec.required_classes().iter().all(|class| {
            self.held
                .iter()
                .any(|key| key.modifier_class() == Some(*class))
        });

        classes_active && self.held.contains(self.spec.base_key())
    }
}
