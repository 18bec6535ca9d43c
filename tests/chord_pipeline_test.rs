//! Integration tests for the raw-event → normalize → match → dispatch
//! pipeline, driven end to end without a real key subscription.
//!
//! Playback uses the `NoneAvailable` strategy (or a probed one where noted)
//! so tests run headless; the real `rdev` subscription needs input
//! permissions and is exercised manually.

use std::fs;
use std::path::PathBuf;

use audio_hotkey::audio::dispatcher::{AudioDispatcher, PlaybackStrategy};
use audio_hotkey::config::Config;
use audio_hotkey::input::chord::ChordSpec;
use audio_hotkey::input::listener::{Listener, RawKeyEvent, RawKeyKind};
use audio_hotkey::input::matcher::ChordMatcher;
use rdev::Key;

fn press(key: Key) -> RawKeyEvent {
    RawKeyEvent {
        kind: RawKeyKind::Press,
        key,
    }
}

fn release(key: Key) -> RawKeyEvent {
    RawKeyEvent {
        kind: RawKeyKind::Release,
        key,
    }
}

fn listener_from_toml(toml: &str) -> Listener {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, toml).unwrap();

    let config = Config::load(&config_path).unwrap();
    let chord = ChordSpec::from_keybind(&config.keybind);
    let dispatcher =
        AudioDispatcher::new(PlaybackStrategy::NoneAvailable, PathBuf::from("clip.wav"));
    Listener::new(ChordMatcher::new(chord), dispatcher)
}

#[test]
fn ctrl_shift_f_fires_and_refires_on_repress() {
    let mut listener = listener_from_toml(
        r#"
audio_file = "clip.wav"

[keybind]
modifiers = ["ctrl", "shift"]
key = "f"
"#,
    );

    let mut fires = 0;
    for event in [
        press(Key::ControlLeft),
        press(Key::ShiftRight),
        press(Key::KeyF),
    ] {
        if listener.handle_event(event) {
            fires += 1;
        }
    }
    assert_eq!(fires, 1, "exactly one fire for the initial chord");

    listener.handle_event(release(Key::KeyF));
    assert!(
        listener.handle_event(press(Key::KeyF)),
        "re-pressing the base key while modifiers stay held fires again"
    );
}

#[test]
fn bare_key_chord_fires_on_key_alone() {
    let mut listener = listener_from_toml(
        r#"
audio_file = "clip.wav"

[keybind]
modifiers = []
key = "f"
"#,
    );

    assert!(listener.handle_event(press(Key::KeyF)));
}

#[test]
fn left_right_variants_are_interchangeable() {
    for (ctrl, shift) in [
        (Key::ControlLeft, Key::ShiftLeft),
        (Key::ControlRight, Key::ShiftRight),
        (Key::ControlLeft, Key::ShiftRight),
        (Key::ControlRight, Key::ShiftLeft),
    ] {
        let mut listener = listener_from_toml(
            r#"
audio_file = "clip.wav"

[keybind]
modifiers = ["ctrl", "shift"]
key = "f"
"#,
        );
        listener.handle_event(press(ctrl));
        listener.handle_event(press(shift));
        assert!(listener.handle_event(press(Key::KeyF)));
    }
}

#[test]
fn rapid_consecutive_fires_do_not_queue_or_block() {
    let mut listener = listener_from_toml(
        r#"
audio_file = "clip.wav"

[keybind]
modifiers = []
key = "f"
"#,
    );

    // Each fire is independent: the second is evaluated and dispatched
    // without waiting on the first
    assert!(listener.handle_event(press(Key::KeyF)));
    listener.handle_event(release(Key::KeyF));
    assert!(listener.handle_event(press(Key::KeyF)));
}

#[test]
fn degraded_dispatcher_keeps_listener_alive() {
    let mut listener = listener_from_toml(
        r#"
audio_file = "clip.wav"

[keybind]
modifiers = []
key = "f"
"#,
    );

    // NoneAvailable fire reports a no-op and returns; subsequent key events
    // still flow through matching
    assert!(listener.handle_event(press(Key::KeyF)));
    listener.handle_event(release(Key::KeyF));
    assert!(!listener.handle_event(press(Key::KeyG)));
    assert!(listener.handle_event(press(Key::KeyF)));
}

#[tokio::test]
async fn probed_dispatcher_contains_fire_time_failures() {
    // Whatever strategy probing finds here (native, external, or none), a
    // fire against a missing file must report per-invocation and return
    let dispatcher = AudioDispatcher::probe(PathBuf::from("definitely-missing.wav"));
    dispatcher.fire();
    dispatcher.fire();
}

#[test]
#[ignore = "requires input permissions and a real key-event source"]
fn key_event_stream_delivers_real_events() {
    use audio_hotkey::input::listener::KeyEventStream;
    use std::time::Duration;

    let stream = KeyEventStream::start().unwrap();
    // Manual test: press any key within five seconds
    let event = stream.next_timeout(Duration::from_secs(5));
    assert!(event.is_some());
}
