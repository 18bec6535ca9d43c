mod audio;
mod config;
mod input;
mod telemetry;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use crate::audio::dispatcher::AudioDispatcher;
use crate::input::chord::ChordSpec;
use crate::input::listener::{KeyEventStream, Listener};
use crate::input::matcher::ChordMatcher;

#[tokio::main]
async fn main() -> Result<()> {
    // Startup failures below this point are fatal: no valid config or audio
    // target makes continued operation meaningless
    let config_path = env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from("config.toml"), PathBuf::from);

    let config = config::Config::load(&config_path)?;
    telemetry::init(config.telemetry.enabled, &config.telemetry.log_path)?;
    tracing::info!("audio-hotkey starting");

    let audio_file = config.resolve_audio_file(&config_path)?;
    println!("Audio file loaded: {}", audio_file.display());

    let chord = ChordSpec::from_keybind(&config.keybind);
    let dispatcher = AudioDispatcher::probe(audio_file);
    tracing::info!(
        hotkey = chord.label(),
        strategy = dispatcher.strategy_name(),
        "startup complete"
    );

    print_banner(&chord, &dispatcher);

    let stream = KeyEventStream::start()?;
    let mut listener = Listener::new(ChordMatcher::new(chord), dispatcher);

    // Single-owner loop: drain queued key events, then wait briefly so an
    // interrupt is observed within well under a second
    loop {
        while let Some(event) = stream.try_next() {
            listener.handle_event(event);
        }

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutdown signal received");
                println!("\n\nStopping Audio Hotkey Player...");
                break;
            }
            _ = tokio::time::sleep(Duration::from_millis(10)) => {}
        }
    }

    // In-flight playback is not cancelled; only the subscription and matcher
    // state are torn down
    stream.stop();
    listener.reset();
    println!("Goodbye!");

    Ok(())
}

fn print_banner(chord: &ChordSpec, dispatcher: &AudioDispatcher) {
    let rule = "=".repeat(50);

    println!("\n{rule}");
    println!("Audio Hotkey Player Started");
    println!("{rule}");
    println!("Platform: {}", env::consts::OS);
    println!("Hotkey: {}", chord.label());
    let clip = dispatcher.target().file_name().map_or_else(
        || dispatcher.target().display().to_string(),
        |n| n.to_string_lossy().into_owned(),
    );
    println!("Audio file: {clip}");
    println!("Playback: {}", dispatcher.strategy_name());

    if dispatcher.is_degraded() {
        println!("\nWarning: no playback mechanism was found on this system.");
        println!("The hotkey will still be detected, but fires will be no-ops.");
    }

    println!("\nPress {} to play audio", chord.label());
    println!("Press Ctrl+C to stop");
    println!("{rule}\n");

    if cfg!(target_os = "macos") {
        println!("Note: On macOS, you may need to grant Accessibility permissions");
        println!("to your terminal in System Settings > Privacy & Security\n");
    }
}
