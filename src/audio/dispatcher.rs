//! Platform playback strategy: probed once at startup, fired on every chord.

use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, info, warn};

/// Playback mechanism selected once by [`AudioDispatcher::probe`].
///
/// Adding a platform means adding a variant here and a probe entry; `fire()`
/// matches on the variant, so no other call site changes.
pub enum PlaybackStrategy {
    /// In-process playback through the default output device
    Rodio {
        /// Keeps the output device open; playback stops if this drops
        _stream: OutputStream,
        /// Handle used to create one detached sink per fire
        handle: OutputStreamHandle,
    },
    /// Shell out to a command-line player found on PATH
    ExternalPlayer {
        /// Resolved player executable
        command: PathBuf,
        /// Flags placed before the file argument
        args: Vec<String>,
    },
    /// Nothing usable found; every fire is a reported no-op
    NoneAvailable,
}

/// Ordered external-player candidates for this platform, first available wins
fn player_candidates() -> &'static [(&'static str, &'static [&'static str])] {
    if cfg!(target_os = "macos") {
        &[("afplay", &[])]
    } else if cfg!(target_os = "windows") {
        &[("powershell", &[])]
    } else {
        &[
            ("paplay", &[]),
            ("aplay", &[]),
            ("ffplay", &["-nodisp", "-autoexit", "-loglevel", "error"]),
            ("mpv", &["--no-video", "--really-quiet"]),
        ]
    }
}

/// Search PATH for an executable by name
fn find_in_path(name: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    let file_name = if cfg!(target_os = "windows") {
        format!("{name}.exe")
    } else {
        name.to_owned()
    };

    env::split_paths(&paths)
        .map(|dir| dir.join(&file_name))
        .find(|candidate| candidate.is_file())
}

/// Fire-and-forget audio playback.
///
/// Owns the resolved clip path and the strategy chosen at startup. Each
/// `fire()` starts an independent playback instance and returns immediately;
/// overlapping instances share no state and run to natural completion. The
/// dispatcher never tracks or cancels them, so stopping the listener leaves
/// in-flight playback alone.
pub struct AudioDispatcher {
    strategy: PlaybackStrategy,
    target: PathBuf,
}

impl AudioDispatcher {
    /// Build a dispatcher with an explicit strategy (tests, custom setups)
    pub fn new(strategy: PlaybackStrategy, target: PathBuf) -> Self {
        Self { strategy, target }
    }

    /// Probe the platform for a playback mechanism, in priority order:
    /// the native output device first, then the platform's command-line
    /// players. Runs once; the choice is fixed for the process lifetime.
    pub fn probe(target: PathBuf) -> Self {
        match OutputStream::try_default() {
            Ok((stream, handle)) => {
                info!("audio output device available, using in-process playback");
                return Self::new(
                    PlaybackStrategy::Rodio {
                        _stream: stream,
                        handle,
                    },
                    target,
                );
            }
            Err(e) => {
                debug!(error = %e, "no default audio output device");
            }
        }

        for (name, args) in player_candidates() {
            if let Some(command) = find_in_path(name) {
                info!(player = %command.display(), "using external player");
                return Self::new(
                    PlaybackStrategy::ExternalPlayer {
                        command,
                        args: args.iter().map(|a| (*a).to_owned()).collect(),
                    },
                    target,
                );
            }
            debug!(player = name, "not found on PATH");
        }

        warn!("no playback mechanism found, running without audio");
        Self::new(PlaybackStrategy::NoneAvailable, target)
    }

    /// Short name of the chosen strategy, for the startup banner
    pub fn strategy_name(&self) -> &'static str {
        match &self.strategy {
            PlaybackStrategy::Rodio { .. } => "native",
            PlaybackStrategy::ExternalPlayer { .. } => "external player",
            PlaybackStrategy::NoneAvailable => "none",
        }
    }

    /// Whether probing found nothing and fires will be no-ops
    pub fn is_degraded(&self) -> bool {
        matches!(self.strategy, PlaybackStrategy::NoneAvailable)
    }

    /// The resolved clip path this dispatcher plays
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Start one independent playback instance and return immediately.
    ///
    /// Never blocks for the duration of playback. Failures (missing file,
    /// broken decoder, dead player) are reported per invocation and never
    /// propagate; the caller keeps listening.
    pub fn fire(&self) {
        match &self.strategy {
            PlaybackStrategy::Rodio { handle, .. } => self.fire_rodio(handle),
            PlaybackStrategy::ExternalPlayer { command, args } => {
                self.fire_external(command, args);
            }
            PlaybackStrategy::NoneAvailable => {
                warn!("chord fired but no playback mechanism is available");
                println!("No playback mechanism available - skipping audio");
            }
        }
    }

    fn fire_rodio(&self, handle: &OutputStreamHandle) {
        // A fresh sink per fire lets instances overlap; detaching lets each
        // one drain on its own without being tracked
        let result = File::open(&self.target)
            .map_err(|e| e.to_string())
            .and_then(|file| Decoder::new(BufReader::new(file)).map_err(|e| e.to_string()))
            .and_then(|source| {
                let sink = Sink::try_new(handle).map_err(|e| e.to_string())?;
                sink.append(source);
                sink.detach();
                Ok(())
            });

        match result {
            Ok(()) => {
                info!(file = %self.target.display(), "playback started");
                println!("Playing audio: {}", file_name(&self.target));
            }
            Err(e) => {
                warn!(file = %self.target.display(), error = %e, "playback failed");
                println!("Error playing audio: {e}");
            }
        }
    }

    fn fire_external(&self, command: &Path, args: &[String]) {
        let mut cmd = tokio::process::Command::new(command);

        if command.file_stem().is_some_and(|s| s == "powershell") {
            let script = format!(
                "(New-Object Media.SoundPlayer '{}').PlaySync()",
                self.target.display()
            );
            cmd.arg("-NoProfile").arg("-c").arg(script);
        } else {
            cmd.args(args).arg(&self.target);
        }

        cmd.stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null());

        match cmd.spawn() {
            Ok(mut child) => {
                info!(player = %command.display(), "playback process spawned");
                println!("Playing audio: {}", file_name(&self.target));

                // Reap the child off the listener path; nobody waits on it
                let player = command.display().to_string();
                tokio::spawn(async move {
                    match child.wait().await {
                        Ok(status) if !status.success() => {
                            warn!(player = %player, %status, "player exited with failure");
                        }
                        Err(e) => warn!(player = %player, error = %e, "failed to reap player"),
                        Ok(_) => {}
                    }
                });
            }
            Err(e) => {
                warn!(player = %command.display(), error = %e, "failed to spawn player");
                println!("Error playing audio: {e}");
            }
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}
