//! Chord specification built once from the keybind config.

use tracing::{debug, warn};

use crate::config::KeybindConfig;
use crate::input::keys::{CanonicalKey, ModifierClass};

/// Outcome of looking up one user-supplied modifier name
enum ModifierName {
    Supported(ModifierClass),
    /// Recognized name, but the modifier does not exist on this platform
    UnsupportedHere,
    Unknown,
}

fn lookup_modifier(name: &str) -> ModifierName {
    match name.to_lowercase().as_str() {
        "ctrl" | "control" => ModifierName::Supported(ModifierClass::Ctrl),
        "alt" | "option" => ModifierName::Supported(ModifierClass::Alt),
        "shift" => ModifierName::Supported(ModifierClass::Shift),
        "cmd" | "command" => {
            if cfg!(target_os = "macos") {
                ModifierName::Supported(ModifierClass::Super)
            } else {
                ModifierName::UnsupportedHere
            }
        }
        "win" | "super" => {
            if cfg!(target_os = "windows") {
                ModifierName::Supported(ModifierClass::Super)
            } else {
                ModifierName::UnsupportedHere
            }
        }
        _ => ModifierName::Unknown,
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// The complete required combination: modifier classes plus one base key.
///
/// Immutable; built once at startup and shared with the matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordSpec {
    required: Vec<ModifierClass>,
    base_key: CanonicalKey,
    label: String,
}

impl ChordSpec {
    /// Build a chord from the parsed keybind config.
    ///
    /// Unknown modifier names are warned about and skipped; recognized names
    /// the platform lacks (cmd off macOS, win off Windows) are silently
    /// dropped from the requirement set but kept in the display label. An
    /// empty modifier list is valid: the bare base key is the whole chord.
    pub fn from_keybind(keybind: &KeybindConfig) -> Self {
        let mut required = Vec::new();
        let mut label_parts = Vec::new();

        for name in &keybind.modifiers {
            match lookup_modifier(name) {
                ModifierName::Supported(class) => {
                    if !required.contains(&class) {
                        required.push(class);
                    }
                    label_parts.push(capitalize(name));
                }
                ModifierName::UnsupportedHere => {
                    debug!(modifier = %name, "modifier not available on this platform");
                    label_parts.push(capitalize(name));
                }
                ModifierName::Unknown => {
                    warn!(modifier = %name, "ignoring unknown modifier name");
                }
            }
        }

        let base_key = CanonicalKey::plain(&keybind.key);
        label_parts.push(keybind.key.to_uppercase());

        Self {
            required,
            base_key,
            label: label_parts.join("+"),
        }
    }

    /// Modifier classes that must be active for the chord to fire
    pub fn required_classes(&self) -> &[ModifierClass] {
        &self.required
    }

    /// Canonical identity of the base key
    pub fn base_key(&self) -> &CanonicalKey {
        &self.base_key
    }

    /// Human-readable form ("Ctrl+Shift+F"), display only, never matched on
    pub fn label(&self) -> &str {
        &self.label
    }
}
