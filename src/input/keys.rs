//! Canonical key identities and raw-event normalization.
//!
//! Raw `rdev` events report physical key codes, so a canonical identity is
//! independent of shift/caps state by construction: Shift+4 arrives as
//! `Num4`, never as "$". Modifier keys keep which side fired; both sides
//! collapse to the same [`ModifierClass`] when the matcher asks whether a
//! class is active.

use std::fmt;

/// Modifier family, satisfied by either physical side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierClass {
    /// Control key modifier
    Ctrl,
    /// Alt/Option key modifier
    Alt,
    /// Shift key modifier
    Shift,
    /// Command/Windows key modifier
    Super,
}

impl fmt::Display for ModifierClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ctrl => "ctrl",
            Self::Alt => "alt",
            Self::Shift => "shift",
            Self::Super => "super",
        };
        write!(f, "{name}")
    }
}

/// Which physical instance of a modifier key fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierSide {
    /// Left-hand instance
    Left,
    /// Right-hand instance
    Right,
}

/// Normalized, platform-independent identity for a key event.
///
/// Two raw events a human would call "the same key" compare equal here,
/// regardless of which modifiers were active when they fired.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CanonicalKey {
    /// A modifier key, with its class and which side fired
    Modifier {
        /// Modifier family this key belongs to
        class: ModifierClass,
        /// Physical side that fired
        side: ModifierSide,
    },
    /// A printable or named key, identified by a stable lowercase name
    Plain(String),
}

impl CanonicalKey {
    /// Build a plain key identity from a user-supplied name.
    ///
    /// Lowercases the name; single characters and named keys ("f", "4",
    /// "space", "f9") share one namespace. Never produces a `Modifier`
    /// variant, so a base key spelled like a modifier name stays a plain
    /// identity and is matched orthogonally to the modifier-class check.
    pub fn plain(name: &str) -> Self {
        Self::Plain(name.to_lowercase())
    }

    /// The modifier class of this key, if it is a modifier
    pub fn modifier_class(&self) -> Option<ModifierClass> {
        match self {
            Self::Modifier { class, .. } => Some(*class),
            Self::Plain(_) => None,
        }
    }
}

/// Map a raw key to its canonical identity.
///
/// Returns `None` for keys with no stable identity (`Unknown` scancodes,
/// platform oddities); callers drop those events without touching matcher
/// state.
#[allow(clippy::too_many_lines)]
pub fn normalize(key: rdev::Key) -> Option<CanonicalKey> {
    use rdev::Key;

    let modifier = |class, side| Some(CanonicalKey::Modifier { class, side });
    let plain = |name: &str| Some(CanonicalKey::Plain(name.to_owned()));

    match key {
        // Modifiers, sides preserved. rdev spells left alt `Alt` and right
        // alt `AltGr`.
        Key::ControlLeft => modifier(ModifierClass::Ctrl, ModifierSide::Left),
        Key::ControlRight => modifier(ModifierClass::Ctrl, ModifierSide::Right),
        Key::ShiftLeft => modifier(ModifierClass::Shift, ModifierSide::Left),
        Key::ShiftRight => modifier(ModifierClass::Shift, ModifierSide::Right),
        Key::Alt => modifier(ModifierClass::Alt, ModifierSide::Left),
        Key::AltGr => modifier(ModifierClass::Alt, ModifierSide::Right),
        Key::MetaLeft => modifier(ModifierClass::Super, ModifierSide::Left),
        Key::MetaRight => modifier(ModifierClass::Super, ModifierSide::Right),

        // Letters
        Key::KeyA => plain("a"),
        Key::KeyB => plain("b"),
        Key::KeyC => plain("c"),
        Key::KeyD => plain("d"),
        Key::KeyE => plain("e"),
        Key::KeyF => plain("f"),
        Key::KeyG => plain("g"),
        Key::KeyH => plain("h"),
        Key::KeyI => plain("i"),
        Key::KeyJ => plain("j"),
        Key::KeyK => plain("k"),
        Key::KeyL => plain("l"),
        Key::KeyM => plain("m"),
        Key::KeyN => plain("n"),
        Key::KeyO => plain("o"),
        Key::KeyP => plain("p"),
        Key::KeyQ => plain("q"),
        Key::KeyR => plain("r"),
        Key::KeyS => plain("s"),
        Key::KeyT => plain("t"),
        Key::KeyU => plain("u"),
        Key::KeyV => plain("v"),
        Key::KeyW => plain("w"),
        Key::KeyX => plain("x"),
        Key::KeyY => plain("y"),
        Key::KeyZ => plain("z"),

        // Digit row and keypad digits share one identity
        Key::Num0 | Key::Kp0 => plain("0"),
        Key::Num1 | Key::Kp1 => plain("1"),
        Key::Num2 | Key::Kp2 => plain("2"),
        Key::Num3 | Key::Kp3 => plain("3"),
        Key::Num4 | Key::Kp4 => plain("4"),
        Key::Num5 | Key::Kp5 => plain("5"),
        Key::Num6 | Key::Kp6 => plain("6"),
        Key::Num7 | Key::Kp7 => plain("7"),
        Key::Num8 | Key::Kp8 => plain("8"),
        Key::Num9 | Key::Kp9 => plain("9"),

        // Function keys
        Key::F1 => plain("f1"),
        Key::F2 => plain("f2"),
        Key::F3 => plain("f3"),
        Key::F4 => plain("f4"),
        Key::F5 => plain("f5"),
        Key::F6 => plain("f6"),
        Key::F7 => plain("f7"),
        Key::F8 => plain("f8"),
        Key::F9 => plain("f9"),
        Key::F10 => plain("f10"),
        Key::F11 => plain("f11"),
        Key::F12 => plain("f12"),

        // Named keys, stable lowercase names
        Key::Space => plain("space"),
        Key::Return | Key::KpReturn => plain("enter"),
        Key::Tab => plain("tab"),
        Key::Backspace => plain("backspace"),
        Key::Delete | Key::KpDelete => plain("delete"),
        Key::Escape => plain("esc"),
        Key::UpArrow => plain("up"),
        Key::DownArrow => plain("down"),
        Key::LeftArrow => plain("left"),
        Key::RightArrow => plain("right"),
        Key::Home => plain("home"),
        Key::End => plain("end"),
        Key::PageUp => plain("page_up"),
        Key::PageDown => plain("page_down"),
        Key::Insert => plain("insert"),
        Key::CapsLock => plain("caps_lock"),
        Key::NumLock => plain("num_lock"),
        Key::ScrollLock => plain("scroll_lock"),
        Key::PrintScreen => plain("print_screen"),
        Key::Pause => plain("pause"),

        // Punctuation by the character on the physical key
        Key::BackQuote => plain("`"),
        Key::Minus | Key::KpMinus => plain("-"),
        Key::Equal => plain("="),
        Key::LeftBracket => plain("["),
        Key::RightBracket => plain("]"),
        Key::SemiColon => plain(";"),
        Key::Quote => plain("'"),
        Key::BackSlash => plain("\\"),
        Key::Comma => plain(","),
        Key::Dot => plain("."),
        Key::Slash | Key::KpDivide => plain("/"),
        Key::KpPlus => plain("+"),
        Key::KpMultiply => plain("*"),

        // No stable identity
        _ => None,
    }
}
