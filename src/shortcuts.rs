//! Key binding settings.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// All key bindings, stored in `shortcut.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shortcuts {
    pub form: FormShortcuts,
    pub settings: SettingsShortcuts,
    pub dialog: DialogShortcuts,
    pub input_box: InputBoxShortcuts,
}

/// Reporting form bindings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormShortcuts {
    pub quit: Vec<String>,
    pub settings: Vec<String>,
    pub submit: Vec<String>,
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub decrease: Vec<String>,
    pub increase: Vec<String>,
    pub decrease_coarse: Vec<String>,
    pub increase_coarse: Vec<String>,
    pub min: Vec<String>,
    pub max: Vec<String>,
    pub edit_value: Vec<String>,
}

/// Settings screen bindings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsShortcuts {
    pub cancel: Vec<String>,
    pub save: Vec<String>,
    pub base_url: Vec<String>,
    pub shelter_id: Vec<String>,
    pub auth_token: Vec<String>,
}

/// Dialog bindings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogShortcuts {
    pub confirm: Vec<String>,
    pub retry: Vec<String>,
    pub dismiss: Vec<String>,
}

/// InputBox bindings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputBoxShortcuts {
    pub confirm: Vec<String>,
    pub cancel: Vec<String>,
    pub backspace: Vec<String>,
    pub delete: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub home: Vec<String>,
    pub end: Vec<String>,
    pub clear_line: Vec<String>,
}

impl Shortcuts {
    /// Read from TOML, falling back to defaults when the file is missing.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let shortcuts: Shortcuts = toml::from_str(&content)?;
            Ok(shortcuts)
        } else {
            Ok(Self::default())
        }
    }
}

impl Default for Shortcuts {
    fn default() -> Self {
        Self {
            form: FormShortcuts {
                quit: vec!["q".into()],
                settings: vec!["t".into()],
                submit: vec!["Enter".into(), "s".into()],
                up: vec!["Up".into(), "k".into()],
                down: vec!["Down".into(), "j".into(), "Tab".into()],
                decrease: vec!["Left".into(), "h".into()],
                increase: vec!["Right".into(), "l".into()],
                decrease_coarse: vec!["PageDown".into()],
                increase_coarse: vec!["PageUp".into()],
                min: vec!["Home".into()],
                max: vec!["End".into()],
                edit_value: vec!["e".into()],
            },
            settings: SettingsShortcuts {
                cancel: vec!["Esc".into()],
                save: vec!["Enter".into()],
                base_url: vec!["u".into()],
                shelter_id: vec!["i".into()],
                auth_token: vec!["a".into()],
            },
            dialog: DialogShortcuts {
                confirm: vec!["Enter".into()],
                retry: vec!["r".into()],
                dismiss: vec!["Esc".into()],
            },
            input_box: InputBoxShortcuts {
                confirm: vec!["Enter".into()],
                cancel: vec!["Esc".into()],
                backspace: vec!["Backspace".into()],
                delete: vec!["Delete".into()],
                left: vec!["Left".into()],
                right: vec!["Right".into()],
                home: vec!["Home".into()],
                end: vec!["End".into()],
                clear_line: vec!["Ctrl+u".into()],
            },
        }
    }
}

/// True when `key` matches any of the binding strings.
pub fn matches_shortcut(key: &KeyEvent, shortcuts: &[String]) -> bool {
    shortcuts.iter().any(|s| matches_single_shortcut(key, s))
}

/// Display form of a binding list, e.g. `"Up/k"`.
pub fn format_keys(keys: &[String]) -> String {
    keys.join("/")
}

/// Match one binding string such as `"Ctrl+u"`, `"a"` or `"PageUp"`.
fn matches_single_shortcut(key: &KeyEvent, shortcut: &str) -> bool {
    let (modifiers_str, key_str) = match shortcut.rsplit_once('+') {
        // A lone "+" is the plus key, not a separator.
        Some((mods, k)) if !k.is_empty() => (mods.split('+').collect::<Vec<_>>(), k),
        _ => (vec![], shortcut),
    };

    let mut expected_modifiers = KeyModifiers::empty();
    for modifier in modifiers_str {
        match modifier {
            "Ctrl" | "ctrl" => expected_modifiers |= KeyModifiers::CONTROL,
            "Alt" | "alt" => expected_modifiers |= KeyModifiers::ALT,
            "Shift" | "shift" => expected_modifiers |= KeyModifiers::SHIFT,
            _ => return false,
        }
    }

    // Terminals report uppercase letters with SHIFT set; ignore it for chars.
    let actual_modifiers = match key.code {
        KeyCode::Char(_) => key.modifiers.difference(KeyModifiers::SHIFT),
        _ => key.modifiers,
    };
    let expected_modifiers = match key.code {
        KeyCode::Char(_) => expected_modifiers.difference(KeyModifiers::SHIFT),
        _ => expected_modifiers,
    };
    if actual_modifiers != expected_modifiers {
        return false;
    }

    match key_str {
        "Enter" | "enter" => key.code == KeyCode::Enter,
        "Esc" | "esc" => key.code == KeyCode::Esc,
        "Tab" | "tab" => key.code == KeyCode::Tab,
        "Backspace" | "backspace" => key.code == KeyCode::Backspace,
        "Delete" | "delete" => key.code == KeyCode::Delete,
        "Up" | "up" => key.code == KeyCode::Up,
        "Down" | "down" => key.code == KeyCode::Down,
        "Left" | "left" => key.code == KeyCode::Left,
        "Right" | "right" => key.code == KeyCode::Right,
        "Home" | "home" => key.code == KeyCode::Home,
        "End" | "end" => key.code == KeyCode::End,
        "PageUp" | "pageup" => key.code == KeyCode::PageUp,
        "PageDown" | "pagedown" => key.code == KeyCode::PageDown,
        s => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => key.code == KeyCode::Char(c),
                _ => false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_matches_shortcut_simple_char() {
        let k = key(KeyCode::Char('q'));
        assert!(matches_shortcut(&k, &[String::from("q")]));
        assert!(!matches_shortcut(&k, &[String::from("w")]));
    }

    #[test]
    fn test_matches_shortcut_with_modifier() {
        let k = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert!(matches_shortcut(&k, &[String::from("Ctrl+u")]));
        assert!(!matches_shortcut(&k, &[String::from("u")]));
    }

    #[test]
    fn test_matches_shortcut_page_keys() {
        assert!(matches_shortcut(&key(KeyCode::PageUp), &[String::from("PageUp")]));
        assert!(!matches_shortcut(&key(KeyCode::PageUp), &[String::from("PageDown")]));
        assert!(matches_shortcut(&key(KeyCode::PageDown), &[String::from("pagedown")]));
    }

    #[test]
    fn test_matches_shortcut_multiple_keys() {
        let shortcuts = vec![String::from("Up"), String::from("k")];
        assert!(matches_shortcut(&key(KeyCode::Up), &shortcuts));
        assert!(matches_shortcut(&key(KeyCode::Char('k')), &shortcuts));
        assert!(!matches_shortcut(&key(KeyCode::Char('j')), &shortcuts));
    }

    #[test]
    fn test_plus_key_and_shifted_chars() {
        let plus = KeyEvent::new(KeyCode::Char('+'), KeyModifiers::SHIFT);
        assert!(matches_shortcut(&plus, &[String::from("+")]));
        let upper = KeyEvent::new(KeyCode::Char('S'), KeyModifiers::SHIFT);
        assert!(matches_shortcut(&upper, &[String::from("S")]));
        assert!(!matches_shortcut(&upper, &[String::from("s")]));
    }

    #[test]
    fn test_default_bindings_parse_from_toml() {
        let s = toml::to_string_pretty(&Shortcuts::default()).unwrap();
        let parsed: Shortcuts = toml::from_str(&s).unwrap();
        assert_eq!(parsed.form.submit, vec!["Enter", "s"]);
        assert_eq!(format_keys(&parsed.form.up), "Up/k");
    }
}
