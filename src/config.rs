use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::types::TerminalContract;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub key_bindings: KeyBindings,
    /// Wall-clock time slice per preview iteration.
    pub frame_millis: u64,
    /// Upper bound of the frame multiplier.
    pub max_speed: usize,
    /// Frame rate recorded in exported files.
    pub fps: u32,
    pub columns: u16,
    pub rows: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub pause: String,
    pub pause_alt: String,
    pub speed_up: String,
    pub slow_down: String,
    pub step_forward: String,
    pub step_back: String,
    pub restart: String,
    pub quit: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            pause: "Space".into(),
            pause_alt: "k".into(),
            speed_up: "l".into(),
            slow_down: "j".into(),
            step_forward: "Right".into(),
            step_back: "Left".into(),
            restart: "Home".into(),
            quit: "q".into(),
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        PreviewConfig {
            key_bindings: KeyBindings::default(),
            frame_millis: 16,
            max_speed: 4,
            fps: 60,
            columns: 160,
            rows: 45,
        }
    }
}

impl PreviewConfig {
    /// Load from `$PANIM_CONFIG` or `~/.config/panim/config.json`.
    ///
    /// A missing file yields the defaults; an unreadable one is reported and
    /// also yields the defaults.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match std::fs::read_to_string(&config_path) {
            Ok(json) => Self::from_json(&json).unwrap_or_else(|e| {
                warn!(
                    "invalid config {} ({e}), using defaults",
                    config_path.display()
                );
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn contract(&self) -> TerminalContract {
        TerminalContract {
            width: self.columns.max(1),
            height: self.rows.max(1),
        }
    }

    fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("PANIM_CONFIG") {
            return PathBuf::from(path);
        }
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let mut path = PathBuf::from(home);
        path.push(".config");
        path.push("panim");
        path.push("config.json");
        path
    }
}

/// Check whether a crossterm `KeyEvent` matches a binding string from config.
pub fn matches_binding(binding: &str, event: &KeyEvent) -> bool {
    if let Some(rest) = binding.strip_prefix("Alt-") {
        return event.modifiers.contains(KeyModifiers::ALT) && matches_key(rest, event.code);
    }

    if let Some(rest) = binding.strip_prefix("Ctrl-") {
        return event.modifiers.contains(KeyModifiers::CONTROL) && matches_key(rest, event.code);
    }

    // Plain bindings like "k" must not fire on Ctrl-k or Alt-k.
    if event
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return false;
    }
    matches_key(binding, event.code)
}

fn matches_key(key: &str, code: KeyCode) -> bool {
    match key {
        "Right" => code == KeyCode::Right,
        "Left" => code == KeyCode::Left,
        "Up" => code == KeyCode::Up,
        "Down" => code == KeyCode::Down,
        "Enter" => code == KeyCode::Enter,
        "Esc" => code == KeyCode::Esc,
        "Space" => code == KeyCode::Char(' '),
        "Tab" => code == KeyCode::Tab,
        "Home" => code == KeyCode::Home,
        "End" => code == KeyCode::End,
        s => {
            if let Some(n) = s.strip_prefix('F').and_then(|rest| rest.parse::<u8>().ok()) {
                return code == KeyCode::F(n);
            }
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => code == KeyCode::Char(c),
                _ => false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg = PreviewConfig::from_json(r#"{ "max_speed": 8, "key_bindings": { "quit": "x" } }"#)
            .unwrap();
        assert_eq!(cfg.max_speed, 8);
        assert_eq!(cfg.frame_millis, 16);
        assert_eq!(cfg.key_bindings.quit, "x");
        assert_eq!(cfg.key_bindings.pause, "Space");
    }

    #[test]
    fn contract_is_never_empty() {
        let cfg = PreviewConfig {
            columns: 0,
            ..PreviewConfig::default()
        };
        assert_eq!(cfg.contract().width, 1);
        assert_eq!(cfg.contract().height, 45);
    }

    #[test]
    fn plain_bindings() {
        assert!(matches_binding("Space", &key(KeyCode::Char(' '), KeyModifiers::NONE)));
        assert!(matches_binding("k", &key(KeyCode::Char('k'), KeyModifiers::NONE)));
        assert!(matches_binding("F5", &key(KeyCode::F(5), KeyModifiers::NONE)));
        assert!(!matches_binding("k", &key(KeyCode::Char('k'), KeyModifiers::CONTROL)));
        assert!(!matches_binding("kk", &key(KeyCode::Char('k'), KeyModifiers::NONE)));
    }

    #[test]
    fn modifier_bindings() {
        assert!(matches_binding("Ctrl-c", &key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!matches_binding("Ctrl-c", &key(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(matches_binding("Alt-Enter", &key(KeyCode::Enter, KeyModifiers::ALT)));
    }
}
