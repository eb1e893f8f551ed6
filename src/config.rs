//! User configuration — keybindings, scroll tuning and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/homefeed/config.toml` (default
//! `~/.config/homefeed/config.toml`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::warn;

use crate::core::animation::{AnimationTiming, ENTER_MS, HIDE_MS, INITIAL_OFFSET_PX};
use crate::core::clock::Millis;
use crate::core::coordinator::{
    CoordinatorConfig, REVEAL_DELAY_MS, SNAP_TOLERANCE_PX, SUPPRESS_MS, THROTTLE_WAIT_MS,
};
use crate::core::throttle::ThrottleOptions;

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions on the home view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    PrevThread,
    NextThread,
    Open,
    Back,
    FocusSearch,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used when writing the config file).
    pub const ALL: &[Action] = &[
        Action::ScrollUp,
        Action::ScrollDown,
        Action::PageUp,
        Action::PageDown,
        Action::PrevThread,
        Action::NextThread,
        Action::Open,
        Action::Back,
        Action::FocusSearch,
        Action::Quit,
    ];

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::PrevThread => "prev_thread",
            Action::NextThread => "next_thread",
            Action::Open => "open",
            Action::Back => "back",
            Action::FocusSearch => "focus_search",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

const MODIFIER_MASK: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SHIFT);

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared (platform-specific modifiers like SUPER are ignored).
    pub fn matches(&self, event: KeyEvent) -> bool {
        self.code == event.code && (self.modifiers & MODIFIER_MASK) == (event.modifiers & MODIFIER_MASK)
    }

    /// Short label for the status bar (e.g. `"PgDn"`, `"Ctrl+c"`, `"/"`).
    pub fn display(&self) -> String {
        let key = match self.code {
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            _ => self.key_name(),
        };
        format!("{}{key}", self.modifier_prefix())
    }

    /// Serialise to config-file format (e.g. `"Alt+Up"`, `"Ctrl+c"`, `"q"`).
    fn to_config_string(&self) -> String {
        format!("{}{}", self.modifier_prefix(), self.key_name())
    }

    fn modifier_prefix(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s
    }

    fn key_name(&self) -> String {
        match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "Up".into(),
            KeyCode::Down => "Down".into(),
            KeyCode::Left => "Left".into(),
            KeyCode::Right => "Right".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PageUp".into(),
            KeyCode::PageDown => "PageDown".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        }
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"Space"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => KeyCode::F(s[1..].parse().ok()?),
            // Single characters keep their case: `J` and `j` differ.
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration: keybindings and coordinator tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Coalescing window for scroll decisions.
    pub throttle_ms: Millis,
    /// Decide on the first sample of a burst instead of only the last.
    pub leading_edge: bool,
    /// How long input is held back after a programmatic scroll.
    pub suppress_ms: Millis,
    pub snap_tolerance_px: u32,
    pub reveal_delay_ms: Millis,
    pub stagger_ms: Millis,
    /// Frame interval; also drives smooth scrolling.
    pub frame_ms: Millis,
    /// Snap between hero and feed at all.
    pub snap: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            throttle_ms: THROTTLE_WAIT_MS,
            leading_edge: false,
            suppress_ms: SUPPRESS_MS,
            snap_tolerance_px: SNAP_TOLERANCE_PX,
            reveal_delay_ms: REVEAL_DELAY_MS,
            stagger_ms: crate::core::animation::STAGGER_MS,
            frame_ms: 30,
            snap: true,
        }
    }
}

impl AppConfig {
    /// Built-in key bindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(Action::ScrollUp, vec![KeyBind::new(Up, n)]);
        m.insert(Action::ScrollDown, vec![KeyBind::new(Down, n)]);
        m.insert(Action::PageUp, vec![KeyBind::new(PageUp, n), KeyBind::new(Char('b'), n)]);
        m.insert(Action::PageDown, vec![KeyBind::new(PageDown, n), KeyBind::new(Char(' '), n)]);
        m.insert(Action::PrevThread, vec![KeyBind::new(Char('k'), n)]);
        m.insert(Action::NextThread, vec![KeyBind::new(Char('j'), n)]);
        m.insert(Action::Open, vec![KeyBind::new(Enter, n)]);
        m.insert(Action::Back, vec![KeyBind::new(Esc, n)]);
        m.insert(Action::FocusSearch, vec![KeyBind::new(Char('/'), n)]);
        m.insert(Action::Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: scroll | {}/{}: threads | {}: open | {}: ask | {}: quit",
            self.short_binding(Action::ScrollUp),
            self.short_binding(Action::ScrollDown),
            self.short_binding(Action::PrevThread),
            self.short_binding(Action::NextThread),
            self.short_binding(Action::Open),
            self.short_binding(Action::FocusSearch),
            self.short_binding(Action::Quit),
        )
    }

    pub fn coordinator_config(&self) -> CoordinatorConfig {
        CoordinatorConfig {
            throttle: ThrottleOptions {
                wait: self.throttle_ms,
                leading: self.leading_edge,
                trailing: true,
            },
            suppress_for: self.suppress_ms,
            snap_tolerance: self.snap_tolerance_px,
            reveal_delay: self.reveal_delay_ms,
            snapping: self.snap,
        }
    }

    pub fn animation_timing(&self) -> AnimationTiming {
        AnimationTiming {
            stagger: self.stagger_ms,
            enter: ENTER_MS,
            hide: HIDE_MS,
            initial_offset: INITIAL_OFFSET_PX,
        }
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents),
            Err(err) => {
                warn!(path = %path.display(), %err, "unreadable config, using defaults");
                Self::default()
            }
        }
    }

    /// Persist current config to the default location.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.serialise())?;
        Ok(())
    }

    fn parse(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            // Scroll tuning.  Out-of-range numbers are clamped so a typo can't
            // make the view unusable.
            match key {
                "throttle_ms" => {
                    if let Ok(v) = value.parse::<Millis>() {
                        config.throttle_ms = v.clamp(10, 500);
                    }
                    continue;
                }
                "leading_edge" => {
                    config.leading_edge = value == "true";
                    continue;
                }
                "suppress_ms" => {
                    if let Ok(v) = value.parse::<Millis>() {
                        config.suppress_ms = v.clamp(100, 3_000);
                    }
                    continue;
                }
                "snap_tolerance_px" => {
                    if let Ok(v) = value.parse::<u32>() {
                        config.snap_tolerance_px = v.min(200);
                    }
                    continue;
                }
                "reveal_delay_ms" => {
                    if let Ok(v) = value.parse::<Millis>() {
                        config.reveal_delay_ms = v.min(1_000);
                    }
                    continue;
                }
                "stagger_ms" => {
                    if let Ok(v) = value.parse::<Millis>() {
                        config.stagger_ms = v.min(500);
                    }
                    continue;
                }
                "frame_ms" => {
                    if let Ok(v) = value.parse::<Millis>() {
                        config.frame_ms = v.clamp(10, 100);
                    }
                    continue;
                }
                "snap" => {
                    config.snap = value != "false";
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                warn!(key, "unknown config key");
                continue;
            };

            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    /// Config-file text for the current settings.
    pub fn serialise(&self) -> String {
        let mut lines = vec![
            "# homefeed configuration".to_string(),
            String::new(),
            "# Scroll & animation".to_string(),
            format!("snap = {}", self.snap),
            format!("throttle_ms = {}", self.throttle_ms),
            format!("leading_edge = {}", self.leading_edge),
            format!("suppress_ms = {}", self.suppress_ms),
            format!("snap_tolerance_px = {}", self.snap_tolerance_px),
            format!("reveal_delay_ms = {}", self.reveal_delay_ms),
            format!("stagger_ms = {}", self.stagger_ms),
            format!("frame_ms = {}", self.frame_ms),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab,".to_string(),
            "#   Home, End, PageUp, PageDown, Space, F1-F12".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/homefeed/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("homefeed").join("config.toml")
}
